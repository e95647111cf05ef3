// Model exports
pub mod domain;
pub mod provider;
pub mod requests;
pub mod responses;

pub use domain::{Animal, AgeGroup, BehaviorFlag, BehaviorFlags, FavoriteCounts, FilterSpec, Sex, SizeGroup, SpotlightUser};
pub use provider::{RawDetailResult, RawSearchResult, SearchRequest, ProviderFilter, RadiusFilter, FilterOperation};
pub use requests::{SearchAnimalsRequest, SpotlightQuery};
pub use responses::{SearchAnimalsResponse, SpotlightResponse, HealthResponse, ErrorResponse};

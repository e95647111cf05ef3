// Core algorithm exports
pub mod breed;
pub mod normalizer;
pub mod query;
pub mod ranking;

pub use breed::{normalize, tokens_for, matches, BreedFilter};
pub use normalizer::{to_animal_list, to_animal_detail, UrlSource};
pub use query::QueryBuilder;
pub use ranking::{least_favorited, Ranked};

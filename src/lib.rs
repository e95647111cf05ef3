//! PetSpot Algo - discovery and spotlight ranking for adoptable animals
//!
//! This library turns user filters into registry searches, normalizes the
//! registry's payloads, filters breeds locally with fuzzy token matching and
//! ranks a small spotlight of the least favorited animals.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{least_favorited, BreedFilter, QueryBuilder};
pub use error::DiscoveryError;
pub use models::{Animal, FavoriteCounts, FilterSpec, SpotlightUser, SearchAnimalsRequest, SearchAnimalsResponse};
pub use services::{AnimalRegistry, DiscoveryService, FavoriteCountSource, RegistryClient, SpotlightSelector};

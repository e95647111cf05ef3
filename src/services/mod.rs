// Service exports
pub mod discovery;
pub mod favorites;
pub mod registry;
pub mod spotlight;

pub use discovery::DiscoveryService;
pub use favorites::{FavoriteCountSource, FavoritesError, PostgresFavoriteStore, StaticFavoriteCounts};
pub use registry::{AnimalRegistry, RegistryClient, RegistryError};
pub use spotlight::SpotlightSelector;

use crate::core::{least_favorited, normalizer, QueryBuilder};
use crate::error::DiscoveryError;
use crate::models::{Animal, SpotlightUser};
use crate::services::{AnimalRegistry, FavoriteCountSource};
use futures::future::try_join_all;
use std::sync::Arc;

pub const DEFAULT_SPOTLIGHT_RADIUS_MILES: u32 = 100;
pub const DEFAULT_CANDIDATE_POOL: u32 = 100;

/// Selects the least favorited animals to feature
///
/// # Strategies
/// 1. Located (user has a postal code): rank a live photo-only search
///    around the user, fetched alongside the favorite counts.
/// 2. Global (no postal code): rank only animals that already have at
///    least one favorite, then fetch their details. Animals nobody has
///    favorited cannot appear here, unlike the located strategy.
///
/// Failures never reach the caller; they produce an empty spotlight.
#[derive(Clone)]
pub struct SpotlightSelector {
    registry: Arc<dyn AnimalRegistry>,
    favorites: Arc<dyn FavoriteCountSource>,
    query_builder: QueryBuilder,
    radius_miles: u32,
    candidate_pool: u32,
}

impl SpotlightSelector {
    pub fn new(
        registry: Arc<dyn AnimalRegistry>,
        favorites: Arc<dyn FavoriteCountSource>,
        query_builder: QueryBuilder,
        radius_miles: u32,
        candidate_pool: u32,
    ) -> Self {
        Self {
            registry,
            favorites,
            query_builder,
            radius_miles,
            candidate_pool,
        }
    }

    pub fn with_defaults(
        registry: Arc<dyn AnimalRegistry>,
        favorites: Arc<dyn FavoriteCountSource>,
    ) -> Self {
        Self::new(
            registry,
            favorites,
            QueryBuilder::default(),
            DEFAULT_SPOTLIGHT_RADIUS_MILES,
            DEFAULT_CANDIDATE_POOL,
        )
    }

    pub async fn select(&self, user: &SpotlightUser, limit: usize) -> Vec<Animal> {
        if limit == 0 {
            return Vec::new();
        }

        let result = match user.location() {
            Some(postal_code) => self.select_located(postal_code, limit).await,
            None => self.select_global(limit).await,
        };

        match result {
            Ok(animals) => {
                tracing::debug!("Spotlight selected {} animals", animals.len());
                animals
            }
            Err(e) => {
                tracing::warn!("Spotlight unavailable, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    async fn select_located(&self, postal_code: &str, limit: usize) -> Result<Vec<Animal>, DiscoveryError> {
        let request = self
            .query_builder
            .spotlight(postal_code, self.radius_miles, self.candidate_pool);

        let search = async {
            self.registry
                .search(&request)
                .await
                .map_err(DiscoveryError::from)
        };
        let counts = async {
            self.favorites
                .favorite_counts()
                .await
                .map_err(DiscoveryError::from)
        };

        let (raw, counts) = tokio::try_join!(search, counts)?;
        let candidates = normalizer::to_animal_list(&raw);

        tracing::debug!(
            "Ranking {} spotlight candidates near {}",
            candidates.len(),
            postal_code
        );

        Ok(least_favorited(&candidates, &counts, limit))
    }

    async fn select_global(&self, limit: usize) -> Result<Vec<Animal>, DiscoveryError> {
        let counts = self.favorites.favorite_counts().await?;

        // A zero count is not a favorite
        let ids: Vec<String> = counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, _)| id.clone())
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let selected = least_favorited(&ids, &counts, limit);

        let details = selected.iter().map(|id| async move {
            let raw = self.registry.get_by_id(id).await.map_err(DiscoveryError::from)?;
            normalizer::to_animal_detail(&raw)
        });

        try_join_all(details).await
    }
}

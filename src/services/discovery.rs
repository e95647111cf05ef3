use crate::core::{normalizer, BreedFilter, QueryBuilder};
use crate::error::DiscoveryError;
use crate::models::{Animal, FilterSpec, SpotlightUser};
use crate::services::{AnimalRegistry, SpotlightSelector};
use std::sync::Arc;

/// Entry point for callers of the discovery pipeline
///
/// # Pipeline
/// 1. Build the registry request (breed excluded)
/// 2. Search the registry
/// 3. Normalize the payload into animals
/// 4. Drop animals whose breed matches none of the selected breeds
#[derive(Clone)]
pub struct DiscoveryService {
    registry: Arc<dyn AnimalRegistry>,
    query_builder: QueryBuilder,
    spotlight: SpotlightSelector,
}

impl DiscoveryService {
    pub fn new(
        registry: Arc<dyn AnimalRegistry>,
        query_builder: QueryBuilder,
        spotlight: SpotlightSelector,
    ) -> Self {
        Self {
            registry,
            query_builder,
            spotlight,
        }
    }

    pub async fn search_animals(&self, filter: &FilterSpec) -> Result<Vec<Animal>, DiscoveryError> {
        let request = self.query_builder.build(filter);
        let raw = self.registry.search(&request).await?;
        let mut animals = normalizer::to_animal_list(&raw);

        tracing::debug!(
            "Registry returned {} of {:?} matching animals",
            animals.len(),
            raw.total_count()
        );

        if filter.has_breed_filter() {
            let before = animals.len();
            let breeds = BreedFilter::new(&filter.breeds);
            animals.retain(|animal| breeds.accepts(&animal.breed_string));

            tracing::debug!(
                "Breed filter kept {} of {} animals ({:?})",
                animals.len(),
                before,
                filter.breeds
            );
        }

        Ok(animals)
    }

    pub async fn get_animal(&self, id: &str) -> Result<Animal, DiscoveryError> {
        let raw = self.registry.get_by_id(id).await?;
        if raw.is_empty() {
            return Err(DiscoveryError::NotFound(format!("Animal {} not found", id)));
        }

        normalizer::to_animal_detail(&raw)
    }

    /// Never fails; see [`SpotlightSelector`]
    pub async fn get_spotlight(&self, user: &SpotlightUser, limit: usize) -> Vec<Animal> {
        self.spotlight.select(user, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawDetailResult, RawSearchResult, SearchRequest};
    use crate::services::{RegistryError, StaticFavoriteCounts};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRegistry {
        last_request: Mutex<Option<SearchRequest>>,
    }

    #[async_trait]
    impl AnimalRegistry for RecordingRegistry {
        async fn search(&self, request: &SearchRequest) -> Result<RawSearchResult, RegistryError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            Ok(serde_json::from_value(json!({
                "data": [
                    {"type": "animals", "id": "1", "attributes": {"breedString": "Beagle Mix"}},
                    {"type": "animals", "id": "2", "attributes": {"breedString": "Poodle"}},
                    {"type": "animals", "id": "3", "attributes": {}}
                ]
            }))
            .unwrap())
        }

        async fn get_by_id(&self, id: &str) -> Result<RawDetailResult, RegistryError> {
            match id {
                "1" => Ok(serde_json::from_value(json!({
                    "data": [{"type": "animals", "id": "1", "attributes": {"breedString": "Beagle Mix"}}]
                }))
                .unwrap()),
                "boom" => Err(RegistryError::ApiError {
                    status: 502,
                    message: "bad gateway".to_string(),
                }),
                _ => Ok(RawDetailResult::default()),
            }
        }
    }

    fn service(registry: Arc<RecordingRegistry>) -> DiscoveryService {
        let spotlight = SpotlightSelector::with_defaults(
            registry.clone(),
            Arc::new(StaticFavoriteCounts::default()),
        );
        DiscoveryService::new(registry, QueryBuilder::default(), spotlight)
    }

    #[tokio::test]
    async fn test_search_without_breeds_keeps_everything() {
        let registry = Arc::new(RecordingRegistry::default());
        let animals = service(registry.clone())
            .search_animals(&FilterSpec::default())
            .await
            .unwrap();

        assert_eq!(animals.len(), 3);
        assert_eq!(registry.last_request.lock().unwrap().as_ref().unwrap().limit, 150);
    }

    #[tokio::test]
    async fn test_search_filters_breeds_locally() {
        let registry = Arc::new(RecordingRegistry::default());
        let filter = FilterSpec {
            breeds: vec!["Beagle".to_string()],
            ..FilterSpec::default()
        };

        let animals = service(registry.clone()).search_animals(&filter).await.unwrap();

        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].id, "1");
        assert_eq!(registry.last_request.lock().unwrap().as_ref().unwrap().limit, 200);
    }

    #[tokio::test]
    async fn test_get_animal() {
        let svc = service(Arc::new(RecordingRegistry::default()));

        let animal = svc.get_animal("1").await.unwrap();
        assert_eq!(animal.breed_string, "Beagle Mix");

        assert!(matches!(svc.get_animal("missing").await, Err(DiscoveryError::NotFound(_))));
        assert!(matches!(
            svc.get_animal("boom").await,
            Err(DiscoveryError::Provider { status: 502, .. })
        ));
    }
}

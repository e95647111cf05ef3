use actix_web::{web, HttpResponse, Responder, ResponseError};
use validator::Validate;
use crate::models::{ErrorResponse, HealthResponse, SearchAnimalsRequest, SearchAnimalsResponse, SpotlightQuery, SpotlightResponse};
use crate::services::{DiscoveryService, PostgresFavoriteStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<DiscoveryService>,
    /// Favorites database, probed by the health check when present
    pub favorites_db: Option<Arc<PostgresFavoriteStore>>,
    pub spotlight_default_limit: usize,
    pub spotlight_max_limit: usize,
}

/// Configure all animal-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/animals/search", web::post().to(search_animals))
        .route("/animals/{id}", web::get().to(get_animal))
        .route("/spotlight", web::get().to(get_spotlight));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = match &state.favorites_db {
        Some(db) => db.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search animals endpoint
///
/// POST /api/v1/animals/search
///
/// Request body:
/// ```json
/// {
///   "postalCode": "01938",
///   "radiusMiles": 50,
///   "sex": "female",
///   "ageGroup": "young",
///   "sizeGroup": "medium",
///   "behaviorFlags": {"goodWithKids": true},
///   "breeds": ["Beagle"]
/// }
/// ```
async fn search_animals(
    state: web::Data<AppState>,
    req: web::Json<SearchAnimalsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let filter = req.into_inner().into_filter_spec();

    tracing::info!(
        "Searching animals near {:?} ({} mi, {} breeds)",
        filter.postal_code,
        filter.radius_miles,
        filter.breeds.len()
    );

    match state.discovery.search_animals(&filter).await {
        Ok(animals) => {
            tracing::info!("Returning {} animals", animals.len());
            HttpResponse::Ok().json(SearchAnimalsResponse {
                total_results: animals.len(),
                animals,
            })
        }
        Err(e) => {
            tracing::error!("Animal search failed: {}", e);
            e.error_response()
        }
    }
}

/// Animal detail endpoint
///
/// GET /api/v1/animals/{id}
async fn get_animal(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match state.discovery.get_animal(&id).await {
        Ok(animal) => HttpResponse::Ok().json(animal),
        Err(e) => {
            tracing::warn!("Failed to fetch animal {}: {}", id, e);
            e.error_response()
        }
    }
}

/// Spotlight endpoint
///
/// GET /api/v1/spotlight?postalCode={postalCode}&limit={limit}
///
/// Always answers 200; an unavailable spotlight is an empty list.
async fn get_spotlight(
    state: web::Data<AppState>,
    query: web::Query<SpotlightQuery>,
) -> impl Responder {
    let limit = query
        .limit
        .unwrap_or(state.spotlight_default_limit)
        .min(state.spotlight_max_limit);

    let animals = state.discovery.get_spotlight(&query.user(), limit).await;

    HttpResponse::Ok().json(SpotlightResponse { animals })
}

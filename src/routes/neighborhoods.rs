use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{average_match, BrowseOptions, BudgetFilter, SortOrder};
use crate::models::{
    BrowseQuery, BrowseResponse, HealthResponse, NeighborhoodDetailResponse, TopMatchesQuery,
    TopMatchesResponse, UserPreferences, UserQuery,
};
use super::{error_response, store_error_response, AppState};

/// Configure catalog and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/neighborhoods", web::get().to(browse_neighborhoods))
        .route("/neighborhoods/{id}", web::get().to(neighborhood_detail))
        .route("/matches/top", web::get().to(top_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Preferences of the user named in the request, if any
///
/// No user id means an anonymous browse. An unknown id is an error response.
async fn preferences_for(
    state: &AppState,
    user_id: Option<&str>,
) -> Result<Option<UserPreferences>, HttpResponse> {
    let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    state
        .store
        .load_preferences(user_id)
        .await
        .map_err(|e| store_error_response(&e))
}

/// Browse the catalog
///
/// GET /api/v1/neighborhoods?userId=&search=&budget=20000-40000&sort=match
///
/// Results carry a `matchScore` only when the user has saved preferences.
async fn browse_neighborhoods(
    state: web::Data<AppState>,
    query: web::Query<BrowseQuery>,
) -> impl Responder {
    let budget = match query.budget.as_deref().unwrap_or("all").parse::<BudgetFilter>() {
        Ok(budget) => budget,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_budget", e.to_string()),
    };
    let sort = match query.sort.as_deref().unwrap_or("match").parse::<SortOrder>() {
        Ok(sort) => sort,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_sort", e.to_string()),
    };

    let preferences = match preferences_for(&state, query.user_id.as_deref()).await {
        Ok(preferences) => preferences,
        Err(response) => return response,
    };

    let options = BrowseOptions {
        search: query.search.clone().unwrap_or_default(),
        budget,
        sort,
    };

    let neighborhoods = state
        .matcher
        .browse(state.catalog.list(), preferences.as_ref(), &options);

    tracing::debug!(
        "Browse returned {} of {} neighborhoods (personalized: {})",
        neighborhoods.len(),
        state.catalog.len(),
        preferences.is_some()
    );

    HttpResponse::Ok().json(BrowseResponse {
        total_results: neighborhoods.len(),
        personalized: preferences.is_some(),
        neighborhoods,
    })
}

/// Neighborhood detail with optional match breakdown
///
/// GET /api/v1/neighborhoods/{id}?userId=
async fn neighborhood_detail(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    let id = path.into_inner();

    let Some(neighborhood) = state.catalog.get_by_id(&id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            "neighborhood_not_found",
            format!("No neighborhood with id {}", id),
        );
    };

    let preferences = match preferences_for(&state, query.user_id.as_deref()).await {
        Ok(preferences) => preferences,
        Err(response) => return response,
    };

    let breakdown = preferences
        .as_ref()
        .map(|preferences| state.matcher.score_neighborhood(preferences, neighborhood));

    HttpResponse::Ok().json(NeighborhoodDetailResponse {
        neighborhood: neighborhood.clone(),
        match_score: breakdown.map(|breakdown| breakdown.total),
        breakdown,
    })
}

/// Top matches for a user
///
/// GET /api/v1/matches/top?userId={userId}&limit=3
async fn top_matches(
    state: web::Data<AppState>,
    query: web::Query<TopMatchesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    // Cap limit so a single request cannot ask for more than configured
    let limit = query
        .limit
        .unwrap_or(state.matching.top_matches)
        .min(state.matching.max_limit);

    let preferences = match preferences_for(&state, Some(&query.user_id)).await {
        Ok(Some(preferences)) => preferences,
        Ok(None) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "preferences_required",
                "Save your preferences to get personalized recommendations",
            );
        }
        Err(response) => return response,
    };

    let matches = state
        .matcher
        .top_matches(state.catalog.list(), &preferences, limit);

    tracing::info!(
        "Returning {} top matches for user {}",
        matches.len(),
        query.user_id
    );

    HttpResponse::Ok().json(TopMatchesResponse {
        average_match: average_match(&matches),
        catalog_size: state.catalog.len(),
        matches,
    })
}

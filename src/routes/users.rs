use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{LoginRequest, RegisterRequest, UserPreferences, UserResponse};
use super::{error_response, store_error_response, AppState};

/// Configure user directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users/register", web::post().to(register))
        .route("/users/login", web::post().to(login))
        .route("/users/{id}", web::get().to(get_user))
        .route("/users/{id}/preferences", web::get().to(get_preferences))
        .route("/users/{id}/preferences", web::put().to(save_preferences));
}

/// Register endpoint
///
/// POST /api/v1/users/register
///
/// Request body:
/// ```json
/// {
///   "email": "string",
///   "password": "string",
///   "name": "string"
/// }
/// ```
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for register request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    match state.store.register(&req.email, &req.password, &req.name).await {
        Ok(account) => HttpResponse::Created().json(UserResponse::from(account)),
        Err(e) => store_error_response(&e),
    }
}

/// Login endpoint
///
/// POST /api/v1/users/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    match state.store.login(&req.email, &req.password).await {
        Ok(account) => {
            tracing::info!("User {} logged in", account.id);
            HttpResponse::Ok().json(UserResponse::from(account))
        }
        Err(e) => {
            tracing::info!("Login failed for {}", req.email);
            store_error_response(&e)
        }
    }
}

/// GET /api/v1/users/{id}
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.store.get_user(&path).await {
        Ok(account) => HttpResponse::Ok().json(UserResponse::from(account)),
        Err(e) => store_error_response(&e),
    }
}

/// GET /api/v1/users/{id}/preferences
///
/// `preferences` is null until the user saves some.
async fn get_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let user_id = path.into_inner();

    match state.store.load_preferences(&user_id).await {
        Ok(preferences) => HttpResponse::Ok().json(serde_json::json!({
            "userId": user_id,
            "hasPreferences": preferences.is_some(),
            "preferences": preferences,
        })),
        Err(e) => store_error_response(&e),
    }
}

/// PUT /api/v1/users/{id}/preferences
///
/// Replaces the user's preferences. Priorities outside 1-10 are rejected
/// while the body is parsed; an inverted budget range fails validation.
async fn save_preferences(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UserPreferences>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors.to_string());
    }

    let user_id = path.into_inner();

    match state.store.save_preferences(&user_id, req.into_inner()).await {
        Ok(account) => HttpResponse::Ok().json(UserResponse::from(account)),
        Err(e) => store_error_response(&e),
    }
}

use axum::{
    Extension, Json, Router,
    extract::{
        DefaultBodyLimit, State,
        multipart::{Multipart, MultipartError, MultipartRejection},
    },
    middleware as axum_middleware,
    routing::post,
};
use std::sync::Arc;

use crate::services::recipe_submission::{self, RecipeSubmission};
use crate::web::middleware::auth;
use crate::web::models::AuthenticatedUser;
use crate::web::models::recipe_models::{ImageUpload, RecipeForm, RecipeResponse};
use crate::web::{AppError, AppState};

/// Ceiling for a whole submission, image included.
pub const MAX_UPLOAD_SIZE: usize = 10 << 20;

const IMAGE_FIELD: &str = "image";

// --- Route Handlers ---

async fn create_recipe_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RecipeResponse>, AppError> {
    let submission = read_submission(multipart).await?;

    let recipe = recipe_submission::create_recipe(
        &app_state.db_pool,
        app_state.uploader.as_ref(),
        authenticated_user.id,
        submission,
    )
    .await?;

    Ok(Json(RecipeResponse {
        message: "Recipe Created".to_string(),
        recipe,
    }))
}

async fn update_recipe_handler(
    Extension(authenticated_user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RecipeResponse>, AppError> {
    let submission = read_submission(multipart).await?;

    let recipe = recipe_submission::update_recipe(
        &app_state.db_pool,
        app_state.uploader.as_ref(),
        authenticated_user.id,
        submission,
    )
    .await?;

    Ok(Json(RecipeResponse {
        message: "Recipe Updated".to_string(),
        recipe,
    }))
}

async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

/// Collects the text fields and the `image` file part of a submission.
async fn read_submission(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<RecipeSubmission, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::MissingOrInvalidFile(e.body_text()))?;

    let mut form = RecipeForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_file)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            if field.file_name().is_none() {
                return Err(AppError::MissingOrInvalidFile(
                    "The image field must be a file".to_string(),
                ));
            }
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(invalid_file)?;
            image = Some(ImageUpload { bytes, content_type });
        } else {
            let value = field.text().await.map_err(invalid_file)?;
            form.set_field(&name, value);
        }
    }

    let image = image.ok_or_else(|| {
        AppError::MissingOrInvalidFile("No image was attached".to_string())
    })?;

    Ok(RecipeSubmission { image, form })
}

fn invalid_file(err: MultipartError) -> AppError {
    AppError::MissingOrInvalidFile(err.body_text())
}

// --- Router ---

/// Only POST reaches the auth layer; other methods get a 405 envelope without
/// the body or token being looked at.
pub fn create_recipe_router(app_state: Arc<AppState>) -> Router<Arc<AppState>> {
    let auth_layer = axum_middleware::from_fn_with_state(app_state, auth::auth);

    Router::new()
        .route(
            "/create",
            post(create_recipe_handler)
                .route_layer(auth_layer.clone())
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/update",
            post(update_recipe_handler)
                .route_layer(auth_layer)
                .fallback(method_not_allowed_handler),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
}

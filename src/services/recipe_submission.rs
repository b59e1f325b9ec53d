//! Create and update flows for recipes submitted with an image.
//!
//! Both flows encode the image, push it to the image host, and only then
//! touch the database. A database failure after a successful upload leaves
//! the remote image in place.

use sea_orm::DbConn;
use tracing::{error, info, warn};

use crate::db::models::{NewRecipe, Recipe};
use crate::db::services::{RecipeService, RecipeServiceError};
use crate::services::image_encoder::encode_data_uri;
use crate::services::image_uploader::{ImageUploader, UploadedImage};
use crate::web::error::AppError;
use crate::web::models::recipe_models::{ImageUpload, RecipeForm};

#[derive(Debug, Clone)]
pub struct RecipeSubmission {
    pub image: ImageUpload,
    pub form: RecipeForm,
}

pub async fn create_recipe(
    db: &DbConn,
    uploader: &dyn ImageUploader,
    user_id: i32,
    submission: RecipeSubmission,
) -> Result<Recipe, AppError> {
    let uploaded = upload_image(uploader, &submission.image, user_id).await?;
    let form = submission.form;

    let new_recipe = NewRecipe {
        user_id,
        recipe_name: form.recipe_name,
        description: form.description,
        difficulty: form.difficulty,
        procedure: form.procedure,
        img_url: uploaded.secure_url,
        img_public_id: uploaded.public_id,
    };

    let recipe = RecipeService::create_recipe(db, new_recipe)
        .await
        .map_err(|e| persistence_error(e, user_id))?;

    info!(recipe_id = recipe.id, user_id, "Recipe created.");
    Ok(recipe)
}

/// Overwrites every field of the recipe named by `recipe_id`, including its
/// owner, which becomes the caller.
pub async fn update_recipe(
    db: &DbConn,
    uploader: &dyn ImageUploader,
    user_id: i32,
    submission: RecipeSubmission,
) -> Result<Recipe, AppError> {
    let uploaded = upload_image(uploader, &submission.image, user_id).await?;
    let form = submission.form;

    let mut recipe = RecipeService::find_recipe_by_id(db, form.recipe_id)
        .await
        .map_err(|e| persistence_error(e, user_id))?;

    if recipe.user_id != user_id {
        warn!(
            recipe_id = recipe.id,
            previous_owner = recipe.user_id,
            user_id,
            "Recipe ownership transferred by update."
        );
    }

    recipe.user_id = user_id;
    recipe.recipe_name = form.recipe_name;
    recipe.description = form.description;
    recipe.difficulty = form.difficulty;
    recipe.procedure = form.procedure;
    recipe.img_url = uploaded.secure_url;
    recipe.img_public_id = uploaded.public_id;

    let recipe = RecipeService::update_recipe(db, recipe)
        .await
        .map_err(|e| persistence_error(e, user_id))?;

    info!(recipe_id = recipe.id, user_id, "Recipe updated.");
    Ok(recipe)
}

async fn upload_image(
    uploader: &dyn ImageUploader,
    image: &ImageUpload,
    user_id: i32,
) -> Result<UploadedImage, AppError> {
    let data_uri = encode_data_uri(&image.bytes, image.content_type.as_deref());

    uploader.upload(&data_uri).await.map_err(|e| {
        warn!(error = %e, user_id, size = image.bytes.len(), "Image upload failed.");
        AppError::from(e)
    })
}

fn persistence_error(err: RecipeServiceError, user_id: i32) -> AppError {
    match err {
        RecipeServiceError::NotFound(id) => {
            AppError::NotFound(format!("Recipe {id} not found"))
        }
        RecipeServiceError::DbErr(e) => {
            error!(error = %e, user_id, "Failed to persist recipe.");
            AppError::DatabaseError(e.to_string())
        }
    }
}

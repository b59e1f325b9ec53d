use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbConn, DbErr, EntityTrait, Set};

use crate::db::entities::{prelude::Recipe as RecipeEntity, recipe};
use crate::db::models::{NewRecipe, Recipe};

#[derive(Debug, thiserror::Error)]
pub enum RecipeServiceError {
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),
    #[error("Recipe not found: {0}")]
    NotFound(i32),
}

pub struct RecipeService;

impl RecipeService {
    pub async fn create_recipe(
        db: &DbConn,
        new_recipe: NewRecipe,
    ) -> Result<Recipe, RecipeServiceError> {
        let now = Utc::now();
        let active = recipe::ActiveModel {
            user_id: Set(new_recipe.user_id),
            recipe_name: Set(new_recipe.recipe_name),
            description: Set(new_recipe.description),
            difficulty: Set(new_recipe.difficulty),
            procedure: Set(new_recipe.procedure),
            img_url: Set(new_recipe.img_url),
            img_public_id: Set(new_recipe.img_public_id),
            likes: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(active.insert(db).await?.into())
    }

    pub async fn find_recipe_by_id(
        db: &DbConn,
        recipe_id: i32,
    ) -> Result<Recipe, RecipeServiceError> {
        let model = RecipeEntity::find_by_id(recipe_id)
            .one(db)
            .await?
            .ok_or(RecipeServiceError::NotFound(recipe_id))?;
        Ok(model.into())
    }

    /// Replaces every column of the row identified by `recipe.id`.
    /// Concurrent updates are last-writer-wins.
    pub async fn update_recipe(db: &DbConn, recipe: Recipe) -> Result<Recipe, RecipeServiceError> {
        let recipe_id = recipe.id;
        let active = recipe::ActiveModel {
            id: Set(recipe.id),
            user_id: Set(recipe.user_id),
            recipe_name: Set(recipe.recipe_name),
            description: Set(recipe.description),
            difficulty: Set(recipe.difficulty),
            procedure: Set(recipe.procedure),
            img_url: Set(recipe.img_url),
            img_public_id: Set(recipe.img_public_id),
            likes: Set(recipe.likes),
            created_at: Set(recipe.created_at),
            updated_at: Set(Utc::now()),
        };

        match active.update(db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(RecipeServiceError::NotFound(recipe_id))
            }
            Err(e) => Err(e.into()),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::entities::recipe;

/// A user-submitted recipe together with its hosted image.
/// Corresponds to the `recipes` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub id: i32,
    pub user_id: i32,
    pub recipe_name: String,
    pub description: String,
    pub difficulty: i32,
    pub procedure: String,
    pub img_url: String,
    #[serde(skip)]
    pub img_public_id: String,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a recipe that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub user_id: i32,
    pub recipe_name: String,
    pub description: String,
    pub difficulty: i32,
    pub procedure: String,
    pub img_url: String,
    pub img_public_id: String,
}

impl From<recipe::Model> for Recipe {
    fn from(model: recipe::Model) -> Self {
        Recipe {
            id: model.id,
            user_id: model.user_id,
            recipe_name: model.recipe_name,
            description: model.description,
            difficulty: model.difficulty,
            procedure: model.procedure,
            img_url: model.img_url,
            img_public_id: model.img_public_id,
            likes: model.likes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

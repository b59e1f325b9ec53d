use bytes::Bytes;
use serde::Serialize;

use crate::db::models::Recipe;

/// The file part of a recipe submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

/// Form fields shared by the create and update endpoints.
///
/// Numeric fields are parsed leniently: surrounding whitespace is trimmed and
/// anything that is still not an integer becomes 0.
#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    pub recipe_name: String,
    pub description: String,
    pub difficulty: i32,
    pub procedure: String,
    pub recipe_id: i32,
}

impl RecipeForm {
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "recipe_name" => self.recipe_name = value,
            "description" => self.description = value,
            "difficulty" => self.difficulty = parse_lenient(&value),
            "procedure" => self.procedure = value,
            "recipe_id" => self.recipe_id = parse_lenient(&value),
            _ => {}
        }
    }
}

fn parse_lenient(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub message: String,
    pub recipe: Recipe,
}

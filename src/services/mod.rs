pub mod auth_service;
pub mod image_encoder;
pub mod image_uploader;
pub mod recipe_submission;

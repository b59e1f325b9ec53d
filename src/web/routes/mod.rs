pub mod recipe_routes;

//! SeaORM entities mapping to database tables.

pub mod recipe;

pub mod prelude {
    pub use super::recipe::Entity as Recipe;
}

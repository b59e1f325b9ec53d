use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::db::entities::recipe;

pub mod entities;
pub mod models;
pub mod services;

pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url.to_owned());
    opt.max_connections(10).sqlx_logging(false);
    Database::connect(opt).await
}

/// Creates the `recipes` table from the entity definition when it is missing.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(recipe::Entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    info!("Database schema is ready.");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn connect_in_memory() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    // One connection, otherwise every pooled connection sees its own empty database.
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    ensure_schema(&db).await.unwrap();
    db
}

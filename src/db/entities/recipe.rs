use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub recipe_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub difficulty: i32,
    #[sea_orm(column_type = "Text")]
    pub procedure: String,
    pub img_url: String,
    pub img_public_id: String,
    #[sea_orm(default_value = 0)]
    pub likes: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

// Users live with the auth service; `user_id` is not enforced as a foreign key here.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

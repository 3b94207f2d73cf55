//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub requires_player_id: bool,
    pub active: bool,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::package::Entity")]
    Packages,
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain product with its packages attached.
    pub fn into_product(self, packages: Vec<super::package::Model>) -> Product {
        let mut product = Product {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            banner_url: self.banner_url,
            requires_player_id: self.requires_player_id,
            active: self.active,
            sort_order: self.sort_order,
            packages: packages.into_iter().map(Into::into).collect(),
        };
        product.sort_packages();
        product
    }
}

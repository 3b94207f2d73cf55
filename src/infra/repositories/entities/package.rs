//! Package database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Package;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub price_usd: Decimal,
    pub price_ves: Option<Decimal>,
    pub price_usdm: Option<Decimal>,
    pub price_cop: Option<Decimal>,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Package {
    fn from(model: Model) -> Self {
        Package {
            id: model.id,
            product_id: model.product_id,
            name: model.name,
            price_usd: model.price_usd,
            price_ves: model.price_ves,
            price_usdm: model.price_usdm,
            price_cop: model.price_cop,
            sort_order: model.sort_order,
        }
    }
}

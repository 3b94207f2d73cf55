//! Payment submission entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub reference: String,
    pub final_price: Decimal,
    pub currency: String,
    pub payment_method: String,
    pub email: String,
    pub whatsapp_number: Option<String>,
    pub method_details: Json,
    pub status: String,
    pub chat_id: Option<String>,
    pub chat_message_id: Option<i64>,
    pub receipt_filename: Option<String>,
    pub google_id: Option<String>,
    pub game: String,
    pub package_name: String,
    pub player_id: Option<String>,
    pub cart_items: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

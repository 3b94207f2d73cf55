//! Site configuration entity (single row).

use sea_orm::entity::prelude::*;

use crate::domain::SiteConfig;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "site_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub dark_bg: Option<String>,
    pub card_bg: Option<String>,
    pub primary_blue: Option<String>,
    pub accent_green: Option<String>,
    pub text_color: Option<String>,
    pub secondary_text: Option<String>,
    pub input_bg: Option<String>,
    pub button_gradient: Option<String>,
    pub hover_blue: Option<String>,
    pub selected_item_gradient: Option<String>,
    pub shadow_dark: Option<String>,
    pub border_color: Option<String>,
    pub shadow_light: Option<String>,
    pub button_text_color: Option<String>,
    pub tasa_dolar: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SiteConfig {
    fn from(model: Model) -> Self {
        SiteConfig {
            dark_bg: model.dark_bg,
            card_bg: model.card_bg,
            primary_blue: model.primary_blue,
            accent_green: model.accent_green,
            text_color: model.text_color,
            secondary_text: model.secondary_text,
            input_bg: model.input_bg,
            button_gradient: model.button_gradient,
            hover_blue: model.hover_blue,
            selected_item_gradient: model.selected_item_gradient,
            shadow_dark: model.shadow_dark,
            border_color: model.border_color,
            shadow_light: model.shadow_light,
            button_text_color: model.button_text_color,
            exchange_rate: model.tasa_dolar,
        }
    }
}

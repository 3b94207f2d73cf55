//! Migration: Create payment_transactions and site_config tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PaymentTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::Reference)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentTransactions::FinalPrice)
                            .decimal_len(14, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTransactions::Currency).string().not_null())
                    .col(ColumnDef::new(PaymentTransactions::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(PaymentTransactions::Email).string().not_null())
                    .col(ColumnDef::new(PaymentTransactions::WhatsappNumber).string().null())
                    .col(
                        ColumnDef::new(PaymentTransactions::MethodDetails)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTransactions::Status).string().not_null())
                    .col(ColumnDef::new(PaymentTransactions::ChatId).string().null())
                    .col(ColumnDef::new(PaymentTransactions::ChatMessageId).big_integer().null())
                    .col(ColumnDef::new(PaymentTransactions::ReceiptFilename).string().null())
                    .col(ColumnDef::new(PaymentTransactions::GoogleId).string().null())
                    .col(ColumnDef::new(PaymentTransactions::Game).string().not_null())
                    .col(ColumnDef::new(PaymentTransactions::PackageName).string().not_null())
                    .col(ColumnDef::new(PaymentTransactions::PlayerId).string().null())
                    .col(ColumnDef::new(PaymentTransactions::CartItems).json_binary().not_null())
                    .col(
                        ColumnDef::new(PaymentTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_transactions_status")
                    .table(PaymentTransactions::Table)
                    .col(PaymentTransactions::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SiteConfig::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SiteConfig::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(SiteConfig::DarkBg).string().null())
                    .col(ColumnDef::new(SiteConfig::CardBg).string().null())
                    .col(ColumnDef::new(SiteConfig::PrimaryBlue).string().null())
                    .col(ColumnDef::new(SiteConfig::AccentGreen).string().null())
                    .col(ColumnDef::new(SiteConfig::TextColor).string().null())
                    .col(ColumnDef::new(SiteConfig::SecondaryText).string().null())
                    .col(ColumnDef::new(SiteConfig::InputBg).string().null())
                    .col(ColumnDef::new(SiteConfig::ButtonGradient).string().null())
                    .col(ColumnDef::new(SiteConfig::HoverBlue).string().null())
                    .col(ColumnDef::new(SiteConfig::SelectedItemGradient).string().null())
                    .col(ColumnDef::new(SiteConfig::ShadowDark).string().null())
                    .col(ColumnDef::new(SiteConfig::BorderColor).string().null())
                    .col(ColumnDef::new(SiteConfig::ShadowLight).string().null())
                    .col(ColumnDef::new(SiteConfig::ButtonTextColor).string().null())
                    .col(ColumnDef::new(SiteConfig::TasaDolar).decimal_len(12, 2).null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteConfig::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PaymentTransactions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PaymentTransactions {
    Table,
    Id,
    Reference,
    FinalPrice,
    Currency,
    PaymentMethod,
    Email,
    WhatsappNumber,
    MethodDetails,
    Status,
    ChatId,
    ChatMessageId,
    ReceiptFilename,
    GoogleId,
    Game,
    PackageName,
    PlayerId,
    CartItems,
    CreatedAt,
}

#[derive(Iden)]
enum SiteConfig {
    Table,
    Id,
    DarkBg,
    CardBg,
    PrimaryBlue,
    AccentGreen,
    TextColor,
    SecondaryText,
    InputBg,
    ButtonGradient,
    HoverBlue,
    SelectedItemGradient,
    ShadowDark,
    BorderColor,
    ShadowLight,
    ButtonTextColor,
    TasaDolar,
}

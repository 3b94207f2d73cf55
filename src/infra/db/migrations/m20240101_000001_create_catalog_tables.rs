//! Migration: Create products and packages tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Products::Description).text().null())
                    .col(ColumnDef::new(Products::BannerUrl).string().null())
                    .col(
                        ColumnDef::new(Products::RequiresPlayerId)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Products::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Products::SortOrder).integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_active_sort_order")
                    .table(Products::Table)
                    .col(Products::Active)
                    .col(Products::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Packages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Packages::ProductId).integer().not_null())
                    .col(ColumnDef::new(Packages::Name).string().not_null())
                    .col(ColumnDef::new(Packages::PriceUsd).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Packages::PriceVes).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Packages::PriceUsdm).decimal_len(12, 2).null())
                    .col(ColumnDef::new(Packages::PriceCop).decimal_len(14, 2).null())
                    .col(ColumnDef::new(Packages::SortOrder).integer().not_null().default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_packages_product_id")
                            .from(Packages::Table, Packages::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_packages_product_id")
                    .table(Packages::Table)
                    .col(Packages::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Packages::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Slug,
    Description,
    BannerUrl,
    RequiresPlayerId,
    Active,
    SortOrder,
}

#[derive(Iden)]
enum Packages {
    Table,
    Id,
    ProductId,
    Name,
    PriceUsd,
    PriceVes,
    PriceUsdm,
    PriceCop,
    SortOrder,
}

//! Create category and subcategory tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create category table
        manager
            .create_table(
                Table::create()
                    .table(Category::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Category::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Category::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Category::Slug).string_len(128).not_null().unique_key())
                    .col(ColumnDef::new(Category::Description).text())
                    .col(ColumnDef::new(Category::Position).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Category::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: position (navigation ordering)
        manager
            .create_index(
                Index::create()
                    .name("idx_category_position")
                    .table(Category::Table)
                    .col(Category::Position)
                    .to_owned(),
            )
            .await?;

        // Create subcategory table
        manager
            .create_table(
                Table::create()
                    .table(Subcategory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subcategory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subcategory::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Subcategory::Name).string_len(128).not_null())
                    .col(ColumnDef::new(Subcategory::Slug).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Subcategory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subcategory_category")
                            .from(Subcategory::Table, Subcategory::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (category_id, slug)
        manager
            .create_index(
                Index::create()
                    .name("idx_subcategory_category_slug")
                    .table(Subcategory::Table)
                    .col(Subcategory::CategoryId)
                    .col(Subcategory::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subcategory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Position,
    CreatedAt,
}

#[derive(Iden)]
enum Subcategory {
    Table,
    Id,
    CategoryId,
    Name,
    Slug,
    CreatedAt,
}

//! Create article and `article_tag` tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create article table
        manager
            .create_table(
                Table::create()
                    .table(Article::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Article::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Article::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Article::Slug).string_len(512).not_null().unique_key())
                    .col(ColumnDef::new(Article::Summary).text())
                    .col(ColumnDef::new(Article::Body).text().not_null())
                    .col(ColumnDef::new(Article::CategoryId).big_integer().not_null())
                    .col(ColumnDef::new(Article::SubcategoryId).big_integer())
                    .col(ColumnDef::new(Article::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(Article::Featured).boolean().not_null().default(false))
                    .col(ColumnDef::new(Article::Published).boolean().not_null().default(false))
                    .col(ColumnDef::new(Article::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Article::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Article::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_category")
                            .from(Article::Table, Article::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_subcategory")
                            .from(Article::Table, Article::SubcategoryId)
                            .to(Subcategory::Table, Subcategory::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: category_id (section listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_article_category_id")
                    .table(Article::Table)
                    .col(Article::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Index: (published, published_at) for public listings
        manager
            .create_index(
                Index::create()
                    .name("idx_article_published")
                    .table(Article::Table)
                    .col(Article::Published)
                    .col(Article::PublishedAt)
                    .to_owned(),
            )
            .await?;

        // Create article_tag join table
        manager
            .create_table(
                Table::create()
                    .table(ArticleTag::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ArticleTag::ArticleId).big_integer().not_null())
                    .col(ColumnDef::new(ArticleTag::TagId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ArticleTag::ArticleId)
                            .col(ArticleTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_tag_article")
                            .from(ArticleTag::Table, ArticleTag::ArticleId)
                            .to(Article::Table, Article::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_article_tag_tag")
                            .from(ArticleTag::Table, ArticleTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: tag_id (tag listings)
        manager
            .create_index(
                Index::create()
                    .name("idx_article_tag_tag_id")
                    .table(ArticleTag::Table)
                    .col(ArticleTag::TagId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArticleTag::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Article::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Article {
    Table,
    Id,
    Title,
    Slug,
    Summary,
    Body,
    CategoryId,
    SubcategoryId,
    ImageUrl,
    Featured,
    Published,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ArticleTag {
    Table,
    ArticleId,
    TagId,
}

#[derive(Iden)]
enum Category {
    Table,
    Id,
}

#[derive(Iden)]
enum Subcategory {
    Table,
    Id,
}

#[derive(Iden)]
enum Tag {
    Table,
    Id,
}

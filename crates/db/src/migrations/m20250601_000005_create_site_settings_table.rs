//! Create `site_settings` table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SiteSettings::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SiteSettings::SiteName).string_len(256).not_null())
                    .col(ColumnDef::new(SiteSettings::Tagline).string_len(512))
                    .col(ColumnDef::new(SiteSettings::Description).text())
                    .col(ColumnDef::new(SiteSettings::LogoUrl).string_len(1024))
                    .col(ColumnDef::new(SiteSettings::ContactEmail).string_len(256))
                    .col(ColumnDef::new(SiteSettings::FooterText).text())
                    .col(
                        ColumnDef::new(SiteSettings::ArticlesPerPage)
                            .integer()
                            .not_null()
                            .default(20),
                    )
                    .col(
                        ColumnDef::new(SiteSettings::TickerEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(SiteSettings::SocialLinks)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SiteSettings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(SiteSettings::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteSettings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SiteSettings {
    Table,
    Id,
    SiteName,
    Tagline,
    Description,
    LogoUrl,
    ContactEmail,
    FooterText,
    ArticlesPerPage,
    TickerEnabled,
    SocialLinks,
    CreatedAt,
    UpdatedAt,
}

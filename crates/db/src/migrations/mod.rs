//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_category_tables;
mod m20250601_000002_create_tag_table;
mod m20250601_000003_create_article_tables;
mod m20250601_000004_create_poll_tables;
mod m20250601_000005_create_site_settings_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_category_tables::Migration),
            Box::new(m20250601_000002_create_tag_table::Migration),
            Box::new(m20250601_000003_create_article_tables::Migration),
            Box::new(m20250601_000004_create_poll_tables::Migration),
            Box::new(m20250601_000005_create_site_settings_table::Migration),
        ]
    }
}

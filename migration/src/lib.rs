pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_projects_table;
mod m20240101_000002_create_sources_table;
mod m20240101_000003_create_google_oauth_states_table;
mod m20240101_000004_create_call_records_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_projects_table::Migration),
            Box::new(m20240101_000002_create_sources_table::Migration),
            Box::new(m20240101_000003_create_google_oauth_states_table::Migration),
            Box::new(m20240101_000004_create_call_records_table::Migration),
        ]
    }
}

use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m20250801_000001_create_students::Migration),
            Box::new(migrations::m20250801_000002_create_logs::Migration),
        ]
    }
}

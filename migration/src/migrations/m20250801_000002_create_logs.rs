use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20250801_000002_create_logs"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("logs"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("id")).integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Alias::new("student_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("year")).string().not_null())
                    .col(ColumnDef::new(Alias::new("computer_number")).string().not_null())
                    .col(ColumnDef::new(Alias::new("purpose")).string().not_null())
                    .col(ColumnDef::new(Alias::new("check_in_time")).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Alias::new("check_out_time")).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Alias::new("issues_reported")).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_logs_student_id")
                    .table(Alias::new("logs"))
                    .col(Alias::new("student_id"))
                    .to_owned(),
            )
            .await?;

        // At most one open session per student, enforced at the store level so
        // the invariant holds under concurrent check-ins. sea-query's index
        // builder cannot express a partial index, hence raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_logs_one_open_session \
                 ON logs (student_id) WHERE check_out_time IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("logs")).to_owned())
            .await
    }
}

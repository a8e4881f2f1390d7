use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510190002_create_attendance_records"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("attendance_records"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("scan_date")).string_len(10).not_null())
                    .col(ColumnDef::new(Alias::new("scan_time")).string_len(8).not_null())
                    .col(ColumnDef::new(Alias::new("admin_id")).string().not_null())
                    .col(ColumnDef::new(Alias::new("location")).string().not_null())
                    .col(ColumnDef::new(Alias::new("email")).string().not_null())
                    .col(ColumnDef::new(Alias::new("check_in_date")).string_len(10).not_null())
                    .col(ColumnDef::new(Alias::new("check_in_time")).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per issued code: the store rejects a second check-in itself.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_scan")
                    .table(Alias::new("attendance_records"))
                    .col(Alias::new("scan_date"))
                    .col(Alias::new("scan_time"))
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_admin")
                    .table(Alias::new("attendance_records"))
                    .col(Alias::new("admin_id"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("attendance_records"))
                    .to_owned(),
            )
            .await
    }
}

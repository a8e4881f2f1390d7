use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{QueryOrder, SqlErr};
use serde::Serialize;

/// One student check-in against an admin-issued code.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// `DD-MM-YYYY` from the scanned payload.
    pub scan_date: String,
    /// `HH:MM:SS` from the scanned payload.
    pub scan_time: String,
    pub admin_id: String,
    pub location: String,
    /// Student identifier.
    pub email: String,
    pub check_in_date: String,
    pub check_in_time: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a record that has not been written yet.
#[derive(Debug, Clone)]
pub struct NewRecord<'a> {
    pub scan_date: &'a str,
    pub scan_time: &'a str,
    pub admin_id: &'a str,
    pub location: &'a str,
    pub email: &'a str,
    pub check_in_date: &'a str,
    pub check_in_time: &'a str,
}

impl Model {
    /// Inserts the record unless one already exists for its `(scan_date, scan_time)`.
    ///
    /// Returns `Ok(false)` on conflict. The check is done by the unique index in a
    /// single statement, so concurrent callers cannot both succeed.
    pub async fn insert_if_absent(db: &DatabaseConnection, new: NewRecord<'_>) -> Result<bool, DbErr> {
        let active = ActiveModel {
            id: NotSet,
            scan_date: Set(new.scan_date.to_owned()),
            scan_time: Set(new.scan_time.to_owned()),
            admin_id: Set(new.admin_id.to_owned()),
            location: Set(new.location.to_owned()),
            email: Set(new.email.to_owned()),
            check_in_date: Set(new.check_in_date.to_owned()),
            check_in_time: Set(new.check_in_time.to_owned()),
            created_at: Set(Utc::now()),
        };

        let result = Entity::insert(active)
            .on_conflict(
                OnConflict::columns([Column::ScanDate, Column::ScanTime])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(0) => Ok(false),
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(false),
                _ => Err(e),
            },
        }
    }

    pub async fn find_for_scan(
        db: &DatabaseConnection,
        scan_date: &str,
        scan_time: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::ScanDate.eq(scan_date))
            .filter(Column::ScanTime.eq(scan_time))
            .one(db)
            .await
    }

    /// All records for codes issued by `admin_id`, newest first.
    pub async fn list_for_admin(db: &DatabaseConnection, admin_id: &str) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::AdminId.eq(admin_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }
}

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::Serialize;

use crate::password::{hash_password, verify_password};

/// Represents an administrator in the `admins` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login identifier.
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Identifier printed on every code this admin issues.
    pub admin_id: Option<String>,
    pub admin_location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new admin, hashing `password` before it is stored.
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
        admin_id: Option<&str>,
        admin_location: Option<&str>,
    ) -> Result<Self, DbErr> {
        let password_hash = hash_password(password)
            .map_err(|e| DbErr::Custom(format!("password hashing failed: {e}")))?;

        let active = ActiveModel {
            id: NotSet,
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            admin_id: Set(admin_id.map(str::to_owned)),
            admin_location: Set(admin_location.map(str::to_owned)),
            created_at: Set(Utc::now()),
        };

        active.insert(db).await
    }

    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(&self.password_hash, password)
    }
}

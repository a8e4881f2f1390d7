use crate::seed::Seeder;
use async_trait::async_trait;
use colored::*;
use db::models::admin::Model;
use db::store::{MongoStore, StoreError};
use sea_orm::{DatabaseConnection, DbErr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSpec {
    pub email: String,
    pub password: String,
    pub admin_id: Option<String>,
    pub admin_location: Option<String>,
}

/// Creates admin accounts, leaving existing ones (matched by email) untouched.
pub struct AdminSeeder {
    pub accounts: Vec<AdminSpec>,
}

impl AdminSeeder {
    /// Same as [`Seeder::seed`], against the document store's `admins` collection.
    pub async fn seed_documents(&self, store: &MongoStore) -> Result<(), StoreError> {
        for spec in &self.accounts {
            let added = store
                .add_admin_if_missing(
                    &spec.email,
                    &spec.password,
                    spec.admin_id.as_deref(),
                    spec.admin_location.as_deref(),
                )
                .await?;
            if !added {
                print!("{} ", format!("[{} exists]", spec.email).yellow());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Seeder for AdminSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for spec in &self.accounts {
            if Model::find_by_email(db, &spec.email).await?.is_some() {
                print!("{} ", format!("[{} exists]", spec.email).yellow());
                continue;
            }
            Model::create(
                db,
                &spec.email,
                &spec.password,
                spec.admin_id.as_deref(),
                spec.admin_location.as_deref(),
            )
            .await?;
        }
        Ok(())
    }
}

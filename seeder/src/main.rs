use crate::seed::run_seeder;
use crate::seeds::admin::{AdminSeeder, AdminSpec};
use colored::*;
use db::store::MongoStore;
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::process::ExitCode;
use util::config::{self, StoreBackend};

mod seed;
mod seeds;

const USAGE: &str = "\
Usage:
  seeder                                   seed the admin from ADMIN_EMAIL / ADMIN_PASSWORD
  seeder --demo                            seed the demo admin (admin@example.com / password123)
  seeder --email E --password P [--id ID] [--location LOC]

Admins are written to the store selected by STORE_BACKEND (sql or mongodb).";

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let accounts = match accounts_from_args(&args) {
        Ok(accounts) => accounts,
        Err(msg) => {
            eprintln!("{}\n\n{USAGE}", msg.red());
            return ExitCode::FAILURE;
        }
    };

    let seeder = AdminSeeder { accounts };
    let count = seeder.accounts.len();

    let result = match config::store_backend() {
        Ok(StoreBackend::Sql) => seed_relational(&seeder).await,
        Ok(StoreBackend::Mongo) => seed_documents(&seeder).await,
        Ok(StoreBackend::Memory) => Err("STORE_BACKEND=memory keeps nothing to seed".into()),
        Err(e) => Err(e.to_string()),
    };
    if let Err(msg) = result {
        eprintln!("{}", msg.red());
        return ExitCode::FAILURE;
    }

    println!("{} admin account(s) processed", count);
    ExitCode::SUCCESS
}

async fn seed_relational(seeder: &AdminSeeder) -> Result<(), String> {
    let db = db::connect()
        .await
        .map_err(|e| format!("Failed to connect: {e}"))?;
    Migrator::up(&db, None)
        .await
        .map_err(|e| format!("Failed to migrate: {e}"))?;

    run_seeder(seeder, "Admin", &db).await;
    Ok(())
}

async fn seed_documents(seeder: &AdminSeeder) -> Result<(), String> {
    let store = MongoStore::connect(&config::mongodb_uri(), &config::mongodb_db_name())
        .await
        .map_err(|e| format!("Failed to connect: {e}"))?;

    print!("Seeding {} ", "Admin".bold());
    seeder
        .seed_documents(&store)
        .await
        .map_err(|e| format!("failed: {e}"))?;
    println!("{}", "done".green());
    Ok(())
}

fn demo_admin() -> AdminSpec {
    AdminSpec {
        email: "admin@example.com".into(),
        password: "password123".into(),
        admin_id: Some("ADM-001".into()),
        admin_location: Some("Main Hall".into()),
    }
}

/// Works out which accounts to seed from the command line, falling back to the
/// configured bootstrap admin.
fn accounts_from_args(args: &[String]) -> Result<Vec<AdminSpec>, String> {
    if args.is_empty() {
        return config::bootstrap_admin()
            .map(|a| {
                vec![AdminSpec {
                    email: a.email,
                    password: a.password,
                    admin_id: a.admin_id,
                    admin_location: a.admin_location,
                }]
            })
            .ok_or_else(|| "No admin given and ADMIN_EMAIL / ADMIN_PASSWORD are not set".into());
    }

    if args == ["--demo"] {
        return Ok(vec![demo_admin()]);
    }

    let mut email = None;
    let mut password = None;
    let mut admin_id = None;
    let mut admin_location = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let slot = match flag.as_str() {
            "--email" => &mut email,
            "--password" => &mut password,
            "--id" => &mut admin_id,
            "--location" => &mut admin_location,
            other => return Err(format!("Unknown argument: {other}")),
        };
        let value = iter
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("Missing value for {flag}"))?;
        *slot = Some(value.clone());
    }

    Ok(vec![AdminSpec {
        email: email.ok_or("--email is required")?,
        password: password.ok_or("--password is required")?,
        admin_id,
        admin_location,
    }])
}

use std::{fs, path::Path};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    let url = sqlite_url(&config::database_url());
    let file = sqlite_file(&url);
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            if let Some(path) = &file {
                remove_db_file(path);
            }
        }
        Some("fresh") => {
            if let Some(path) = &file {
                remove_db_file(path);
                create_db_dir(path);
            }
            runner::run_all_migrations(&url).await;
        }
        _ => {
            if let Some(path) = &file {
                create_db_dir(path);
            }
            runner::run_all_migrations(&url).await;
        }
    }
}

/// Treats anything that is not already a DSN as a SQLite file path.
fn sqlite_url(path_or_url: &str) -> String {
    if path_or_url.contains("://") || path_or_url.starts_with("sqlite:") {
        path_or_url.to_string()
    } else {
        format!("sqlite://{path_or_url}?mode=rwc")
    }
}

/// File backing a `sqlite://` URL, if there is one.
fn sqlite_file(url: &str) -> Option<String> {
    let rest = url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(path.to_string())
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).expect("Failed to create DB directory");
    }
}

//! Bootstraps the client database: loads settings, applies migrations and
//! reports what is stored.

use std::env;

use dotenvy::dotenv;

use pushkind_clients::db::{establish_connection_pool, run_migrations};
use pushkind_clients::models::config::ServerConfig;
use pushkind_clients::repository::DieselRepository;
use pushkind_clients::services::client as client_service;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let server_config = match ServerConfig::load(&app_env) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to migrate database: {e}");
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    match client_service::find_all_paged(&repo, 0, server_config.default_page_size) {
        Ok(page) => {
            log::info!(
                "Database {} holds {} clients across {} pages",
                server_config.database_url,
                page.total,
                page.total_pages()
            );
            match serde_json::to_string(&page) {
                Ok(json) => log::debug!("First page: {json}"),
                Err(e) => log::warn!("Failed to serialize first page: {e}"),
            }
        }
        Err(e) => {
            log::error!("Failed to read clients: {e}");
            std::process::exit(1);
        }
    }
}

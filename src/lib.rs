//! DriveCore: fleet management dashboard.
//!
//! Server-rendered pages on top of the vehicle REST backend. The `data`
//! feature exposes only the domain types; `server` adds the HTTP client,
//! handlers and the Actix application.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::{build_repository, build_tera, configure, run};

#[cfg(feature = "server")]
mod server {
    use std::num::NonZeroUsize;
    use std::time::Duration;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::repository::cache::QueryCache;
    use crate::repository::{CachedRepository, DashboardRepository, HttpRepository};
    use crate::routes::fleet::{add_vehicle, fleet_table, show_fleet};
    use crate::routes::main::configure_placeholders;
    use crate::routes::vehicle::{delete_vehicle, edit_vehicle, save_vehicle, show_vehicle};

    /// HTTP client for the backend wrapped in the shared query cache.
    pub fn build_repository(server_config: &ServerConfig) -> std::io::Result<DashboardRepository> {
        let timeout = Duration::from_secs(server_config.request_timeout_secs);
        let http = HttpRepository::new(&server_config.api_url, timeout)
            .map_err(|e| std::io::Error::other(format!("Failed to create backend client: {e}")))?;

        let capacity = NonZeroUsize::new(server_config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        let cache = QueryCache::new(capacity, Duration::from_secs(server_config.cache_ttl_secs));

        Ok(CachedRepository::new(http, cache))
    }

    pub fn build_tera(templates_dir: &str) -> std::io::Result<Tera> {
        Tera::new(templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))
    }

    /// Registers every page of the dashboard.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.service(Files::new("/assets", "./assets"))
            .service(show_fleet)
            .service(fleet_table)
            .service(add_vehicle)
            .service(edit_vehicle)
            .service(save_vehicle)
            .service(delete_vehicle)
            .service(show_vehicle)
            .configure(configure_placeholders);
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let repo = build_repository(&server_config)?;

        // Key for the flash message cookies.
        let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
            std::io::Error::other(format!("Secret must be at least 64 bytes long: {e}"))
        })?;

        let message_store = CookieMessageStore::builder(secret_key).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = build_tera(&server_config.templates_dir)?;

        let bind_address = (server_config.address.clone(), server_config.port);

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .configure(configure)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}

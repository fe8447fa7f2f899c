use std::env;

use config::Config;
use dotenvy::dotenv;

use drivecore::models::config::{DEFAULT_API_URL, ServerConfig, environment};
use drivecore::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .set_default("api_url", DEFAULT_API_URL)
        .and_then(|builder| {
            builder
                // Add `./config/default.yaml`
                .add_source(config::File::with_name("config/default"))
                // Add environment-specific overrides
                .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
                // Add settings from the environment (with a prefix of APP), e.g. APP_API_URL
                .add_source(environment())
                .build()
        });

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting DriveCore on {}:{} with backend {}",
        server_config.address,
        server_config.port,
        server_config.api_url
    );

    run(server_config).await
}

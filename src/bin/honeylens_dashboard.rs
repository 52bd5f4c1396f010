use std::env;
use std::path::PathBuf;

use honeylens::config::Config;

/// Dashboard server entry point
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    log::info!("Starting honeylens dashboard...");

    // Load configuration
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("honeylens.toml"));

    let config = Config::load_or_default(&config_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;

    honeylens::dashboard::run(&config).await?;

    log::info!("Dashboard stopped");
    Ok(())
}

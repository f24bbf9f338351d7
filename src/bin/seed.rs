//! Seed the configured database with the admin user and sample content.

use site_cms::{connect_store, init_tracing, seed, seed_options, AppConfig, Repositories};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    if config.database_url.is_none() {
        return Err("DATABASE_URL must be set to seed a database".into());
    }
    let store = connect_store(&config).await?;
    let report = seed::run(&Repositories::new(store), &seed_options(&config)).await?;
    println!("seed complete: {} created, {} already present", report.created, report.skipped);
    Ok(())
}

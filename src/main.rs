mod browse;

use anyhow::Result;
use swapi_roster::{Config, Roster};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.yml".to_string());
    let config = Config::load_or_default(&config_path)?;

    let roster = Roster::native(&config)?;

    println!("Loading characters...");
    if let Err(e) = roster.load_enriched_characters().await {
        eprintln!("Error fetching data: {}", e);
        return Err(e.into());
    }

    browse::run(&roster, config.page_size).await
}

// Headless entry point: loads the saved studio state and exports it.
// With a directory argument the export file is written there, otherwise it goes to stdout.

use anyhow::Context;
use ideas_studio_lib::{commands, config::StudioConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ideas_studio_lib::init_logging();

    let config = StudioConfig::from_env().context("Failed to read configuration")?;
    let state = ideas_studio_lib::bootstrap(&config).await?;

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(dir) => {
            let path = commands::export_state_to_dir(&state, &dir, &config.export_file_name)
                .await
                .map_err(anyhow::Error::msg)?;
            log::info!("Exported studio data to {}", path.display());
        }
        None => {
            let json = commands::export_json(&state)
                .await
                .map_err(anyhow::Error::msg)?;
            println!("{}", json);
        }
    }
    Ok(())
}

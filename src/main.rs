use anyhow::Context;
use log::{info, warn};
use rulebot::{
    config::{get_config, initialize_config},
    logging::init_logging,
    ui::run_ui,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_status = initialize_config();
    let config = get_config();

    let _logger = init_logging(&config).context("failed to start logging")?;
    if let Err(e) = config_status {
        warn!("Falling back to default config: {}", e);
    }
    info!("Starting rulebot");

    run_ui(config).await.context("terminal UI failed")?;
    Ok(())
}

use anyhow::Context;
use comanda_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional)
    let _ = dotenv::dotenv();

    // 2. Configuration and logging
    let config = Config::from_env();
    config
        .ensure_work_dir_structure()
        .context("Failed to create work directory structure")?;
    let log_dir = config.log_dir();
    init_logger_with_file(Some(&config.log_level), log_dir.to_str());

    print_banner();
    tracing::info!("Comanda server starting...");

    // 3. Initialize state and run
    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

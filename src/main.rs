use portfolio_server::config::Config;
use portfolio_server::logger::Logger;
use portfolio_server::server::{self, Server, ServerContext};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let logger = Arc::new(Logger::from_config(&cfg.logging)?);

    let addr = cfg.socket_addr()?;
    // The working directory at startup is the served root.
    let root = std::env::current_dir()?;

    logger.info(&format!(
        "Starting static server on {}:{}",
        cfg.host, cfg.port
    ));

    let listener = match server::create_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            logger.error(&format!("Failed to bind {addr}: {e}"));
            return Err(e.into());
        }
    };

    let ctx = Arc::new(ServerContext::new(root, Arc::clone(&logger), &cfg.logging));
    let server = Server::new(ctx);

    // Interrupt hooks live at process entry; they stop the server
    // through its handle rather than killing the process.
    server::signal::register_lifecycle_hooks(server.handle(), Arc::clone(&logger));

    server.run(listener).await?;
    Ok(())
}

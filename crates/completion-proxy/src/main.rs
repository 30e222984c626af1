use completion_proxy::config::Config;
use completion_proxy::{CompletionProxy, server};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.logging.init();
    info!("completion-proxy starting");

    let listener = match TcpListener::bind(config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, address = %config.bind_address, "Failed to bind");
            std::process::exit(1);
        }
    };

    let proxy = CompletionProxy::from_config(&config);
    let shutdown = async {
        let _ = signal::ctrl_c().await;
        info!("Shutdown signal received");
    };

    if let Err(e) = server::serve(listener, proxy, shutdown).await {
        error!(error = %e, "Fatal error");
        std::process::exit(1);
    }

    info!("completion-proxy stopped");
}

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use is_terminal::IsTerminal;
use odr_webapi::cli::{self, APP_NAME, APP_VERSION};
use odr_webapi::error::Error;
use odr_webapi::{Args, Config, DlsFile, SharedConfig};
use std::process;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let config = config_init();
    let dls_file = Arc::new(DlsFile::new(&config.target_path));

    tracing::info!(
        "{APP_NAME} v{APP_VERSION} starting on http://localhost:{}",
        config.port
    );
    tracing::info!("API listening on {}", config.bind_addr());
    tracing::info!(
        "DLS text will be written to: {}",
        config.target_path.display()
    );
    let api_server = odr_webapi::api::new(config, dls_file, shutdown_signal())?;
    api_server.await.map_err(Error::Server)?;

    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(std::io::stdout().is_terminal()))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "odr_webapi=info,tower_http=info".into()),
        )
        .init();
}

/// Parse and validate the command line. Usage problems print the help screen and exit 1,
/// a missing target directory is fatal.
fn config_init() -> SharedConfig {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if err.kind() == ErrorKind::DisplayVersion => err.exit(),
        Err(err) => usage_exit(&err.to_string()),
    };
    if args.help {
        print!("{}", cli::usage());
        process::exit(0);
    }

    match Config::try_from_args(args) {
        Ok(config) => Arc::new(config),
        Err(err @ Error::InvalidArguments) => usage_exit(&format!("Error: {err}")),
        Err(err) => {
            tracing::error!("{err}");
            process::exit(1);
        }
    }
}

fn usage_exit(message: &str) -> ! {
    println!("{}", message.trim_end());
    print!("{}", cli::usage());
    process::exit(1);
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("unable to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("quitting from signal");
}

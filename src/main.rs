use std::process;

use clarity::config::Config;
use clarity::storage::Storage;
use clarity::store::FileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let data_dir = config.resolve_data_dir().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    let store = match FileStore::new(&data_dir) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage at {}: {e}", data_dir.display());
            process::exit(1);
        }
    };

    if let Err(e) = clarity::cli::run(&config, &Storage::new(store)).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

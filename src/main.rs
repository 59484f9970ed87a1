use std::path::PathBuf;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use travelmate::config::Config;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut db_path: Option<PathBuf> = None;
    let mut api_url: Option<String> = None;
    let mut verbose = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                db_path = args.next().map(PathBuf::from);
                if db_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--api" => {
                api_url = args.next();
                if api_url.is_none() {
                    eprintln!("Error: --api requires a URL argument");
                    std::process::exit(1);
                }
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                println!("TravelMate groups client");
                println!();
                println!("Usage: travelmate [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Preferences file path (default: .data/travelmate.db)");
                println!("  --api <URL>            Backend base URL (default: $TRAVELMATE_API_URL)");
                println!("  -v, --verbose          Log debug output");
                println!("  -h, --help             Show this help");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let filter = EnvFilter::builder()
        .with_default_directive(if verbose { Level::DEBUG.into() } else { Level::INFO.into() })
        .from_env_lossy();
    let subscriber = Registry::default().with(filter).with(
        fmt::Layer::default()
            .compact()
            .without_time()
            .with_target(false)
            .with_writer(std::io::stderr),
    );
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up logging: {}", e);
    }

    let mut config = Config::from_env();
    if let Some(url) = api_url {
        config = config.with_api_url(&url);
    }

    let db_path = match db_path {
        Some(path) => path,
        None => {
            let dir = PathBuf::from(".data");
            if let Err(e) = std::fs::create_dir_all(&dir) {
                eprintln!("Error: failed to create {}: {}", dir.display(), e);
                std::process::exit(1);
            }
            dir.join("travelmate.db")
        }
    };

    travelmate::cli::run(&db_path, config);
}

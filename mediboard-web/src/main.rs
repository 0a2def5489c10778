//! Mediboard Web Server
//!
//! HTTP surface for the hospital back office.

use clap::Parser;
use mediboard_core::MediboardConfig;
use mediboard_web::server::MediboardServerBuilder;
use mediboard_web::{init_logging, WebConfig};

/// Mediboard Web Server - hospital back office interface
#[derive(Parser)]
#[command(name = "mediboard-web")]
#[command(about = "Web interface for the mediboard hospital back office")]
#[command(version)]
struct Args {
    /// Server host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Enable development mode
    #[arg(long)]
    dev: bool,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Directory for the persisted session record
    #[arg(long)]
    data_dir: Option<String>,

    /// Simulated login latency in milliseconds
    #[arg(long)]
    login_delay_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    std::env::set_var(
        "RUST_LOG",
        format!("mediboard_web={},tower_http=debug", args.log_level),
    );
    init_logging();

    // Environment variables provide defaults, an optional config file
    // overrides them, and command line flags win
    let mut config = WebConfig::from_env();

    if let Some(path) = args.config.as_deref() {
        match MediboardConfig::from_file(path) {
            Ok(file_config) => {
                config.login_delay_ms = file_config.session.login_delay_ms;
                config.data_dir = Some(file_config.storage.data_dir);
            }
            Err(e) => {
                eprintln!("Failed to load config file {}: {}", path, e);
                std::process::exit(1);
            }
        }
    }

    config.host = args.host;
    config.port = args.port;
    config.dev_mode = args.dev;
    if let Some(delay) = args.login_delay_ms {
        config.login_delay_ms = delay;
    }
    if args.data_dir.is_some() {
        config.data_dir = args.data_dir;
    }

    println!("Starting Mediboard Web Server");
    println!("Server: http://{}:{}", config.host, config.port);
    println!("Development mode: {}", config.dev_mode);

    let mut builder = MediboardServerBuilder::new()
        .host(config.host.clone())
        .port(config.port)
        .dev_mode(config.dev_mode)
        .login_delay_ms(config.login_delay_ms);
    if let Some(dir) = config.data_dir.clone() {
        builder = builder.data_dir(dir);
    }

    let server = match builder.build().await {
        Ok(server) => server,
        Err(e) => {
            eprintln!("Failed to build server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.start().await {
        eprintln!("Server failed to start: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use gtk4::prelude::*;
use gtk4::Application;
use kestrel::app;
use kestrel::config::AppConfig;
use kestrel::toolkit::StylePreference;
use log::{error, info, warn};
use std::path::PathBuf;

const APP_ID: &str = "org.kestrel.Shell";

/// kestrel - scriptable widget layer demo
#[derive(Parser, Debug, Clone)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Configuration file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// How event-box backgrounds are painted
    #[arg(long = "style", value_enum)]
    style: Option<StylePreference>,

    /// Initial background colour of the outer event box
    #[arg(long = "bg", value_name = "COLOR")]
    bg: Option<String>,

    /// Run without a display and print the resulting attributes
    #[arg(long = "headless")]
    headless: bool,
}

fn load_config(cli: &Cli) -> AppConfig {
    let loaded = match &cli.config {
        Some(path) => AppConfig::load_from_path(path).map(|config| {
            info!("Loaded configuration from {}", path.display());
            config
        }),
        None => AppConfig::load(),
    };

    let mut config = loaded.unwrap_or_else(|e| {
        warn!("Failed to load configuration, using defaults: {:#}", e);
        AppConfig::default()
    });

    if let Some(style) = cli.style {
        config.background_style = style;
    }
    if let Some(bg) = &cli.bg {
        config
            .eventbox
            .insert("bg".to_string(), serde_json::Value::String(bg.clone()));
    }
    config
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting kestrel v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli);

    if cli.headless {
        if let Err(e) = app::run_headless(&config) {
            error!("Headless run failed: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        if let Err(e) = app::build_ui(app, &config) {
            error!("Failed to build UI: {:#}", e);
            app.quit();
        }
    });

    // Arguments were already parsed by clap
    app.run_with_args(&["kestrel"]);
}

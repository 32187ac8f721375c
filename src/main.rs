//! Binary entrypoint for the meshpeers CLI.
//!
//! Usage:
//! - `meshpeers /dev/ttyUSB0 [--mode all|direct|routers] [--age 2h] [--json-out peers.json]`
//! - `meshpeers --host 192.168.1.20 --mode routers`
//! - `meshpeers init-config` - write a starter `meshpeers.toml`
//!
//! The older `meshpeers PORT --direct` / `--routers` spelling is still accepted.
//! See the library crate docs for module‑level details: `meshpeers::`.
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{debug, info};

use meshpeers::config::{Config, DEFAULT_CONFIG_PATH};
use meshpeers::legacy_args::normalize_legacy_args;
use meshpeers::meshtastic::MeshtasticCli;
use meshpeers::peers::{Mode, TimestampZone};
use meshpeers::report::{self, export_json, render_report, ReportRequest};
use meshpeers::validation::resolve_target;

#[derive(Parser)]
#[command(name = "meshpeers")]
#[command(about = "Query and display Meshtastic mesh network nodes")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Serial port for the Meshtastic device (e.g., /dev/ttyUSB0)
    port: Option<String>,

    /// IP address or hostname of a network-connected device (instead of a port)
    #[arg(long)]
    host: Option<String>,

    /// Filter mode: all nodes, direct connections only, or routers/repeaters only
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Only show nodes heard within this time (format: 1s, 5m, 2h, 1d)
    #[arg(long)]
    age: Option<String>,

    /// Save node data to a JSON file
    #[arg(long, value_name = "FILENAME")]
    json_out: Option<PathBuf>,

    /// Show Last Heard in UTC instead of local time
    #[arg(long)]
    utc: bool,

    /// Seconds to wait for the Meshtastic CLI
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Meshtastic CLI executable
    #[arg(long, value_name = "PATH")]
    cli_path: Option<String>,

    /// Configuration file path (default: ./meshpeers.toml when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    InitConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_legacy_args(std::env::args()));

    if let Some(Commands::InitConfig) = cli.command {
        init_logging(&Config::default(), cli.verbose);
        let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        Config::create_default(path).await?;
        info!("Configuration file created at {}", path);
        println!("Configuration file created at {}", path);
        return Ok(());
    }

    let config = Config::load_or_default(cli.config.as_deref()).await?;
    init_logging(&config, cli.verbose);
    debug!("meshpeers v{}", env!("CARGO_PKG_VERSION"));

    // CLI target wins outright; config supplies one only when the CLI gives none
    let (port, host) = if cli.port.is_some() || cli.host.is_some() {
        (cli.port.as_deref(), cli.host.as_deref())
    } else {
        (config.meshtastic.port.as_deref(), config.meshtastic.host.as_deref())
    };
    let target = resolve_target(port, host)?;

    let mode = cli.mode.unwrap_or(config.report.mode);
    let zone = if cli.utc {
        TimestampZone::Utc
    } else {
        config.report.zone()
    };

    let request = match ReportRequest::new(target, mode, cli.age.as_deref(), cli.json_out) {
        Ok(request) => request.with_zone(zone),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let timeout = match cli.timeout {
        Some(0) => return Err(anyhow!("--timeout must be greater than 0")),
        Some(secs) => Duration::from_secs(secs),
        None => config.meshtastic.timeout(),
    };
    let cli_path = cli
        .cli_path
        .unwrap_or_else(|| config.meshtastic.cli_path.clone());
    let device = MeshtasticCli::new(cli_path, timeout);

    let peers = match report::run(
        &device,
        &request,
        &config.meshtastic.section_marker,
        chrono::Utc::now(),
    )
    .await
    {
        Ok(peers) => peers,
        Err(e) => {
            debug!("Report failed: {:?}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    print!("{}", render_report(request.mode(), &peers));

    // Export failure does not undo the printed table; report it and exit cleanly
    if let Some(path) = request.json_sink() {
        match export_json(path, &peers) {
            Ok(()) => println!("\nJSON report saved to {}", path.display()),
            Err(e) => {
                debug!("JSON export failed: {:?}", e);
                eprintln!("{}", e);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config.logging.level_filter(),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.logging.file.as_ref().and_then(|file| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .ok()
    });

    if let Some(f) = log_file {
        let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Console echo only when a human is watching stderr
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}

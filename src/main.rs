/*!
 * plugsign CLI - sign a plugin distribution directory
 */

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use plugsign::{
    config::{LogLevel, SignConfig},
    error::Result,
    logging, sign, EnvCredentials, HttpSigner, SignOptions,
};

#[derive(Parser)]
#[command(name = "plugsign")]
#[command(version, about = "Build, sign and store the file manifest of a plugin distribution", long_about = None)]
struct Cli {
    /// Plugin content directory (default: dist)
    #[arg(long = "dist-dir", alias = "distDir", value_name = "DIR")]
    dist_dir: Option<PathBuf>,

    /// Signature type, e.g. community, commercial or private
    #[arg(long = "signature-type", alias = "signatureType", value_name = "TYPE")]
    signature_type: Option<String>,

    /// Root URLs for a private signature, comma separated
    #[arg(
        long = "root-urls",
        alias = "rootUrls",
        value_name = "URLS",
        value_delimiter = ','
    )]
    root_urls: Vec<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Full signing endpoint URL
    #[arg(long = "signing-url", value_name = "URL")]
    signing_url: Option<String>,

    /// Log level
    #[arg(long = "log-level", value_enum)]
    log_level: Option<LogLevelArg>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,

    /// Print the unsigned manifest and exit without signing
    #[arg(long)]
    dry_run: bool,
}

#[derive(Copy, Clone, ValueEnum)]
enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LogLevel::Error,
            LogLevelArg::Warn => LogLevel::Warn,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Trace => LogLevel::Trace,
        }
    }
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = if let Some(ref config_path) = cli.config {
        SignConfig::from_file(config_path).unwrap_or_else(|e| {
            eprintln!("Warning: {}", e);
            SignConfig::default()
        })
    } else {
        SignConfig::default()
    };

    // Override config with CLI arguments
    if let Some(dist_dir) = cli.dist_dir {
        config.dist_dir = dist_dir;
    }
    if let Some(url) = cli.signing_url {
        config.signing_url = Some(url);
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }
    if cli.log.is_some() {
        config.log_file = cli.log;
    }
    config.verbose |= cli.verbose;
    config.dry_run |= cli.dry_run;

    if let Err(e) = logging::init_logging(&config) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let options = SignOptions {
        dist_dir: config.dist_dir.clone(),
        signature_type: cli.signature_type,
        root_urls: if cli.root_urls.is_empty() {
            None
        } else {
            Some(cli.root_urls)
        },
        dry_run: config.dry_run,
    };

    let signer = HttpSigner::new(
        config.signing_url(),
        Duration::from_secs(config.timeout_secs),
    )?;

    Ok(sign(&options, &EnvCredentials::new(), &signer))
}

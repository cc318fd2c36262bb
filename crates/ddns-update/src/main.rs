// # ddns-update - Namecheap Dynamic DNS Updater
//
// One-shot binary, meant to be run from cron or a systemd timer.
//
// This binary is a THIN integration layer:
// 1. Parse the command line
// 2. Load and validate the JSON configuration
// 3. Initialize tracing
// 4. Wire the IP source, resolver, provider and audit log into a Reconciler
// 5. Run one reconciliation and report the outcome
//
// All reconciliation logic lives in ddns-core.
//
// ## Example
//
// ```bash
// ddns-update -c /etc/ddns/home.json
// DDNS_LOG_LEVEL=debug ddns-update -c /etc/ddns/home.json
// ```

use anyhow::{Context, Result};
use clap::Parser;
use ddns_core::{DdnsConfig, FileAuditLog, Reconciler, UpdateOutcome};
use ddns_dns_system::SystemHostResolver;
use ddns_ip_http::HttpIpSource;
use ddns_provider_namecheap::NamecheapProvider;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: The run completed, whatever its outcome
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Run completed
    Completed = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep a Namecheap dynamic DNS record pointed at this host's public IP
#[derive(Debug, Parser)]
#[command(name = "ddns-update", version)]
struct Cli {
    /// Location of the JSON config file with the update parameters
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Pick the tracing level
///
/// `DDNS_LOG_LEVEL` wins when it names a level; otherwise the config's
/// `debug` flag selects DEBUG over INFO.
fn log_level(env_level: Option<&str>, debug: bool) -> Level {
    let from_env = env_level.and_then(|level| match level.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    });

    match from_env {
        Some(level) => level,
        None if debug => Level::DEBUG,
        None => Level::INFO,
    }
}

/// Wire the production collaborators
fn build_reconciler(config: &DdnsConfig) -> Result<Reconciler> {
    let settings = &config.settings;

    let ip_source =
        HttpIpSource::from_settings(settings).context("Failed to create IP source")?;
    let resolver =
        SystemHostResolver::new(settings.timeout()).context("Failed to create DNS resolver")?;
    let provider =
        NamecheapProvider::from_settings(settings).context("Failed to create provider")?;
    let audit_log = FileAuditLog::new(settings.log_file.clone());

    Ok(Reconciler::new(
        Box::new(ip_source),
        Box::new(resolver),
        Box::new(provider),
        Box::new(audit_log),
        config,
    ))
}

/// Tell the operator what happened
fn report(fqdn: &str, outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::Matched { ip } => {
            info!("{} already points at {}", fqdn, ip);
        }
        UpdateOutcome::Updated { new_ip, .. } => {
            println!("Update Successful\n\t{}\n\t{}\n", fqdn, new_ip);
        }
        UpdateOutcome::Failed { message } => {
            eprintln!("{}", message);
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(config_path) = cli.config else {
        eprintln!("No config file given. Usage: ddns-update -c <path>");
        return DdnsExitCode::ConfigError.into();
    };

    // Load configuration before tracing so config errors reach stderr as-is
    let config = match DdnsConfig::from_file(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let level = log_level(
        env::var("DDNS_LOG_LEVEL").ok().as_deref(),
        config.debug_enabled(),
    );
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let target = config.target();
    info!("Updating Namecheap Dyn DNS for: {}", target.fqdn());

    // Single reconciliation; nothing runs concurrently
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    // The resolver binds to the runtime it is created in
    let _guard = rt.enter();
    let reconciler = match build_reconciler(&config) {
        Ok(reconciler) => reconciler,
        Err(e) => {
            error!("{:#}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let outcome = rt.block_on(reconciler.reconcile(&target));
    report(&target.fqdn(), &outcome);

    DdnsExitCode::Completed.into()
}

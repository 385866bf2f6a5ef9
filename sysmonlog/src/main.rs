use clap::{Arg, ArgMatches, Command};
use std::{ffi::OsString, path::PathBuf, process};
use sysmonlog_console::ConsolePresenter;
use sysmonlog_core::{config::CliConfig, CancellationToken, Config, MetricsCollector, Scheduler};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Single-dash long flags accepted for compatibility
const LEGACY_FLAGS: [(&str, &str); 2] = [("-nolog", "--nolog"), ("-all", "--all")];

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("sysmonlog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Periodic host-metrics sampler with a rotating JSON event log")
        .arg(
            Arg::new("nolog")
                .long("nolog")
                .help("Do not write the event log and sample at the fast preview interval")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .help("Enable every metric regardless of configured toggles")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to JSON configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECS")
                .help("Seconds between samples")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("PATH")
                .help("Event log path")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("max-entries")
                .long("max-entries")
                .value_name("N")
                .help("Keep at most N events in the log (0 for unlimited)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colors")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output to stderr")
                .action(clap::ArgAction::SetTrue),
        )
}

/// Rewrite `-nolog` / `-all` to their double-dash forms
fn normalize_legacy_flags<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| arg == *legacy)
                .map(|(_, modern)| OsString::from(modern))
                .unwrap_or(arg)
        })
        .collect()
}

fn cli_config(matches: &ArgMatches) -> CliConfig {
    CliConfig {
        interval_secs: matches.get_one::<f64>("interval").copied(),
        output_path: matches.get_one::<PathBuf>("output").cloned(),
        max_entries: matches.get_one::<usize>("max-entries").copied(),
        no_log: matches.get_flag("nolog"),
        all: matches.get_flag("all"),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> anyhow::Result<()> {
    let matches = build_cli().get_matches_from(normalize_legacy_flags(std::env::args_os()));
    init_logging(matches.get_flag("verbose"));

    // Load configuration
    let cli = cli_config(&matches);
    let config = Config::load(Some(&cli), matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let mut collector = MetricsCollector::new()?;
    collector.init()?;
    info!(platform = collector.platform_name(), "metrics provider ready");

    // Setup graceful shutdown
    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let presenter = ConsolePresenter::stdout(matches.get_flag("no-color"));
    let mut scheduler = Scheduler::new(config, collector, presenter);
    scheduler.run(&token)?;
    Ok(())
}

//! Waypoint Shell
//!
//! Navigates the demo catalogue from the command line.
//!
//! ## Usage
//!
//! ```bash
//! waypoint-shell                        # open the configured initial path
//! waypoint-shell /users /users/42       # visit paths in order
//! waypoint-shell --config waypoint.toml -vv /orders/1001
//! waypoint-shell routes                 # print the route table
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use waypoint_conf::Settings;
use waypoint_router::NavigationPhase;
use waypoint_shell::{Catalogue, Shell};

#[derive(Parser)]
#[command(name = "waypoint-shell")]
#[command(about = "Navigate the Waypoint demo catalogue", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Settings file (TOML)
	#[arg(short, long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,

	/// Simulated fetch latency of each feature, in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 0)]
	latency_ms: u64,

	/// Resolve every feature before navigating
	#[arg(long)]
	preload: bool,

	/// Paths to visit in order (defaults to the configured initial path)
	#[arg(value_name = "PATH")]
	paths: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the route table
	Routes,
}

fn init_tracing(default_directive: &str, verbosity: u8) {
	let directive = match verbosity {
		0 => default_directive,
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
	init_tracing(&settings.log_level, cli.verbosity);

	let shell = Shell::build(
		&settings,
		Arc::new(Catalogue::sample()),
		Duration::from_millis(cli.latency_ms),
	)
	.context("invalid route configuration")?
	.styled(std::io::stdout().is_terminal());

	if let Some(Commands::Routes) = cli.command {
		print!("{}", shell.routes_listing());
		return Ok(ExitCode::SUCCESS);
	}

	if cli.preload {
		for (feature, result) in shell.preload_all().await {
			if let Err(err) = result {
				eprintln!("{} {feature}: {err}", "warning:".yellow().bold());
			}
		}
	}

	if cli.paths.is_empty() {
		println!("{}\n", shell.start().await);
	} else {
		for path in &cli.paths {
			println!("{}\n", shell.visit(path).await);
		}
	}

	match shell.navigator().phase() {
		NavigationPhase::Error(err) => {
			eprintln!("{} {err}", "error:".red().bold());
			Ok(ExitCode::FAILURE)
		}
		_ => Ok(ExitCode::SUCCESS),
	}
}

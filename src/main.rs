use std::{path::PathBuf, sync::Mutex};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, bail};
use tracing_subscriber::EnvFilter;

mod config;
mod create;
mod list;
mod tracker;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
	/// Config file. Defaults to $XDG_CONFIG_HOME/epics/config.toml when present.
	#[arg(long, global = true)]
	config: Option<PathBuf>,
	/// Target repository as owner/repo. Defaults to the repository gh infers from the working directory.
	#[arg(short = 'R', long, global = true)]
	repo: Option<String>,
	/// Use an in-memory tracker instead of gh. State is read from and written to $EPICS_MOCK_STATE.
	#[arg(long, global = true, hide = true)]
	mock: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Create the issues of a planning document, skipping ones the tracker already has
	Create(create::CreateArgs),
	/// Print the issues a planning document parses to
	List(list::ListArgs),
}

fn main() -> Result<()> {
	color_eyre::install()?;
	init_tracing();
	let cli = Cli::parse();

	let mut config = AppConfig::load(cli.config.as_deref())?;
	if let Some(repo) = cli.repo {
		config.repo = Some(repo);
	}

	match cli.command {
		Commands::Create(args) => {
			let tracker = tracker::create_tracker(&config, cli.mock);
			let summary = create::create_command(&config, &*tracker, &*tracker, args)?;
			if !summary.is_clean() {
				bail!("{} issue(s) could not be created", summary.failed + summary.malformed);
			}
		}
		Commands::List(args) => {
			let malformed = list::list_command(args)?;
			if malformed > 0 {
				bail!("{malformed} malformed issue(s) in document");
			}
		}
	}
	Ok(())
}

/// Human-readable logs on stderr, or JSON lines into `$EPICS_TRACE_FILE` when that is set.
fn init_tracing() {
	let directives = option_env!("LOG_DIRECTIVES").unwrap_or("info");
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

	if let Ok(path) = std::env::var("EPICS_TRACE_FILE")
		&& let Ok(file) = std::fs::File::create(&path)
	{
		tracing_subscriber::fmt().json().with_env_filter(filter).with_writer(Mutex::new(file)).init();
		return;
	}

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

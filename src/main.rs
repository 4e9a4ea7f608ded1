use clap::Parser;
use oscillogram_sorter::config::LOG_FILE_NAME;
use oscillogram_sorter::{service, SorterConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "oscillogram-sorter")]
#[command(
	about = "Watches a directory for .DO oscillogram files, classifies them by their first line and moves them to the processed folder"
)]
struct Cli {
	/// Directory to watch
	#[arg(short, long, default_value = ".")]
	path: PathBuf,

	/// Enable verbose logging
	#[arg(short, long)]
	verbose: bool,
}

/// Log to the console and to `<log_dir>/log.txt`
fn init_logging(config: &SorterConfig, verbose: bool) -> WorkerGuard {
	let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };

	let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
	let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

	tracing_subscriber::registry()
		.with(level)
		.with(tracing_subscriber::fmt::layer().with_writer(file_writer).with_ansi(false))
		.with(tracing_subscriber::fmt::layer())
		.init();

	guard
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let config = SorterConfig::for_root(&cli.path);

	// The log directory has to exist before the file appender opens log.txt
	service::prepare_directories(&config)?;
	let _log_guard = init_logging(&config, cli.verbose);

	info!("Starting sorter for directory: {}", cli.path.display());

	service::run_until(config, service::shutdown_on(tokio::signal::ctrl_c())).await?;

	info!("Watcher stopped");
	Ok(())
}

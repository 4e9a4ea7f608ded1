use crate::config::SorterConfig;
use crate::error::{Result, SorterError};
use crate::processor::FileProcessor;
use crate::watcher;
use std::future::Future;
use tracing::{debug, error, info, warn};

/// Create the output and log directories. Runs before the watch starts so
/// their creation never shows up as events.
pub fn prepare_directories(config: &SorterConfig) -> Result<()> {
	std::fs::create_dir_all(&config.output_dir)?;
	std::fs::create_dir_all(&config.log_dir)?;
	Ok(())
}

/// Resolve once `signal` fires. If the signal cannot be listened for, log it
/// and never resolve, so the sorter keeps running instead of exiting at once.
pub async fn shutdown_on<F>(signal: F)
where F: Future<Output = std::io::Result<()>> {
	if let Err(e) = signal.await {
		error!("Failed to listen for interrupt signal: {}", e);
		std::future::pending::<()>().await;
	}
}

/// Watch `config.watched_root` and process candidates until `shutdown`
/// resolves or the event stream ends.
///
/// The output directory must already exist (see [`prepare_directories`]).
/// In-flight pipeline runs are not awaited on shutdown.
pub async fn run_until<F>(config: SorterConfig, shutdown: F) -> Result<()>
where F: Future<Output = ()> {
	config.validate()?;
	if !config.output_dir.is_dir() {
		return Err(SorterError::InvalidPath {
			path: config.output_dir.to_string_lossy().to_string(),
		});
	}
	let config = config.resolve()?;

	let (handle, mut events) = watcher::start(&config.watched_root)?;
	let processor = FileProcessor::new(config);

	tokio::pin!(shutdown);
	loop {
		tokio::select! {
			_ = &mut shutdown => {
				info!("Stopping watcher");
				break;
			}
			event = events.recv() => match event {
				Some(event) => {
					if let Ok(json) = event.to_json() {
						debug!("Event JSON: {}", json);
					}
					processor.handle_event(&event);
				}
				None => {
					warn!("Event stream ended");
					break;
				}
			}
		}
	}

	handle.stop()?;
	Ok(())
}

use crate::error::{Result, SorterError};
use crate::events::WatchEvent;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{debug, error, info};

/// Live subscription to a directory. Dropping it or calling
/// [`WatcherHandle::stop`] ends the event stream.
pub struct WatcherHandle {
	watcher: RecommendedWatcher,
	path: PathBuf,
}

impl WatcherHandle {
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Tear down the subscription; the receiver drains and then yields `None`
	pub fn stop(mut self) -> Result<()> {
		self.watcher.unwatch(&self.path)?;
		info!("Stopped watching {}", self.path.display());
		Ok(())
	}
}

/// Start a non-recursive watch on `path`.
///
/// Must be called from within a tokio runtime: raw notify events are
/// converted on a blocking task and forwarded to the returned receiver.
pub fn start(
	path: &Path,
) -> Result<(WatcherHandle, tokio_mpsc::UnboundedReceiver<WatchEvent>)> {
	if !path.is_dir() {
		return Err(SorterError::InvalidPath {
			path: path.to_string_lossy().to_string(),
		});
	}

	let (notify_tx, notify_rx) = mpsc::channel();
	let (event_tx, event_rx) = tokio_mpsc::unbounded_channel();

	let mut watcher = RecommendedWatcher::new(notify_tx, Config::default())?;
	watcher.watch(path, RecursiveMode::NonRecursive)?;
	info!("Watching directory: {} (recursive: false)", path.display());

	tokio::task::spawn_blocking(move || forward_notify_events(notify_rx, event_tx));

	Ok((WatcherHandle { watcher, path: path.to_path_buf() }, event_rx))
}

/// Runs until the notify sender is dropped (watcher gone) or the receiver
/// side is closed.
fn forward_notify_events(
	notify_rx: mpsc::Receiver<notify::Result<Event>>,
	event_tx: tokio_mpsc::UnboundedSender<WatchEvent>,
) {
	for result in notify_rx {
		match result {
			Ok(event) => {
				debug!("Received notify event: {:?}", event);

				for fs_event in WatchEvent::from_notify(event) {
					if event_tx.send(fs_event).is_err() {
						debug!("Event receiver closed, stopping notify forwarding");
						return;
					}
				}
			}
			Err(e) => {
				error!("Notify error: {}", e);
			}
		}
	}
	debug!("Notify event stream ended");
}

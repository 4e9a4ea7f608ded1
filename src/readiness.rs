//! Readiness probe for files that may still be held by their writer
//!
//! A candidate is ready once it can be opened for reading with a shared lock.
//! The probe polls at a fixed interval; by default it never gives up, which
//! means a file locked forever stalls its own pipeline run (and only that one).

use crate::error::{Result, SorterError};
use fs2::FileExt;
use std::fs::File;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// One readiness attempt
pub trait ReadinessCheck: Send + Sync {
	fn is_ready(&self, path: &Path) -> bool;
}

/// Opens the file for reading and takes (then drops) a shared lock. Fails
/// while a writer holds an exclusive lock on it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SharedLockCheck;

impl ReadinessCheck for SharedLockCheck {
	fn is_ready(&self, path: &Path) -> bool {
		let file = match File::open(path) {
			Ok(file) => file,
			Err(e) => {
				debug!("Cannot open {} yet: {}", path.display(), e);
				return false;
			}
		};

		match FileExt::try_lock_shared(&file) {
			Ok(()) => {
				let _ = FileExt::unlock(&file);
				true
			}
			Err(e) => {
				debug!("{} is still locked: {}", path.display(), e);
				false
			}
		}
	}
}

/// Strategy for waiting until a file is ready
pub trait ReadinessProbe: Send + Sync {
	/// Resolve once `path` is ready; the value is the number of attempts made
	fn wait_ready<'a>(
		&'a self, path: &'a Path,
	) -> Pin<Box<dyn Future<Output = Result<u32>> + Send + 'a>>;
}

/// Fixed-interval polling probe
#[derive(Clone)]
pub struct PollingProbe {
	interval: Duration,
	timeout: Option<Duration>,
	check: Arc<dyn ReadinessCheck>,
}

impl PollingProbe {
	/// Poll forever
	pub fn unbounded(interval: Duration) -> Self {
		Self { interval, timeout: None, check: Arc::new(SharedLockCheck) }
	}

	/// Give up with [`SorterError::ProbeTimeout`] once `timeout` has elapsed
	pub fn bounded(interval: Duration, timeout: Duration) -> Self {
		Self { interval, timeout: Some(timeout), check: Arc::new(SharedLockCheck) }
	}

	pub fn from_timeout(interval: Duration, timeout: Option<Duration>) -> Self {
		match timeout {
			Some(timeout) => Self::bounded(interval, timeout),
			None => Self::unbounded(interval),
		}
	}

	/// Replace the per-attempt check
	pub fn with_check(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
		self.check = check;
		self
	}
}

impl ReadinessProbe for PollingProbe {
	fn wait_ready<'a>(
		&'a self, path: &'a Path,
	) -> Pin<Box<dyn Future<Output = Result<u32>> + Send + 'a>> {
		Box::pin(async move {
			let start = Instant::now();
			let mut attempts = 0u32;

			loop {
				attempts += 1;
				if self.check.is_ready(path) {
					if attempts > 1 {
						debug!("{} became ready after {} attempts", path.display(), attempts);
					}
					return Ok(attempts);
				}

				if let Some(timeout) = self.timeout {
					if start.elapsed() >= timeout {
						return Err(SorterError::ProbeTimeout {
							path: path.to_path_buf(),
							timeout,
							attempts,
						});
					}
				}

				tokio::time::sleep(self.interval).await;
			}
		})
	}
}

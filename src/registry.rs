use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Record of every absolute path handled during the current run.
///
/// Append-only; nothing is persisted, so a restart starts from an empty set.
pub trait ProcessedPaths: Send + Sync {
	fn contains(&self, path: &Path) -> bool;

	/// Record `path`; returns `false` if it was already present
	fn insert(&self, path: PathBuf) -> bool;
}

/// In-memory processed-path set
#[derive(Debug, Default)]
pub struct ProcessedPathSet {
	paths: Mutex<HashSet<PathBuf>>,
}

impl ProcessedPathSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<PathBuf>> {
		// The set stays consistent even if a holder panicked mid-insert
		self.paths.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

impl ProcessedPaths for ProcessedPathSet {
	fn contains(&self, path: &Path) -> bool {
		self.lock().contains(path)
	}

	fn insert(&self, path: PathBuf) -> bool {
		self.lock().insert(path)
	}
}

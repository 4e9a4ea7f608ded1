use crate::events::WatchEvent;
use crate::path_utils::{absolute_lexical, is_within};
use std::path::{Path, PathBuf};

/// Decides whether a raw event names a candidate file.
///
/// Pure apart from resolving relative paths against the current directory.
#[derive(Debug, Clone)]
pub struct EventFilter {
	watched_root: PathBuf,
	extension: String,
}

impl EventFilter {
	/// `watched_root` must already be absolute
	pub fn new(watched_root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
		Self {
			watched_root: watched_root.into(),
			extension: extension.into(),
		}
	}

	pub fn extension(&self) -> &str {
		&self.extension
	}

	/// Absolute candidate path, or `None` for directories, wrong extensions and
	/// paths outside the watched root. Moves are judged by their destination.
	pub fn candidate(&self, event: &WatchEvent) -> Option<PathBuf> {
		if event.is_directory {
			return None;
		}

		let path = event.effective_path();
		if !self.has_target_extension(path) {
			return None;
		}

		let absolute = absolute_lexical(path).ok()?;
		if !is_within(&absolute, &self.watched_root) {
			return None;
		}
		Some(absolute)
	}

	/// Exact, case-sensitive suffix match on the file name
	pub fn has_target_extension(&self, path: &Path) -> bool {
		path.file_name()
			.map(|name| name.as_encoded_bytes().ends_with(self.extension.as_bytes()))
			.unwrap_or(false)
	}
}

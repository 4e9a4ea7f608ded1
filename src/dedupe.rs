use crate::path_utils::is_within;
use crate::registry::ProcessedPaths;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Outcome of offering a candidate to the deduplicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
	/// Newly committed; the caller owns processing of this path
	Accepted,
	/// Already handled during this run
	AlreadyProcessed,
	/// Lies under the output directory
	InOutputDir,
}

impl Admission {
	pub fn is_accepted(self) -> bool {
		self == Admission::Accepted
	}
}

/// Commits each candidate path at most once per run.
///
/// The commit happens synchronously in [`Deduplicator::admit`], before any
/// settle delay, so the burst of create + modify events a single write
/// produces only ever starts one pipeline.
#[derive(Clone)]
pub struct Deduplicator {
	processed: Arc<dyn ProcessedPaths>,
	output_dir: PathBuf,
}

impl Deduplicator {
	pub fn new(processed: Arc<dyn ProcessedPaths>, output_dir: impl Into<PathBuf>) -> Self {
		Self { processed, output_dir: output_dir.into() }
	}

	pub fn admit(&self, path: &Path) -> Admission {
		if self.processed.contains(path) {
			info!("File {} already processed in this session, skipping", path.display());
			return Admission::AlreadyProcessed;
		}

		if is_within(path, &self.output_dir) {
			info!("File {} is already in the output directory, skipping", path.display());
			return Admission::InOutputDir;
		}

		if !self.processed.insert(path.to_path_buf()) {
			info!("File {} already processed in this session, skipping", path.display());
			return Admission::AlreadyProcessed;
		}

		Admission::Accepted
	}

	/// Record a path produced by processing (the final destination)
	pub fn mark_done(&self, path: PathBuf) {
		self.processed.insert(path);
	}

	pub fn processed(&self) -> &Arc<dyn ProcessedPaths> {
		&self.processed
	}
}

//! Common test utilities for the oscillogram sorter

#![allow(dead_code)]

use oscillogram_sorter::{FileProcessor, SorterConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Short settle delay and poll interval so pipeline runs finish quickly
pub const FAST_SETTLE: Duration = Duration::from_millis(10);
pub const FAST_POLL: Duration = Duration::from_millis(5);

/// Create a temporary directory for testing
pub fn setup_temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temp directory")
}

/// Default configuration rooted at `root` with fast timings, output dir created
/// and paths resolved
pub fn fast_config(root: &Path) -> SorterConfig {
	let config = SorterConfig::for_root(root).with_timing(FAST_SETTLE, FAST_POLL);
	std::fs::create_dir_all(&config.output_dir).expect("Failed to create output dir");
	config.resolve().expect("Failed to resolve config")
}

/// Temp dir plus a processor watching it
pub fn setup_processor() -> (TempDir, FileProcessor) {
	let dir = setup_temp_dir();
	let processor = FileProcessor::new(fast_config(dir.path()));
	(dir, processor)
}

/// Write a candidate file under the watched root
pub fn create_candidate(root: &Path, name: &str, content: &str) -> PathBuf {
	let path = root.join(name);
	std::fs::write(&path, content).expect("Failed to write candidate");
	path
}

/// Sorted file names inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
	let mut names: Vec<String> = std::fs::read_dir(dir)
		.expect("Failed to read dir")
		.filter_map(|entry| entry.ok())
		.filter(|entry| entry.path().is_file())
		.map(|entry| entry.file_name().to_string_lossy().to_string())
		.collect();
	names.sort();
	names
}

/// Poll until `path` exists or `timeout` expires
pub async fn wait_for_file(path: &Path, timeout: Duration) -> bool {
	let start = std::time::Instant::now();
	while start.elapsed() < timeout {
		if path.exists() {
			return true;
		}
		tokio::time::sleep(Duration::from_millis(20)).await;
	}
	path.exists()
}

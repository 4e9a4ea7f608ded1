use crate::error::{Result, SorterError};
use crate::path_utils::absolutize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the directory (under the watched root) receiving classified files
pub const OUTPUT_DIR_NAME: &str = "Файлы обработанных осциллограмм";
/// Name of the directory (under the watched root) holding `log.txt`
pub const LOG_DIR_NAME: &str = "logs";
pub const LOG_FILE_NAME: &str = "log.txt";

/// Configuration for the sorter
#[derive(Debug, Clone)]
pub struct SorterConfig {
	/// Directory under observation (non-recursive)
	pub watched_root: PathBuf,
	/// Destination for fully processed files
	pub output_dir: PathBuf,
	/// Directory holding the persistent log file
	pub log_dir: PathBuf,
	/// Pause before processing a candidate and again after moving it
	pub settle_delay: Duration,
	/// Interval between readiness probe attempts
	pub poll_interval: Duration,
	/// Upper bound for the readiness probe; `None` polls forever
	pub probe_timeout: Option<Duration>,
	/// Target extension including the leading dot, matched case-sensitively
	pub extension: String,
	/// Substrings searched for in the first line of a candidate
	pub keywords: Vec<String>,
	/// Name suffix applied when a keyword is found
	pub matched_suffix: String,
	/// Name suffix applied when no keyword is found
	pub unmatched_suffix: String,
}

impl Default for SorterConfig {
	fn default() -> Self {
		Self::for_root(".")
	}
}

impl SorterConfig {
	/// Default configuration with the output and log directories placed under `root`
	pub fn for_root(root: impl AsRef<Path>) -> Self {
		let root = root.as_ref();
		Self {
			watched_root: root.to_path_buf(),
			output_dir: root.join(OUTPUT_DIR_NAME),
			log_dir: root.join(LOG_DIR_NAME),
			settle_delay: Duration::from_secs(1),
			poll_interval: Duration::from_millis(500),
			probe_timeout: None,
			extension: ".DO".to_string(),
			keywords: vec!["4000".to_string(), "800".to_string(), "100".to_string()],
			matched_suffix: "ЭлИзнос".to_string(),
			unmatched_suffix: "ПКС".to_string(),
		}
	}

	/// Override both settle delay and poll interval
	pub fn with_timing(mut self, settle_delay: Duration, poll_interval: Duration) -> Self {
		self.settle_delay = settle_delay;
		self.poll_interval = poll_interval;
		self
	}

	pub fn log_file(&self) -> PathBuf {
		self.log_dir.join(LOG_FILE_NAME)
	}

	/// Validate the configuration and return errors if invalid
	pub fn validate(&self) -> Result<()> {
		if self.extension.len() < 2 || !self.extension.starts_with('.') {
			return Err(SorterError::configuration_error(
				"extension",
				"must be a dot followed by at least one character",
				".DO",
				&self.extension,
			));
		}

		if self.poll_interval.is_zero() {
			return Err(SorterError::configuration_error(
				"poll_interval",
				"must be greater than zero",
				"> 0ms",
				"0ms",
			));
		}

		if self.keywords.is_empty() || self.keywords.iter().any(|k| k.is_empty()) {
			return Err(SorterError::configuration_error(
				"keywords",
				"must contain at least one non-empty keyword",
				"[\"4000\", \"800\", \"100\"]",
				&format!("{:?}", self.keywords),
			));
		}

		if self.matched_suffix == self.unmatched_suffix {
			return Err(SorterError::configuration_error(
				"unmatched_suffix",
				"must differ from matched_suffix",
				"distinct suffixes",
				&self.unmatched_suffix,
			));
		}

		Ok(())
	}

	/// Return a copy with the watched root and output directory made absolute.
	///
	/// Run this after the directories exist so that symlinked roots resolve to
	/// the same form the notification backend reports.
	pub fn resolve(&self) -> Result<Self> {
		let mut resolved = self.clone();
		resolved.watched_root = absolutize(&self.watched_root)?;
		resolved.output_dir = absolutize(&self.output_dir)?;
		resolved.log_dir = absolutize(&self.log_dir)?;
		Ok(resolved)
	}
}

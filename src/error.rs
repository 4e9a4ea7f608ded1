use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Sorter error types
///
/// Pipeline failures carry the paths involved so the log line for a failed
/// file is self-contained; `category` tags that line. None of these are
/// process-fatal; the dispatch loop logs them and keeps serving events.
#[derive(Error, Debug)]
pub enum SorterError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("Invalid path: {path}")]
	InvalidPath { path: String },

	#[error("Rename failed: {} -> {} - {source}", from.display(), to.display())]
	Rename {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Move failed: {} -> {} - {source}", from.display(), to.display())]
	Move {
		from: PathBuf,
		to: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Destination already exists: {}", path.display())]
	DestinationExists { path: PathBuf },

	#[error("Failed to read first line of {}: {source}", path.display())]
	Classification {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Readiness probe timed out for {} after {timeout:?} ({attempts} attempts)", path.display())]
	ProbeTimeout {
		path: PathBuf,
		timeout: Duration,
		attempts: u32,
	},

	#[error(
		"Configuration error: {parameter} - {reason} (expected: {expected}, actual: {actual})"
	)]
	Configuration {
		parameter: String,
		reason: String,
		expected: String,
		actual: String,
	},
}

impl SorterError {
	/// Check if this error is related to configuration issues
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			SorterError::Configuration { .. } | SorterError::InvalidPath { .. }
		)
	}

	/// Get error category for logging
	pub fn category(&self) -> &'static str {
		match self {
			SorterError::Io(_) => "io",
			SorterError::Notify(_) => "notify",
			SorterError::InvalidPath { .. } => "configuration",
			SorterError::Rename { .. } => "rename",
			SorterError::Move { .. } => "move",
			SorterError::DestinationExists { .. } => "move",
			SorterError::Classification { .. } => "classification",
			SorterError::ProbeTimeout { .. } => "timeout",
			SorterError::Configuration { .. } => "configuration",
		}
	}

	/// Create a configuration error
	pub fn configuration_error(
		parameter: &str, reason: &str, expected: &str, actual: &str,
	) -> Self {
		SorterError::Configuration {
			parameter: parameter.to_string(),
			reason: reason.to_string(),
			expected: expected.to_string(),
			actual: actual.to_string(),
		}
	}
}

pub type Result<T> = std::result::Result<T, SorterError>;

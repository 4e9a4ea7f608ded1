use crate::classify::{classify_file, Classification};
use crate::config::SorterConfig;
use crate::dedupe::{Admission, Deduplicator};
use crate::error::{Result, SorterError};
use crate::events::WatchEvent;
use crate::filter::EventFilter;
use crate::naming::{destination_path, suffix_for, text_path};
use crate::readiness::{PollingProbe, ReadinessProbe};
use crate::registry::{ProcessedPathSet, ProcessedPaths};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Receives raw events, admits candidates and runs one pipeline task per
/// admitted file.
///
/// Filtering and deduplication run synchronously in [`FileProcessor::handle_event`];
/// everything after the commit runs on a spawned task so one file's settle
/// delay never holds up the next event.
pub struct FileProcessor {
	filter: EventFilter,
	dedupe: Deduplicator,
	pipeline: Pipeline,
}

/// Everything a pipeline run needs, cheap to clone into a task
#[derive(Clone)]
struct Pipeline {
	config: Arc<SorterConfig>,
	probe: Arc<dyn ReadinessProbe>,
	dedupe: Deduplicator,
}

impl FileProcessor {
	/// Processor with an empty in-memory registry and the polling probe the
	/// configuration describes. `config` should already be resolved.
	pub fn new(config: SorterConfig) -> Self {
		let probe = PollingProbe::from_timeout(config.poll_interval, config.probe_timeout);
		Self::with_parts(config, Arc::new(ProcessedPathSet::new()), Arc::new(probe))
	}

	pub fn with_parts(
		config: SorterConfig, processed: Arc<dyn ProcessedPaths>, probe: Arc<dyn ReadinessProbe>,
	) -> Self {
		let filter = EventFilter::new(config.watched_root.clone(), config.extension.clone());
		let dedupe = Deduplicator::new(processed, config.output_dir.clone());
		let pipeline = Pipeline {
			config: Arc::new(config),
			probe,
			dedupe: dedupe.clone(),
		};
		Self { filter, dedupe, pipeline }
	}

	pub fn config(&self) -> &SorterConfig {
		&self.pipeline.config
	}

	pub fn processed(&self) -> &Arc<dyn ProcessedPaths> {
		self.dedupe.processed()
	}

	/// Filter and deduplicate `event`, then spawn its pipeline run.
	///
	/// Returns the task handle when the event started processing. Must be
	/// called from within a tokio runtime.
	pub fn handle_event(&self, event: &WatchEvent) -> Option<JoinHandle<Result<PathBuf>>> {
		let candidate = self.admit(event)?;
		let pipeline = self.pipeline.clone();

		Some(tokio::spawn(async move {
			let result = pipeline.run(&candidate).await;
			if let Err(e) = &result {
				error!(
					"Processing of {} failed ({}): {}",
					candidate.display(),
					e.category(),
					e
				);
			}
			result
		}))
	}

	/// Filter and deduplicate `event`, then run its pipeline inline
	pub async fn process_event(&self, event: &WatchEvent) -> Option<Result<PathBuf>> {
		let candidate = self.admit(event)?;
		Some(self.pipeline.run(&candidate).await)
	}

	fn admit(&self, event: &WatchEvent) -> Option<PathBuf> {
		let candidate = self.filter.candidate(event)?;
		debug!("Candidate event {:?} for {}", event.kind, candidate.display());

		match self.dedupe.admit(&candidate) {
			Admission::Accepted => {
				info!(
					"Detected {} file: {}",
					self.filter.extension(),
					candidate.display()
				);
				Some(candidate)
			}
			Admission::AlreadyProcessed | Admission::InOutputDir => None,
		}
	}
}

impl Pipeline {
	async fn run(&self, candidate: &Path) -> Result<PathBuf> {
		let config = &self.config;

		tokio::time::sleep(config.settle_delay).await;
		info!("Processing started: {}", candidate.display());

		self.probe.wait_ready(candidate).await?;

		let text = text_path(candidate);
		tokio::fs::rename(candidate, &text).await.map_err(|source| SorterError::Rename {
			from: candidate.to_path_buf(),
			to: text.clone(),
			source,
		})?;
		info!("File renamed to {}", text.display());

		let classification = match classify_file(&text, &config.keywords).await {
			Ok(classification) => classification,
			Err(e) => {
				error!("{}", e);
				Classification::Unmatched
			}
		};
		match &classification {
			Classification::Matched { keyword } => {
				info!("Keyword {} found in first line of {}", keyword, text.display())
			}
			Classification::Unmatched => {
				info!("No keyword found in first line of {}", text.display())
			}
		}

		let suffix = suffix_for(&classification, &config.matched_suffix, &config.unmatched_suffix);
		let destination = destination_path(&config.output_dir, candidate, suffix, &config.extension);
		if tokio::fs::try_exists(&destination).await? {
			return Err(SorterError::DestinationExists { path: destination });
		}

		tokio::fs::rename(&text, &destination).await.map_err(|source| SorterError::Move {
			from: text.clone(),
			to: destination.clone(),
			source,
		})?;
		info!("Processing complete, file moved to {}", destination.display());

		tokio::time::sleep(config.settle_delay).await;

		self.dedupe.mark_done(destination.clone());
		Ok(destination)
	}
}

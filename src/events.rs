use chrono::{DateTime, Utc};
use notify::event::{CreateKind, ModifyKind, RenameMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Kind of filesystem change delivered by the event source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EventKind {
	Created,
	Modified,
	/// Rename or move; `destination` is where the entry now lives
	Moved { destination: PathBuf },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchEvent {
	pub id: Uuid,
	pub kind: EventKind,
	/// Affected path (the source path for moves)
	pub path: PathBuf,
	pub is_directory: bool,
	pub timestamp: DateTime<Utc>,
}

impl WatchEvent {
	pub fn new(kind: EventKind, path: PathBuf, is_directory: bool) -> Self {
		Self {
			id: Uuid::new_v4(),
			kind,
			path,
			is_directory,
			timestamp: Utc::now(),
		}
	}

	pub fn created(path: impl Into<PathBuf>) -> Self {
		Self::new(EventKind::Created, path.into(), false)
	}

	pub fn modified(path: impl Into<PathBuf>) -> Self {
		Self::new(EventKind::Modified, path.into(), false)
	}

	pub fn moved(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
		Self::new(EventKind::Moved { destination: to.into() }, from.into(), false)
	}

	pub fn directory(mut self) -> Self {
		self.is_directory = true;
		self
	}

	/// Path the event is about after it happened
	pub fn effective_path(&self) -> &Path {
		match &self.kind {
			EventKind::Moved { destination } => destination,
			_ => &self.path,
		}
	}

	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string(self)
	}

	/// Convert a raw notify event. Removals, accesses and the "from" half of a
	/// split rename carry nothing to process and are dropped.
	pub fn from_notify(event: notify::Event) -> Vec<WatchEvent> {
		match event.kind {
			notify::EventKind::Create(create_kind) => event
				.paths
				.into_iter()
				.map(|path| {
					let is_dir =
						matches!(create_kind, CreateKind::Folder) || probe_is_directory(&path);
					WatchEvent::new(EventKind::Created, path, is_dir)
				})
				.collect(),
			notify::EventKind::Modify(ModifyKind::Name(mode)) => match mode {
				RenameMode::From => Vec::new(),
				RenameMode::Both => {
					let mut paths = event.paths.into_iter();
					match (paths.next(), paths.next()) {
						(Some(from), Some(to)) => {
							let is_dir = probe_is_directory(&to);
							vec![WatchEvent::new(EventKind::Moved { destination: to }, from, is_dir)]
						}
						(Some(only), None) => vec![moved_in(only)],
						_ => Vec::new(),
					}
				}
				_ => event.paths.into_iter().map(moved_in).collect(),
			},
			notify::EventKind::Modify(_) => event
				.paths
				.into_iter()
				.map(|path| {
					let is_dir = probe_is_directory(&path);
					WatchEvent::new(EventKind::Modified, path, is_dir)
				})
				.collect(),
			_ => Vec::new(),
		}
	}
}

/// A rename whose source is unknown (moved in from outside the watched root)
fn moved_in(path: PathBuf) -> WatchEvent {
	let is_dir = probe_is_directory(&path);
	WatchEvent::new(
		EventKind::Moved { destination: path.clone() },
		path,
		is_dir,
	)
}

fn probe_is_directory(path: &Path) -> bool {
	std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

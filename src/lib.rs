pub mod classify;
pub mod config;
pub mod dedupe;
mod error;
pub mod events;
pub mod filter;
pub mod naming;
pub mod path_utils;
pub mod processor;
pub mod readiness;
pub mod registry;
pub mod service;
pub mod watcher;

pub use classify::Classification;
pub use config::SorterConfig;
pub use dedupe::{Admission, Deduplicator};
pub use error::{Result, SorterError};
pub use events::{EventKind, WatchEvent};
pub use filter::EventFilter;
pub use processor::FileProcessor;
pub use readiness::{PollingProbe, ReadinessCheck, ReadinessProbe, SharedLockCheck};
pub use registry::{ProcessedPathSet, ProcessedPaths};
pub use watcher::WatcherHandle;

//! Path helpers shared by the filter and the deduplicator
//!
//! Event paths are compared against the watched root and output directory by
//! component prefix, so every path must be absolute and in the same form. The
//! configured directories are canonicalized once at startup; event paths are
//! only made absolute lexically since the file may already be gone.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Make `path` absolute without touching the filesystem beyond reading the
/// current directory. `.` and `..` components are folded lexically.
pub fn absolute_lexical(path: &Path) -> io::Result<PathBuf> {
	let joined = if path.is_absolute() {
		path.to_path_buf()
	} else {
		std::env::current_dir()?.join(path)
	};

	let mut normalized = PathBuf::new();
	for component in joined.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other.as_os_str()),
		}
	}
	Ok(normalized)
}

/// Canonicalize `path` if it exists, else fall back to [`absolute_lexical`]
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
	match path.canonicalize() {
		Ok(canonical) => Ok(canonical),
		Err(_) => absolute_lexical(path),
	}
}

/// Whether `path` is `dir` itself or lies somewhere beneath it
pub fn is_within(path: &Path, dir: &Path) -> bool {
	path.starts_with(dir)
}

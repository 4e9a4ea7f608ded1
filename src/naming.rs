//! Pure path computations for the rename and relocation steps

use crate::classify::Classification;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const TEXT_EXTENSION: &str = "txt";

/// Same directory and base name with the extension replaced by `.txt`
pub fn text_path(candidate: &Path) -> PathBuf {
	candidate.with_extension(TEXT_EXTENSION)
}

/// `{stem}{suffix}{extension}` where the stem comes from the original
/// candidate path, never from the intermediate text path
pub fn final_file_name(candidate: &Path, suffix: &str, extension: &str) -> OsString {
	let mut name = candidate.file_stem().map(OsString::from).unwrap_or_default();
	name.push(suffix);
	name.push(extension);
	name
}

/// Suffix chosen for a classification outcome
pub fn suffix_for<'a>(
	classification: &Classification, matched_suffix: &'a str, unmatched_suffix: &'a str,
) -> &'a str {
	if classification.is_matched() {
		matched_suffix
	} else {
		unmatched_suffix
	}
}

/// Final location of a candidate inside the output directory
pub fn destination_path(
	output_dir: &Path, candidate: &Path, suffix: &str, extension: &str,
) -> PathBuf {
	output_dir.join(final_file_name(candidate, suffix, extension))
}

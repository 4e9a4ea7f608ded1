use crate::error::{Result, SorterError};
use encoding_rs::WINDOWS_1252;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Outcome of checking a file's first line against the keyword set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
	Matched { keyword: String },
	Unmatched,
}

impl Classification {
	pub fn is_matched(&self) -> bool {
		matches!(self, Classification::Matched { .. })
	}
}

/// First keyword (in set order) contained in `line`
pub fn classify_line<S: AsRef<str>>(line: &str, keywords: &[S]) -> Classification {
	for keyword in keywords {
		let keyword: &str = keyword.as_ref();
		if line.contains(keyword) {
			return Classification::Matched { keyword: keyword.to_string() };
		}
	}
	Classification::Unmatched
}

/// Decode bytes as Windows-1252, substituting anything undecodable
pub fn decode_legacy(bytes: &[u8]) -> String {
	let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
	text.into_owned()
}

/// Read the first line of `path`, without its terminator.
///
/// A line ends at `\n`, `\r\n` or a bare `\r`, whichever comes first, or at EOF.
pub async fn read_first_line(path: &Path) -> Result<String> {
	let read_error = |source| SorterError::Classification { path: path.to_path_buf(), source };

	let file = tokio::fs::File::open(path).await.map_err(read_error)?;
	let mut reader = BufReader::new(file);
	let mut line = Vec::new();

	loop {
		let buf = reader.fill_buf().await.map_err(read_error)?;
		if buf.is_empty() {
			break;
		}

		if let Some(end) = buf.iter().position(|&b| b == b'\n' || b == b'\r') {
			line.extend_from_slice(&buf[..end]);
			break;
		}

		let consumed = buf.len();
		line.extend_from_slice(buf);
		reader.consume(consumed);
	}

	Ok(decode_legacy(&line))
}

/// Classify the file at `path` by its first line
pub async fn classify_file<S: AsRef<str>>(path: &Path, keywords: &[S]) -> Result<Classification> {
	let line = read_first_line(path).await?;
	Ok(classify_line(&line, keywords))
}

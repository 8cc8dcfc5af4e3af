use serde::Deserialize;
use serde::Serialize;

use crate::span::Span;

/// A date-titled slice of the nomination page, delimited by level-3
/// headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
	/// The heading text, trimmed.
	pub date: String,
	/// From the heading's line start to the next heading's line start (or
	/// the end of the document).
	pub span: Span,
}

/// Split a page into its date sections in document order.
///
/// Only `=== title ===` headings count; other heading levels pass through
/// as ordinary content. A page without headings yields an empty list, and
/// callers treat a missing date as a lookup miss rather than an error.
///
/// Sections are recomputed on every call; nothing caches an index across
/// edits.
pub fn date_sections(document: &str) -> Vec<Section> {
	let mut sections: Vec<Section> = Vec::new();
	let mut offset = 0;

	for line in document.split('\n') {
		let line_end = offset + line.len();

		if let Some(title) = heading_title(line) {
			if let Some(previous) = sections.last_mut() {
				previous.span.end = offset;
			}

			sections.push(Section {
				date: title.to_string(),
				span: Span::new(offset, document.len()),
			});
		}

		offset = line_end + 1; // +1 for the \n
	}

	sections
}

/// The title of a level-3 heading line, or `None` for anything else. The
/// marker must open the line; `====`-level headings and headings with an
/// empty title don't match.
fn heading_title(line: &str) -> Option<&str> {
	let rest = line.trim_end().strip_prefix("===")?;
	let body = rest.strip_suffix("===")?;
	let title = body.trim();

	if title.is_empty() || title.starts_with('=') || title.ends_with('=') {
		return None;
	}

	Some(title)
}

use std::collections::BTreeMap;

use crate::ParseContext;
use crate::WikinomError;
use crate::WikinomResult;
use crate::entries::Entry;
use crate::entries::collect_entries;
use crate::sections::date_sections;
use crate::span::Span;
use crate::store::DocumentStore;

/// Apply a set of parameter replacements to one entry, returning the edited
/// document.
///
/// Each change key resolves to the entry's parameter-value span; keys the
/// entry doesn't carry are skipped silently, so a stray key is a no-op on
/// that field rather than a failure. Edits are applied in reverse offset
/// order so earlier replacements don't shift the spans of later ones: the
/// spans target disjoint values, but a replacement of a different length
/// moves everything after it.
///
/// An empty change map returns the document unchanged.
pub fn apply_changes(
	document: &str,
	entry: &Entry,
	changes: &BTreeMap<String, String>,
) -> String {
	let mut edits: Vec<(Span, &str)> = changes
		.iter()
		.filter_map(|(key, value)| {
			entry
				.get(key)
				.map(|param| (param.value_span, value.as_str()))
		})
		.collect();

	edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));

	let mut result = document.to_string();
	for (span, replacement) in edits {
		result.replace_range(span.start..span.end, replacement);
	}

	result
}

/// Fetch a page, patch one entry, and write the result back.
///
/// This is the whole edit cycle the presentation layer drives: every call
/// re-fetches and re-parses rather than trusting any earlier snapshot, and
/// the store's last write wins if two editors race.
pub fn update_entry_parameters(
	ctx: &ParseContext,
	store: &mut dyn DocumentStore,
	page: &str,
	date: &str,
	index: usize,
	changes: &BTreeMap<String, String>,
) -> WikinomResult<()> {
	let document = store.fetch(page)?;

	let Some(section) = date_sections(&document)
		.into_iter()
		.find(|section| section.date == date)
	else {
		return Err(WikinomError::SectionNotFound {
			date: date.to_string(),
		});
	};

	let mut entries = collect_entries(ctx, &document, &section);
	if index == 0 || index > entries.len() {
		return Err(WikinomError::EntryNotFound {
			date: date.to_string(),
			index,
		});
	}
	let entry = entries.swap_remove(index - 1);

	let updated = apply_changes(&document, &entry, changes);
	store.submit(page, &updated)
}

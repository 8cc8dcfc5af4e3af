use serde::Deserialize;
use serde::Serialize;

use crate::ParseContext;
use crate::lexer::find_anchored;
use crate::parser::NumberedGroup;
use crate::parser::Parameter;
use crate::parser::ParseDiagnostic;
use crate::parser::ParsedTemplate;
use crate::parser::parse_template_inner;
use crate::sections::Section;
use crate::sections::date_sections;
use crate::span::Span;

/// How an entry appears on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
	/// A standalone nomination template.
	Main,
	/// A nested template inside a standalone nomination's extra-nominations
	/// parameter.
	Extra,
	/// One numbered group from a grouped template invocation.
	Grouped,
}

impl std::fmt::Display for EntryKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Main => write!(f, "main"),
			Self::Extra => write!(f, "extra"),
			Self::Grouped => write!(f, "grouped"),
		}
	}
}

/// The parsed material backing an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySource {
	Main(ParsedTemplate),
	Extra(ParsedTemplate),
	Grouped(NumberedGroup),
}

/// One nomination as addressed by editors: a 1-based position within a date
/// section, counting standalone templates, their nested extras, and grouped
/// nominations alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
	pub source: EntrySource,
	/// Where the entry's text sits on the page.
	pub span: Span,
}

impl Entry {
	pub fn kind(&self) -> EntryKind {
		match self.source {
			EntrySource::Main(_) => EntryKind::Main,
			EntrySource::Extra(_) => EntryKind::Extra,
			EntrySource::Grouped(_) => EntryKind::Grouped,
		}
	}

	/// Look up a parameter by name, whatever shape the entry has. Repeated
	/// keys resolve to their final occurrence.
	pub fn get(&self, key: &str) -> Option<&Parameter> {
		match &self.source {
			EntrySource::Main(template) | EntrySource::Extra(template) => template.get(key),
			EntrySource::Grouped(group) => group.members.get(key),
		}
	}
}

/// Collect every entry inside `section`, ordered by start offset.
///
/// The ascending order is what gives entries their stable 1-based
/// addresses, so it is enforced with a final sort rather than assumed from
/// the scan.
pub fn collect_entries(ctx: &ParseContext, document: &str, section: &Section) -> Vec<Entry> {
	let mut diagnostics = Vec::new();
	collect_entries_inner(ctx, document, section, &mut diagnostics)
}

/// Like [`collect_entries`], but also returns the diagnostics collected
/// while parsing the section's templates.
pub fn collect_entries_with_diagnostics(
	ctx: &ParseContext,
	document: &str,
	section: &Section,
) -> (Vec<Entry>, Vec<ParseDiagnostic>) {
	let mut diagnostics = Vec::new();
	let entries = collect_entries_inner(ctx, document, section, &mut diagnostics);
	(entries, diagnostics)
}

fn collect_entries_inner(
	ctx: &ParseContext,
	document: &str,
	section: &Section,
	diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<Entry> {
	let main_open = ctx.main_open();
	let grouped_open = ctx.grouped_open();
	let sub_open = ctx.sub_open();

	let window_end = section.span.end;
	let mut entries = Vec::new();
	let mut scan = section.span.start;

	loop {
		let main_pos = find_anchored(document, &main_open, scan, window_end, section.span.start);
		let grouped_pos =
			find_anchored(document, &grouped_open, scan, window_end, section.span.start);

		let pos = match (main_pos, grouped_pos) {
			(Some(a), Some(b)) => a.min(b),
			(Some(a), None) => a,
			(None, Some(b)) => b,
			(None, None) => break,
		};

		let rest = &document[pos..];
		let template = parse_template_inner(ctx, document, pos, diagnostics);
		// Resume after the parsed invocation so its body is never scanned
		// twice, whatever the match order produced.
		scan = template.span.end.max(pos + 1);

		if rest.starts_with(&sub_open) {
			// Nested extras are only reachable through their parent; a loose
			// top-level occurrence is consumed without producing an entry.
			continue;
		}

		if rest.starts_with(&grouped_open) {
			for group in template.groups {
				let span = group.span;
				entries.push(Entry {
					source: EntrySource::Grouped(group),
					span,
				});
			}
			continue;
		}

		let nested: Vec<ParsedTemplate> = template
			.get(&ctx.extra_param)
			.map(|param| param.nested.clone())
			.unwrap_or_default();
		let span = template.span;

		entries.push(Entry {
			source: EntrySource::Main(template),
			span,
		});

		for sub in nested {
			let span = sub.span;
			entries.push(Entry {
				source: EntrySource::Extra(sub),
				span,
			});
		}
	}

	entries.sort_by_key(|entry| entry.span.start);
	entries
}

/// The `index`-th entry (1-based) under the section titled `date`, or
/// `None` when either the section or the entry doesn't exist.
///
/// The whole document is re-parsed on every call. Callers making several
/// lookups against one snapshot should fetch the text once and keep passing
/// the same string, not re-fetch between calls.
pub fn query_entry(
	ctx: &ParseContext,
	document: &str,
	date: &str,
	index: usize,
) -> Option<Entry> {
	let section = date_sections(document)
		.into_iter()
		.find(|section| section.date == date)?;

	let mut entries = collect_entries(ctx, document, &section);
	if index == 0 || index > entries.len() {
		return None;
	}

	Some(entries.swap_remove(index - 1))
}

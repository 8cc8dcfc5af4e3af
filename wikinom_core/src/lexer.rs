use logos::Logos;

use crate::span::Span;
use crate::span::Token;

/// Raw tokens produced by logos for flat tokenization of wikitext. Only the
/// characters that drive brace matching and parameter splitting get their own
/// tokens; everything else collapses into `Text` runs.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	/// `{{`
	#[token("{{")]
	OpenBraces,
	/// `}}`
	#[token("}}")]
	CloseBraces,
	/// A lone `{`, ignored by depth tracking.
	#[token("{")]
	OpenBrace,
	/// A lone `}`, ignored by depth tracking.
	#[token("}")]
	CloseBrace,
	/// `\n`
	#[token("\n")]
	Newline,
	/// `|`
	#[token("|")]
	Pipe,
	/// Everything between the tokens above.
	#[regex(r"[^{}\n|]+")]
	Text,
}

/// Find the end of the template invocation opening at `open_start`, counting
/// nested `{{`/`}}` pairs. Returns the byte offset immediately after the
/// `}}` that closes the opener, together with whether a closer was found at
/// all. Unbalanced input runs off the end of the document and reports
/// `(document.len(), false)`.
///
/// Lone braces do not affect the depth count; only the two-character forms
/// do.
///
/// # Panics
///
/// Panics when `open_start` does not point at `{{`. Malformed wikitext never
/// trips this; only a caller passing a bad offset does.
pub(crate) fn scan_template_end(document: &str, open_start: usize) -> (usize, bool) {
	assert!(
		document[open_start..].starts_with("{{"),
		"template scan must start on a `{{{{` opener"
	);

	let mut depth = 0usize;

	for (result, range) in RawToken::lexer(&document[open_start..]).spanned() {
		match result {
			Ok(RawToken::OpenBraces) => depth += 1,
			Ok(RawToken::CloseBraces) => {
				depth = depth.saturating_sub(1);
				if depth == 0 {
					return (open_start + range.end, true);
				}
			}
			_ => {}
		}
	}

	(document.len(), false)
}

/// The offset immediately after the `}}` matching the `{{` at `open_start`,
/// or `document.len()` when the braces never balance.
pub fn find_template_end(document: &str, open_start: usize) -> usize {
	scan_template_end(document, open_start).0
}

/// Split a template's inner content into raw parameter tokens.
///
/// A split happens only where a newline is immediately followed by `|` while
/// the nested-brace depth is zero; the two delimiter characters belong to no
/// token. The depth counter clamps at zero so stray `}}` in malformed input
/// cannot mask later delimiters. A final token from the last split point to
/// the end of `inner` is always emitted, even when empty, so joining the
/// token texts with `"\n|"` reproduces `inner` exactly.
///
/// Token spans are shifted by `base_offset` to stay absolute within the
/// enclosing document.
pub fn split_parameters(inner: &str, base_offset: usize) -> Vec<Token> {
	let raw_tokens: Vec<_> = RawToken::lexer(inner).spanned().collect();
	let mut tokens = Vec::new();
	let mut depth = 0usize;
	let mut piece_start = 0usize;
	let mut cursor = 0;

	while cursor < raw_tokens.len() {
		let (result, range) = &raw_tokens[cursor];

		let is_split = depth == 0
			&& matches!(result, Ok(RawToken::Newline))
			&& matches!(raw_tokens.get(cursor + 1), Some((Ok(RawToken::Pipe), _)));

		if is_split {
			tokens.push(Token::new(
				&inner[piece_start..range.start],
				Span::new(base_offset + piece_start, base_offset + range.start),
			));
			piece_start = range.end + 1;
			cursor += 2;
			continue;
		}

		match result {
			Ok(RawToken::OpenBraces) => depth += 1,
			Ok(RawToken::CloseBraces) => depth = depth.saturating_sub(1),
			_ => {}
		}
		cursor += 1;
	}

	tokens.push(Token::new(
		&inner[piece_start..],
		Span::new(base_offset + piece_start, base_offset + inner.len()),
	));

	tokens
}

pub fn memstr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}

/// Earliest occurrence of `needle` in `haystack[from..to]` that sits either
/// at `region_start` or immediately after a newline. Anchoring keeps marker
/// text that appears mid-sentence (say, a template name quoted in a
/// rationale) from being treated as an invocation.
pub(crate) fn find_anchored(
	haystack: &str,
	needle: &str,
	from: usize,
	to: usize,
	region_start: usize,
) -> Option<usize> {
	let bytes = haystack.as_bytes();
	let mut search_from = from;

	while search_from + needle.len() <= to {
		let offset = memstr(&bytes[search_from..to], needle.as_bytes())?;
		let pos = search_from + offset;

		if pos == region_start || (pos > 0 && bytes[pos - 1] == b'\n') {
			return Some(pos);
		}

		search_from = pos + 1;
	}

	None
}

use serde::Deserialize;
use serde::Serialize;

/// A half-open byte range into the original document string.
///
/// Every structure produced by the parsing pipeline carries spans instead of
/// substring copies, so that callers can splice replacement text back into
/// the document they parsed. Spans are never adjusted after creation; edits
/// re-parse instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
	/// Byte offset of the first character.
	pub start: usize,
	/// Byte offset one past the last character.
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		debug_assert!(start <= end);
		Self { start, end }
	}

	/// An empty span anchored at `offset`.
	pub fn empty(offset: usize) -> Self {
		Self {
			start: offset,
			end: offset,
		}
	}

	pub fn len(&self) -> usize {
		self.end - self.start
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// The text this span covers in `document`.
	pub fn slice<'a>(&self, document: &'a str) -> &'a str {
		&document[self.start..self.end]
	}

	/// The smallest span covering both `self` and `other`.
	pub fn union(&self, other: &Span) -> Span {
		Span {
			start: self.start.min(other.start),
			end: self.end.max(other.end),
		}
	}
}

/// A raw parameter slice together with its location in the document.
///
/// Tokens come out of the parameter splitter untrimmed; [`Token::trimmed`]
/// narrows the span in lockstep with the text so offsets stay valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	/// The slice text, exactly as it appears in the document.
	pub text: String,
	/// Where the slice sits in the document.
	pub span: Span,
}

impl Token {
	pub fn new(text: impl Into<String>, span: Span) -> Self {
		Self {
			text: text.into(),
			span,
		}
	}

	/// A copy of this token with surrounding whitespace removed and the span
	/// shifted inward by the same amount, so `span.slice(document)` still
	/// equals `text`.
	pub fn trimmed(&self) -> Token {
		let leading = self.text.len() - self.text.trim_start().len();
		let trimmed = self.text.trim();

		Token {
			text: trimmed.to_string(),
			span: Span::new(self.span.start + leading, self.span.start + leading + trimmed.len()),
		}
	}
}

use std::collections::BTreeMap;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::ParseContext;
use crate::lexer::find_anchored;
use crate::lexer::scan_template_end;
use crate::lexer::split_parameters;
use crate::span::Span;
use crate::span::Token;

/// A diagnostic produced during parsing. These are issues that don't prevent
/// parsing from completing but indicate problems in the source content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseDiagnostic {
	/// A `{{` was never balanced by `}}`; the parse ran to the end of the
	/// document and captured whatever content was there.
	UnbalancedBraces { start: usize },
	/// A parameter key in a grouped template carries no numeric suffix, so
	/// it belongs to no nomination group and was discarded.
	GroupKeyWithoutNumber { key: String, start: usize },
}

/// How a parameter is addressed inside its template.
///
/// Wikitext allows both `|name=value` and bare `|value` slots; keeping the
/// two shapes as distinct variants avoids a map keyed by
/// strings-or-integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKey {
	/// `key=value` form; holds the trimmed key text.
	Named(String),
	/// Bare value form; holds the 1-based slot index.
	Positional(u32),
}

impl ParamKey {
	pub fn as_named(&self) -> Option<&str> {
		match self {
			ParamKey::Named(name) => Some(name),
			ParamKey::Positional(_) => None,
		}
	}
}

impl std::fmt::Display for ParamKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ParamKey::Named(name) => write!(f, "{name}"),
			ParamKey::Positional(index) => write!(f, "{index}"),
		}
	}
}

/// One parsed template parameter with the spans needed to edit it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
	/// Named key or positional slot.
	pub key: ParamKey,
	/// The trimmed value text, cached for convenience.
	pub value: String,
	/// Span of the key text; absent for positional parameters.
	pub key_span: Option<Span>,
	/// Span of the trimmed value. Replacing exactly this range rewrites the
	/// parameter without touching surrounding whitespace or delimiters.
	pub value_span: Span,
	/// Span of the whole trimmed parameter slice (key through value).
	pub span: Span,
	/// Templates nested inside this parameter's value. Populated only for
	/// the extra-nominations parameter.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub nested: Vec<ParsedTemplate>,
}

/// One nomination extracted from a grouped template invocation, keyed by the
/// parameter prefix (the key with its numeric suffix removed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Deref)]
pub struct NumberedGroup {
	/// The numeric suffix shared by this group's parameter keys.
	pub number: u32,
	/// Members by key prefix.
	#[deref]
	pub members: BTreeMap<String, Parameter>,
	/// Union of the member spans.
	pub span: Span,
}

/// A parsed `{{…}}` template invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTemplate {
	/// The template name, trimmed.
	pub name: String,
	/// Span of the trimmed name.
	pub name_span: Span,
	/// Parameters in document order. Lookups scan from the back so a
	/// repeated key resolves to its final occurrence, matching how the wiki
	/// itself expands duplicate parameters.
	pub params: Vec<Parameter>,
	/// Span of the whole invocation including the outer braces.
	pub span: Span,
	/// Nomination groups, ascending by number. Populated only for the
	/// grouped template variant.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub groups: Vec<NumberedGroup>,
}

impl ParsedTemplate {
	/// The last parameter with the given name, if any.
	pub fn get(&self, name: &str) -> Option<&Parameter> {
		self.params
			.iter()
			.rev()
			.find(|param| matches!(&param.key, ParamKey::Named(key) if key == name))
	}

	/// The last parameter in the given positional slot, if any.
	pub fn get_positional(&self, index: u32) -> Option<&Parameter> {
		self.params
			.iter()
			.rev()
			.find(|param| param.key == ParamKey::Positional(index))
	}
}

/// Parse the template invocation opening at `start`, discarding diagnostics.
///
/// The returned template's `span.end` is the offset to resume scanning
/// from. Malformed content degrades (truncated spans, discarded keys) but
/// never fails.
///
/// # Panics
///
/// Panics when `start` does not point at `{{`; that is a caller bug, not a
/// content problem.
pub fn parse_template(ctx: &ParseContext, document: &str, start: usize) -> ParsedTemplate {
	let mut diagnostics = Vec::new();
	parse_template_inner(ctx, document, start, &mut diagnostics)
}

/// Like [`parse_template`], but also returns the diagnostics collected
/// while parsing this invocation and everything nested in it.
pub fn parse_template_with_diagnostics(
	ctx: &ParseContext,
	document: &str,
	start: usize,
) -> (ParsedTemplate, Vec<ParseDiagnostic>) {
	let mut diagnostics = Vec::new();
	let template = parse_template_inner(ctx, document, start, &mut diagnostics);
	(template, diagnostics)
}

pub(crate) fn parse_template_inner(
	ctx: &ParseContext,
	document: &str,
	start: usize,
	diagnostics: &mut Vec<ParseDiagnostic>,
) -> ParsedTemplate {
	let (end, balanced) = scan_template_end(document, start);
	if !balanced {
		diagnostics.push(ParseDiagnostic::UnbalancedBraces { start });
	}

	let inner_start = start + 2;
	let inner_end = if balanced { end - 2 } else { end };
	let inner = &document[inner_start..inner_end];

	// The splitter always emits at least the trailing token, so even `{{}}`
	// yields an (empty) name token here.
	let mut param_tokens = split_parameters(inner, inner_start);
	let name_token = if param_tokens.is_empty() {
		Token::new("", Span::empty(inner_start))
	} else {
		param_tokens.remove(0)
	};
	let name_token = name_token.trimmed();

	let mut template = ParsedTemplate {
		name: name_token.text,
		name_span: name_token.span,
		params: Vec::new(),
		span: Span::new(start, end),
		groups: Vec::new(),
	};

	if ctx.is_grouped(&template.name) {
		parse_grouped_params(&mut template, &param_tokens, diagnostics);
	} else {
		parse_standard_params(ctx, &mut template, &param_tokens, document, diagnostics);
	}

	template
}

/// Standard variant: each token becomes a named or positional parameter,
/// and the extra-nominations parameter (final occurrence, like any repeated
/// key) gets its value scanned for nested templates.
fn parse_standard_params(
	ctx: &ParseContext,
	template: &mut ParsedTemplate,
	tokens: &[Token],
	document: &str,
	diagnostics: &mut Vec<ParseDiagnostic>,
) {
	for (index, raw) in tokens.iter().enumerate() {
		let token = raw.trimmed();
		if token.text.is_empty() {
			continue;
		}

		let param = match token.text.find('=') {
			Some(eq) => named_parameter(&token, eq),
			None => Parameter {
				key: ParamKey::Positional(index as u32 + 1),
				value: token.text.clone(),
				key_span: None,
				value_span: token.span,
				span: token.span,
				nested: Vec::new(),
			},
		};

		template.params.push(param);
	}

	let extra = ParamKey::Named(ctx.extra_param.clone());
	if let Some(index) = template.params.iter().rposition(|param| param.key == extra) {
		let region = template.params[index].value_span;
		template.params[index].nested =
			parse_sub_templates_inner(ctx, document, region.start, region.end, diagnostics);
	}
}

/// Grouped variant: keys carry a numeric suffix selecting a nomination
/// group. Keys without a suffix are discarded; groups are emitted ascending
/// by number rather than in document order.
fn parse_grouped_params(
	template: &mut ParsedTemplate,
	tokens: &[Token],
	diagnostics: &mut Vec<ParseDiagnostic>,
) {
	let mut groups: BTreeMap<u32, BTreeMap<String, Parameter>> = BTreeMap::new();

	for raw in tokens {
		let token = raw.trimmed();
		if token.text.is_empty() {
			continue;
		}

		let param = match token.text.find('=') {
			Some(eq) => named_parameter(&token, eq),
			// A slot without `=` still names a group member; it just has an
			// empty value anchored at the token end.
			None => Parameter {
				key: ParamKey::Named(token.text.clone()),
				value: String::new(),
				key_span: Some(token.span),
				value_span: Span::empty(token.span.end),
				span: token.span,
				nested: Vec::new(),
			},
		};

		let ParamKey::Named(full_key) = param.key.clone() else {
			continue;
		};
		let prefix = full_key.trim_end_matches(|c: char| c.is_ascii_digit());
		let number: u32 = full_key[prefix.len()..].parse().unwrap_or(0);

		template.params.push(param.clone());

		if number == 0 {
			diagnostics.push(ParseDiagnostic::GroupKeyWithoutNumber {
				key: full_key,
				start: token.span.start,
			});
			continue;
		}

		let mut member = param;
		member.key = ParamKey::Named(prefix.to_string());
		groups.entry(number).or_default().insert(prefix.to_string(), member);
	}

	template.groups = groups
		.into_iter()
		.map(|(number, members)| {
			let span = members
				.values()
				.map(|member| member.span)
				.reduce(|a, b| a.union(&b))
				.unwrap_or_else(|| Span::empty(0));

			NumberedGroup {
				number,
				members,
				span,
			}
		})
		.collect();
}

fn named_parameter(token: &Token, eq: usize) -> Parameter {
	// The token is already leading-trimmed, so the key only needs its right
	// edge cleaned up.
	let key = token.text[..eq].trim_end();
	let key_span = Span::new(token.span.start, token.span.start + key.len());

	let value_raw = &token.text[eq + 1..];
	let leading = value_raw.len() - value_raw.trim_start().len();
	let value = value_raw.trim();
	let value_start = token.span.start + eq + 1 + leading;
	let value_span = Span::new(value_start, value_start + value.len());

	Parameter {
		key: ParamKey::Named(key.to_string()),
		value: value.to_string(),
		key_span: Some(key_span),
		value_span,
		span: token.span,
		nested: Vec::new(),
	}
}

/// Collect the nested-template invocations inside `[region_start,
/// region_end)`.
///
/// A marker only counts when it sits at the region start or immediately
/// after a newline; this keeps the template name appearing mid-sentence in a
/// rationale from being parsed as an invocation. The scan always resumes
/// after the parsed template's end, so a template is never re-entered.
pub fn parse_sub_templates(
	ctx: &ParseContext,
	document: &str,
	region_start: usize,
	region_end: usize,
) -> Vec<ParsedTemplate> {
	let mut diagnostics = Vec::new();
	parse_sub_templates_inner(ctx, document, region_start, region_end, &mut diagnostics)
}

pub(crate) fn parse_sub_templates_inner(
	ctx: &ParseContext,
	document: &str,
	region_start: usize,
	region_end: usize,
	diagnostics: &mut Vec<ParseDiagnostic>,
) -> Vec<ParsedTemplate> {
	let marker = ctx.sub_open();
	let mut templates = Vec::new();
	let mut scan = region_start;

	while let Some(pos) = find_anchored(document, &marker, scan, region_end, region_start) {
		let template = parse_template_inner(ctx, document, pos, diagnostics);
		scan = template.span.end.max(pos + 1);
		templates.push(template);
	}

	templates
}

//! Route rule compilation.
//!
//! String rules use a small template language on top of regular expressions:
//!
//! - `{name}` - captures one segment made of letters, digits, `-`, `_` and `.`
//! - `:any` - same character class as `{name}`, uncaptured
//! - `:word` - one or more ASCII letters, uncaptured
//! - `:num` - one or more ASCII digits, uncaptured
//!
//! Wrap a typed token in parentheses to capture it, e.g. `item/(:num)`.
//! Leading and trailing slashes are ignored and matching is case-insensitive
//! and anchored at both ends.
//!
//! A pre-built [`regex::Regex`] can be supplied instead of a string and is
//! used as-is.

use crate::error::RouterError;
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Maximum allowed length for a rule string in bytes.
const MAX_RULE_LENGTH: usize = 1024;

/// Maximum allowed size for a compiled rule regex (in bytes).
const MAX_RULE_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// `{name}` placeholders, matched after literal escaping.
static NAMED_PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{[a-zA-Z]+\}").expect("static placeholder regex"));

const ANY_CLASS: &str = "[A-Za-z0-9_.\\-]+";
const WORD_CLASS: &str = "[a-zA-Z]+";
const NUM_CLASS: &str = "[0-9]+";

/// A route rule as supplied by the caller.
#[derive(Debug, Clone)]
pub enum RouteRule {
	/// Template string, compiled by [`RoutePattern::compile`].
	Template(String),
	/// Pre-built matcher, used unchanged.
	Regex(Regex),
}

impl From<&str> for RouteRule {
	fn from(rule: &str) -> Self {
		Self::Template(rule.to_string())
	}
}

impl From<String> for RouteRule {
	fn from(rule: String) -> Self {
		Self::Template(rule)
	}
}

impl From<&String> for RouteRule {
	fn from(rule: &String) -> Self {
		Self::Template(rule.clone())
	}
}

impl From<Regex> for RouteRule {
	fn from(regex: Regex) -> Self {
		Self::Regex(regex)
	}
}

/// A compiled route rule.
///
/// Two patterns are equal when their compiled regex sources are equal, which
/// is also how [`Router::remove`](crate::Router::remove) identifies a route by rule.
#[derive(Debug, Clone)]
pub struct RoutePattern {
	regex: Regex,
}

impl RoutePattern {
	/// Compiles a rule.
	///
	/// # Errors
	///
	/// Returns [`RouterError::MalformedRule`] if the rule exceeds 1024 bytes or
	/// the expanded expression is rejected by the regex engine.
	pub fn compile(rule: impl Into<RouteRule>) -> Result<Self, RouterError> {
		match rule.into() {
			RouteRule::Regex(regex) => Ok(Self { regex }),
			RouteRule::Template(template) => Self::compile_template(&template),
		}
	}

	fn compile_template(template: &str) -> Result<Self, RouterError> {
		if template.len() > MAX_RULE_LENGTH {
			return Err(RouterError::MalformedRule {
				rule: template.to_string(),
				reason: format!(
					"rule length {} exceeds maximum allowed length of {} bytes",
					template.len(),
					MAX_RULE_LENGTH
				),
			});
		}

		let source = format!("^{}$", expand_template(template));
		let regex = RegexBuilder::new(&source)
			.case_insensitive(true)
			.size_limit(MAX_RULE_REGEX_SIZE)
			.build()
			.map_err(|e| RouterError::MalformedRule {
				rule: template.to_string(),
				reason: e.to_string(),
			})?;

		Ok(Self { regex })
	}

	/// Returns the compiled expression source.
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Number of capture groups, excluding the whole match.
	pub fn capture_count(&self) -> usize {
		self.regex.captures_len().saturating_sub(1)
	}

	/// Checks if this pattern matches the fragment.
	pub fn is_match(&self, fragment: &str) -> bool {
		self.regex.is_match(fragment)
	}

	/// Matches a fragment and returns the captured groups in order.
	///
	/// Groups that did not participate in the match yield an empty string.
	pub fn captures(&self, fragment: &str) -> Option<Vec<String>> {
		self.regex.captures(fragment).map(|caps| {
			caps.iter()
				.skip(1)
				.map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
				.collect()
		})
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.as_str() == other.as_str()
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.regex.as_str())
	}
}

/// Expands a template into regex source, without anchors.
///
/// The order matters: literals are escaped first, then `{name}` becomes a
/// captured `:any`, and only then are the typed tokens expanded.
fn expand_template(template: &str) -> String {
	let uri = crate::query::trim_slashes(template);

	let mut escaped = String::with_capacity(uri.len() * 2);
	for c in uri.chars() {
		match c {
			'\\' | '.' | '-' => {
				escaped.push('\\');
				escaped.push(c);
			}
			_ => escaped.push(c),
		}
	}

	NAMED_PLACEHOLDER
		.replace_all(&escaped, "(:any)")
		.replace(":any", ANY_CLASS)
		.replace(":word", WORD_CLASS)
		.replace(":num", NUM_CLASS)
}

//! Fragment and query resolution.
//!
//! Turns the raw pieces of an address bar into the normalized fragment used
//! for route matching and the parsed query mapping handed to pages.

use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Escapes of URI-reserved characters (`#$&+,/:;=?@`), which path decoding keeps.
static RESERVED_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new("%(?:2[346BCFbcf]|3[ABDFabdf]|40)").expect("static reserved escape regex")
});

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
	/// `key=value`; the value is kept exactly as it appeared.
	Value(String),
	/// `key` without `=`.
	Flag,
}

impl QueryValue {
	/// Returns the value text, or `None` for a bare flag.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Value(value) => Some(value),
			Self::Flag => None,
		}
	}

	/// Returns `true` for a bare flag.
	pub fn is_flag(&self) -> bool {
		matches!(self, Self::Flag)
	}
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Value(value.to_string())
	}
}

/// Parsed query parameters, keyed by percent-decoded name.
pub type Query = HashMap<String, QueryValue>;

/// A resolved location: the fragment used for matching plus its query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
	/// Normalized fragment (no leading/trailing slash, no query).
	pub fragment: String,
	/// Raw query string without the leading `?`.
	pub query_string: String,
}

impl Location {
	/// Creates a location from a fragment and a raw query string.
	pub fn new(fragment: impl Into<String>, query_string: impl Into<String>) -> Self {
		let query_string = query_string.into();
		Self {
			fragment: fragment.into(),
			query_string: query_string
				.strip_prefix('?')
				.map(str::to_string)
				.unwrap_or(query_string),
		}
	}

	/// Parses the query string.
	pub fn query(&self) -> Query {
		parse_query(&self.query_string)
	}
}

/// Removes one leading and one trailing slash.
pub fn trim_slashes(path: &str) -> &str {
	let path = path.strip_suffix('/').unwrap_or(path);
	path.strip_prefix('/').unwrap_or(path)
}

/// Parses `a=b&c` into `{a: "b", c: Flag}`.
///
/// A leading `?` is ignored. Keys are percent-decoded (falling back to the
/// raw key if decoding fails), values are not. Rows with an empty key are
/// dropped and later duplicates win.
pub fn parse_query(query: &str) -> Query {
	let query = query.strip_prefix('?').unwrap_or(query);
	let mut parsed = Query::new();

	for row in query.split('&') {
		let (key, value) = match row.split_once('=') {
			Some((key, value)) => (key, QueryValue::Value(value.to_string())),
			None => (row, QueryValue::Flag),
		};
		if key.is_empty() {
			continue;
		}
		let key = urlencoding::decode(key)
			.map(|k| k.into_owned())
			.unwrap_or_else(|_| key.to_string());
		parsed.insert(key, value);
	}

	parsed
}

/// Fragment of a history-mode location.
///
/// `root` is the normalized root prefix (`/` or `/prefix/`).
pub(crate) fn history_fragment(pathname: &str, root: &str) -> String {
	let decoded = decode_path(pathname);
	let stripped = if root != "/" {
		decoded.replacen(root, "", 1)
	} else {
		decoded
	};
	trim_slashes(&stripped).to_string()
}

/// Percent-decodes a path, leaving escapes of reserved characters intact so
/// that `%2F` never turns into a segment separator.
///
/// Runs that fail to decode are kept verbatim.
fn decode_path(path: &str) -> String {
	fn decode(run: &str) -> Cow<'_, str> {
		urlencoding::decode(run).unwrap_or(Cow::Borrowed(run))
	}

	let mut decoded = String::with_capacity(path.len());
	let mut last = 0;
	for escape in RESERVED_ESCAPE.find_iter(path) {
		decoded.push_str(&decode(&path[last..escape.start()]));
		decoded.push_str(escape.as_str());
		last = escape.end();
	}
	decoded.push_str(&decode(&path[last..]));
	decoded
}

/// Fragment of a hash-mode location; `hash` includes the leading `#` if any.
pub(crate) fn hash_fragment(hash: &str) -> String {
	let hash = hash.strip_prefix('#').unwrap_or(hash);
	let path = hash.split_once('?').map(|(path, _)| path).unwrap_or(hash);
	trim_slashes(path).to_string()
}

/// Query part of a hash-mode location, without the `?`.
pub(crate) fn hash_query(hash: &str) -> &str {
	hash.split_once('?').map(|(_, query)| query).unwrap_or("")
}

/// Normalizes a configured root prefix.
pub(crate) fn normalize_root(root: &str) -> String {
	if root == "/" {
		"/".to_string()
	} else {
		format!("/{}/", trim_slashes(root))
	}
}

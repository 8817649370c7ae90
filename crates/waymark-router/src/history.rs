//! Back/forward stack for hash-mode navigation.
//!
//! Hash changes are not tracked by any history API the router can query, so
//! in hash mode the router records every dispatched location here and serves
//! `back`, `forward` and `go` from it.

use serde_json::Value;

/// A recorded location.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
	/// Fragment of the recorded location.
	pub path: String,
	/// Page state that was staged for the dispatch.
	pub state: Option<Value>,
}

impl HistoryEntry {
	/// Creates a new entry.
	pub fn new(path: impl Into<String>, state: Option<Value>) -> Self {
		Self {
			path: path.into(),
			state,
		}
	}
}

/// What the next [`HistoryStack::record`] will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum RecordMode {
	/// Drop everything after the cursor, then append.
	#[default]
	Add,
	/// Drop the entry under the cursor and everything after it, then append.
	Replace,
	/// Skip exactly one record; set by [`HistoryStack::go`].
	Hold,
}

/// Ordered entries plus a cursor.
///
/// The cursor always points at an entry, or the stack is empty.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
	entries: Vec<HistoryEntry>,
	cursor: Option<usize>,
	mode: RecordMode,
}

impl HistoryStack {
	/// Creates an empty stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a dispatched location.
	///
	/// Returns `false` when the record was held back after a [`go`](Self::go).
	pub fn record(&mut self, entry: HistoryEntry) -> bool {
		let mode = std::mem::take(&mut self.mode);
		let keep = match (mode, self.cursor) {
			(RecordMode::Hold, _) => return false,
			(RecordMode::Add, Some(cursor)) => cursor + 1,
			(RecordMode::Replace, Some(cursor)) => cursor,
			(_, None) => 0,
		};
		self.entries.truncate(keep);
		self.entries.push(entry);
		self.cursor = Some(self.entries.len() - 1);
		true
	}

	/// Makes the next record overwrite the current entry instead of adding one.
	pub fn replace_next(&mut self) {
		self.mode = RecordMode::Replace;
	}

	/// Moves the cursor to `index` and holds back the next record.
	///
	/// Returns the entry to navigate to, or `None` if `index` is out of range.
	pub fn go(&mut self, index: usize) -> Option<HistoryEntry> {
		let entry = self.entries.get(index)?.clone();
		self.cursor = Some(index);
		self.mode = RecordMode::Hold;
		Some(entry)
	}

	/// Index of the current entry.
	pub fn cursor(&self) -> Option<usize> {
		self.cursor
	}

	/// Recorded entries, oldest first.
	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	/// Entry under the cursor.
	pub fn current(&self) -> Option<&HistoryEntry> {
		self.cursor.and_then(|c| self.entries.get(c))
	}

	/// Number of recorded entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns `true` if nothing has been recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns `true` if the next record will be skipped.
	pub fn is_holding(&self) -> bool {
		self.mode == RecordMode::Hold
	}

	/// Drops all entries.
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

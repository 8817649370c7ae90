//! Property-based tests for resolution, matching and the hash history stack.

use proptest::prelude::*;
use std::rc::Rc;
use waymark_router::surface::MemorySurface;
use waymark_router::{
	HistoryEntry, HistoryStack, NavigateOptions, Page, RoutePattern, Router, RouterConfig,
	RouterMode, parse_query,
};

fn segment() -> impl Strategy<Value = String> {
	"[a-z0-9][a-z0-9_.-]{0,11}"
}

fn fragment() -> impl Strategy<Value = String> {
	prop::collection::vec(segment(), 1..5).prop_map(|segments| segments.join("/"))
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	/// Property: navigating to a path makes it the current fragment (history mode)
	#[test]
	fn test_navigate_then_fragment_history_mode(path in fragment(), root in "(/|/[a-z]{1,8}/)") {
		let surface = Rc::new(MemorySurface::new());
		let router = Router::new(RouterConfig::new().with_root(root), surface).unwrap();

		router.navigate_to(&format!("/{}/", path), NavigateOptions::new()).unwrap();

		prop_assert_eq!(router.current_fragment(), path);
	}

	/// Property: navigating to a path makes it the current fragment (hash mode)
	#[test]
	fn test_navigate_then_fragment_hash_mode(path in fragment()) {
		let surface = Rc::new(MemorySurface::new());
		let router = Router::new(RouterConfig::new().with_mode(RouterMode::Hash), surface).unwrap();

		router.navigate_to(&path, NavigateOptions::new()).unwrap();

		prop_assert_eq!(router.current_fragment(), path);
	}

	/// Property: `{name}` captures exactly the segment it stands for
	#[test]
	fn test_named_placeholder_captures_any_segment(prefix in "[a-z]{1,8}", value in segment()) {
		let pattern = RoutePattern::compile(format!("{}/{{id}}", prefix)).unwrap();

		let captures = pattern.captures(&format!("{}/{}", prefix, value));

		prop_assert_eq!(captures, Some(vec![value]));
	}

	/// Property: `:num` never matches a segment containing a letter
	#[test]
	fn test_num_rejects_letters(value in "[0-9]{0,4}[a-z][0-9a-z]{0,4}") {
		let pattern = RoutePattern::compile("n/(:num)").unwrap();

		let path = format!("n/{}", value);
		prop_assert!(!pattern.is_match(&path));
	}

	/// Property: every well-formed pair of the query survives parsing
	#[test]
	fn test_query_pairs_parsed(pairs in prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..6)) {
		let query = pairs
			.iter()
			.map(|(key, value)| format!("{}={}", key, value))
			.collect::<Vec<_>>()
			.join("&");

		let parsed = parse_query(&query);

		prop_assert_eq!(parsed.len(), pairs.len());
		for (key, value) in &pairs {
			prop_assert_eq!(parsed.get(key).and_then(|v| v.as_str()), Some(value.as_str()));
		}
	}

	/// Property: after go(k) and one new record, the stack holds k + 2 entries
	#[test]
	fn test_history_branch_length(len in 1usize..12, k_seed in any::<prop::sample::Index>()) {
		let mut stack = HistoryStack::new();
		for i in 0..len {
			stack.record(HistoryEntry::new(format!("p{}", i), None));
		}
		let k = k_seed.index(len);

		let target = stack.go(k).unwrap();
		let held = stack.record(target);
		stack.record(HistoryEntry::new("branch", None));

		prop_assert!(!held);
		prop_assert_eq!(stack.len(), k + 2);
		prop_assert_eq!(stack.cursor(), Some(k + 1));
	}

	/// Property: a dispatched page always carries the fragment it was resolved from
	#[test]
	fn test_page_uri_matches_fragment(path in fragment()) {
		let surface = Rc::new(MemorySurface::with_url(&format!("/{}", path)));
		let router = Router::new(RouterConfig::new(), surface).unwrap();
		router
			.add(regex::Regex::new("^(.+)$").unwrap(), |_: &Page, _: &[String]| Ok(()), Default::default())
			.unwrap();

		router.check().unwrap();

		let page = router.current_page().unwrap();
		prop_assert_eq!(&page.uri, &path);
		prop_assert_eq!(&page.params, &vec![path.clone()]);
	}
}

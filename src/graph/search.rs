//! Fuzzy label search over visible nodes.
//!
//! Matching is case-, diacritics- and position-insensitive, and tolerates
//! typos up to the configured threshold. The index is a snapshot of visible
//! labels, so hits are re-checked against the live `hidden` flags in case it
//! lags one frame behind a filter change.

use log::debug;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str, chars};

use super::model::{NodeIdx, SocialGraph};
use crate::config::SearchConfig;

#[derive(Clone, Debug)]
struct Entry {
	node: NodeIdx,
	label: String,
	folded: String,
	words: Vec<String>,
}

/// A search suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
	pub node: NodeIdx,
	pub key: String,
	pub label: String,
	pub score: u32,
}

/// Lowercases and strips Latin diacritics.
pub fn fold(text: &str) -> String {
	text.chars()
		.map(chars::normalize)
		.flat_map(char::to_lowercase)
		.collect()
}

/// Edit distance counting insertions, deletions, substitutions and swaps of
/// adjacent characters.
fn edit_distance(a: &[char], b: &[char]) -> usize {
	let mut rows = vec![vec![0usize; b.len() + 1]; a.len() + 1];
	for (i, row) in rows.iter_mut().enumerate() {
		row[0] = i;
	}
	for (j, cell) in rows[0].iter_mut().enumerate() {
		*cell = j;
	}
	for i in 1..=a.len() {
		for j in 1..=b.len() {
			let cost = usize::from(a[i - 1] != b[j - 1]);
			let mut best = (rows[i - 1][j] + 1).min(rows[i][j - 1] + 1).min(rows[i - 1][j - 1] + cost);
			if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
				best = best.min(rows[i - 2][j - 2] + 1);
			}
			rows[i][j] = best;
		}
	}
	rows[a.len()][b.len()]
}

/// `1.0` for equal strings, falling towards `0.0` as edits accumulate.
fn similarity(a: &str, b: &str) -> f64 {
	let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
	let longest = a.len().max(b.len());
	if longest == 0 {
		return 1.0;
	}
	1.0 - edit_distance(&a, &b) as f64 / longest as f64
}

/// Best similarity between the query and any run of as many consecutive
/// label words.
fn word_similarity(words: &[String], query: &[&str]) -> f64 {
	if query.is_empty() || words.is_empty() {
		return 0.0;
	}
	let span = query.len().min(words.len());
	let query = query.join(" ");
	words
		.windows(span)
		.map(|window| similarity(&window.join(" "), &query))
		.fold(0.0, f64::max)
}

pub struct SearchIndex {
	entries: Vec<Entry>,
	matcher: Matcher,
	config: SearchConfig,
	buf: Vec<char>,
}

impl SearchIndex {
	pub fn new(config: SearchConfig) -> Self {
		Self {
			entries: Vec::new(),
			matcher: Matcher::new(Config::DEFAULT),
			config,
			buf: Vec::new(),
		}
	}

	/// Replaces the snapshot with the currently visible, labelled nodes.
	pub fn rebuild(&mut self, graph: &SocialGraph) {
		self.entries = graph
			.nodes()
			.iter()
			.enumerate()
			.filter(|(_, node)| !node.hidden && !node.label.is_empty())
			.map(|(node, n)| {
				let folded = fold(&n.label);
				Entry {
					node,
					label: n.label.clone(),
					words: folded.split_whitespace().map(str::to_string).collect(),
					folded,
				}
			})
			.collect();
		debug!("drm-graph: search index rebuilt with {} labels", self.entries.len());
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Best visible matches for `query`, at most `max_results` of them.
	///
	/// A label is accepted when it contains the query outright, when its
	/// fuzzy score is within `threshold` of a perfect match, or when some run
	/// of its words is within `threshold` edit similarity of the query, so a
	/// misspelled name still finds its node. Typo-only matches rank last.
	pub fn search(&mut self, graph: &SocialGraph, query: &str) -> Vec<SearchHit> {
		let query = fold(query.trim());
		if query.chars().count() < self.config.min_query_len {
			return Vec::new();
		}
		let query_words: Vec<&str> = query.split_whitespace().collect();
		let min_similarity = 1.0 - self.config.threshold;

		let pattern = Pattern::new(&query, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy);
		let perfect = pattern
			.score(Utf32Str::new(&query, &mut self.buf), &mut self.matcher)
			.unwrap_or(0);
		let floor = f64::from(perfect) * min_similarity;

		let mut hits: Vec<SearchHit> = Vec::new();
		for entry in &self.entries {
			let fuzzy = pattern
				.score(Utf32Str::new(&entry.label, &mut self.buf), &mut self.matcher)
				.filter(|&score| f64::from(score) >= floor || entry.folded.contains(&query));
			let score = match fuzzy {
				Some(score) => score,
				None => {
					let similarity = word_similarity(&entry.words, &query_words);
					if similarity < min_similarity {
						continue;
					}
					(similarity * floor) as u32
				}
			};
			let Some(node) = graph.node(entry.node).filter(|n| !n.hidden) else {
				continue;
			};
			hits.push(SearchHit {
				node: entry.node,
				key: node.key.clone(),
				label: entry.label.clone(),
				score,
			});
		}

		hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
		hits.truncate(self.config.max_results);
		hits
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::{SizeRange, YearBounds};
	use crate::dataset::{Dataset, EdgeRecord, NodeRecord};
	use crate::graph::{EdgeLabel, FilterState, Role, apply_filters};

	fn graph(labels: &[&str]) -> SocialGraph {
		let nodes: Vec<NodeRecord> = labels
			.iter()
			.enumerate()
			.map(|(i, label)| NodeRecord {
				key: format!("n{i}"),
				label: label.to_string(),
				role: if i == 0 { Role::Advisor } else { Role::PhdStudent },
				weight: 1.0,
				x: 0.0,
				y: 0.0,
			})
			.collect();
		// every other node supervised by the first
		let edges = (1..labels.len())
			.map(|i| EdgeRecord {
				source: "n0".to_string(),
				target: format!("n{i}"),
				weight: 1.0,
				year: 1990 + i as i32,
				label: EdgeLabel::Supervizes,
			})
			.collect();
		SocialGraph::from_dataset(&Dataset { nodes, edges }, SizeRange::default()).unwrap()
	}

	fn labels(hits: &[SearchHit]) -> Vec<&str> {
		hits.iter().map(|h| h.label.as_str()).collect()
	}

	#[test]
	fn finds_a_word_anywhere_in_the_label() {
		let graph = graph(&["Marie Curie", "Jean Dupont", "Jeanne Durand", "Paul Martin"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);

		let hits = index.search(&graph, "dupont");
		assert_eq!(labels(&hits).first(), Some(&"Jean Dupont"));
		assert!(!labels(&hits).contains(&"Paul Martin"));
	}

	#[test]
	fn ignores_case_and_diacritics() {
		let graph = graph(&["Hélène Lefèvre", "Élodie Moreau", "Bob Stone"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);

		assert_eq!(labels(&index.search(&graph, "helene")), vec!["Hélène Lefèvre"]);
		assert_eq!(labels(&index.search(&graph, "ÉLODIE")), vec!["Élodie Moreau"]);
		assert_eq!(labels(&index.search(&graph, "lefevre")), vec!["Hélène Lefèvre"]);
	}

	#[test]
	fn short_queries_return_nothing() {
		let graph = graph(&["Al Smith", "Alan Turing"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);
		assert!(index.search(&graph, "a").is_empty());
		assert!(index.search(&graph, "   ").is_empty());
	}

	#[test]
	fn results_are_capped() {
		let names: Vec<String> = (0..12).map(|i| format!("Student {i:02}")).collect();
		let refs: Vec<&str> = names.iter().map(String::as_str).collect();
		let graph = graph(&refs);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);
		assert_eq!(index.search(&graph, "student").len(), 8);
	}

	#[test]
	fn hidden_nodes_are_not_indexed_or_returned() {
		let mut graph = graph(&["Ada Advisor", "Sam Student", "Tess Student"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);
		assert_eq!(index.len(), 3);

		// Tess was supervised in 1992; a later window hides her.
		let mut filters = FilterState::new(YearBounds::default());
		filters.set_year_range(1985, 1991);
		apply_filters(&mut graph, &filters);

		// stale snapshot still holds Tess, but the live flag wins
		assert!(index.search(&graph, "tess").is_empty());
		assert_eq!(labels(&index.search(&graph, "sam")), vec!["Sam Student"]);

		index.rebuild(&graph);
		assert_eq!(index.len(), 2);
	}

	#[test]
	fn unrelated_queries_match_nothing() {
		let graph = graph(&["Marie Curie", "Jean Dupont"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);
		assert!(index.search(&graph, "zzyzx").is_empty());
	}

	#[test]
	fn tolerates_a_misspelled_letter() {
		let graph = graph(&["Jean Dupont", "Marie Curie", "Hélène Lefèvre"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);

		assert_eq!(labels(&index.search(&graph, "Dupond")), vec!["Jean Dupont"]);
		assert_eq!(labels(&index.search(&graph, "Marie Cury")), vec!["Marie Curie"]);
	}

	#[test]
	fn tolerates_missing_and_swapped_letters() {
		let graph = graph(&["Jean Dupont", "Marie Curie", "Hélène Lefèvre"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);

		assert_eq!(labels(&index.search(&graph, "dupot")), vec!["Jean Dupont"]);
		assert_eq!(labels(&index.search(&graph, "dupnot")), vec!["Jean Dupont"]);
		assert_eq!(labels(&index.search(&graph, "Curei")), vec!["Marie Curie"]);
		assert_eq!(labels(&index.search(&graph, "lefebvre")), vec!["Hélène Lefèvre"]);
	}

	#[test]
	fn exact_matches_rank_above_typo_matches() {
		let graph = graph(&["Ada Martin", "Ada Marten"]);
		let mut index = SearchIndex::new(SearchConfig::default());
		index.rebuild(&graph);
		assert_eq!(labels(&index.search(&graph, "martin")), vec!["Ada Martin", "Ada Marten"]);
	}

	#[test]
	fn a_strict_threshold_rejects_typos() {
		let graph = graph(&["Jean Dupont", "Marie Curie"]);
		let config = SearchConfig {
			threshold: 0.0,
			..SearchConfig::default()
		};
		let mut index = SearchIndex::new(config);
		index.rebuild(&graph);
		assert!(index.search(&graph, "Dupond").is_empty());
	}

	#[test]
	fn edit_distance_counts_swaps_once() {
		let chars = |s: &str| s.chars().collect::<Vec<_>>();
		assert_eq!(edit_distance(&chars("dupont"), &chars("dupond")), 1);
		assert_eq!(edit_distance(&chars("dupont"), &chars("dupnot")), 1);
		assert_eq!(edit_distance(&chars("dupont"), &chars("dupt")), 2);
		assert_eq!(edit_distance(&chars(""), &chars("abc")), 3);
	}

	#[test]
	fn fold_strips_accents() {
		assert_eq!(fold("Ça Été"), "ca ete");
	}
}

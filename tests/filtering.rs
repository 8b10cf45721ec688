use drm_graph::config::{SizeRange, YearBounds};
use drm_graph::dataset::Dataset;
use drm_graph::graph::{EdgeLabel, FilterState, Role, SocialGraph, apply_filters, edge_display, node_display};
use serde_json::json;

fn load(document: serde_json::Value) -> SocialGraph {
	let dataset = Dataset::from_json(&document.to_string()).unwrap();
	SocialGraph::from_dataset(&dataset, SizeRange::default()).unwrap()
}

fn window(lower: i32, upper: i32) -> FilterState {
	FilterState::new(YearBounds { lower, upper, step: 1 })
}

#[test]
fn supervision_disappears_when_the_window_closes_before_it() {
	let mut graph = load(json!({
		"nodes": [
			{ "key": "A", "label": "Alice", "role": "phd_student", "weight": 1, "x": 0, "y": 0 },
			{ "key": "B", "label": "Bob", "role": "advisor", "weight": 2, "x": 1, "y": 1 }
		],
		"edges": [
			{ "source": "A", "target": "B", "weight": 1, "year": 2000, "label": "supervizes" }
		]
	}));

	let mut filters = window(1990, 2010);
	apply_filters(&mut graph, &filters);
	assert!(graph.edges().iter().all(|e| !e.hidden));
	assert!(graph.nodes().iter().all(|n| !n.hidden));

	filters.set_year_range(1990, 1995);
	apply_filters(&mut graph, &filters);
	assert!(graph.edges()[0].hidden);
	assert!(graph.nodes().iter().all(|n| n.hidden));
}

fn lab() -> SocialGraph {
	load(json!({
		"nodes": [
			{ "key": "s1", "label": "Sam", "role": "phd_student", "weight": 3 },
			{ "key": "s2", "label": "Sue", "role": "phd_student", "weight": 1 },
			{ "key": "a1", "label": "Ada", "role": "advisor", "weight": 9 },
			{ "key": "j1", "label": "Jo", "role": "jury_member", "weight": 4 },
			{ "key": "x1", "label": "Xen", "role": "postdoc", "weight": 2 }
		],
		"edges": [
			{ "source": "a1", "target": "s1", "year": 1999, "label": "supervizes" },
			{ "source": "a1", "target": "s2", "year": 2012, "label": "supervizes" },
			{ "source": "j1", "target": "s1", "year": 2003, "label": "examines" },
			{ "source": "j1", "target": "a1", "year": 2003, "label": "same_jury" },
			{ "source": "j1", "target": "a1", "year": 2003, "label": "same_jury" },
			{ "source": "x1", "target": "s2", "year": 2012, "label": "mentors" }
		]
	}))
}

#[test]
fn unrecognized_values_decode_as_unknown() {
	let graph = lab();
	assert_eq!(graph.node(4).unwrap().role, Role::Unknown);
	assert_eq!(graph.edge(5).unwrap().label, EdgeLabel::Unknown);
	assert_eq!(graph.edge_count(), 6, "parallel same-jury edges are both kept");
}

#[test]
fn edge_visibility_matches_its_rule() {
	let mut graph = lab();
	let mut filters = window(1985, 2023);
	filters.set_year_range(2000, 2015);
	filters.toggle_label(EdgeLabel::Examines);
	filters.toggle_role(Role::JuryMember);
	apply_filters(&mut graph, &filters);

	let roles: Vec<Role> = graph.nodes().iter().map(|n| n.role).collect();
	for edge in graph.edges() {
		let expected_hidden = !filters.year_in_range(edge.year)
			|| !filters.label_enabled(edge.label)
			|| !filters.role_enabled(roles[edge.source])
			|| !filters.role_enabled(roles[edge.target]);
		assert_eq!(edge.hidden, expected_hidden, "{edge:?}");
	}

	for (idx, node) in graph.nodes().iter().enumerate() {
		let any_visible = graph.incident_edges(idx).any(|e| !e.hidden);
		assert_eq!(node.hidden, !filters.role_enabled(node.role) || !any_visible, "{}", node.key);
	}
}

#[test]
fn unknown_categories_are_off_until_enabled() {
	let mut graph = lab();
	let mut filters = window(1985, 2023);
	apply_filters(&mut graph, &filters);
	assert!(graph.node(4).unwrap().hidden);

	filters.toggle_role(Role::Unknown);
	filters.toggle_label(EdgeLabel::Unknown);
	apply_filters(&mut graph, &filters);
	assert!(!graph.node(4).unwrap().hidden);
	assert!(!graph.edge(5).unwrap().hidden);
}

#[test]
fn hovering_and_unhovering_leaves_the_graph_untouched() {
	let mut graph = lab();
	apply_filters(&mut graph, &window(1985, 2023));
	let nodes_before = graph.nodes().to_vec();
	let edges_before = graph.edges().to_vec();

	let baseline: Vec<_> = (0..graph.node_count())
		.map(|i| node_display(&graph, i, None).map(|d| (d.color, d.z_index, d.label.map(str::to_string))))
		.collect();

	for hovered in 0..graph.node_count() {
		for idx in 0..graph.node_count() {
			let _ = node_display(&graph, idx, Some(hovered));
		}
		for idx in 0..graph.edge_count() {
			let _ = edge_display(&graph, idx, Some(hovered));
		}
	}

	assert_eq!(graph.nodes(), nodes_before.as_slice());
	assert_eq!(graph.edges(), edges_before.as_slice());
	let after: Vec<_> = (0..graph.node_count())
		.map(|i| node_display(&graph, i, None).map(|d| (d.color, d.z_index, d.label.map(str::to_string))))
		.collect();
	assert_eq!(baseline, after);
}

#[test]
fn switching_off_every_label_hides_every_node() {
	let mut graph = lab();
	let mut filters = window(1985, 2023);
	filters.toggle_label(EdgeLabel::Unknown);
	filters.set_all_labels(false);
	let stats = apply_filters(&mut graph, &filters);

	assert_eq!(stats.nodes.visible, 0);
	assert_eq!(stats.edges.visible, 0);
	assert!(graph.nodes().iter().all(|n| n.hidden));
}

#[test]
fn bundled_dataset_loads_and_starts_fully_visible() {
	let dataset = Dataset::from_json(include_str!("../data/dataset.json")).unwrap();
	let mut graph = SocialGraph::from_dataset(&dataset, SizeRange::default()).unwrap();
	let stats = apply_filters(&mut graph, &window(1985, 2023));

	assert!(stats.nodes.total > 0);
	assert_eq!(stats.nodes.visible, stats.nodes.total);
	assert_eq!(stats.edges.visible, stats.edges.total);
}

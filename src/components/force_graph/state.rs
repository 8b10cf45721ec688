//! Network simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation, seeded with the dataset layout,
//! together with the view transform for pan/zoom, the debounced hover target
//! and the camera animation used when a node is selected.

use std::collections::HashSet;
use std::f64::consts::PI;
use std::time::Duration;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use crate::error::CameraError;
use crate::graph::{Camera, CameraTarget, NodeIdx, SocialGraph};

/// Zoom limits shared by wheel, buttons and camera moves.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Fraction of the viewport kept free around the fitted layout.
const FIT_MARGIN: f64 = 0.08;

/// Duration of button-driven zoom and reset animations.
const CONTROL_ANIMATION: Duration = Duration::from_millis(300);

/// Per-node data attached to each simulation node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Index of the node in the [`SocialGraph`].
	pub node: NodeIdx,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = initial view, clamped to `MIN_ZOOM..MAX_ZOOM`).
	pub k: f64,
}

impl ViewTransform {
	fn lerp(&self, to: &ViewTransform, t: f64) -> ViewTransform {
		ViewTransform {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	/// Set once the pointer travelled far enough to count as a drag, not a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Pointer travel, in pixels, below which a press-release is a click.
pub const CLICK_TOLERANCE: f64 = 4.0;

/// Eased transition between two view transforms.
#[derive(Clone, Debug)]
pub struct CameraAnimation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

impl CameraAnimation {
	pub fn new(from: ViewTransform, to: ViewTransform, duration: Duration) -> Self {
		Self {
			from,
			to,
			elapsed: 0.0,
			duration: duration.as_secs_f64(),
		}
	}

	pub fn advance(&mut self, dt: f64) {
		self.elapsed = (self.elapsed + dt).min(self.duration);
	}

	pub fn finished(&self) -> bool {
		self.elapsed >= self.duration
	}

	pub fn current(&self) -> ViewTransform {
		if self.duration <= 0.0 {
			return self.to;
		}
		self.from.lerp(&self.to, ease_in_out(self.elapsed / self.duration))
	}
}

/// Quadratic ease-in-out on `0..=1`.
pub fn ease_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0);
	if t < 0.5 {
		2.0 * t * t
	} else {
		-1.0 + (4.0 - 2.0 * t) * t
	}
}

/// Maps dataset coordinates into world space: centered on the origin, y up
/// flipped to y down, scaled so the layout fills the viewport at `k = 1`.
///
/// Datasets without a layout (all nodes stacked on one point) are spread on a
/// circle instead.
pub fn fit_layout(points: &[(f64, f64)], width: f64, height: f64) -> Vec<(f64, f64)> {
	let finite = || points.iter().filter(|(x, y)| x.is_finite() && y.is_finite());
	let (min_x, max_x) = finite().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
	let (min_y, max_y) = finite().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
	let (span_x, span_y) = (max_x - min_x, max_y - min_y);

	if !(span_x.is_finite() && span_y.is_finite()) || (span_x <= 0.0 && span_y <= 0.0) {
		let radius = width.min(height) * (0.5 - FIT_MARGIN);
		let n = points.len().max(1) as f64;
		return (0..points.len())
			.map(|i| {
				let angle = i as f64 * 2.0 * PI / n;
				(radius * angle.cos(), radius * angle.sin())
			})
			.collect();
	}

	let usable_w = width * (1.0 - 2.0 * FIT_MARGIN);
	let usable_h = height * (1.0 - 2.0 * FIT_MARGIN);
	let scale = match (span_x > 0.0, span_y > 0.0) {
		(true, true) => (usable_w / span_x).min(usable_h / span_y),
		(true, false) => usable_w / span_x,
		_ => usable_h / span_y,
	};
	let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

	points
		.iter()
		.map(|&(x, y)| {
			if x.is_finite() && y.is_finite() {
				((x - cx) * scale, -(y - cy) * scale)
			} else {
				(0.0, 0.0)
			}
		})
		.collect()
}

/// Core view state combining the physics simulation with interaction tracking.
///
/// Created once when the canvas mounts, then mutated each frame by the
/// animation loop. Physics runs for a settle period and then freezes, so the
/// dataset layout stays recognizable.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	/// Debounced hovered node.
	pub hovered: Option<NodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	settle_left: f64,
	camera: Option<CameraAnimation>,
	sim_nodes: Vec<DefaultNodeIdx>,
	/// Current world position per node, refreshed every tick.
	positions: Vec<(f64, f64)>,
}

impl ForceGraphState {
	pub fn new(network: &SocialGraph, width: f64, height: f64, settle_seconds: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 40.0,
			force_spring: 0.02,
			force_max: 50.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let layout: Vec<(f64, f64)> = network.nodes().iter().map(|n| (n.x, n.y)).collect();
		let positions = fit_layout(&layout, width, height);

		let sim_nodes: Vec<DefaultNodeIdx> = positions
			.iter()
			.enumerate()
			.map(|(node, &(x, y))| {
				graph.add_node(NodeData {
					x: x as f32,
					y: y as f32,
					mass: 10.0,
					is_anchor: false,
					user_data: NodeInfo { node },
				})
			})
			.collect();

		// one spring per linked pair, whatever the number of parallel edges
		let mut linked = HashSet::new();
		for edge in network.edges() {
			if edge.source == edge.target {
				continue;
			}
			let pair = (edge.source.min(edge.target), edge.source.max(edge.target));
			if linked.insert(pair) {
				graph.add_edge(sim_nodes[pair.0], sim_nodes[pair.1], EdgeData::default());
			}
		}

		Self {
			graph,
			transform: Self::home(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			animation_running: settle_seconds > 0.0,
			settle_left: settle_seconds,
			camera: None,
			sim_nodes,
			positions,
		}
	}

	fn home(width: f64, height: f64) -> ViewTransform {
		ViewTransform {
			x: width / 2.0,
			y: height / 2.0,
			k: 1.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// World position of `node` as last simulated.
	pub fn position(&self, node: NodeIdx) -> Option<(f64, f64)> {
		self.positions.get(node).copied()
	}

	/// Closest visible node under the pointer, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64, network: &SocialGraph, config: &ScaleConfig) -> Option<NodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k, "");
		let mut found: Option<(NodeIdx, f64)> = None;
		for (idx, node) in network.nodes().iter().enumerate() {
			if node.hidden {
				continue;
			}
			let Some((x, y)) = self.position(idx) else {
				continue;
			};
			let distance = ((x - gx).powi(2) + (y - gy).powi(2)).sqrt();
			if distance < scale.hit_radius(node.size) && found.is_none_or(|(_, best)| distance < best) {
				found = Some((idx, distance));
			}
		}
		found.map(|(idx, _)| idx)
	}

	pub fn set_hover(&mut self, node: Option<NodeIdx>) {
		self.hovered = node;
	}

	pub fn begin_drag(&mut self, node: NodeIdx, sx: f64, sy: f64) {
		let (node_start_x, node_start_y) = self.position(node).unwrap_or_default();
		self.drag = DragState {
			active: true,
			node: Some(node),
			start_x: sx,
			start_y: sy,
			node_start_x,
			node_start_y,
			moved: false,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(node) = self.drag.node else {
			return;
		};
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if !self.drag.moved && dx.hypot(dy) < CLICK_TOLERANCE {
			return;
		}
		self.drag.moved = true;

		let k = self.transform.k;
		let (nx, ny) = (self.drag.node_start_x + dx / k, self.drag.node_start_y + dy / k);
		self.move_node(node, nx, ny);
	}

	/// Ends a drag. Returns the node if the gesture was a click on it.
	pub fn end_drag(&mut self) -> Option<NodeIdx> {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		drag.node.filter(|_| drag.active && !drag.moved)
	}

	fn move_node(&mut self, node: NodeIdx, x: f64, y: f64) {
		let Some(&target) = self.sim_nodes.get(node) else {
			return;
		};
		self.graph.visit_nodes_mut(|sim| {
			if sim.index() == target {
				sim.data.x = x as f32;
				sim.data.y = y as f32;
				sim.data.is_anchor = true;
			}
		});
		if let Some(slot) = self.positions.get_mut(node) {
			*slot = (x, y);
		}
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.camera = None;
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Zooms around a screen point, e.g. the pointer position.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.camera = None;
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Animated zoom around the viewport center.
	pub fn zoom_by(&mut self, factor: f64) {
		let base = self.camera.as_ref().map_or(self.transform, |anim| anim.to);
		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let k = (base.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / base.k;
		let target = ViewTransform {
			x: cx - (cx - base.x) * ratio,
			y: cy - (cy - base.y) * ratio,
			k,
		};
		self.animate_transform(target, CONTROL_ANIMATION);
	}

	/// Animates back to the initial view.
	pub fn reset_view(&mut self) {
		self.animate_transform(Self::home(self.width, self.height), CONTROL_ANIMATION);
	}

	fn animate_transform(&mut self, to: ViewTransform, duration: Duration) {
		self.camera = Some(CameraAnimation::new(self.transform, to, duration));
	}

	pub fn camera_moving(&self) -> bool {
		self.camera.is_some()
	}

	/// Advances physics (while settling) and the camera animation.
	pub fn tick(&mut self, dt: f32) {
		if self.animation_running {
			self.graph.update(dt);
			self.settle_left -= f64::from(dt);
			if self.settle_left <= 0.0 {
				self.animation_running = false;
			}
		}
		self.refresh_positions();

		if let Some(anim) = self.camera.as_mut() {
			anim.advance(f64::from(dt));
			self.transform = anim.current();
			if anim.finished() {
				self.camera = None;
			}
		}
	}

	fn refresh_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|sim| {
			let idx = sim.data.user_data.node;
			if let Some(slot) = positions.get_mut(idx) {
				*slot = (f64::from(sim.x()), f64::from(sim.y()));
			}
		});
	}

	/// Keeps the same world point at the viewport center.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

impl Camera for ForceGraphState {
	fn node_position(&self, node: NodeIdx) -> Option<(f64, f64)> {
		self.position(node)
	}

	fn animate_to(&mut self, target: CameraTarget, duration: Duration) -> Result<(), CameraError> {
		if self.width <= 0.0 || self.height <= 0.0 {
			return Err(CameraError::EmptyViewport {
				width: self.width.max(0.0) as u32,
				height: self.height.max(0.0) as u32,
			});
		}
		if !(target.x.is_finite() && target.y.is_finite() && target.ratio.is_finite()) || target.ratio <= 0.0 {
			return Err(CameraError::NonFiniteTarget);
		}

		let k = (1.0 / target.ratio).clamp(MIN_ZOOM, MAX_ZOOM);
		let to = ViewTransform {
			x: self.width / 2.0 - target.x * k,
			y: self.height / 2.0 - target.y * k,
			k,
		};
		self.animate_transform(to, duration);
		Ok(())
	}
}

//! Canvas rendering for the network.
//!
//! Every frame is drawn from the graph attributes passed through the hover
//! reducers, in this order:
//! 1. Background (screen space)
//! 2. Visible edges, hovered neighborhood last (world space)
//! 3. Visible nodes by z-index, then labels and rings on top
//! 4. Vignette (screen space)

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::theme::{Color, Theme};
use crate::graph::{EdgeDisplay, NodeDisplay, NodeIdx, SocialGraph, edge_display, node_display};

/// Renders the complete network to the canvas.
pub fn render(
	state: &ForceGraphState,
	network: &SocialGraph,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k, theme.label.font_family);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, network, ctx, &scale);
	draw_nodes(state, network, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let gradient = theme
		.background
		.use_gradient
		.then(|| ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, state.width.max(state.height) * 0.8).ok())
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (cx, cy) = (state.width / 2.0, state.height / 2.0);
	let Ok(gradient) = ctx.create_radial_gradient(
		cx,
		cy,
		state.width.min(state.height) * 0.3,
		cx,
		cy,
		state.width.max(state.height) * 0.7,
	) else {
		return;
	};

	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(1.0, &Color::rgba(0, 0, 0, theme.background.vignette).to_css());

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edges(state: &ForceGraphState, network: &SocialGraph, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	let mut visible: Vec<(usize, EdgeDisplay)> = (0..network.edge_count())
		.filter_map(|idx| edge_display(network, idx, state.hovered).map(|display| (idx, display)))
		.filter(|(_, display)| !display.hidden)
		.collect();
	// thicker (hovered) edges on top
	visible.sort_by(|a, b| a.1.size.total_cmp(&b.1.size));

	for (idx, display) in visible {
		let Some(edge) = network.edge(idx) else {
			continue;
		};
		let (Some(from), Some(to)) = (state.position(edge.source), state.position(edge.target)) else {
			continue;
		};
		let target_radius = network.node(edge.target).map_or(0.0, |n| scale.node_radius(n.size));
		let source_radius = network.node(edge.source).map_or(0.0, |n| scale.node_radius(n.size));
		draw_edge(ctx, scale, &display, from, to, source_radius, target_radius);
	}
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	display: &EdgeDisplay,
	(x1, y1): (f64, f64),
	(x2, y2): (f64, f64),
	source_radius: f64,
	target_radius: f64,
) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	let with_arrow = display.directed && !scale.cull_arrows && dist > source_radius + target_radius;
	let head = if with_arrow { scale.arrow_size } else { 0.0 };

	ctx.set_stroke_style_str(&display.color.to_css());
	ctx.set_line_width(scale.edge_width(display.size));
	ctx.begin_path();
	ctx.move_to(x1 + ux * source_radius, y1 + uy * source_radius);
	ctx.line_to(x2 - ux * (target_radius + head), y2 - uy * (target_radius + head));
	ctx.stroke();

	if !with_arrow {
		return;
	}

	ctx.set_fill_style_str(&display.color.with_alpha(display.color.a * scale.arrow_alpha).to_css());
	let (tip_x, tip_y) = (x2 - ux * target_radius, y2 - uy * target_radius);
	let (back_x, back_y) = (tip_x - ux * head, tip_y - uy * head);
	let (px, py) = (-uy * head * 0.5, ux * head * 0.5);

	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_nodes(
	state: &ForceGraphState,
	network: &SocialGraph,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let mut visible: Vec<(NodeIdx, NodeDisplay<'_>)> = (0..network.node_count())
		.filter_map(|idx| node_display(network, idx, state.hovered).map(|display| (idx, display)))
		.filter(|(_, display)| !display.hidden)
		.collect();
	visible.sort_by_key(|(_, display)| display.z_index);

	for (idx, display) in &visible {
		if let Some(position) = state.position(*idx) {
			draw_node(ctx, scale, theme, display, position);
		}
	}

	// labels are drawn after every disc so no node covers a label
	for (idx, display) in &visible {
		let Some(position) = state.position(*idx) else {
			continue;
		};
		let hovered = state.hovered == Some(*idx);
		if hovered {
			draw_ring(ctx, scale, theme.ring.hover, display, position, false);
		}
		if display.highlighted {
			draw_ring(ctx, scale, theme.ring.selected, display, position, true);
		}

		let Some(label) = display.label else {
			continue;
		};
		let neighborhood = state.hovered.is_some() && display.z_index > 0;
		if neighborhood || display.highlighted || scale.shows_label(display.size) {
			draw_label(ctx, scale, theme, label, display, position, display.highlighted || hovered);
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	display: &NodeDisplay<'_>,
	(x, y): (f64, f64),
) {
	let radius = scale.node_radius(display.size);
	let gradient = theme
		.node_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &display.color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &display.color.to_css());
			let _ = gradient.add_color_stop(1.0, &display.color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&display.color.to_css()),
	}
	ctx.fill();
}

fn draw_ring(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	color: Color,
	display: &NodeDisplay<'_>,
	(x, y): (f64, f64),
	dashed: bool,
) {
	let radius = scale.node_radius(display.size) + scale.ring_offset;
	if dashed {
		let dash = scale.ring_width * 2.0;
		let _ = ctx.set_line_dash(&js_sys::Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(dash)));
	}
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.ring_width);
	ctx.stroke();
	if dashed {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	label: &str,
	display: &NodeDisplay<'_>,
	(x, y): (f64, f64),
	with_backdrop: bool,
) {
	let radius = scale.node_radius(display.size);
	let font_px = scale.label_font_px();
	let (tx, ty) = (x + radius + 4.0 / scale.k, y + font_px / 3.0);

	ctx.set_font(&scale.label_font);
	if with_backdrop {
		let width = ctx.measure_text(label).map_or(0.0, |m| m.width());
		let pad = 3.0 / scale.k;
		ctx.set_fill_style_str(&theme.label.backdrop.to_css());
		ctx.fill_rect(tx - pad, ty - font_px, width + 2.0 * pad, font_px * 1.3);
	}

	ctx.set_global_alpha(scale.label_alpha);
	ctx.set_fill_style_str(&theme.label.color.to_css());
	let _ = ctx.fill_text(label, tx, ty);
	ctx.set_global_alpha(1.0);
}

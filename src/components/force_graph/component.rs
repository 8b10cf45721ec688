//! Leptos component wrapping the network canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, zooming, hovering and clicking. An
//! animation loop runs via `requestAnimationFrame`, ticking the simulation and
//! redrawing from the shared [`GraphHandle`] each frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::Theme;
use crate::config::AppConfig;
use crate::debounce::{Debouncer, debounce};
use crate::graph::{GraphHandle, NodeIdx, SelectionController};

/// Zoom step of the zoom in/out buttons.
const BUTTON_ZOOM: f64 = 1.5;

/// Bundles view state with visual configuration and the selection controller.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
	selection: SelectionController,
	/// Raw hit-test result, before debouncing.
	pointer_over: Option<NodeIdx>,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

fn window_size(window: &Window) -> (f64, f64) {
	let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((f64::from(ev.client_x()) - rect.left(), f64::from(ev.client_y()) - rect.top()))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Toggles document fullscreen.
fn toggle_fullscreen() {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	if document.fullscreen_element().is_some() {
		document.exit_fullscreen();
	} else if let Some(root) = document.document_element() {
		if let Err(e) = root.request_fullscreen() {
			warn!("drm-graph: fullscreen request refused: {:?}", e);
		}
	}
}

/// Renders the interactive network on a canvas element.
///
/// Hovering a node (debounced) highlights its neighborhood; clicking one
/// writes its key into `selected`. Changes to `selected`, wherever they come
/// from, highlight the node and move the camera to it. The component sizes
/// itself to its parent container by default; set `fullscreen = true` to fill
/// the viewport and follow window resizes.
#[component]
pub fn ForceGraphCanvas(
	graph: GraphHandle,
	selected: RwSignal<Option<String>>,
	config: AppConfig,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let hover_debouncer: Rc<RefCell<Debouncer<Option<NodeIdx>>>> = Rc::new(RefCell::new(Debouncer::new()));
	let hover_delay = config.hover_debounce();
	let (context_init, animate_init, resize_cb_init) = (context.clone(), animate.clone(), resize_cb.clone());
	let init_config = config.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			canvas
				.parent_element()
				.map(|p| (f64::from(p.client_width()), f64::from(p.client_height())))
				.unwrap_or((800.0, 600.0))
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("drm-graph: canvas 2d context unavailable");
				return;
			}
		};

		let state = graph.with_untracked(|g| ForceGraphState::new(g, w, h, init_config.settle_seconds));
		*context_init.borrow_mut() = Some(GraphContext {
			state,
			scale: ScaleConfig::default(),
			theme: Theme::by_name(&init_config.theme),
			selection: SelectionController::new(init_config.selection.zoom_ratio, init_config.selection.duration()),
			pointer_over: None,
		});
		debug!("drm-graph: canvas ready at {}x{}", w, h);

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick(0.016);
				graph.with_untracked(|g| render::render(&c.state, g, &ctx, &c.scale, &c.theme));
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_sel = context.clone();
	Effect::new(move |_| {
		let key = selected.get();
		if let Some(ref mut c) = *context_sel.borrow_mut() {
			let GraphContext { state, selection, .. } = c;
			graph.update(|g| {
				selection.select(g, key.as_deref(), state);
			});
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			let hit = graph.with_untracked(|g| c.state.node_at_position(x, y, g, &c.scale));
			match hit {
				Some(node) => c.state.begin_drag(node, x, y),
				None => c.state.begin_pan(x, y),
			}
		}
	};

	let (context_mm, debouncer_mm) = (context.clone(), hover_debouncer.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let mut hover_changed = None;
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				c.state.drag_to(x, y);
			} else if c.state.pan.active {
				c.state.pan_to(x, y);
			} else {
				let over = graph.with_untracked(|g| c.state.node_at_position(x, y, g, &c.scale));
				if over != c.pointer_over {
					c.pointer_over = over;
					hover_changed = Some(over);
				}
			}
		}

		if let Some(over) = hover_changed {
			set_cursor(canvas_ref, if over.is_some() { "pointer" } else { "grab" });
			let context_hover = context_mm.clone();
			debounce(&debouncer_mm, over, hover_delay, move |node| {
				if let Some(ref mut c) = *context_hover.borrow_mut() {
					c.state.set_hover(node);
				}
			});
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = match *context_mu.borrow_mut() {
			Some(ref mut c) => c.state.end_drag(),
			None => None,
		};
		if let Some(node) = clicked {
			let key = graph.with_untracked(|g| g.node(node).map(|n| n.key.clone()));
			if key.is_some() {
				selected.set(key);
			}
		}
	};

	let (context_ml, debouncer_ml) = (context.clone(), hover_debouncer.clone());
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.end_drag();
			c.pointer_over = None;
		}
		let context_hover = context_ml.clone();
		debounce(&debouncer_ml, None, hover_delay, move |node| {
			if let Some(ref mut c) = *context_hover.borrow_mut() {
				c.state.set_hover(node);
			}
		});
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	let camera_button = move |action: fn(&mut ForceGraphState)| {
		let context = context.clone();
		move |_: MouseEvent| {
			if let Some(ref mut c) = *context.borrow_mut() {
				action(&mut c.state);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="controls camera-controls">
			<button
				class="ico"
				title="Zoom in"
				on:click=camera_button(|state| state.zoom_by(BUTTON_ZOOM))
			>
				"+"
			</button>
			<button
				class="ico"
				title="Zoom out"
				on:click=camera_button(|state| state.zoom_by(1.0 / BUTTON_ZOOM))
			>
				"−"
			</button>
			<button class="ico" title="See whole graph" on:click=camera_button(ForceGraphState::reset_view)>
				"⤢"
			</button>
			<button class="ico" title="Toggle fullscreen" on:click=move |_| toggle_fullscreen()>
				"⛶"
			</button>
		</div>
	}
}

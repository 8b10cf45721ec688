//! Network canvas component.
//!
//! Renders the researcher network on an HTML canvas with:
//! - The dataset layout, relaxed by a short force simulation
//! - Pan, zoom, node dragging and camera controls
//! - Debounced hover highlighting of a node's neighborhood
//! - Click-to-select with an animated camera move
//!
//! # Example
//!
//! ```ignore
//! use drm_graph::components::force_graph::ForceGraphCanvas;
//!
//! let graph = GraphHandle::new(social_graph);
//! let selected = RwSignal::new(None::<String>);
//! view! { <ForceGraphCanvas graph selected config fullscreen=true /> }
//! ```

mod component;
mod render;
pub mod scale;
pub mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::{Color, Theme};

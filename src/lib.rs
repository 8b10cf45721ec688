//! drm-graph: interactive visualization of the DRM thesis network.
//!
//! This crate provides a WASM application that renders researchers and their
//! supervision, examination and co-jury relationships on a canvas, with
//! filtering by year, link category and role, hover highlighting, and search.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod components;
pub mod config;
pub mod dataset;
pub mod debounce;
pub mod error;
pub mod graph;

pub use components::force_graph::ForceGraphCanvas;
pub use components::network::Network;
pub use config::AppConfig;
pub use graph::{GraphHandle, SocialGraph};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("drm-graph: logging initialized");
}

/// Main application component.
/// Loads the dataset, then renders the network view. Nothing is rendered if
/// loading fails.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::from_document();
	let graph = GraphHandle::new(SocialGraph::default());
	let loaded = RwSignal::new(false);

	let (url, sizes) = (config.dataset_url.clone(), config.node_size);
	spawn_local(async move {
		let built = dataset::load(&url)
			.await
			.and_then(|dataset| SocialGraph::from_dataset(&dataset, sizes));
		match built {
			Ok(network) => {
				graph.replace(network);
				loaded.set(true);
			}
			Err(e) => warn!("drm-graph: failed to load dataset: {}", e),
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="DRM thesis network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{move || loaded.get().then(|| view! { <Network graph=graph config=config.clone() /> })}
	}
}

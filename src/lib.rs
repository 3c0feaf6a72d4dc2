//! discord-graph: web client for Discord server interaction graphs.
//!
//! Lets the user pick a server known to the graph backend, ask the backend to
//! rebuild that server's interaction graph, and view the rendered result.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;

pub use api::{ApiClient, ApiError, UpdateGraphResponse};
pub use components::interaction_graph::InteractionGraphView;
pub use config::{ClientConfig, load_config};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("discord-graph: logging initialized");
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Discord Interaction Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<InteractionGraphView config=config />
	}
}

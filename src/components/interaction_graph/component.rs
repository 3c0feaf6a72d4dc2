//! Leptos component for picking a server and viewing its interaction graph.
//!
//! The component keeps a single [`ViewState`] signal. DOM events and network
//! completions are turned into [`ViewEvent`]s and fed through
//! [`ViewState::apply`]; the returned [`Command`] is then executed here, where
//! the browser is available.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};

use super::state::{Command, ViewEvent, ViewState};
use crate::api::ApiClient;
use crate::config::ClientConfig;

/// Handles shared by event handlers and in-flight requests.
#[derive(Clone)]
struct ViewContext {
	state: RwSignal<ViewState>,
	api: ApiClient,
	/// Cleared when the component unmounts; late completions are dropped.
	mounted: Arc<AtomicBool>,
}

impl ViewContext {
	fn dispatch(&self, event: ViewEvent) {
		if !self.mounted.load(Ordering::Acquire) {
			debug!("discord-graph: dropping {:?} after unmount", event);
			return;
		}

		let api = &self.api;
		let command = self.state.try_update(|state| state.apply(event, api)).flatten();
		if let Some(command) = command {
			self.run(command);
		}
	}

	fn run(&self, command: Command) {
		match command {
			Command::FetchServers => {
				let ctx = self.clone();
				spawn_local(async move {
					let event = match ctx.api.list_servers().await {
						Ok(servers) => {
							info!("discord-graph: loaded {} servers", servers.len());
							ViewEvent::ServersLoaded(servers)
						}
						Err(e) => {
							warn!("discord-graph: failed to load servers: {}", e);
							ViewEvent::ServersFailed
						}
					};
					ctx.dispatch(event);
				});
			}
			Command::RequestUpdate(server) => {
				let ctx = self.clone();
				spawn_local(async move {
					let event = match ctx.api.request_graph_update(&server).await {
						Ok(response) => {
							info!("discord-graph: rebuild requested for {}", server);
							ViewEvent::UpdateSucceeded(response)
						}
						Err(e) => {
							warn!("discord-graph: failed to update graph for {}: {}", server, e);
							ViewEvent::UpdateFailed
						}
					};
					ctx.dispatch(event);
				});
			}
			Command::Notify(message) => notify(&message),
		}
	}
}

fn notify(message: &str) {
	let Some(window) = web_sys::window() else {
		warn!("discord-graph: no window to show notification: {}", message);
		return;
	};
	if let Err(e) = window.alert_with_message(message) {
		warn!("discord-graph: alert failed: {:?}", e);
	}
}

/// Server picker, rebuild button and embedded graph view.
///
/// Fetches the server list once on mount. Selecting a server shows the
/// backend-rendered graph for it; "Update Graph" asks the backend to rebuild it.
#[component]
pub fn InteractionGraphView(config: ClientConfig) -> impl IntoView {
	let state = RwSignal::new(ViewState::default());
	let mounted = Arc::new(AtomicBool::new(true));
	let ctx = StoredValue::new(ViewContext {
		state,
		api: ApiClient::new(&config),
		mounted: mounted.clone(),
	});

	on_cleanup(move || mounted.store(false, Ordering::Release));

	let send = move |event: ViewEvent| {
		if let Some(ctx) = ctx.try_get_value() {
			ctx.dispatch(event);
		}
	};

	send(ViewEvent::Mounted);

	view! {
		<div class="app-container">
			<h1 class="title">"Discord Interaction Graph"</h1>

			<p class="description">
				"This app allows you to view and update interaction graphs for your Discord servers. "
				"Select a server from the dropdown and click \"Update Graph\" to generate the interaction graph."
			</p>

			<div class="server-selection">
				<label class="label">"Select a Server:"</label>
				<div class="dropdown" on:click=move |_: MouseEvent| send(ViewEvent::DropdownToggled)>
					<div class="dropdown-selected">
						{move || state.with(|s| s.selection_label().to_string())}
					</div>
					<Show when=move || state.with(|s| s.dropdown_open)>
						<ul class="dropdown-list">
							<For
								each=move || state.with(|s| s.visible_options().to_vec())
								key=|server| server.clone()
								children=move |server: String| {
									let name = server.clone();
									view! {
										<li
											class="dropdown-item"
											on:click=move |ev: MouseEvent| {
												// Keep the click from reaching the dropdown toggle.
												ev.stop_propagation();
												send(ViewEvent::ServerSelected(name.clone()));
											}
										>
											{server}
										</li>
									}
								}
							/>
						</ul>
					</Show>
				</div>
			</div>

			<Show when=move || state.with(|s| s.loading)>
				<p class="loading">"Loading servers..."</p>
			</Show>

			<button
				class="update-button"
				on:click=move |_: MouseEvent| send(ViewEvent::UpdateRequested)
				disabled=move || state.with(ViewState::update_disabled)
			>
				"Update Graph"
			</button>

			{move || {
				state
					.with(|s| s.error.clone())
					.map(|error| view! { <p class="error">{error}</p> })
			}}

			<Show when=move || state.with(ViewState::shows_graph)>
				<div class="graph-container">
					<h2 class="graph-title">
						"Graph for " {move || state.with(|s| s.selected.clone().unwrap_or_default())}
					</h2>
					<iframe
						class="graph-iframe"
						src=move || state.with(|s| s.graph_url.clone())
						title="Interaction Graph"
					/>
				</div>
			</Show>
		</div>
	}
}

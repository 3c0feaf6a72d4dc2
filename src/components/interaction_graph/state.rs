//! View state for the interaction graph page.
//!
//! All UI state lives in one [`ViewState`] record. Every user action or network
//! completion is a [`ViewEvent`]; [`ViewState::apply`] performs the transition
//! and hands back the side effect (if any) for the component to run.

use crate::api::{ApiClient, UpdateGraphResponse};

/// Shown when the server list cannot be fetched.
pub const LOAD_SERVERS_FAILED: &str = "Failed to load servers. Please try again.";

/// Shown when a graph rebuild request fails.
pub const UPDATE_GRAPH_FAILED: &str = "Failed to update the graph. Please try again.";

/// Placeholder in the dropdown header before anything is selected.
pub const NO_SELECTION_LABEL: &str = "--Choose a server--";

/// Everything the page renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
	/// Server names in backend order.
	pub servers: Vec<String>,
	/// Server picked by the user. Never cleared once set.
	pub selected: Option<String>,
	/// Embedded graph URL for `selected`; empty until a selection is made.
	pub graph_url: String,
	pub dropdown_open: bool,
	/// Server list fetch in flight.
	pub loading: bool,
	/// Graph rebuild request in flight.
	pub updating: bool,
	pub error: Option<String>,
}

/// Inputs to the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewEvent {
	/// The component was mounted.
	Mounted,
	/// The server list fetch resolved.
	ServersLoaded(Vec<String>),
	/// The server list fetch failed.
	ServersFailed,
	/// The dropdown header was clicked.
	DropdownToggled,
	/// A server in the dropdown was clicked.
	ServerSelected(String),
	/// The update button was clicked.
	UpdateRequested,
	/// The rebuild request resolved.
	UpdateSucceeded(UpdateGraphResponse),
	/// The rebuild request failed.
	UpdateFailed,
}

/// Side effects requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	/// Fetch the server list.
	FetchServers,
	/// Ask the backend to rebuild the graph for this server.
	RequestUpdate(String),
	/// Show a blocking notification.
	Notify(String),
}

impl ViewState {
	/// Apply `event`, returning the side effect the caller must perform.
	pub fn apply(&mut self, event: ViewEvent, api: &ApiClient) -> Option<Command> {
		match event {
			ViewEvent::Mounted => {
				self.loading = true;
				self.error = None;
				Some(Command::FetchServers)
			}
			ViewEvent::ServersLoaded(servers) => {
				self.servers = servers;
				self.loading = false;
				None
			}
			ViewEvent::ServersFailed => {
				self.error = Some(LOAD_SERVERS_FAILED.to_string());
				self.loading = false;
				None
			}
			ViewEvent::DropdownToggled => {
				self.dropdown_open = !self.dropdown_open;
				None
			}
			ViewEvent::ServerSelected(server) => {
				self.graph_url = api.graph_url(&server);
				self.selected = Some(server);
				self.dropdown_open = false;
				None
			}
			ViewEvent::UpdateRequested => {
				if self.update_disabled() {
					return None;
				}
				let server = self.selected.clone()?;
				self.updating = true;
				Some(Command::RequestUpdate(server))
			}
			ViewEvent::UpdateSucceeded(response) => {
				self.updating = false;
				Some(Command::Notify(response.notice()))
			}
			ViewEvent::UpdateFailed => {
				self.updating = false;
				self.error = Some(UPDATE_GRAPH_FAILED.to_string());
				None
			}
		}
	}

	/// The update button is inert without a non-empty selection or while a
	/// rebuild runs.
	pub fn update_disabled(&self) -> bool {
		self.selected.as_deref().is_none_or(str::is_empty) || self.updating
	}

	/// Options listed in the dropdown; empty while it is collapsed.
	pub fn visible_options(&self) -> &[String] {
		if self.dropdown_open { &self.servers } else { &[] }
	}

	/// Text in the dropdown header.
	pub fn selection_label(&self) -> &str {
		match self.selected.as_deref() {
			Some(server) if !server.is_empty() => server,
			_ => NO_SELECTION_LABEL,
		}
	}

	/// Whether the embedded graph should be shown.
	pub fn shows_graph(&self) -> bool {
		self.selected.is_some() && !self.graph_url.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::ClientConfig;

	fn api() -> ApiClient {
		ApiClient::new(&ClientConfig::default())
	}

	fn loaded(servers: &[&str]) -> ViewState {
		let api = api();
		let mut state = ViewState::default();
		state.apply(ViewEvent::Mounted, &api);
		state.apply(
			ViewEvent::ServersLoaded(servers.iter().map(|s| s.to_string()).collect()),
			&api,
		);
		state
	}

	#[test]
	fn mount_starts_loading_and_fetches() {
		let mut state = ViewState {
			error: Some("stale".into()),
			..Default::default()
		};
		let command = state.apply(ViewEvent::Mounted, &api());
		assert_eq!(command, Some(Command::FetchServers));
		assert!(state.loading);
		assert_eq!(state.error, None);
	}

	#[test]
	fn loaded_servers_keep_order_and_stop_loading() {
		let mut state = loaded(&["gamma", "alpha", "beta"]);
		assert!(!state.loading);
		state.apply(ViewEvent::DropdownToggled, &api());
		assert_eq!(state.visible_options(), ["gamma", "alpha", "beta"]);
	}

	#[test]
	fn failed_load_sets_message_and_keeps_list() {
		let api = api();
		let mut state = ViewState::default();
		state.apply(ViewEvent::Mounted, &api);
		state.apply(ViewEvent::ServersFailed, &api);
		state.apply(ViewEvent::DropdownToggled, &api);

		assert_eq!(state.error.as_deref(), Some(LOAD_SERVERS_FAILED));
		assert!(!state.loading);
		assert!(state.visible_options().is_empty());
		assert!(state.update_disabled());
		assert_eq!(state.apply(ViewEvent::UpdateRequested, &api), None);
	}

	#[test]
	fn failed_reload_leaves_previous_list() {
		let api = api();
		let mut state = loaded(&["alpha"]);
		state.apply(ViewEvent::Mounted, &api);
		state.apply(ViewEvent::ServersFailed, &api);
		assert_eq!(state.servers, vec!["alpha"]);
	}

	#[test]
	fn toggle_only_flips_dropdown() {
		let mut state = loaded(&["alpha"]);
		let before = state.clone();
		state.apply(ViewEvent::DropdownToggled, &api());
		assert!(state.dropdown_open);
		state.apply(ViewEvent::DropdownToggled, &api());
		assert_eq!(state, before);
	}

	#[test]
	fn selecting_sets_url_and_closes_dropdown() {
		let mut state = loaded(&["alpha", "beta"]);
		state.apply(ViewEvent::DropdownToggled, &api());
		let command = state.apply(ViewEvent::ServerSelected("beta".into()), &api());

		assert_eq!(command, None);
		assert_eq!(state.selected.as_deref(), Some("beta"));
		assert_eq!(state.graph_url, "http://127.0.0.1:5000/api/graph/beta");
		assert!(!state.dropdown_open);
		assert_eq!(state.selection_label(), "beta");
		assert!(state.shows_graph());
	}

	#[test]
	fn selecting_same_server_twice_is_idempotent() {
		let mut state = loaded(&["alpha", "beta"]);
		state.apply(ViewEvent::ServerSelected("alpha".into()), &api());
		let once = state.clone();
		state.apply(ViewEvent::ServerSelected("alpha".into()), &api());
		assert_eq!(state, once);
	}

	#[test]
	fn update_disabled_iff_nothing_selected() {
		let mut state = loaded(&["alpha"]);
		assert!(state.update_disabled());
		assert_eq!(state.selection_label(), NO_SELECTION_LABEL);
		assert!(!state.shows_graph());
		state.apply(ViewEvent::ServerSelected("alpha".into()), &api());
		assert!(!state.update_disabled());
	}

	#[test]
	fn update_is_guarded_while_in_flight() {
		let api = api();
		let mut state = loaded(&["alpha"]);
		state.apply(ViewEvent::ServerSelected("alpha".into()), &api);

		let first = state.apply(ViewEvent::UpdateRequested, &api);
		assert_eq!(first, Some(Command::RequestUpdate("alpha".into())));
		assert!(state.update_disabled());
		assert_eq!(state.apply(ViewEvent::UpdateRequested, &api), None);
	}

	#[test]
	fn successful_update_notifies_with_message() {
		let api = api();
		let mut state = loaded(&["alpha", "beta"]);
		state.apply(ViewEvent::ServerSelected("beta".into()), &api);
		assert_eq!(state.graph_url, "http://127.0.0.1:5000/api/graph/beta");

		state.apply(ViewEvent::UpdateRequested, &api);
		let response = UpdateGraphResponse {
			message: Some("Graph updated".into()),
			error: None,
		};
		let command = state.apply(ViewEvent::UpdateSucceeded(response), &api);

		assert_eq!(command, Some(Command::Notify("Graph updated".into())));
		assert!(!state.updating);
		assert_eq!(state.error, None);
		assert_eq!(state.graph_url, "http://127.0.0.1:5000/api/graph/beta");
	}

	#[test]
	fn failed_update_sets_message_and_keeps_selection() {
		let api = api();
		let mut state = loaded(&["alpha", "beta"]);
		state.apply(ViewEvent::ServerSelected("alpha".into()), &api);
		state.apply(ViewEvent::UpdateRequested, &api);
		state.apply(ViewEvent::UpdateFailed, &api);

		assert_eq!(state.error.as_deref(), Some(UPDATE_GRAPH_FAILED));
		assert_eq!(state.selected.as_deref(), Some("alpha"));
		assert_eq!(state.graph_url, "http://127.0.0.1:5000/api/graph/alpha");
		assert!(!state.update_disabled());
	}

	#[test]
	fn empty_server_name_counts_as_no_selection() {
		let api = api();
		let mut state = loaded(&["", "beta"]);
		state.apply(ViewEvent::ServerSelected(String::new()), &api);

		assert!(state.update_disabled());
		assert_eq!(state.selection_label(), NO_SELECTION_LABEL);
		assert_eq!(state.apply(ViewEvent::UpdateRequested, &api), None);
		assert!(!state.updating);
		assert_eq!(state.graph_url, "http://127.0.0.1:5000/api/graph/");
	}

	#[test]
	fn selection_survives_reload() {
		let api = api();
		let mut state = loaded(&["alpha"]);
		state.apply(ViewEvent::ServerSelected("alpha".into()), &api);
		state.apply(ViewEvent::ServersLoaded(vec!["beta".into()]), &api);
		assert_eq!(state.selected.as_deref(), Some("alpha"));
	}
}

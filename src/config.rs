//! Client configuration embedded in the host page.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// Backend origin used when the host page does not provide one.
pub const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:5000";

/// Id of the `<script type="application/json">` element holding the config.
const CONFIG_ELEMENT_ID: &str = "client-config";

/// Runtime configuration for the client.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Origin of the graph backend, without a trailing slash.
	pub api_origin: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			api_origin: DEFAULT_API_ORIGIN.to_string(),
		}
	}
}

impl ClientConfig {
	/// Parse a config document. Missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let config: Self = serde_json::from_str(json)?;
		Ok(config.normalized())
	}

	fn normalized(mut self) -> Self {
		let trimmed = self.api_origin.trim().trim_end_matches('/');
		self.api_origin = if trimmed.is_empty() {
			DEFAULT_API_ORIGIN.to_string()
		} else {
			trimmed.to_string()
		};
		self
	}
}

fn config_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the config from the host page, falling back to defaults.
pub fn load_config() -> ClientConfig {
	let Some(json_text) = config_text() else {
		info!("discord-graph: no #{CONFIG_ELEMENT_ID} element, using defaults");
		return ClientConfig::default();
	};

	match ClientConfig::from_json(&json_text) {
		Ok(config) => {
			info!("discord-graph: backend origin {}", config.api_origin);
			config
		}
		Err(e) => {
			warn!("discord-graph: failed to parse client config: {}", e);
			ClientConfig::default()
		}
	}
}

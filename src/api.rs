//! HTTP client for the interaction graph backend.
//!
//! Requests go through the browser's `fetch`. HTTP status codes are not
//! inspected: whatever body the backend sends is decoded as JSON. Encoding and
//! decoding live in plain functions so they can be checked off-browser.

use js_sys::Promise;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

use crate::config::ClientConfig;

/// Failure talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	/// No `window` object (not running in a browser).
	#[error("no browser window available")]
	NoWindow,
	/// A browser call threw or a promise rejected.
	#[error("fetch failed: {0}")]
	Js(String),
	/// The response body could not be read as text.
	#[error("response body is not text")]
	NotText,
	/// The response body was not the expected JSON.
	#[error("malformed response body: {0}")]
	Decode(#[from] serde_json::Error),
}

impl From<JsValue> for ApiError {
	fn from(value: JsValue) -> Self {
		ApiError::Js(format!("{value:?}"))
	}
}

#[derive(Deserialize)]
struct ServerListResponse {
	servers: Vec<String>,
}

#[derive(Serialize)]
struct UpdateGraphRequest<'a> {
	server_name: &'a str,
}

/// Body returned by the graph rebuild endpoint.
///
/// A successful rebuild carries `message`; a rejected request carries `error`.
/// Both are kept as raw JSON so any value type is accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateGraphResponse {
	/// Human-readable result of the rebuild.
	pub message: Option<Value>,
	/// Reason the backend refused the request.
	pub error: Option<Value>,
}

impl UpdateGraphResponse {
	/// Text to show the user: `message`, else `error`, else nothing.
	pub fn notice(&self) -> String {
		[&self.message, &self.error]
			.into_iter()
			.flatten()
			.find(|value| !value.is_null())
			.map(|value| match value {
				Value::String(text) => text.clone(),
				other => other.to_string(),
			})
			.unwrap_or_default()
	}
}

/// Decode the `/api/servers` body into the ordered server list.
pub fn decode_server_list(body: &str) -> Result<Vec<String>, ApiError> {
	let list: ServerListResponse = serde_json::from_str(body)?;
	Ok(list.servers)
}

/// Encode the `/api/update_graph` request body.
pub fn encode_update_request(server_name: &str) -> Result<String, ApiError> {
	Ok(serde_json::to_string(&UpdateGraphRequest { server_name })?)
}

/// Decode the `/api/update_graph` response body.
pub fn decode_update_response(body: &str) -> Result<UpdateGraphResponse, ApiError> {
	Ok(serde_json::from_str(body)?)
}

/// Client bound to one backend origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
	origin: String,
}

impl ApiClient {
	/// Create a client for the origin named in `config`.
	pub fn new(config: &ClientConfig) -> Self {
		Self {
			origin: config.api_origin.clone(),
		}
	}

	/// URL of the backend-rendered graph for `server_name`.
	pub fn graph_url(&self, server_name: &str) -> String {
		format!("{}/api/graph/{}", self.origin, server_name)
	}

	fn servers_url(&self) -> String {
		format!("{}/api/servers", self.origin)
	}

	fn update_graph_url(&self) -> String {
		format!("{}/api/update_graph", self.origin)
	}

	/// Fetch the list of known servers, in backend order.
	pub async fn list_servers(&self) -> Result<Vec<String>, ApiError> {
		let window = window()?;
		let body = read_text(window.fetch_with_str(&self.servers_url())).await?;
		decode_server_list(&body)
	}

	/// Ask the backend to rebuild the graph for `server_name`.
	pub async fn request_graph_update(
		&self,
		server_name: &str,
	) -> Result<UpdateGraphResponse, ApiError> {
		let window = window()?;

		let init = RequestInit::new();
		init.set_method("POST");
		init.set_body(&JsValue::from_str(&encode_update_request(server_name)?));

		let request = Request::new_with_str_and_init(&self.update_graph_url(), &init)?;
		request.headers().set("Content-Type", "application/json")?;

		let body = read_text(window.fetch_with_request(&request)).await?;
		decode_update_response(&body)
	}
}

fn window() -> Result<Window, ApiError> {
	web_sys::window().ok_or(ApiError::NoWindow)
}

/// Await a `fetch` promise and read the response body as text.
async fn read_text(fetch: Promise) -> Result<String, ApiError> {
	let response: Response = JsFuture::from(fetch).await?.dyn_into()?;
	let text = JsFuture::from(response.text()?).await?;
	text.as_string().ok_or(ApiError::NotText)
}

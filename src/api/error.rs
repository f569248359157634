use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Result of an API call.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failure of an API call.
#[derive(Debug, Error)]
pub enum ApiError {
	/// Not running in a browser window.
	#[error("no browser window available")]
	NoWindow,

	/// The fetch itself failed, with the JS error message.
	#[error("request failed: {0}")]
	Request(String),

	/// Non-200 reply. The API puts the failure reason in the body.
	#[error("{body} ({status})")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, trimmed.
		body: String,
	},

	/// The body was not the expected JSON.
	#[error("unable to decode response: {0}")]
	Decode(#[from] serde_json::Error),
}

impl From<JsValue> for ApiError {
	fn from(value: JsValue) -> Self {
		let message = match value.dyn_ref::<js_sys::Error>() {
			Some(err) => String::from(err.message()),
			None => value.as_string().unwrap_or_else(|| format!("{:?}", value)),
		};
		ApiError::Request(message)
	}
}

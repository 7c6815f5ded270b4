use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why a request to the remote resource yielded no data.
///
/// These never reach callers of [`Source`](`crate::api::Source`) operations, which log them and return [`None`] instead.
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("request to {url} failed: {source}")]
	Transport { url: String, source: reqwest::Error },

	#[error("request to {url} returned status {status}")]
	Status { url: String, status: u16 },

	#[error("could not decode response from {url}: {source}")]
	Decode { url: String, source: serde_json::Error },
}

/// Failures while mounting onto or mutating the page.
#[derive(Debug, Error)]
pub enum Error {
	#[error("no window or document is available")]
	MissingDocument,

	#[error("no element matches `{0}`")]
	MissingElement(String),

	#[error("element `{0}` is not a <select>")]
	NotASelect(String),

	#[error("JavaScript error: {0}")]
	Js(String),
}

impl From<JsValue> for Error {
	fn from(value: JsValue) -> Self {
		Self::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}

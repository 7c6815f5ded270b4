use crate::model::UserId;
use tracing::debug;

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Name of the `<meta>` element whose `content` overrides [`Config::api_base`].
pub const API_BASE_META_NAME: &str = "posts-dom:api-base";

/// Where to fetch from and which page elements to mount onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub api_base: String,
	/// Used when the selection control has no (parseable) value.
	pub fallback_user_id: UserId,
	pub select_menu_id: String,
	pub container_selector: String,
	pub placeholder_text: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			api_base: DEFAULT_API_BASE.to_owned(),
			fallback_user_id: UserId(1),
			select_menu_id: "selectMenu".to_owned(),
			container_selector: "main".to_owned(),
			placeholder_text: "Select an Employee to display their posts.".to_owned(),
		}
	}
}

impl Config {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Defaults, with the API base taken from `<meta name="posts-dom:api-base" content="…">` if the page has one.
	#[must_use]
	pub fn from_document(document: &web_sys::Document) -> Self {
		let mut config = Self::default();
		let api_base = document
			.query_selector(&format!("meta[name=\"{}\"]", API_BASE_META_NAME))
			.ok()
			.flatten()
			.and_then(|meta| meta.get_attribute("content"))
			.filter(|content| !content.trim().is_empty());
		if let Some(api_base) = api_base {
			debug!(%api_base, "API base overridden by page.");
			config.api_base = api_base;
		}
		config
	}

	#[must_use]
	pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
		self.api_base = api_base.into();
		self
	}

	#[must_use]
	pub fn fallback_user_id(mut self, fallback_user_id: UserId) -> Self {
		self.fallback_user_id = fallback_user_id;
		self
	}

	#[must_use]
	pub fn select_menu_id(mut self, select_menu_id: impl Into<String>) -> Self {
		self.select_menu_id = select_menu_id.into();
		self
	}

	#[must_use]
	pub fn container_selector(mut self, container_selector: impl Into<String>) -> Self {
		self.container_selector = container_selector.into();
		self
	}

	#[must_use]
	pub fn placeholder_text(mut self, placeholder_text: impl Into<String>) -> Self {
		self.placeholder_text = placeholder_text.into();
		self
	}
}

//! Start-up configuration, resolved from the build environment.

use log::Level;

/// Neighbourhood sample shown on first load.
pub const DEFAULT_QUERY: &str = "MATCH (n0)-[r]-(n1) RETURN n0, r, n1 LIMIT 20";

/// Settings shared with every component through context.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// Prefix for every API path. Empty means same origin.
	pub api_base_url: String,
	/// Console log filter.
	pub log_level: Level,
	/// Query submitted when the URL carries no `q` parameter.
	pub default_query: String,
	/// Maximum number of assets (and relations) drawn by the explorer.
	pub max_rendered: usize,
	/// Quiet time after the last keystroke before searching.
	pub search_debounce_ms: u64,
	/// Suggestions requested per search.
	pub search_page_size: usize,
	/// Page sizes offered by the results table; the first is the default.
	pub table_page_sizes: Vec<usize>,
	/// How long an error notification stays up.
	pub notification_timeout_ms: u64,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: String::new(),
			log_level: Level::Debug,
			default_query: DEFAULT_QUERY.to_string(),
			max_rendered: 50,
			search_debounce_ms: 250,
			search_page_size: 10,
			table_page_sizes: vec![10, 30, 50],
			notification_timeout_ms: 6000,
		}
	}
}

impl AppConfig {
	/// Reads `GRAPHKB_API_URL` and `GRAPHKB_LOG_LEVEL` as captured at compile time.
	pub fn from_env() -> Self {
		Self::from_values(option_env!("GRAPHKB_API_URL"), option_env!("GRAPHKB_LOG_LEVEL"))
	}

	fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
		let mut config = Self::default();
		if let Some(url) = api_url {
			config.api_base_url = url.trim_end_matches('/').to_string();
		}
		if let Some(level) = log_level.and_then(|l| l.parse().ok()) {
			config.log_level = level;
		}
		config
	}

	/// Initial results table page size.
	pub fn default_page_size(&self) -> usize {
		self.table_page_sizes.first().copied().unwrap_or(10)
	}
}

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::error::{ApiError, Result};
use crate::models::{
	DatabaseDetails, QueryResultSet, SearchAssetResponse, SourceGraph, SourcesByIdResponse,
};

#[derive(Serialize)]
struct QueryRequest<'a> {
	q: &'a str,
	include_sources: bool,
}

#[derive(Serialize)]
struct IdsRequest<'a> {
	ids: &'a [String],
}

/// Calls the knowledge-graph HTTP API through the browser `fetch`.
#[derive(Clone, Debug, Default)]
pub struct ApiClient {
	base_url: String,
}

impl ApiClient {
	/// Client for the API under `base_url`. Empty means same origin.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
		}
	}

	/// `GET /api/sources`
	pub async fn sources(&self) -> Result<Vec<String>> {
		self.get("/api/sources").await
	}

	/// `GET /api/database`
	pub async fn database_details(&self) -> Result<DatabaseDetails> {
		self.get("/api/database").await
	}

	/// `GET /api/schema?sources=a,b`
	pub async fn schema(&self, sources: &[String]) -> Result<SourceGraph> {
		self.get(&schema_path(sources)).await
	}

	/// `GET /search/assets?q&from&size`
	pub async fn search_assets(
		&self,
		query: &str,
		from: usize,
		size: usize,
	) -> Result<SearchAssetResponse> {
		self.get(&search_path(query, from, size)).await
	}

	/// `POST /api/query`
	pub async fn query(&self, query: &str, include_sources: bool) -> Result<QueryResultSet> {
		let body = QueryRequest {
			q: query,
			include_sources,
		};
		self.post("/api/query", &body).await
	}

	/// `POST /api/query/assets/sources`
	pub async fn assets_sources(&self, ids: &[String]) -> Result<SourcesByIdResponse> {
		self.post("/api/query/assets/sources", &IdsRequest { ids }).await
	}

	/// `POST /api/query/relations/sources`
	pub async fn relations_sources(&self, ids: &[String]) -> Result<SourcesByIdResponse> {
		self.post("/api/query/relations/sources", &IdsRequest { ids }).await
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let (status, body) = self.send("GET", path, None).await?;
		decode(status, &body)
	}

	async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		let payload = serde_json::to_string(body)?;
		let (status, body) = self.send("POST", path, Some(payload)).await?;
		decode(status, &body)
	}

	async fn send(&self, method: &str, path: &str, body: Option<String>) -> Result<(u16, String)> {
		let url = format!("{}{}", self.base_url, path);
		debug!("{} {}", method, url);

		let opts = RequestInit::new();
		opts.set_method(method);
		opts.set_mode(RequestMode::Cors);
		if let Some(ref payload) = body {
			opts.set_body(&JsValue::from_str(payload));
		}

		let request = Request::new_with_str_and_init(&url, &opts)?;
		if body.is_some() {
			request.headers().set("Content-Type", "application/json")?;
		}

		let window = web_sys::window().ok_or(ApiError::NoWindow)?;
		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await?
			.dyn_into()?;
		let text = JsFuture::from(response.text()?).await?;
		Ok((response.status(), text.as_string().unwrap_or_default()))
	}
}

fn schema_path(sources: &[String]) -> String {
	let joined = sources
		.iter()
		.map(|s| urlencoding::encode(s).into_owned())
		.collect::<Vec<_>>()
		.join(",");
	format!("/api/schema?sources={}", joined)
}

fn search_path(query: &str, from: usize, size: usize) -> String {
	format!(
		"/search/assets?q={}&from={}&size={}",
		urlencoding::encode(query),
		from,
		size
	)
}

fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
	if status != 200 {
		return Err(ApiError::Status {
			status,
			body: body.trim().to_string(),
		});
	}
	Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_search_path_encodes_query() {
		assert_eq!(
			search_path("db 01&x", 0, 10),
			"/search/assets?q=db%2001%26x&from=0&size=10"
		);
	}

	#[test]
	fn test_schema_path() {
		let sources = vec!["csv-hosts".to_string(), "scan,er".to_string()];
		assert_eq!(schema_path(&sources), "/api/schema?sources=csv-hosts,scan%2Cer");
		assert_eq!(schema_path(&[]), "/api/schema?sources=");
	}

	#[test]
	fn test_query_body() {
		let body = QueryRequest {
			q: "MATCH (a) RETURN a",
			include_sources: true,
		};
		assert_eq!(
			serde_json::to_string(&body).unwrap(),
			r#"{"q":"MATCH (a) RETURN a","include_sources":true}"#
		);
	}

	#[test]
	fn test_ids_body() {
		let ids = vec!["1".to_string(), "2".to_string()];
		assert_eq!(
			serde_json::to_string(&IdsRequest { ids: &ids }).unwrap(),
			r#"{"ids":["1","2"]}"#
		);
	}

	#[test]
	fn test_decode_rejects_non_200() {
		let err = decode::<Vec<String>>(500, "query timed out\n").unwrap_err();
		assert!(matches!(err, ApiError::Status { status: 500, ref body } if body == "query timed out"));
	}

	#[test]
	fn test_decode_sources_by_id() {
		let res: SourcesByIdResponse =
			decode(200, r#"{"results":{"1":["csv","scanner"]}}"#).unwrap();
		assert_eq!(res.results["1"], vec!["csv".to_string(), "scanner".to_string()]);
	}
}

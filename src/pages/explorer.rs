use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use log::{debug, error, info};

use crate::adapters::{find_asset, result_to_graph, result_to_table};
use crate::api::ApiClient;
use crate::components::database_dialog::DatabaseDialog;
use crate::components::graph_explorer::GraphExplorer;
use crate::components::notification::Notification;
use crate::components::query_field::QueryField;
use crate::components::results_table::ResultsTableView;
use crate::components::schema_dialog::SchemaDialog;
use crate::components::search_box::SearchBox;
use crate::config::AppConfig;
use crate::models::{Asset, QueryResultSet};
use crate::query::{neighbourhood_query, query_from_search, query_href, search_query};
use crate::session::RequestTracker;

/// Where the explorer is in the life of the current query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum QueryStatus {
	#[default]
	Idle,
	Loading,
	Rendered,
	Failed,
}

/// Query editor, result graph, result table and search, driven by the `q`
/// URL parameter.
#[component]
pub fn Explorer() -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let location = use_location();
	let navigate = use_navigate();

	let default_query = config.default_query.clone();
	let submitted = Memo::new(move |_| {
		query_from_search(&location.search.get()).unwrap_or_else(|| default_query.clone())
	});

	let editor = RwSignal::new(String::new());
	let result = RwSignal::new(None::<QueryResultSet>);
	let status = RwSignal::new(QueryStatus::Idle);
	let error = RwSignal::new(None::<String>);
	let sources = RwSignal::new(Vec::<String>::new());
	let hovered = RwSignal::new(None::<Asset>);
	let schema_open = RwSignal::new(false);
	let database_open = RwSignal::new(false);
	let tracker = StoredValue::new(RequestTracker::default());
	// Bumped to re-run the query already in the URL.
	let refresh = RwSignal::new(0u64);
	let requested = RwSignal::new(None::<String>);

	let report = Callback::new(move |message: String| error.set(Some(message)));

	// URL -> query execution.
	let api_query = api.clone();
	Effect::new(move |_| {
		refresh.track();
		let query = submitted.get();
		editor.set(query.clone());

		let mut ticket = 0;
		tracker.update_value(|t| ticket = t.begin());
		status.set(QueryStatus::Loading);
		info!("submitting query: {}", query);

		let api = api_query.clone();
		wasm_bindgen_futures::spawn_local(async move {
			let res = api.query(&query, true).await;
			if tracker.try_with_value(|t| t.is_current(ticket)) != Some(true) {
				debug!("dropping stale reply for {:?}", query);
				return;
			}
			match res {
				Ok(res) => {
					debug!("{} rows in {} ms", res.items.len(), res.execution_time_ms);
					result.set(Some(res));
					status.set(QueryStatus::Rendered);
				}
				Err(e) => {
					error!("query failed: {}", e);
					status.set(QueryStatus::Failed);
					report.run(e.to_string());
				}
			}
		});
	});

	// Submissions go through the URL so the query survives reloads.
	Effect::new(move |_| {
		let Some(query) = requested.get() else {
			return;
		};
		if submitted.get_untracked() == query {
			refresh.update(|n| *n += 1);
		} else {
			navigate(&query_href(&query), Default::default());
		}
	});
	let submit = Callback::new(move |query: String| requested.set(Some(query)));

	let api_sources = api.clone();
	wasm_bindgen_futures::spawn_local(async move {
		match api_sources.sources().await {
			Ok(list) => sources.set(list),
			Err(e) => {
				error!("sources: {}", e);
				report.run(format!("Unable to fetch sources: {}", e));
			}
		}
	});

	let max_rendered = config.max_rendered;
	let graph = Memo::new(move |_| {
		result.with(|r| r.as_ref().map(|r| result_to_graph(r, max_rendered)).unwrap_or_default())
	});
	let table = Memo::new(move |_| {
		result.with(|r| r.as_ref().map(result_to_table).unwrap_or_default())
	});
	let loading = Signal::derive(move || status.get() == QueryStatus::Loading);

	let asset_by_id = move |id: &str| {
		result.with_untracked(|r| r.as_ref().and_then(|r| find_asset(r, id).cloned()))
	};
	let on_node_hover = Callback::new(move |id: Option<String>| {
		hovered.set(id.and_then(|id| asset_by_id(&id)));
	});
	let on_node_double_click = Callback::new(move |id: String| {
		if let Some(asset) = asset_by_id(&id) {
			submit.run(neighbourhood_query(&asset));
		}
	});
	let on_search = Callback::new(move |text: String| submit.run(search_query(&text)));
	let on_pick = Callback::new(move |asset: Asset| submit.run(neighbourhood_query(&asset)));

	let summary = move || {
		result.with(|r| {
			r.as_ref().map(|r| {
				format!("{} results found in {}ms", r.items.len(), r.execution_time_ms)
			})
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="explorer">
				<Notification message=error timeout_ms=config.notification_timeout_ms />
				<DatabaseDialog open=database_open on_error=report />
				<SchemaDialog open=schema_open sources=sources on_error=report />

				<div class="explorer-graph">
					<div class="explorer-search">
						<SearchBox on_search=on_search on_pick=on_pick on_error=report />
					</div>
					<div class="button-group">
						<button
							class="button-group-item"
							title="Schema graph"
							on:click=move |_| schema_open.set(true)
						>
							"Schema"
						</button>
						<button
							class="button-group-item"
							title="Database details"
							on:click=move |_| database_open.set(true)
						>
							"Database"
						</button>
					</div>
					<GraphExplorer
						data=graph
						hovered=hovered
						on_node_hover=on_node_hover
						on_node_double_click=on_node_double_click
					/>
					<div class="explorer-query">
						<div class="results-summary">{summary}</div>
						<QueryField value=editor on_submit=submit />
					</div>
				</div>

				<div class="explorer-results">
					<ResultsTableView table=table loading=loading page_sizes=config.table_page_sizes.clone() />
				</div>
			</div>
		</ErrorBoundary>
	}
}

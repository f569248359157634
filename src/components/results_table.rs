use leptos::prelude::*;
use log::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::adapters::{ResultsTable, TableCell};

const EXPORT_FILE_NAME: &str = "graphkb-explorer.csv";

fn download(file_name: &str, content: &str, mime: &str) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(content));
	let options = BlobPropertyBag::new();
	options.set_type(mime);
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();
	Url::revoke_object_url(&url)
}

fn sources_view(sources: Vec<String>) -> impl IntoView {
	let title = sources.join("\n");
	view! {
		<div class="cell-sources" title=title>
			{format!("sources: {}", sources.join(", "))}
		</div>
	}
}

fn cell_view(cell: TableCell) -> AnyView {
	match cell {
		TableCell::Asset { kind, key, sources } => view! {
			<div class="cell-asset">
				<span class="cell-type">{kind}</span>
				<br />
				<span>{key}</span>
				{sources_view(sources)}
			</div>
		}
		.into_any(),
		TableCell::Relation { kind, sources } => view! {
			<div class="cell-relation">
				<span>{kind}</span>
				{sources_view(sources)}
			</div>
		}
		.into_any(),
		TableCell::Text(text) => view! { <span>{text}</span> }.into_any(),
	}
}

/// Paginated table of the last query result.
#[component]
pub fn ResultsTableView(
	#[prop(into)] table: Signal<ResultsTable>,
	#[prop(into)] loading: Signal<bool>,
	page_sizes: Vec<usize>,
) -> impl IntoView {
	let default_size = page_sizes.first().copied().unwrap_or(10);
	let page = RwSignal::new(0usize);
	let page_size = RwSignal::new(default_size);

	// A new result starts from the first page.
	Effect::new(move |_| {
		table.track();
		page.set(0);
	});

	let page_count = move || table.with(|t| t.page_count(page_size.get()).max(1));

	let export = move |_| {
		let csv = match table.with_untracked(ResultsTable::to_csv) {
			Ok(csv) => csv,
			Err(e) => {
				error!("csv export failed: {}", e);
				return;
			}
		};
		if let Err(e) = download(EXPORT_FILE_NAME, &csv, "text/csv") {
			error!("csv download failed: {:?}", e);
		}
	};

	view! {
		<div class="results-table">
			<div class="results-table-toolbar">
				<span class="results-table-title">"Results of last query"</span>
				<button on:click=export>"Export CSV"</button>
			</div>
			<Show when=move || loading.get()>
				<div class="results-table-loading">"Loading..."</div>
			</Show>
			<table>
				<thead>
					<tr>
						{move || {
							table
								.with(|t| t.columns.clone())
								.into_iter()
								.map(|title| view! { <th>{title}</th> })
								.collect_view()
						}}
					</tr>
				</thead>
				<tbody>
					{move || {
						table
							.with(|t| t.page(page.get(), page_size.get()).to_vec())
							.into_iter()
							.map(|row| {
								view! {
									<tr>
										{row
											.into_iter()
											.map(|cell| view! { <td>{cell_view(cell)}</td> })
											.collect_view()}
									</tr>
								}
							})
							.collect_view()
					}}
				</tbody>
			</table>
			<div class="results-table-pager">
				<select on:change=move |ev| {
					if let Ok(size) = event_target_value(&ev).parse() {
						page_size.set(size);
						page.set(0);
					}
				}>
					{page_sizes
						.into_iter()
						.map(|size| {
							view! {
								<option value=size.to_string() selected=size == default_size>
									{format!("{} rows", size)}
								</option>
							}
						})
						.collect_view()}
				</select>
				<button
					disabled=move || page.get() == 0
					on:click=move |_| page.update(|p| *p = p.saturating_sub(1))
				>
					"<"
				</button>
				<span>{move || format!("{} / {}", page.get() + 1, page_count())}</span>
				<button
					disabled=move || page.get() + 1 >= page_count()
					on:click=move |_| page.update(|p| *p += 1)
				>
					">"
				</button>
			</div>
		</div>
	}
}

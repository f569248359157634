use leptos::prelude::*;
use log::{debug, error};

use super::force_graph::{ForceGraphCanvas, ForceSettings};
use crate::adapters::schema_to_graph;
use crate::api::ApiClient;
use crate::models::SourceGraph;
use crate::session::RequestTracker;

fn toggle(selected: &mut Vec<String>, source: &str) {
	if let Some(pos) = selected.iter().position(|s| s == source) {
		selected.remove(pos);
	} else {
		selected.push(source.to_string());
	}
}

/// Full-screen schema graph of the sources ticked in the side list.
#[component]
pub fn SchemaDialog(
	open: RwSignal<bool>,
	#[prop(into)] sources: Signal<Vec<String>>,
	on_error: Callback<String>,
) -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let selected = RwSignal::new(Vec::<String>::new());
	let schema = RwSignal::new(SourceGraph::default());
	let tracker = StoredValue::new(RequestTracker::default());

	Effect::new(move |_| {
		let chosen = selected.get();
		if !open.get() {
			return;
		}
		let mut ticket = 0;
		tracker.update_value(|t| ticket = t.begin());
		let api = api.clone();
		wasm_bindgen_futures::spawn_local(async move {
			let res = api.schema(&chosen).await;
			if tracker.try_with_value(|t| t.is_current(ticket)) != Some(true) {
				debug!("dropping stale schema reply");
				return;
			}
			match res {
				Ok(graph) => schema.set(graph),
				Err(e) => {
					error!("schema: {}", e);
					on_error.run(format!("Unable to fetch schema graph: {}", e));
				}
			}
		});
	});

	let graph = Memo::new(move |_| schema.with(schema_to_graph));
	let sorted_sources = move || {
		let mut list = sources.get();
		list.sort();
		list
	};

	view! {
		<Show when=move || open.get()>
			<div class="dialog-backdrop">
				<div class="dialog schema-dialog">
					<div class="schema-graph">
						<ForceGraphCanvas data=graph settings=ForceSettings::schema() />
					</div>
					<ul class="sources-list">
						{move || {
							sorted_sources()
								.into_iter()
								.map(|source| {
									let checked = {
										let source = source.clone();
										move || selected.with(|s| s.contains(&source))
									};
									let name = source.clone();
									view! {
										<li class="sources-list-item">
											<label>
												<input
													type="checkbox"
													prop:checked=checked
													on:change=move |_| {
														selected.update(|s| toggle(s, &source))
													}
												/>
												{name}
											</label>
										</li>
									}
								})
								.collect_view()
						}}
					</ul>
					<button class="dialog-close" on:click=move |_| open.set(false)>
						"×"
					</button>
				</div>
			</div>
		</Show>
	}
}

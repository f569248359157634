use std::time::Duration;

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::KeyboardEvent;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::{Asset, SearchAssetResponse};
use crate::session::RequestTracker;

/// Lets a `mousedown` on a suggestion land before blur hides the dropdown.
const BLUR_CLOSE_DELAY: Duration = Duration::from_millis(150);

fn dropdown_open(focused: bool, text: &str) -> bool {
	focused && !text.is_empty()
}

/// Asset search with debounced autocomplete.
///
/// Enter hands the raw text to `on_search`; picking a suggestion hands the
/// asset to `on_pick`.
#[component]
pub fn SearchBox(
	on_search: Callback<String>,
	on_pick: Callback<Asset>,
	on_error: Callback<String>,
) -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let config = expect_context::<AppConfig>();
	let (debounce, page_size) = (
		Duration::from_millis(config.search_debounce_ms),
		config.search_page_size,
	);

	let text = RwSignal::new(String::new());
	let focused = RwSignal::new(false);
	let suggestions = RwSignal::new(None::<SearchAssetResponse>);
	let timer = StoredValue::new(None::<TimeoutHandle>);
	let tracker = StoredValue::new(RequestTracker::default());

	let on_input = move |ev: web_sys::Event| {
		let value = event_target_value(&ev);
		text.set(value.clone());
		if let Some(handle) = timer.get_value() {
			handle.clear();
		}
		timer.set_value(None);

		if value.is_empty() {
			tracker.update_value(RequestTracker::cancel);
			suggestions.set(None);
			return;
		}

		let api = api.clone();
		let handle = set_timeout_with_handle(
			move || {
				let mut ticket = 0;
				tracker.update_value(|t| ticket = t.begin());
				wasm_bindgen_futures::spawn_local(async move {
					let res = api.search_assets(&value, 0, page_size).await;
					if tracker.try_with_value(|t| t.is_current(ticket)) != Some(true) {
						debug!("dropping stale search reply for {:?}", value);
						return;
					}
					match res {
						Ok(res) => suggestions.set(Some(res)),
						Err(e) => {
							warn!("search failed: {}", e);
							on_error.run(format!("Unable to search assets: {}", e));
						}
					}
				});
			},
			debounce,
		);
		timer.set_value(handle.ok());
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			focused.set(false);
			on_search.run(text.get_untracked());
		}
	};

	let pick = move |asset: Asset| {
		focused.set(false);
		on_pick.run(asset);
	};

	let open = move || text.with(|t| dropdown_open(focused.get(), t));

	view! {
		<div class="search-box" class:search-box-active=move || focused.get()>
			<input
				class="search-input"
				type="search"
				placeholder="Search assets"
				prop:value=move || text.get()
				on:input=on_input
				on:keydown=on_keydown
				on:focus=move |_| focused.set(true)
				on:blur=move |_| set_timeout(move || focused.set(false), BLUR_CLOSE_DELAY)
			/>
			<Show when=open>
				{move || {
					suggestions
						.get()
						.map(|res| {
							view! {
								<div class="search-results">
									<ul class="search-results-list">
										{res
											.assets
											.into_iter()
											.map(|asset| {
												let (key, kind) = (asset.key.clone(), asset.kind.clone());
												view! {
													<li
														class="search-result"
														on:mousedown=move |_| pick(asset.clone())
													>
														<div class="search-result-key">{key}</div>
														<div class="search-result-type">{kind}</div>
													</li>
												}
											})
											.collect_view()}
									</ul>
									<div class="search-results-found">
										{format!("{} results found", res.total_hits)}
									</div>
									<button
										class="search-results-close"
										on:click=move |_| focused.set(false)
									>
										"Close"
									</button>
								</div>
							}
						})
				}}
			</Show>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_dropdown_needs_focus_and_text() {
		assert!(dropdown_open(true, "db"));
		// Focus left the input.
		assert!(!dropdown_open(false, "db"));
		assert!(!dropdown_open(true, ""));
	}
}

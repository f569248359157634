use leptos::prelude::*;
use log::error;

use crate::api::ApiClient;
use crate::models::DatabaseDetails;

/// Asset and relation counts, fetched each time the dialog opens.
#[component]
pub fn DatabaseDialog(open: RwSignal<bool>, on_error: Callback<String>) -> impl IntoView {
	let api = expect_context::<ApiClient>();
	let details = RwSignal::new(None::<DatabaseDetails>);

	Effect::new(move |_| {
		if !open.get() {
			return;
		}
		let api = api.clone();
		wasm_bindgen_futures::spawn_local(async move {
			match api.database_details().await {
				Ok(d) => details.set(Some(d)),
				Err(e) => {
					error!("database details: {}", e);
					on_error.run(format!("Unable to fetch database details: {}", e));
				}
			}
		});
	});

	view! {
		<Show when=move || open.get()>
			<div class="dialog-backdrop" on:click=move |_| open.set(false)>
				<div class="dialog database-dialog" on:click=|ev| ev.stop_propagation()>
					<h2>"Database details"</h2>
					{move || match details.get() {
						Some(d) => view! {
							<p>
								{format!("Number of assets: {}", d.assets_count)}
								<br />
								{format!("Number of relations: {}", d.relations_count)}
							</p>
						}
						.into_any(),
						None => view! { <p>"Loading..."</p> }.into_any(),
					}}
				</div>
			</div>
		</Show>
	}
}

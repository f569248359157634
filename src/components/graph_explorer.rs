use leptos::prelude::*;

use super::force_graph::{ForceGraphCanvas, GraphData};
use crate::models::Asset;

/// The result graph with a details box for the hovered asset.
#[component]
pub fn GraphExplorer(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] hovered: Signal<Option<Asset>>,
	on_node_hover: Callback<Option<String>>,
	on_node_double_click: Callback<String>,
) -> impl IntoView {
	view! {
		<div class="graph-explorer">
			<div
				class="element-details"
				class:hidden=move || hovered.with(Option::is_none)
			>
				{move || {
					hovered
						.get()
						.map(|asset| {
							view! {
								<b>"type: "</b>
								{asset.kind}
								<br />
								<b>"value: "</b>
								{asset.key}
							}
						})
				}}
			</div>
			<ForceGraphCanvas
				data=data
				on_node_hover=on_node_hover
				on_node_double_click=on_node_double_click
			/>
		</div>
	}
}

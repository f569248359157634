use leptos::prelude::*;
use web_sys::KeyboardEvent;

use crate::query::cursor_position;

/// Multiline query editor. Ctrl+Enter or the send button submits.
#[component]
pub fn QueryField(value: RwSignal<String>, on_submit: Callback<String>) -> impl IntoView {
	let textarea_ref = NodeRef::<leptos::html::Textarea>::new();
	let cursor = RwSignal::new((0usize, 0usize));

	let update_cursor = move || {
		let Some(textarea) = textarea_ref.get() else {
			return;
		};
		let (Ok(Some(start)), Ok(Some(end))) = (textarea.selection_start(), textarea.selection_end())
		else {
			return;
		};
		if start == end {
			cursor.set(value.with_untracked(|q| cursor_position(q, start as usize)));
		}
	};

	let on_keydown = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" && ev.ctrl_key() {
			ev.prevent_default();
			on_submit.run(value.get_untracked());
		}
	};

	let rows = move || value.with(|q| q.lines().count().max(2).to_string());

	view! {
		<div class="query-field">
			<div class="query-field-controls">
				<button
					class="query-submit"
					title="Ctrl+Enter"
					on:click=move |_| on_submit.run(value.get_untracked())
				>
					"Send"
				</button>
				<div class="query-cursor">
					{move || {
						let (line, column) = cursor.get();
						format!("col {} : row {}", column, line + 1)
					}}
				</div>
			</div>
			<textarea
				node_ref=textarea_ref
				class="query-input"
				rows=rows
				autocomplete="off"
				spellcheck="false"
				prop:value=move || value.get()
				on:input=move |ev| value.set(event_target_value(&ev))
				on:keydown=on_keydown
				on:keyup=move |_| update_cursor()
				on:click=move |_| update_cursor()
			/>
		</div>
	}
}

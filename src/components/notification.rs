use leptos::prelude::*;

/// Dismissible error banner. Clears itself after `timeout_ms`.
#[component]
pub fn Notification(message: RwSignal<Option<String>>, timeout_ms: u64) -> impl IntoView {
	Effect::new(move |_| {
		let Some(shown) = message.get() else {
			return;
		};
		let _ = set_timeout_with_handle(
			move || {
				// A newer message restarts its own timer.
				if message.get_untracked().as_deref() == Some(shown.as_str()) {
					message.set(None);
				}
			},
			std::time::Duration::from_millis(timeout_ms),
		);
	});

	view! {
		<Show when=move || message.with(Option::is_some)>
			<div class="notification notification-error" role="alert">
				<span class="notification-message">{move || message.get().unwrap_or_default()}</span>
				<button class="notification-close" on:click=move |_| message.set(None)>
					"×"
				</button>
			</div>
		</Show>
	}
}

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{ForceGraphState, ForceSettings};
use super::types::GraphData;

type SharedState = Rc<RefCell<Option<ForceGraphState>>>;

/// Size of the canvas container, or the window when the container has no
/// layout yet.
fn canvas_size(canvas: &HtmlCanvasElement, window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or_else(|| (dim(window.inner_width(), 800.0), dim(window.inner_height(), 600.0)))
}

fn local_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed drawing of `data` on a canvas.
///
/// The simulation is rebuilt from scratch whenever `data` changes. Nodes can
/// be dragged (pinned while held), the background pans and the wheel zooms.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(optional)] settings: ForceSettings,
	/// Fired with the node id when the pointer enters a node, `None` when it leaves.
	#[prop(optional)]
	on_node_hover: Option<Callback<Option<String>>>,
	#[prop(optional)] on_node_double_click: Option<Callback<String>>,
	#[prop(default = "#303030")] background: &'static str,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Arc::new(AtomicBool::new(true));
	let started = Rc::new(RefCell::new(false));
	let (state_init, animate_init, alive_init) = (state.clone(), animate.clone(), alive.clone());

	on_cleanup(move || alive.store(false, Ordering::Relaxed));

	Effect::new(move |_| {
		let graph = data.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = canvas_size(&canvas, &window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		debug!(
			"force graph: {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		);
		*state_init.borrow_mut() = Some(ForceGraphState::new(&graph, w, h, settings));

		if started.replace(true) {
			return;
		}

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("canvas 2d context unavailable");
				return;
			}
		};

		let (state_resize, canvas_resize, alive_resize) =
			(state_init.clone(), canvas.clone(), alive_init.clone());
		let resize_cb = Closure::<dyn FnMut()>::new(move || {
			if !alive_resize.load(Ordering::Relaxed) {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = canvas_size(&canvas_resize, &win);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		});
		let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
		// Lives as long as the page; it turns into a no-op once unmounted.
		resize_cb.forget();

		let (state_anim, animate_inner, alive_anim) =
			(state_init.clone(), animate_init.clone(), alive_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !alive_anim.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx, background);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if !s.begin_drag(x, y) {
				s.begin_pan(x, y);
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let hover_change = {
			let mut guard = state_mm.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			if s.drag.active {
				s.drag_to(x, y);
				None
			} else if s.pan.active {
				s.pan_to(x, y);
				None
			} else {
				let hovered = s.node_at_position(x, y);
				let changed = hovered != s.hover.node;
				s.set_hover(hovered);
				changed.then(|| hovered.and_then(|idx| s.node_id(idx)))
			}
		};
		// Callbacks run with the state released; they may touch signals.
		if let (Some(id), Some(cb)) = (hover_change, on_node_hover) {
			cb.run(id);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let was_hovering = {
			let mut guard = state_ml.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			s.end_drag();
			let was_hovering = s.hover.node.is_some();
			s.set_hover(None);
			was_hovering
		};
		if let (true, Some(cb)) = (was_hovering, on_node_hover) {
			cb.run(None);
		}
	};

	let state_dc = state.clone();
	let on_dblclick = move |ev: MouseEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		let id = state_dc
			.borrow()
			.as_ref()
			.and_then(|s| s.node_at_position(x, y).and_then(|idx| s.node_id(idx)));
		if let (Some(id), Some(cb)) = (id, on_node_double_click) {
			cb.run(id);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

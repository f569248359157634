use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::geometry::{self, Point};
use super::state::ForceGraphState;

const ARROW_SIZE: f64 = 10.0;
const LABEL_FONT: &str = "10px sans-serif";
const NODE_FONT: &str = "11px sans-serif";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, background: &str) {
	ctx.set_fill_style_str(background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let positions = state.positions();
	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn edge_alpha(state: &ForceGraphState, source: DefaultNodeIdx, target: DefaultNodeIdx) -> f64 {
	let t = ease_out_cubic(state.hover.highlight_t);
	if state.is_highlighted(source) && state.is_highlighted(target) {
		0.6 + 0.35 * t
	} else {
		0.6 - 0.45 * t
	}
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, Point>,
) {
	let radius = state.settings.node_radius;
	ctx.set_line_width(1.5);
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");

	for edge in &state.edges {
		let (Some(&from), Some(&to)) = (positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let alpha = edge_alpha(state, edge.source, edge.target);
		let color = format!("rgba(255, 255, 255, {})", alpha);
		ctx.set_stroke_style_str(&color);
		ctx.set_fill_style_str(&color);

		if edge.is_self_loop() {
			let lp = geometry::self_loop(from, radius, radius * 1.5);
			ctx.begin_path();
			ctx.move_to(lp.start.0, lp.start.1);
			ctx.bezier_curve_to(
				lp.control1.0,
				lp.control1.1,
				lp.control2.0,
				lp.control2.1,
				lp.end.0,
				lp.end.1,
			);
			ctx.stroke();
			draw_arrow(ctx, lp.control2, lp.end);
			draw_label(ctx, &edge.label, lp.apex, 0.0);
			continue;
		}

		let Some((start, end)) = geometry::trimmed_edge(from, to, radius, radius + ARROW_SIZE)
		else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(start.0, start.1);
		ctx.line_to(end.0, end.1);
		ctx.stroke();

		let (dx, dy) = (to.0 - from.0, to.1 - from.1);
		let dist = (dx * dx + dy * dy).sqrt();
		let tip = (to.0 - dx / dist * radius, to.1 - dy / dist * radius);
		draw_arrow(ctx, end, tip);
		draw_label(
			ctx,
			&edge.label,
			geometry::midpoint(start, end),
			geometry::label_angle(from, to),
		);
	}
}

/// Filled triangle pointing from `back` to `tip`, `ARROW_SIZE` long.
fn draw_arrow(ctx: &CanvasRenderingContext2d, back: Point, tip: Point) {
	let (dx, dy) = (tip.0 - back.0, tip.1 - back.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let (base_x, base_y) = (tip.0 - ux * ARROW_SIZE, tip.1 - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(base_x + px, base_y + py);
	ctx.line_to(base_x - px, base_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, at: Point, angle: f64) {
	if label.is_empty() {
		return;
	}
	ctx.save();
	let _ = ctx.translate(at.0, at.1);
	let _ = ctx.rotate(angle);
	let _ = ctx.fill_text(label, 0.0, -3.0);
	ctx.restore();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, radius) = (
		state.hover.node.is_some() || state.hover.highlight_t > 0.0,
		ease_out_cubic(state.hover.highlight_t),
		state.settings.node_radius,
	);
	ctx.set_font(NODE_FONT);
	ctx.set_text_align("center");
	let measure = |s: &str| ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let highlighted = state.is_highlighted(idx);
		let alpha = if has_highlight && !highlighted {
			1.0 - 0.6 * t
		} else {
			1.0
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();

		if state.is_hovered(idx) || node.data.is_anchor {
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		let label = geometry::fit_label(&info.label, 2.0 * radius - 10.0, &measure);
		let _ = ctx.fill_text(&label, x, y + 4.0);
		ctx.set_global_alpha(1.0);
	});
}

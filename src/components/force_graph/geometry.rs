//! Edge and label geometry, in graph coordinates.

use std::f64::consts::{FRAC_PI_4, PI};

pub type Point = (f64, f64);

/// Straight edge trimmed so it starts at the source circle and stops
/// `end_gap` short of the target centre. `None` when the nodes overlap.
pub fn trimmed_edge(from: Point, to: Point, start_gap: f64, end_gap: f64) -> Option<(Point, Point)> {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist <= start_gap + end_gap {
		return None;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	Some((
		(from.0 + ux * start_gap, from.1 + uy * start_gap),
		(to.0 - ux * end_gap, to.1 - uy * end_gap),
	))
}

/// Rotation for a label laid along `from -> to`, turned half a circle when
/// the edge runs right to left so text stays upright.
pub fn label_angle(from: Point, to: Point) -> f64 {
	let angle = (to.1 - from.1).atan2(to.0 - from.0);
	if to.0 < from.0 { angle + PI } else { angle }
}

pub fn midpoint(from: Point, to: Point) -> Point {
	((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0)
}

/// Cubic curve of a self-referencing edge, looping out of the node's
/// upper-left side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfLoop {
	pub start: Point,
	pub control1: Point,
	pub control2: Point,
	pub end: Point,
	pub apex: Point,
}

pub fn self_loop(center: Point, radius: f64, size: f64) -> SelfLoop {
	let dir = -3.0 * FRAC_PI_4;
	let spread = 0.45;
	let on_circle = |angle: f64, dist: f64| (center.0 + dist * angle.cos(), center.1 + dist * angle.sin());
	SelfLoop {
		start: on_circle(dir - spread, radius),
		control1: on_circle(dir - 2.0 * spread, radius + size * 1.6),
		control2: on_circle(dir + 2.0 * spread, radius + size * 1.6),
		end: on_circle(dir + spread, radius),
		apex: on_circle(dir, radius + size * 1.2),
	}
}

/// Shortens `label` with a trailing `...` until `measure` says it fits.
pub fn fit_label(label: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> String {
	if measure(label) <= max_width {
		return label.to_string();
	}
	let mut chars: Vec<char> = label.chars().collect();
	while !chars.is_empty() {
		chars.pop();
		let candidate = format!("{}...", chars.iter().collect::<String>());
		if measure(&candidate) <= max_width {
			return candidate;
		}
	}
	"...".to_string()
}

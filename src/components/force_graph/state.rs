use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::colors::group_color;
use super::forces;
use super::types::GraphData;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
const WARMUP_DT: f32 = 0.016;

/// Tuning of the layout. The explorer and the schema dialog use different
/// spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSettings {
	pub node_radius: f64,
	pub collide_radius: f32,
	pub charge: f32,
	pub spring: f32,
	/// Simulation steps run before the first paint.
	pub warmup_ticks: usize,
}

impl Default for ForceSettings {
	fn default() -> Self {
		Self {
			node_radius: 24.0,
			collide_radius: 30.0,
			charge: 150.0,
			spring: 0.05,
			warmup_ticks: 100,
		}
	}
}

impl ForceSettings {
	/// Wider spacing for the small schema graph.
	pub fn schema() -> Self {
		Self {
			collide_radius: 36.0,
			charge: 300.0,
			warmup_ticks: 50,
			..Self::default()
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: &'static str,
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub label: String,
}

impl EdgeInfo {
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub settings: ForceSettings,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState {
	/// Builds the simulation around the origin and relaxes it for
	/// `settings.warmup_ticks` steps.
	pub fn new(data: &GraphData, width: f64, height: f64, settings: ForceSettings) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: settings.charge,
			force_spring: settings.spring,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut edges = Vec::new();

		let n = data.nodes.len().max(1) as f64;
		let spread = (settings.collide_radius as f64 * n / PI).max(100.0);
		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.contains_key(&node.id) {
				continue;
			}
			let angle = (i as f64) * 2.0 * PI / n;
			let idx = graph.add_node(NodeData {
				x: (spread * angle.cos()) as f32,
				y: (spread * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: group_color(node.group.as_deref()),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				continue;
			};
			// The spring solver cannot handle an edge onto itself.
			if src != tgt {
				graph.add_edge(src, tgt, EdgeData::default());
			}
			edges.push(EdgeInfo {
				source: src,
				target: tgt,
				label: link.label.clone(),
			});
		}

		let mut state = Self {
			graph,
			edges,
			settings,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
		};
		for _ in 0..settings.warmup_ticks {
			state.step(WARMUP_DT);
		}
		state
	}

	pub fn node_count(&self) -> usize {
		let mut count = 0;
		self.graph.visit_nodes(|_| count += 1);
		count
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let radius = self.settings.node_radius;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// Hit radius is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut pos = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pos = Some((node.x(), node.y()));
			}
		});
		pos
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for edge in &self.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	/// Pins the node under the cursor. Returns false when there is none.
	pub fn begin_drag(&mut self, sx: f64, sy: f64) -> bool {
		let Some(idx) = self.node_at_position(sx, sy) else {
			return false;
		};
		let Some((nx, ny)) = self.node_position(idx) else {
			return false;
		};
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: nx,
			node_start_y: ny,
		};
		self.set_anchor(idx, true);
		true
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
			}
		});
	}

	/// Releases the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.set_anchor(idx, false);
		}
		self.drag.active = false;
		self.pan.active = false;
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Zooms around the cursor so the point under it stays put.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	fn set_anchor(&mut self, idx: DefaultNodeIdx, anchored: bool) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = anchored;
			}
		});
	}

	/// One physics step: charge and springs, then collision and centering.
	fn step(&mut self, dt: f32) {
		self.graph.update(dt);

		let mut indices = Vec::new();
		let mut positions = Vec::new();
		let mut pinned = Vec::new();
		self.graph.visit_nodes(|node| {
			indices.push(node.index());
			positions.push((node.x(), node.y()));
			pinned.push(node.data.is_anchor);
		});
		forces::collide(&mut positions, &pinned, self.settings.collide_radius);
		forces::center(&mut positions, &pinned, 0.0, 0.0);

		let updated: HashMap<_, _> = indices.into_iter().zip(positions).collect();
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&(x, y)) = updated.get(&node.index()) {
				node.data.x = x;
				node.data.y = y;
			}
		});
	}

	pub fn tick(&mut self, dt: f32) {
		self.step(dt);

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 1.8 * dt as f64;
		if self.hover.highlight_t < 0.01 && self.hover.node.is_none() {
			self.hover.highlight_t = 0.0;
		}
	}

	/// Keeps the graph centred in the new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn node(id: &str, group: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.into(),
			group: Some(group.into()),
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			id: format!("{}-{}", source, target),
			source: source.into(),
			target: target.into(),
			label: "rel".into(),
		}
	}

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![node("a", "host"), node("b", "ip"), node("c", "host")],
			links: vec![link("a", "b"), link("b", "c"), link("c", "c"), link("a", "zz")],
		}
	}

	fn settings() -> ForceSettings {
		ForceSettings {
			warmup_ticks: 10,
			..ForceSettings::default()
		}
	}

	#[test]
	fn test_build_skips_dangling_links() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0, settings());
		assert_eq!(state.node_count(), 3);
		assert_eq!(state.edges.len(), 3);
		assert_eq!(state.edges.iter().filter(|e| e.is_self_loop()).count(), 1);
	}

	#[test]
	fn test_same_group_same_color() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0, settings());
		let mut colors = HashMap::new();
		state.graph.visit_nodes(|n| {
			colors.insert(n.data.user_data.id.clone(), n.data.user_data.color);
		});
		assert_eq!(colors["a"], colors["c"]);
		assert_ne!(colors["a"], colors["b"]);

		// A second render of other data keeps the colors.
		let other = GraphData {
			nodes: vec![node("x", "ip")],
			links: vec![],
		};
		let again = ForceGraphState::new(&other, 800.0, 600.0, settings());
		again.graph.visit_nodes(|n| assert_eq!(n.data.user_data.color, colors["b"]));
	}

	#[test]
	fn test_layout_stays_finite_and_separated() {
		let state = ForceGraphState::new(&sample(), 800.0, 600.0, ForceSettings::default());
		let positions: Vec<_> = state.positions().into_values().collect();
		for &(x, y) in &positions {
			assert!(x.is_finite() && y.is_finite());
		}
		for i in 0..positions.len() {
			for j in (i + 1)..positions.len() {
				let (dx, dy) = (positions[i].0 - positions[j].0, positions[i].1 - positions[j].1);
				assert!((dx * dx + dy * dy).sqrt() > 1.0);
			}
		}
	}

	#[test]
	fn test_drag_pins_then_releases() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0, settings());
		let idx = state.positions().into_keys().next().unwrap();
		let (x, y) = state.node_position(idx).unwrap();
		let (sx, sy) = (x as f64 + state.transform.x, y as f64 + state.transform.y);

		assert!(state.begin_drag(sx, sy));
		let dragged = state.drag.node_idx.unwrap();
		state.drag_to(sx + 40.0, sy);
		let (nx, _) = state.node_position(dragged).unwrap();
		let (start_x, _) = (state.drag.node_start_x, state.drag.node_start_y);
		assert!((nx - start_x - 40.0).abs() < 1e-3);

		// Pinned nodes do not move with the simulation.
		state.tick(0.016);
		assert_eq!(state.node_position(dragged).unwrap().0, nx);

		state.end_drag();
		let mut anchored = false;
		state.graph.visit_nodes(|n| anchored |= n.data.is_anchor);
		assert!(!anchored);
		assert!(!state.drag.active);
	}

	#[test]
	fn test_no_drag_on_background() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0, settings());
		assert!(!state.begin_drag(-10_000.0, -10_000.0));
	}

	#[test]
	fn test_zoom_is_clamped() {
		let mut state = ForceGraphState::new(&GraphData::default(), 800.0, 600.0, settings());
		for _ in 0..50 {
			state.zoom_at(400.0, 300.0, -1.0);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);
		for _ in 0..50 {
			state.zoom_at(400.0, 300.0, 1.0);
		}
		assert_eq!(state.transform.k, MIN_ZOOM);
	}

	#[test]
	fn test_zoom_keeps_cursor_point() {
		let mut state = ForceGraphState::new(&GraphData::default(), 800.0, 600.0, settings());
		let before = state.screen_to_graph(100.0, 50.0);
		state.zoom_at(100.0, 50.0, -1.0);
		let after = state.screen_to_graph(100.0, 50.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn test_hover_neighbors() {
		let mut state = ForceGraphState::new(&sample(), 800.0, 600.0, settings());
		let mut by_id = HashMap::new();
		state.graph.visit_nodes(|n| {
			by_id.insert(n.data.user_data.id.clone(), n.index());
		});
		state.set_hover(Some(by_id["b"]));
		assert!(state.is_highlighted(by_id["a"]));
		assert!(state.is_highlighted(by_id["c"]));
		assert!(state.is_hovered(by_id["b"]));
		assert_eq!(state.node_id(by_id["b"]).as_deref(), Some("b"));
	}
}

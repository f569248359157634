/// A node handed to the force graph. `group` drives the color.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	pub group: Option<String>,
}

/// A directed edge between two node ids. `source == target` is a self-loop.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphLink {
	pub id: String,
	pub source: String,
	pub target: String,
	pub label: String,
}

impl GraphLink {
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

use std::cell::RefCell;
use std::collections::HashMap;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const UNGROUPED_COLOR: &str = "#9e9e9e";

/// Hands out palette colors to groups in order of first encounter.
#[derive(Clone, Debug, Default)]
pub struct ColorRegistry {
	assigned: HashMap<String, &'static str>,
}

impl ColorRegistry {
	pub fn color_for(&mut self, group: Option<&str>) -> &'static str {
		let Some(group) = group else {
			return UNGROUPED_COLOR;
		};
		if let Some(color) = self.assigned.get(group) {
			return *color;
		}
		let color = COLORS[self.assigned.len() % COLORS.len()];
		self.assigned.insert(group.to_string(), color);
		color
	}
}

thread_local! {
	static REGISTRY: RefCell<ColorRegistry> = RefCell::new(ColorRegistry::default());
}

/// Page-wide color of a group, stable across renders and graphs.
pub fn group_color(group: Option<&str>) -> &'static str {
	REGISTRY.with(|r| r.borrow_mut().color_for(group))
}

mod colors;
mod component;
mod forces;
mod geometry;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use state::ForceSettings;
pub use types::{GraphData, GraphLink, GraphNode};

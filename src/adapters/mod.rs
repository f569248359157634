//! Pure reshaping of API results into view models.

mod result_graph;
mod schema_graph;
mod table;

pub use result_graph::{find_asset, result_to_graph};
pub use schema_graph::schema_to_graph;
pub use table::{ResultsTable, TableCell, result_to_table};

pub mod database_dialog;
pub mod force_graph;
pub mod graph_explorer;
pub mod notification;
pub mod query_field;
pub mod results_table;
pub mod schema_dialog;
pub mod search_box;

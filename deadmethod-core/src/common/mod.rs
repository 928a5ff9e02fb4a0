//! Common utilities shared across the loader, resolver and scanner.

mod graph_trait;
mod line_index;
mod paths;
mod visibility;

pub use graph_trait::GraphTraversal;
pub use line_index::LineIndex;
pub use paths::{normalize_path_string, path_to_normalized_string};
pub use visibility::Visibility;

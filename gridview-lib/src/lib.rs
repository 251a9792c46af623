//! Generic tabular data presentation engine
//!
//! Turns an array of arbitrarily-shaped, possibly-nested records into a
//! sorted, filtered, paginated, optionally hierarchical view. Rendering,
//! export and transport are collaborator concerns; the engine only ever
//! receives a finished row array and hands back the visible page.

pub mod error;
pub mod flatten;
pub mod model;
pub mod view;

pub use model::Row;
pub use model::Value;
pub use view::TableView;

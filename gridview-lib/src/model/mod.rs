//! Row and value model

mod row;
mod row_serde;
mod value;

pub use row::Row;
pub use row_serde::json_to_value;
pub use value::Value;

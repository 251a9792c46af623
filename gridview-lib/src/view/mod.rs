//! View engine: columns, sorting, filtering, pagination and row state.

pub mod columns;
pub mod filter;
pub mod page;
pub mod report;
pub mod sort;
pub mod state;
pub mod table;

pub use columns::ColumnDescriptor;
pub use columns::derive_columns;
pub use filter::FilterState;
pub use filter::StructuredFilter;
pub use page::PageState;
pub use page::PageView;
pub use page::paginate;
pub use report::ReportFields;
pub use sort::Direction;
pub use sort::SortState;
pub use state::ExpansionState;
pub use state::RowKey;
pub use state::SelectionState;
pub use table::Callbacks;
pub use table::Phase;
pub use table::TableView;

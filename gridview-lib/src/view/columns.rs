//! Column descriptors and automatic column derivation.

use std::fmt;
use std::sync::Arc;

use crate::flatten::flatten;
use crate::model::Row;
use crate::model::Value;

/// Custom cell renderer: overrides the leaf lookup for display purposes only.
pub type CellRender = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Dedicated value extractor consulted by sorting and filtering instead of
/// the raw leaf, when the display renderer is not representative.
pub type ValueExtract = Arc<dyn Fn(&Row) -> Value + Send + Sync>;

/// A declarative column descriptor.
///
/// Columns are the explicit schema layer bridging untyped rows to typed
/// display. `field_path` may address a nested leaf (`"address.city"`).
/// When `render` is present it fully overrides the leaf lookup for display,
/// but sorting and filtering still operate on raw leaf values unless
/// `sort_value` is supplied.
///
/// # Example
///
/// ```
/// use gridview_lib::view::ColumnDescriptor;
///
/// let col = ColumnDescriptor::new("address.city");
/// assert_eq!(col.header, "Address City");
/// assert!(col.sortable);
/// ```
#[derive(Clone)]
pub struct ColumnDescriptor {
    /// Dot-separated path to the leaf this column presents.
    pub field_path: String,
    /// Header text.
    pub header: String,
    /// Whether header clicks may sort on this column.
    pub sortable: bool,
    /// Hidden columns are not rendered but remain searchable.
    pub hidden: bool,
    /// Frozen (pinned) rendering hint.
    pub frozen: bool,
    /// Width rendering hint, passed through to the collaborator.
    pub width: Option<String>,
    /// Custom display renderer.
    pub render: Option<CellRender>,
    /// Dedicated sort/filter value extractor.
    pub sort_value: Option<ValueExtract>,
}

impl ColumnDescriptor {
    /// Creates a sortable, visible column with a header derived from the path.
    pub fn new(field_path: impl Into<String>) -> Self {
        let field_path = field_path.into();
        let header = header_from_path(&field_path);
        Self {
            field_path,
            header,
            sortable: true,
            hidden: false,
            frozen: false,
            width: None,
            render: None,
            sort_value: None,
        }
    }

    /// Overrides the derived header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Marks the column as not sortable.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Hides the column (it remains searchable).
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Freezes (pins) the column.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Sets the width hint.
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    /// Sets a custom display renderer.
    pub fn with_render(mut self, render: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Sets a dedicated sort/filter value extractor.
    pub fn with_sort_value(
        mut self,
        extract: impl Fn(&Row) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.sort_value = Some(Arc::new(extract));
        self
    }

    /// Returns the display text for this column on the given row.
    pub fn display_value(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row
                .get_path(&self.field_path)
                .map(Value::display_string)
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("field_path", &self.field_path)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("hidden", &self.hidden)
            .field("frozen", &self.frozen)
            .field("width", &self.width)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("sort_value", &self.sort_value.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Derives a column set from the first row of a data set.
///
/// One descriptor per distinct flattened key of the first row, in
/// deterministic (path-sorted) order. An empty data set derives an empty
/// column set; callers render their "no records" state without any
/// divide-by-zero on column widths.
pub fn derive_columns(rows: &[Row]) -> Vec<ColumnDescriptor> {
    match rows.first() {
        Some(first) => flatten(first).into_keys().map(ColumnDescriptor::new).collect(),
        None => Vec::new(),
    }
}

/// `"address.city"` becomes `"Address City"`.
fn header_from_path(path: &str) -> String {
    path.split('.')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

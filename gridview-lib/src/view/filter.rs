//! Filter engine: global substring search plus structured predicates.

use std::collections::BTreeSet;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use super::columns::ColumnDescriptor;
use super::report::ReportFields;
use crate::flatten::flatten;
use crate::model::Row;
use crate::model::Value;

/// Returns `true` if any flattened leaf of the row contains the term.
///
/// The term is trimmed and lowercased; an empty term matches everything.
/// Every leaf is searched, including ones behind hidden columns: the grids
/// search everything, not just what is shown. Child-row collections are
/// excluded at the flattening layer.
pub fn matches_global(row: &Row, term: &str) -> bool {
    matches_global_with(row, term, None)
}

/// Column-aware variant of [`matches_global`].
///
/// Columns carrying a dedicated value extractor contribute the extracted
/// value's display string to the match as well: a column presenting a raw
/// status code as "open"/"closed" is searchable by either form.
pub fn matches_global_with(row: &Row, term: &str, columns: Option<&[ColumnDescriptor]>) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    if flatten(row)
        .values()
        .any(|v| v.display_string().to_lowercase().contains(&term))
    {
        return true;
    }
    columns
        .unwrap_or_default()
        .iter()
        .filter_map(|col| col.sort_value.as_ref())
        .any(|extract| extract(row).display_string().to_lowercase().contains(&term))
}

/// The structured predicates of the reporting variant.
///
/// A closed, inclusive date range and a category membership set, resolved
/// against per-entity field names ([`ReportFields`]). Both predicates are
/// optional and independently resettable. An empty category set means "no
/// filter", not "no rows pass": an unset multi-select must not hide all data.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use gridview_lib::model::Row;
/// use gridview_lib::view::{ReportFields, StructuredFilter};
///
/// let filter = StructuredFilter::new(ReportFields::for_page("purchase").unwrap())
///     .with_date_range(
///         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
///     );
///
/// let row = Row::new().set("invoiceDate", "2024-01-15").set("supplierId", 7);
/// assert!(filter.matches(&row));
/// ```
#[derive(Debug, Clone)]
pub struct StructuredFilter {
    fields: ReportFields,
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    categories: BTreeSet<String>,
}

impl StructuredFilter {
    /// Creates an empty structured filter for the given field mapping.
    pub fn new(fields: ReportFields) -> Self {
        Self {
            fields,
            date_from: None,
            date_to: None,
            categories: BTreeSet::new(),
        }
    }

    /// Sets the inclusive date range.
    ///
    /// The upper bound is normalized to end-of-day so that rows dated any
    /// time on `to` are included.
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = from.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        self.date_to = to.and_hms_milli_opt(23, 59, 59, 999).map(|dt| dt.and_utc());
        self
    }

    /// Adds accepted category values (compared on canonical display form).
    pub fn with_categories<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.categories
            .extend(values.into_iter().map(|v| v.into().display_string()));
        self
    }

    /// Clears the date range, leaving the category set intact.
    pub fn clear_date_range(&mut self) {
        self.date_from = None;
        self.date_to = None;
    }

    /// Clears the category set, leaving the date range intact.
    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    /// Returns `true` if neither predicate is active.
    pub fn is_empty(&self) -> bool {
        self.date_from.is_none() && self.date_to.is_none() && self.categories.is_empty()
    }

    /// Returns `true` if the row passes every active predicate.
    pub fn matches(&self, row: &Row) -> bool {
        self.matches_date(row) && self.matches_category(row)
    }

    fn matches_date(&self, row: &Row) -> bool {
        let (Some(from), Some(to)) = (self.date_from, self.date_to) else {
            return true;
        };
        // Rows whose date field is absent or unparseable are excluded.
        match row.get_path(&self.fields.date_field).and_then(resolve_date) {
            Some(date) => from <= date && date <= to,
            None => false,
        }
    }

    fn matches_category(&self, row: &Row) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        match row.get_path(&self.fields.category_field) {
            Some(value) if !value.is_null() => self.categories.contains(&value.display_string()),
            _ => false,
        }
    }
}

/// Resolves a leaf value to a timestamp.
///
/// DateTime leaves pass through; string leaves parse as RFC 3339 or plain
/// `YYYY-MM-DD` (taken as start of day). Anything else is not a date.
fn resolve_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::String(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        }
        _ => None,
    }
}

/// The whole filter state of one view: global term plus structured predicates.
///
/// Filters compose by conjunction and are applied against the original
/// unfiltered row array on every recomputation; re-deriving from the source
/// is what makes narrowing reversible.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    term: String,
    structured: Option<StructuredFilter>,
}

impl FilterState {
    /// Returns the current global search term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Sets the global search term.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Clears the global search term only.
    pub fn clear_term(&mut self) {
        self.term.clear();
    }

    /// Returns the structured filter, if one is applied.
    pub fn structured(&self) -> Option<&StructuredFilter> {
        self.structured.as_ref()
    }

    /// Applies a structured filter.
    pub fn set_structured(&mut self, structured: StructuredFilter) {
        self.structured = Some(structured);
    }

    /// Removes the structured filter only; the global term is untouched.
    pub fn clear_structured(&mut self) {
        self.structured = None;
    }

    /// Returns `true` if the row passes all active predicates.
    pub fn matches(&self, row: &Row) -> bool {
        self.matches_with(row, None)
    }

    /// Column-aware variant of [`matches`](FilterState::matches): the global
    /// term also searches the extracted values of columns carrying a
    /// dedicated value extractor.
    pub fn matches_with(&self, row: &Row, columns: Option<&[ColumnDescriptor]>) -> bool {
        if !matches_global_with(row, &self.term, columns) {
            return false;
        }
        match &self.structured {
            Some(structured) => structured.matches(row),
            None => true,
        }
    }
}

//! The per-screen table view engine.
//!
//! One `TableView` backs one list screen. The calling screen owns the data
//! lifecycle (fetch, error messaging) and hands the engine a finished row
//! array; the engine owns sort/filter/pagination/expansion state and derives
//! every view from the latest rows on demand. Consistency is obtained by
//! recomputation, never by patching cached intermediates.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;
use log::trace;

use super::columns::ColumnDescriptor;
use super::columns::derive_columns;
use super::filter::FilterState;
use super::filter::StructuredFilter;
use super::page::PageState;
use super::page::PageView;
use super::page::paginate;
use super::sort::SortState;
use super::sort::compare_resolved;
use super::state::ExpansionState;
use super::state::RowKey;
use super::state::SelectionState;
use crate::model::Row;
use crate::model::Value;

/// View lifecycle.
///
/// `Loading` is entered on every wholesale data replacement; the previous
/// `Ready` snapshot keeps rendering by default to avoid layout flicker,
/// unless the caller explicitly clears it. There is no error phase: fetch
/// failures never reach the engine, it only ever receives a (possibly
/// empty) row array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No data has ever been supplied.
    Idle,
    /// A replacement is in flight; the previous snapshot still renders.
    Loading,
    /// The view reflects the current data and state.
    Ready,
    /// A filter change is pending its next page computation.
    Filtering,
    /// A sort change is pending its next page computation.
    Sorting,
    /// A page change is pending its next page computation.
    Paginating,
}

/// Row-level action callback.
pub type RowCallback = Arc<dyn Fn(&Row) + Send + Sync>;
/// Bulk action callback.
pub type RowsCallback = Arc<dyn Fn(&[Row]) + Send + Sync>;
/// Parameterless action callback.
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// Caller-injected row action handlers.
///
/// The engine never reaches into ambient globals; every side effect it can
/// trigger is a callback handed in here.
#[derive(Clone, Default)]
pub struct Callbacks {
    /// Edit clicked on a row.
    pub on_edit: Option<RowCallback>,
    /// Delete confirmed for a set of rows.
    pub on_delete: Option<RowsCallback>,
    /// Add-new requested.
    pub on_add: Option<ActionCallback>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_edit", &self.on_edit.as_ref().map(|_| "<fn>"))
            .field("on_delete", &self.on_delete.as_ref().map(|_| "<fn>"))
            .field("on_add", &self.on_add.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// A sorted, filtered, paginated, optionally hierarchical view over an
/// arbitrarily-shaped row array.
///
/// # Example
///
/// ```
/// use gridview_lib::model::Row;
/// use gridview_lib::view::TableView;
///
/// let mut view = TableView::new("id").with_page_size(10);
/// view.replace_rows(vec![
///     Row::new().set("id", 1).set("name", "Zed"),
///     Row::new().set("id", 2).set("name", "Amy"),
/// ]);
/// view.sort_by("name");
///
/// let (page, _) = view.current_page();
/// assert_eq!(page[0].get_string("name").unwrap(), Some("Amy"));
/// ```
#[derive(Debug)]
pub struct TableView {
    /// The authoritative row array, replaced wholesale on reload.
    rows: Vec<Row>,
    /// Explicit columns; derived from the first row when absent.
    columns: Option<Vec<ColumnDescriptor>>,
    id_field: String,
    child_field: Option<String>,
    sort: SortState,
    filter: FilterState,
    page: PageState,
    expansion: ExpansionState,
    selection: SelectionState,
    phase: Phase,
    callbacks: Callbacks,
}

impl TableView {
    /// Creates an empty view keyed by the given identity field.
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            columns: None,
            id_field: id_field.into(),
            child_field: None,
            sort: SortState::default(),
            filter: FilterState::default(),
            page: PageState::default(),
            expansion: ExpansionState::default(),
            selection: SelectionState::default(),
            phase: Phase::Idle,
            callbacks: Callbacks::default(),
        }
    }

    /// Supplies an explicit column set instead of deriving one.
    pub fn with_columns(mut self, columns: Vec<ColumnDescriptor>) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Designates the field whose row collection renders as child tables.
    pub fn with_child_field(mut self, field: impl Into<String>) -> Self {
        self.child_field = Some(field.into());
        self
    }

    /// Installs row action handlers.
    pub fn with_callbacks(mut self, callbacks: Callbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page = PageState::new(size);
        self
    }

    // =========================================================================
    // Data lifecycle
    // =========================================================================

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Marks a reload as in flight; the previous snapshot keeps rendering.
    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Explicitly drops the previous snapshot while loading.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.reclamp();
    }

    /// Installs a wholesale replacement of the row array.
    ///
    /// Sort, filter, pagination and expansion state survive the replacement
    /// by identity, not by array position: expansion/selection entries whose
    /// identity disappeared are pruned, the sort is dropped only if its field
    /// no longer exists in the column set, and the page index is re-clamped
    /// against the new filtered count.
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        debug!(
            "replacing data set: {} -> {} rows",
            self.rows.len(),
            rows.len()
        );
        self.rows = rows;

        let known: HashSet<RowKey> = self
            .rows
            .iter()
            .filter_map(|row| RowKey::of(row, &self.id_field))
            .collect();
        self.expansion.retain_known(&known);
        self.selection.retain_known(&known);

        let sort_field_gone = match self.sort.key() {
            Some((field, _)) => !self.column_paths().iter().any(|path| path == field),
            None => false,
        };
        if sort_field_gone {
            self.sort.clear();
        }

        self.reclamp();
        self.phase = Phase::Ready;
    }

    /// Returns the authoritative row array.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Returns the effective column set: the explicit one, or a set derived
    /// from the first row of the data.
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        match &self.columns {
            Some(columns) => columns.clone(),
            None => derive_columns(&self.rows),
        }
    }

    fn column_paths(&self) -> Vec<String> {
        self.columns()
            .into_iter()
            .map(|col| col.field_path)
            .collect()
    }

    fn is_sortable(&self, field: &str) -> bool {
        match &self.columns {
            // Explicit columns gate sorting per descriptor.
            Some(columns) => columns
                .iter()
                .any(|col| col.field_path == field && col.sortable),
            // Derived columns are all sortable.
            None => true,
        }
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    /// Header click: cycles the sort on a column through ascending,
    /// descending, unsorted. Ignored for columns marked not sortable.
    pub fn sort_by(&mut self, field: &str) {
        if !self.is_sortable(field) {
            return;
        }
        self.sort.cycle(field);
        trace!("sort state now {:?}", self.sort);
        self.interact(Phase::Sorting);
    }

    /// Sets the global search term and re-clamps the page.
    pub fn set_global_filter(&mut self, term: impl Into<String>) {
        self.filter.set_term(term);
        self.reclamp();
        self.interact(Phase::Filtering);
    }

    /// Applies a structured filter and re-clamps the page.
    ///
    /// Structured predicates apply against the original unfiltered data on
    /// every recomputation, so re-applying a wider filter brings rows back.
    pub fn set_structured_filter(&mut self, structured: StructuredFilter) {
        self.filter.set_structured(structured);
        self.reclamp();
        self.interact(Phase::Filtering);
    }

    /// Removes the structured filter; the global term stays active.
    pub fn clear_structured_filter(&mut self) {
        self.filter.clear_structured();
        self.reclamp();
        self.interact(Phase::Filtering);
    }

    /// Clears both the global term and the structured filter.
    pub fn clear_filters(&mut self) {
        self.filter.clear_term();
        self.filter.clear_structured();
        self.reclamp();
        self.interact(Phase::Filtering);
    }

    /// Requests a page; the index is clamped on the next computation.
    pub fn set_page(&mut self, index: usize) {
        self.page.set_index(index);
        self.reclamp();
        self.interact(Phase::Paginating);
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.page.set_size(size);
        self.interact(Phase::Paginating);
    }

    /// Returns the current sort state.
    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Returns the current filter state.
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Returns the current pagination state.
    pub fn page(&self) -> &PageState {
        &self.page
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// The filtered, sorted, unpaginated row set.
    ///
    /// This is the basis for aggregates: totals reflect what is being looked
    /// at, not just what is on screen.
    pub fn visible_rows(&self) -> Vec<&Row> {
        compute_visible(&self.rows, &self.filter, &self.sort, self.columns.as_deref())
    }

    /// Number of rows passing the active filters.
    pub fn filtered_count(&self) -> usize {
        let columns = self.columns.as_deref();
        self.rows
            .iter()
            .filter(|row| self.filter.matches_with(row, columns))
            .count()
    }

    /// The current visible page, with the clamp adopted as the new
    /// authoritative page index.
    pub fn current_page(&mut self) -> (Vec<&Row>, PageView) {
        let visible = compute_visible(&self.rows, &self.filter, &self.sort, self.columns.as_deref());
        let view = paginate(visible.len(), self.page.index(), self.page.size());
        self.page.set_index(view.clamped_index);
        if matches!(
            self.phase,
            Phase::Filtering | Phase::Sorting | Phase::Paginating
        ) {
            self.phase = Phase::Ready;
        }
        (view.slice(&visible).to_vec(), view)
    }

    /// Sums a numeric field over the filtered, unpaginated row set.
    ///
    /// Missing and non-numeric leaves contribute nothing.
    pub fn sum(&self, field_path: &str) -> f64 {
        self.visible_rows()
            .iter()
            .filter_map(|row| row.get_path(field_path))
            .filter_map(Value::as_f64)
            .sum()
    }

    // =========================================================================
    // Expansion and selection (master-detail, bulk actions)
    // =========================================================================

    /// Flips the expansion of one row.
    pub fn toggle_expanded(&mut self, row: &Row) {
        if let Some(key) = RowKey::of(row, &self.id_field) {
            self.expansion.toggle(key);
        }
    }

    /// Returns `true` if the row is expanded.
    pub fn is_expanded(&self, row: &Row) -> bool {
        RowKey::of(row, &self.id_field)
            .map(|key| self.expansion.is_expanded(&key))
            .unwrap_or(false)
    }

    /// Expands every row in the currently visible (filtered) set.
    ///
    /// Rows hidden by an active filter keep their prior expansion state.
    pub fn expand_all(&mut self) {
        let visible: Vec<RowKey> = self
            .visible_rows()
            .into_iter()
            .filter_map(|row| RowKey::of(row, &self.id_field))
            .collect();
        self.expansion.expand_all(visible);
    }

    /// Collapses every row.
    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// Returns the child rows of a parent, or an empty set when no child
    /// field is configured or the field is absent/not a collection.
    pub fn child_rows<'a>(&self, row: &'a Row) -> &'a [Row] {
        match &self.child_field {
            Some(field) => row.child_rows(field),
            None => &[],
        }
    }

    /// Flips the selection of one row.
    pub fn toggle_selected(&mut self, row: &Row) {
        if let Some(key) = RowKey::of(row, &self.id_field) {
            self.selection.toggle(key);
        }
    }

    /// Sets the selection of one row explicitly.
    pub fn set_selected(&mut self, row: &Row, selected: bool) {
        if let Some(key) = RowKey::of(row, &self.id_field) {
            self.selection.set(key, selected);
        }
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, row: &Row) -> bool {
        RowKey::of(row, &self.id_field)
            .map(|key| self.selection.is_selected(&key))
            .unwrap_or(false)
    }

    /// Returns the selected rows, in data order.
    pub fn selected_rows(&self) -> Vec<&Row> {
        self.rows
            .iter()
            .filter(|row| self.is_selected(row))
            .collect()
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // Row action events
    // =========================================================================

    /// Emits an edit event for one row.
    pub fn request_edit(&self, row: &Row) {
        if let Some(on_edit) = &self.callbacks.on_edit {
            on_edit(row);
        }
    }

    /// Emits a delete event carrying the currently selected rows.
    ///
    /// The engine does not mutate data; the calling screen performs the
    /// delete and hands back a fresh row array.
    pub fn confirm_delete(&self) {
        if let Some(on_delete) = &self.callbacks.on_delete {
            let rows: Vec<Row> = self.selected_rows().into_iter().cloned().collect();
            on_delete(&rows);
        }
    }

    /// Emits an add-new event.
    pub fn request_add(&self) {
        if let Some(on_add) = &self.callbacks.on_add {
            on_add();
        }
    }

    // =========================================================================

    /// Ready views pass through the transitional interaction phases; a view
    /// that has no data yet (or is mid-reload) stays where it is.
    fn interact(&mut self, phase: Phase) {
        if !matches!(self.phase, Phase::Idle | Phase::Loading) {
            self.phase = phase;
        }
    }

    fn reclamp(&mut self) {
        let len = self.filtered_count();
        let view = paginate(len, self.page.index(), self.page.size());
        self.page.set_index(view.clamped_index);
    }
}

/// Filters and stably sorts the row array.
///
/// Free function over disjoint pieces of view state so the page index can be
/// re-clamped while the returned references are alive.
fn compute_visible<'a>(
    rows: &'a [Row],
    filter: &FilterState,
    sort: &SortState,
    columns: Option<&[ColumnDescriptor]>,
) -> Vec<&'a Row> {
    let mut visible: Vec<&Row> = rows
        .iter()
        .filter(|row| filter.matches_with(row, columns))
        .collect();
    if let Some((field, direction)) = sort.key() {
        let extract = columns.and_then(|cols| {
            cols.iter()
                .find(|col| col.field_path == field)
                .and_then(|col| col.sort_value.clone())
        });
        match extract {
            Some(extract) => visible.sort_by(|a, b| {
                let va = extract(a);
                let vb = extract(b);
                compare_resolved(Some(&va), Some(&vb), direction)
            }),
            None => visible.sort_by(|a, b| {
                compare_resolved(a.get_path(field), b.get_path(field), direction)
            }),
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::view::report::ReportFields;

    fn sample_rows() -> Vec<Row> {
        vec![
            Row::new().set("id", 1).set("name", "Zed").set("amt", 50),
            Row::new().set("id", 2).set("name", "amy").set("amt", Value::Null),
            Row::new().set("id", 3).set("name", "Amy").set("amt", 10),
        ]
    }

    fn page_ids(view: &mut TableView) -> Vec<i64> {
        let (page, _) = view.current_page();
        page.iter()
            .map(|r| r.get_long("id").unwrap().unwrap())
            .collect()
    }

    #[test]
    fn test_lifecycle_phases() {
        let mut view = TableView::new("id");
        assert_eq!(view.phase(), Phase::Idle);

        view.begin_loading();
        assert_eq!(view.phase(), Phase::Loading);

        view.replace_rows(sample_rows());
        assert_eq!(view.phase(), Phase::Ready);
    }

    #[test]
    fn test_interaction_phases_return_to_ready() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        view.sort_by("name");
        assert_eq!(view.phase(), Phase::Sorting);
        view.current_page();
        assert_eq!(view.phase(), Phase::Ready);

        view.set_global_filter("amy");
        assert_eq!(view.phase(), Phase::Filtering);
        view.set_page(1);
        assert_eq!(view.phase(), Phase::Paginating);
        view.current_page();
        assert_eq!(view.phase(), Phase::Ready);
    }

    #[test]
    fn test_loading_keeps_previous_snapshot_until_cleared() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        view.begin_loading();
        assert_eq!(view.rows().len(), 3);

        view.clear();
        assert!(view.rows().is_empty());
        assert_eq!(page_ids(&mut view), Vec::<i64>::new());
    }

    #[test]
    fn test_sort_name_ascending_example() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());
        view.sort_by("name");

        // Case-insensitive tie between "amy"(2) and "Amy"(3) preserves
        // insertion order.
        assert_eq!(page_ids(&mut view), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_amt_ascending_nulls_last() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());
        view.sort_by("amt");

        assert_eq!(page_ids(&mut view), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_cycle_back_to_insertion_order() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());
        view.sort_by("name");
        view.sort_by("name");
        view.sort_by("name");

        assert_eq!(page_ids(&mut view), vec![1, 2, 3]);
    }

    #[test]
    fn test_explicit_not_sortable_column_ignores_clicks() {
        let mut view = TableView::new("id").with_columns(vec![
            ColumnDescriptor::new("id"),
            ColumnDescriptor::new("name").not_sortable(),
        ]);
        view.replace_rows(sample_rows());
        view.sort_by("name");

        assert_eq!(view.sort().key(), None);
    }

    #[test]
    fn test_global_filter_and_clamp() {
        let mut view = TableView::new("id").with_page_size(10);
        let rows: Vec<Row> = (0..23)
            .map(|i| Row::new().set("id", i).set("name", format!("row {i}")))
            .collect();
        view.replace_rows(rows);

        view.set_page(5);
        let (_, page_view) = view.current_page();
        assert_eq!(page_view.page_count, 3);
        assert_eq!(page_view.clamped_index, 2);

        // Narrowing the set while on the last page silently re-clamps.
        view.set_global_filter("row 1");
        let (page, page_view) = view.current_page();
        let shown = page.len();
        drop(page);
        assert!(shown <= 10);
        // The clamp was adopted as the authoritative index.
        assert_eq!(view.page().index(), page_view.clamped_index);
    }

    #[test]
    fn test_global_filter_consults_column_extractor() {
        let mut view = TableView::new("id").with_columns(vec![
            ColumnDescriptor::new("id"),
            ColumnDescriptor::new("status").with_sort_value(|row| {
                match row.get_long("status") {
                    Ok(Some(0)) => Value::from("open"),
                    Ok(Some(_)) => Value::from("closed"),
                    _ => Value::Null,
                }
            }),
        ]);
        view.replace_rows(vec![
            Row::new().set("id", 1).set("status", 0),
            Row::new().set("id", 2).set("status", 1),
        ]);

        // The raw leaves are 0 and 1; "open" only exists through the
        // column's extractor.
        view.set_global_filter("open");
        assert_eq!(view.filtered_count(), 1);
        assert_eq!(page_ids(&mut view), vec![1]);
    }

    #[test]
    fn test_filter_applies_to_original_set() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        view.set_global_filter("zed");
        assert_eq!(view.filtered_count(), 1);

        // Widening the term re-derives from the source, not the narrowed set.
        view.set_global_filter("");
        assert_eq!(view.filtered_count(), 3);
    }

    #[test]
    fn test_structured_filter_independent_of_term() {
        let mut view = TableView::new("id");
        view.replace_rows(vec![
            Row::new().set("id", 1).set("invoiceDate", "2024-01-10").set("supplierId", 7),
            Row::new().set("id", 2).set("invoiceDate", "2024-03-10").set("supplierId", 7),
        ]);

        view.set_global_filter("2024");
        view.set_structured_filter(
            StructuredFilter::new(ReportFields::for_page("purchase").unwrap())
                .with_date_range(
                    chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                ),
        );
        assert_eq!(view.filtered_count(), 1);

        view.clear_structured_filter();
        assert_eq!(view.filter().term(), "2024");
        assert_eq!(view.filtered_count(), 2);
    }

    #[test]
    fn test_expansion_survives_filtering() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        let first = view.rows()[0].clone(); // "Zed"
        view.toggle_expanded(&first);
        assert!(view.is_expanded(&first));

        // Filter excludes "Zed", then clearing it restores the expansion.
        view.set_global_filter("amy");
        view.set_global_filter("");
        assert!(view.is_expanded(&first));
    }

    #[test]
    fn test_expand_all_only_touches_visible() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        view.set_global_filter("amy");
        view.expand_all();
        view.set_global_filter("");

        let rows: Vec<Row> = view.rows().to_vec();
        assert!(!view.is_expanded(&rows[0]));
        assert!(view.is_expanded(&rows[1]));
        assert!(view.is_expanded(&rows[2]));
    }

    #[test]
    fn test_state_survives_reload_by_identity() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        let zed = view.rows()[0].clone();
        view.toggle_expanded(&zed);
        view.toggle_selected(&zed);

        // Reload with the same identities in a different order.
        let mut reloaded = sample_rows();
        reloaded.reverse();
        view.replace_rows(reloaded);

        let zed_again = Row::new().set("id", 1);
        assert!(view.is_expanded(&zed_again));
        assert!(view.is_selected(&zed_again));

        // Reload without id 1: its state is pruned.
        view.replace_rows(vec![Row::new().set("id", 2).set("name", "amy")]);
        assert!(!view.is_expanded(&zed_again));
        assert!(!view.is_selected(&zed_again));
    }

    #[test]
    fn test_sort_dropped_when_field_vanishes() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());
        view.sort_by("name");
        assert!(view.sort().key().is_some());

        // New data set without a "name" column drops the sort.
        view.replace_rows(vec![Row::new().set("id", 9).set("total", 1)]);
        assert_eq!(view.sort().key(), None);
    }

    #[test]
    fn test_sum_over_filtered_unpaginated_set() {
        let mut view = TableView::new("id").with_page_size(1);
        view.replace_rows(sample_rows());

        // All three rows are in scope even though the page shows one.
        assert_eq!(view.sum("amt"), 60.0);

        view.set_global_filter("amy");
        assert_eq!(view.sum("amt"), 10.0);
    }

    #[test]
    fn test_child_rows_master_detail() {
        let mut view = TableView::new("id").with_child_field("purchaseItems");
        view.replace_rows(vec![
            Row::new()
                .set("id", 1)
                .set("purchaseItems", vec![Row::new().set("qty", 2)]),
            Row::new().set("id", 2),
        ]);

        assert_eq!(view.child_rows(&view.rows()[0]).len(), 1);
        // Absent child field renders zero child rows, no failure.
        assert!(view.child_rows(&view.rows()[1]).is_empty());
    }

    #[test]
    fn test_derived_columns_when_none_supplied() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());

        let headers: Vec<String> = view.columns().into_iter().map(|c| c.header).collect();
        assert_eq!(headers, vec!["Amt", "Id", "Name"]);

        view.clear();
        assert!(view.columns().is_empty());
    }

    #[test]
    fn test_callbacks_fire() {
        let edited = Arc::new(Mutex::new(Vec::<i64>::new()));
        let deleted = Arc::new(Mutex::new(0usize));

        let edited_sink = Arc::clone(&edited);
        let deleted_sink = Arc::clone(&deleted);
        let mut view = TableView::new("id").with_callbacks(Callbacks {
            on_edit: Some(Arc::new(move |row: &Row| {
                edited_sink
                    .lock()
                    .unwrap()
                    .push(row.get_long("id").unwrap().unwrap());
            })),
            on_delete: Some(Arc::new(move |rows: &[Row]| {
                *deleted_sink.lock().unwrap() = rows.len();
            })),
            on_add: None,
        });
        view.replace_rows(sample_rows());

        let first = view.rows()[0].clone();
        view.request_edit(&first);
        assert_eq!(*edited.lock().unwrap(), vec![1]);

        view.toggle_selected(&first);
        let second = view.rows()[1].clone();
        view.toggle_selected(&second);
        view.confirm_delete();
        assert_eq!(*deleted.lock().unwrap(), 2);

        view.request_add(); // no handler, no-op
    }

    #[test]
    fn test_interaction_during_reload_uses_latest_rows() {
        let mut view = TableView::new("id");
        view.replace_rows(sample_rows());
        view.set_global_filter("amy");

        // A replacement landing mid-interaction recomputes from the new
        // array; no cached intermediate survives.
        view.replace_rows(vec![Row::new().set("id", 9).set("name", "Amyas")]);
        assert_eq!(page_ids(&mut view), vec![9]);
    }
}

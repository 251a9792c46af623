//! Comparator engine: stable, type-aware ordering over heterogeneous rows.

use std::cmp::Ordering;

use crate::model::Row;
use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// The current sort request, if any.
///
/// The initial state is unsorted: insertion order is preserved. The state is
/// mutated only by explicit user sort requests and survives wholesale data
/// reloads unless the sorted field no longer exists in the new column set.
///
/// # Example
///
/// ```
/// use gridview_lib::view::{Direction, SortState};
///
/// let mut sort = SortState::default();
/// sort.cycle("name");
/// assert_eq!(sort.key(), Some(("name", Direction::Asc)));
/// sort.cycle("name");
/// assert_eq!(sort.key(), Some(("name", Direction::Desc)));
/// sort.cycle("name");
/// assert_eq!(sort.key(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    key: Option<(String, Direction)>,
}

impl SortState {
    /// Returns the sorted field and direction, if sorting is active.
    pub fn key(&self) -> Option<(&str, Direction)> {
        self.key.as_ref().map(|(f, d)| (f.as_str(), *d))
    }

    /// Sets an explicit sort.
    pub fn set(&mut self, field: impl Into<String>, direction: Direction) {
        self.key = Some((field.into(), direction));
    }

    /// Returns to the unsorted state.
    pub fn clear(&mut self) {
        self.key = None;
    }

    /// Header-click cycle: ascending, then descending, then unsorted.
    ///
    /// A request for a different field starts over at ascending.
    pub fn cycle(&mut self, field: &str) {
        self.key = match self.key.take() {
            Some((f, Direction::Asc)) if f == field => Some((f, Direction::Desc)),
            Some((f, Direction::Desc)) if f == field => None,
            _ => Some((field.to_string(), Direction::Asc)),
        };
    }
}

/// Produces a total order over rows for the given field and direction.
///
/// Intended for use with a stable sort (`slice::sort_by`), so that rows the
/// comparator cannot distinguish keep their prior relative order.
///
/// # Example
///
/// ```
/// use gridview_lib::model::Row;
/// use gridview_lib::view::sort::{compare_by, Direction};
///
/// let mut rows = vec![Row::new().set("amt", 50), Row::new().set("amt", 10)];
/// rows.sort_by(compare_by("amt", Direction::Asc));
/// assert_eq!(rows[0].get_long("amt").unwrap(), Some(10));
/// ```
pub fn compare_by(field_path: &str, direction: Direction) -> impl Fn(&Row, &Row) -> Ordering {
    let field_path = field_path.to_string();
    move |a, b| compare_rows(a, b, &field_path, direction)
}

/// Compares two rows on a dotted path.
///
/// Ordering policy, in precedence order:
/// 1. a null or missing operand sorts after any defined operand, regardless
///    of direction (empty values must not jump to the top when the user
///    reverses the sort)
/// 2. two strings compare case-insensitively
/// 3. two numerics (int/long/float/decimal interchangeably) compare numerically
/// 4. two datetimes compare chronologically; booleans and guids by natural order
/// 5. anything else is incomparable and reports equal; the stable sort
///    preserves insertion order for such rows
///
/// Direction flips cases 2-4 only, never case 1.
pub fn compare_rows(a: &Row, b: &Row, field_path: &str, direction: Direction) -> Ordering {
    compare_resolved(a.get_path(field_path), b.get_path(field_path), direction)
}

/// Compares two already-resolved operands under the same policy as
/// [`compare_rows`]. Used when a column supplies its own value extractor.
pub fn compare_resolved(
    a: Option<&Value>,
    b: Option<&Value>,
    direction: Direction,
) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        // Nulls-last is direction-invariant.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordered = compare_defined(a, b);
            match direction {
                Direction::Asc => ordered,
                Direction::Desc => ordered.reverse(),
            }
        }
    }
}

fn compare_defined(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        // NaN is incomparable and reports equal like any other mixed case.
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Guid(x), Value::Guid(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: i32, name: &str) -> Row {
        Row::new().set("id", id).set("name", name)
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter()
            .map(|r| r.get_long("id").unwrap().unwrap())
            .collect()
    }

    #[test]
    fn test_case_insensitive_string_sort_is_stable() {
        // "amy" (2) and "Amy" (3) tie case-insensitively; insertion order
        // between them must be preserved.
        let mut rows = vec![named(1, "Zed"), named(2, "amy"), named(3, "Amy")];
        rows.sort_by(compare_by("name", Direction::Asc));
        assert_eq!(ids(&rows), vec![2, 3, 1]);
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let rows = || {
            vec![
                Row::new().set("id", 1).set("amt", 50),
                Row::new().set("id", 2).set("amt", Value::Null),
                Row::new().set("id", 3).set("amt", 10),
            ]
        };

        let mut asc = rows();
        asc.sort_by(compare_by("amt", Direction::Asc));
        assert_eq!(ids(&asc), vec![3, 1, 2]);

        let mut desc = rows();
        desc.sort_by(compare_by("amt", Direction::Desc));
        assert_eq!(ids(&desc), vec![1, 3, 2]);
    }

    #[test]
    fn test_missing_field_sorts_like_null() {
        let mut rows = vec![Row::new().set("id", 1), named(2, "abc")];
        rows.sort_by(compare_by("name", Direction::Asc));
        assert_eq!(ids(&rows), vec![2, 1]);
    }

    #[test]
    fn test_mixed_numeric_widths_compare() {
        let mut rows = vec![
            Row::new().set("id", 1).set("amt", 2.5f64),
            Row::new().set("id", 2).set("amt", 2i64),
            Row::new().set("id", 3).set("amt", 3i32),
        ];
        rows.sort_by(compare_by("amt", Direction::Asc));
        assert_eq!(ids(&rows), vec![2, 1, 3]);
    }

    #[test]
    fn test_incomparable_types_preserve_insertion_order() {
        // A bool and a string are incomparable and report equal; the stable
        // sort keeps their insertion order, while the null still lands last.
        let mut rows = vec![
            Row::new().set("id", 1).set("v", true),
            Row::new().set("id", 2).set("v", "text"),
            Row::new().set("id", 3).set("v", Value::Null),
        ];
        rows.sort_by(compare_by("v", Direction::Asc));
        assert_eq!(ids(&rows), vec![1, 2, 3]);

        rows.sort_by(compare_by("v", Direction::Desc));
        assert_eq!(ids(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn test_resort_round_trip_restores_tied_order() {
        // asc, desc, asc again on a field full of ties must restore the
        // original relative order among tied rows.
        let original = vec![named(1, "same"), named(2, "same"), named(3, "same")];
        let mut rows = original.clone();
        rows.sort_by(compare_by("name", Direction::Asc));
        rows.sort_by(compare_by("name", Direction::Desc));
        rows.sort_by(compare_by("name", Direction::Asc));
        assert_eq!(ids(&rows), ids(&original));
    }

    #[test]
    fn test_nested_path_sort() {
        let mut rows = vec![
            Row::new().set("id", 1).set("address", Row::new().set("city", "Oslo")),
            Row::new().set("id", 2).set("address", Row::new().set("city", "Bergen")),
        ];
        rows.sort_by(compare_by("address.city", Direction::Asc));
        assert_eq!(ids(&rows), vec![2, 1]);
    }

    #[test]
    fn test_cycle_transitions() {
        let mut sort = SortState::default();
        sort.cycle("name");
        assert_eq!(sort.key(), Some(("name", Direction::Asc)));
        sort.cycle("name");
        assert_eq!(sort.key(), Some(("name", Direction::Desc)));
        sort.cycle("name");
        assert_eq!(sort.key(), None);

        // A different field restarts at ascending.
        sort.cycle("name");
        sort.cycle("amt");
        assert_eq!(sort.key(), Some(("amt", Direction::Asc)));
    }
}

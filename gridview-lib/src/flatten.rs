//! Path flattener: nested rows to dotted-path leaf maps.

use std::collections::BTreeMap;

use crate::model::Row;
use crate::model::Value;

/// Ephemeral mapping from dotted path to scalar leaf value.
///
/// Recomputed on demand and never stored; the authoritative state is always
/// the original nested [`Row`]. A `BTreeMap` keeps iteration order
/// deterministic, which makes derived column order and search reproducible.
pub type FlattenedRow = BTreeMap<String, Value>;

/// Flattens a nested row into a map of dotted-path keys to leaf values.
///
/// Nested records are recursed into with a `parent.child` prefix. Child-row
/// collections ([`Value::Records`]) and opaque JSON leaves ([`Value::Json`])
/// are excluded entirely: master-detail collections must not pollute
/// parent-level columns or whole-row search. Null leaves are kept so that
/// auto-derived columns still cover sparsely populated fields.
///
/// Pure function; flattening the same row twice yields the same map.
pub fn flatten(row: &Row) -> FlattenedRow {
    let mut out = FlattenedRow::new();
    flatten_into(row, "", &mut out);
    out
}

fn flatten_into(row: &Row, prefix: &str, out: &mut FlattenedRow) {
    for (key, value) in row.fields() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Record(inner) => flatten_into(inner, &path, out),
            Value::Records(_) | Value::Json(_) => {}
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

#![allow(clippy::self_named_module_files)]

//! Overlay merge of JSON objects.
//!
//! The target is mutated in place and the source is only read. Every key of the
//! source ends up in the target: new keys are inserted, nested objects are merged
//! recursively, arrays go through [`classify`] and [`array`], and anything else is
//! overwritten with the source value.

use serde_json::{map::Entry, Map, Value};
use tracing::trace;

pub mod array;
pub mod classify;
pub mod identity;

pub use array::merge_structured_array;
pub use classify::{classify_array, is_basic_array, ArrayKind};
pub use identity::{resolve_identity, sort_by_numeric_id, IdentityKey};

/// Merges `source` into `target` key by key.
///
/// The merge never fails. A target array paired with a non-array source value is
/// left untouched; every other type mismatch is resolved in favour of the source.
pub fn merge_objects(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, source_value) in source {
        match target.entry(key.clone()) {
            Entry::Vacant(entry) => {
                trace!(key = %key, "inserting key absent from target");
                entry.insert(source_value.clone());
            },
            Entry::Occupied(mut entry) => merge_field(key, entry.get_mut(), source_value),
        }
    }
}

/// Merges two whole documents. Both must be objects; see [`merge_objects`].
///
/// Returns the merged target so callers can chain it into the writer.
pub fn merge_documents(mut target: Map<String, Value>, source: &Map<String, Value>) -> Value {
    merge_objects(&mut target, source);
    Value::Object(target)
}

fn merge_field(key: &str, target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_obj), Value::Object(source_obj)) => {
            trace!(key, "merging nested object");
            merge_objects(target_obj, source_obj);
        },
        (Value::Array(target_arr), Value::Array(source_arr)) => match classify_array(source_arr) {
            ArrayKind::Basic => {
                trace!(key, len = source_arr.len(), "replacing basic array");
                target_arr.clone_from(source_arr);
            },
            ArrayKind::Structured => {
                trace!(key, len = source_arr.len(), "merging structured array");
                merge_structured_array(target_arr, source_arr);
            },
        },
        (Value::Array(_), _) => {
            trace!(key, "source value is not an array, keeping target array");
        },
        (target_value, source_value) => {
            *target_value = source_value.clone();
        },
    }
}

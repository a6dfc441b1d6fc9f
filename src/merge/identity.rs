//! Identity keys used to match records across two arrays.
//!
//! A record is identified by the first populated field of `id`, `name`,
//! `identification` and `config`. The two wrapper fields are looked into for a
//! string `id` or `name`.

use serde_json::{Map, Value};
use std::cmp::Ordering;

/// Field holding a record's identity, either at top level or inside a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Id,
    Name,
}

impl KeyField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
        }
    }
}

/// Object-valued field that carries the identity one level down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapper {
    Identification,
    Config,
}

impl Wrapper {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::Config => "config",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdentityKey<'a> {
    /// `record.id` or `record.name`.
    Top { field: KeyField, value: &'a Value },
    /// `record.identification.<field>` or `record.config.<field>`, always a string.
    Nested { wrapper: Wrapper, field: KeyField, value: &'a str },
    /// The wrapper is present but holds no string `id` or `name`. Matches nothing.
    Opaque(Wrapper),
}

/// Resolves the identity of a record, or `None` when it has no identity field.
///
/// A field set to `null` counts as absent.
pub fn resolve_identity(record: &Map<String, Value>) -> Option<IdentityKey<'_>> {
    for field in [KeyField::Id, KeyField::Name] {
        if let Some(value) = populated(record, field.as_str()) {
            return Some(IdentityKey::Top { field, value });
        }
    }

    for wrapper in [Wrapper::Identification, Wrapper::Config] {
        if let Some(value) = populated(record, wrapper.as_str()) {
            return Some(inner_key(value).map_or(
                IdentityKey::Opaque(wrapper),
                |(field, value)| IdentityKey::Nested { wrapper, field, value },
            ));
        }
    }

    None
}

impl IdentityKey<'_> {
    /// Returns true when `candidate` is a record carrying the same identity.
    pub fn matches(&self, candidate: &Value) -> bool {
        candidate.as_object().is_some_and(|record| self.matches_record(record))
    }

    /// Same as [`matches`](Self::matches) for a candidate already known to be a record.
    pub fn matches_record(&self, record: &Map<String, Value>) -> bool {
        match *self {
            Self::Top { field, value } => {
                record.get(field.as_str()).is_some_and(|other| values_equal(other, value))
            },
            Self::Nested { wrapper, field, value } => record
                .get(wrapper.as_str())
                .and_then(Value::as_object)
                .and_then(|inner| inner.get(field.as_str()))
                .and_then(Value::as_str)
                .is_some_and(|other| other == value),
            Self::Opaque(_) => false,
        }
    }

    /// Inserting a record keyed by a numeric `id` re-sorts the array.
    pub fn orders_array(&self) -> bool {
        matches!(self, Self::Top { field: KeyField::Id, value: Value::Number(_) })
    }
}

/// Stable sort by numeric top-level `id`, ascending.
///
/// Elements without a numeric `id` stay where they are and split the array into
/// runs; only the numeric-id elements within each run are reordered.
pub fn sort_by_numeric_id(values: &mut [Value]) {
    for run in values.split_mut(|value| numeric_id(value).is_none()) {
        run.sort_by(|a, b| {
            numeric_id(a)
                .zip(numeric_id(b))
                .and_then(|(left, right)| left.partial_cmp(&right))
                .unwrap_or(Ordering::Equal)
        });
    }
}

fn numeric_id(value: &Value) -> Option<f64> {
    value.get("id").and_then(Value::as_f64)
}

fn populated<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|value| !value.is_null())
}

fn inner_key(wrapper: &Value) -> Option<(KeyField, &str)> {
    let inner = wrapper.as_object()?;
    [KeyField::Id, KeyField::Name]
        .into_iter()
        .find_map(|field| inner.get(field.as_str()).and_then(Value::as_str).map(|v| (field, v)))
}

/// JSON equality where numbers compare by value, so `1` equals `1.0`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            l == r
                || l.as_f64()
                    .zip(r.as_f64())
                    .is_some_and(|(l, r)| l.partial_cmp(&r) == Some(Ordering::Equal))
        },
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| values_equal(l, r))
        },
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter().all(|(key, l)| r.get(key).is_some_and(|r| values_equal(l, r)))
        },
        _ => left == right,
    }
}

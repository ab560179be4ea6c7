//! Schema validation for caller-supplied reasoning artifacts.
//!
//! Every tool receives an untyped JSON record. The [`Record`] reader walks that
//! record field by field, recording each violation instead of stopping at the
//! first one, and hands back best-effort values so an artifact can always be
//! assembled. [`validate`] then discards the artifact if anything was recorded
//! and returns a [`ValidationError`] listing every offending field path.
//!
//! Unknown fields are ignored. JSON `null` is treated the same as an absent
//! field.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{FieldViolation, ValidationError};


/// A closed set of string values accepted on the wire.
///
/// Implemented through [`wire_enum!`]; the order of `ALL` is the declaration
/// order, which stage machines rely on for forward-only progression.
pub trait WireEnum: Copy + PartialEq + 'static {
    /// Every variant in declaration order.
    const ALL: &'static [Self];

    /// The wire spelling of this variant.
    fn as_str(&self) -> &'static str;

    /// Parse a wire spelling (exact match).
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }

    /// Position in declaration order.
    fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    /// The variant declared after this one, if any.
    fn successor(&self) -> Option<Self> {
        Self::ALL.get(self.ordinal() + 1).copied()
    }

    /// Placeholder used while an artifact with violations is assembled.
    fn fallback() -> Self {
        Self::ALL[0]
    }

    /// Comma-separated list of accepted values, for error messages.
    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Declare a string enum with serde renames, [`WireEnum`], `Display` and `FromStr`.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $crate::validation::WireEnum for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::validation::WireEnum::as_str(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::validation::WireEnum>::parse(s)
                    .ok_or_else(|| format!("Unknown {}: {}", stringify!($name), s))
            }
        }
    };
}

/// An artifact that can be read out of an untyped record.
pub trait Validate: Sized {
    /// Read every field, recording violations on `record`.
    fn read(record: &Record<'_>) -> Self;
}

/// Validate a JSON value as artifact `T`, collecting every violation.
pub fn validate<T: Validate>(value: &Value) -> Result<T, ValidationError> {
    let Some(map) = value.as_object() else {
        return Err(ValidationError::single(
            "$",
            format!("expected an object, got {}", type_name(value)),
        ));
    };

    let sink = RefCell::new(Vec::new());
    let artifact = T::read(&Record::root(map, &sink));
    let violations = sink.into_inner();

    if violations.is_empty() {
        Ok(artifact)
    } else {
        Err(ValidationError { violations })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A view over one JSON object plus the shared violation sink.
pub struct Record<'a> {
    map: &'a Map<String, Value>,
    prefix: String,
    sink: &'a RefCell<Vec<FieldViolation>>,
}

impl<'a> Record<'a> {
    fn root(map: &'a Map<String, Value>, sink: &'a RefCell<Vec<FieldViolation>>) -> Self {
        Self {
            map,
            prefix: String::new(),
            sink,
        }
    }

    fn nested(&self, map: &'a Map<String, Value>, path: String) -> Record<'a> {
        Record {
            map,
            prefix: path,
            sink: self.sink,
        }
    }

    /// Full dotted path for a field of this record.
    pub fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }

    /// Record a violation against a field of this record.
    pub fn reject(&self, key: &str, reason: impl Into<String>) {
        self.sink
            .borrow_mut()
            .push(FieldViolation::new(self.path(key), reason));
    }

    /// Raw access to a present, non-null field.
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> Option<&'a Value> {
        let value = self.raw(key);
        if value.is_none() {
            self.reject(key, "is required");
        }
        value
    }

    fn as_text(&self, key: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.reject(key, format!("must be a string, got {}", type_name(value)));
                None
            }
        }
    }

    /// Required string that must not be blank.
    pub fn required_str(&self, key: &str) -> String {
        let Some(value) = self.required(key) else {
            return String::new();
        };
        match self.as_text(key, value) {
            Some(s) if s.trim().is_empty() => {
                self.reject(key, "cannot be empty");
                s
            }
            Some(s) => s,
            None => String::new(),
        }
    }

    /// Optional string; present values must be strings.
    pub fn optional_str(&self, key: &str) -> Option<String> {
        self.raw(key).and_then(|v| self.as_text(key, v))
    }

    pub fn required_bool(&self, key: &str) -> bool {
        self.required(key)
            .and_then(|v| self.as_bool(key, v))
            .unwrap_or(false)
    }

    pub fn optional_bool(&self, key: &str) -> Option<bool> {
        self.raw(key).and_then(|v| self.as_bool(key, v))
    }

    fn as_bool(&self, key: &str, value: &Value) -> Option<bool> {
        let b = value.as_bool();
        if b.is_none() {
            self.reject(key, format!("must be a boolean, got {}", type_name(value)));
        }
        b
    }

    fn as_integer(&self, key: &str, value: &Value, min: u64) -> Option<u64> {
        let integral = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        });
        match integral {
            Some(n) if n >= min => Some(n),
            Some(_) => {
                self.reject(key, format!("must be at least {}", min));
                None
            }
            None => {
                let reason = if min == 0 {
                    "must be a non-negative integer"
                } else {
                    "must be a positive integer"
                };
                self.reject(key, reason);
                None
            }
        }
    }

    /// Required integer >= 1.
    pub fn positive_int(&self, key: &str) -> u64 {
        self.required(key)
            .and_then(|v| self.as_integer(key, v, 1))
            .unwrap_or(1)
    }

    pub fn optional_positive_int(&self, key: &str) -> Option<u64> {
        self.raw(key).and_then(|v| self.as_integer(key, v, 1))
    }

    /// Required integer >= 0.
    pub fn non_negative_int(&self, key: &str) -> u64 {
        self.required(key)
            .and_then(|v| self.as_integer(key, v, 0))
            .unwrap_or(0)
    }

    fn as_number(&self, key: &str, value: &Value) -> Option<f64> {
        let n = value.as_f64().filter(|n| n.is_finite());
        if n.is_none() {
            self.reject(key, format!("must be a number, got {}", type_name(value)));
        }
        n
    }

    /// Required finite number.
    pub fn number(&self, key: &str) -> f64 {
        self.required(key)
            .and_then(|v| self.as_number(key, v))
            .unwrap_or(0.0)
    }

    /// Required number inside the closed interval `[min, max]`. Never clamps.
    pub fn number_in(&self, key: &str, min: f64, max: f64) -> f64 {
        self.required(key)
            .and_then(|v| self.checked_range(key, v, min, max))
            .unwrap_or(min)
    }

    pub fn optional_number_in(&self, key: &str, min: f64, max: f64) -> Option<f64> {
        self.raw(key)
            .and_then(|v| self.checked_range(key, v, min, max))
    }

    fn checked_range(&self, key: &str, value: &Value, min: f64, max: f64) -> Option<f64> {
        let n = self.as_number(key, value)?;
        if n < min || n > max {
            self.reject(key, format!("must be between {} and {}, got {}", min, max, n));
            return None;
        }
        Some(n)
    }

    /// Required probability/confidence in `[0, 1]`.
    pub fn unit_interval(&self, key: &str) -> f64 {
        self.number_in(key, 0.0, 1.0)
    }

    /// Required number >= 0.
    pub fn non_negative_number(&self, key: &str) -> f64 {
        let Some(n) = self.required(key).and_then(|v| self.as_number(key, v)) else {
            return 0.0;
        };
        if n < 0.0 {
            self.reject(key, format!("must not be negative, got {}", n));
        }
        n
    }

    /// Required enumeration value; on violation returns the first variant.
    pub fn enumeration<E: WireEnum>(&self, key: &str) -> E {
        self.required(key)
            .and_then(|v| self.as_enum(key, v))
            .unwrap_or_else(E::fallback)
    }

    /// Required enumeration, returning `None` on violation so callers can
    /// skip checks that depend on it.
    pub fn try_enumeration<E: WireEnum>(&self, key: &str) -> Option<E> {
        self.required(key).and_then(|v| self.as_enum(key, v))
    }

    pub fn optional_enum<E: WireEnum>(&self, key: &str) -> Option<E> {
        self.raw(key).and_then(|v| self.as_enum(key, v))
    }

    fn as_enum<E: WireEnum>(&self, key: &str, value: &Value) -> Option<E> {
        let text = self.as_text(key, value)?;
        let parsed = E::parse(&text);
        if parsed.is_none() {
            self.reject(
                key,
                format!("unknown value '{}', expected one of: {}", text, E::expected()),
            );
        }
        parsed
    }

    fn as_string_list(&self, key: &str, value: &Value) -> Vec<String> {
        let Some(items) = value.as_array() else {
            self.reject(key, format!("must be an array, got {}", type_name(value)));
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let text = item.as_str().map(str::to_string);
                if text.is_none() {
                    self.reject(&format!("{}[{}]", key, i), "must be a string");
                }
                text
            })
            .collect()
    }

    /// Required array of strings, optionally non-empty.
    pub fn string_list(&self, key: &str, non_empty: bool) -> Vec<String> {
        let Some(value) = self.required(key) else {
            return Vec::new();
        };
        let list = self.as_string_list(key, value);
        if non_empty && value.as_array().is_some_and(|a| a.is_empty()) {
            self.reject(key, "must contain at least one entry");
        }
        list
    }

    /// Optional array of strings, defaulting to empty.
    pub fn optional_string_list(&self, key: &str) -> Vec<String> {
        self.raw(key)
            .map(|v| self.as_string_list(key, v))
            .unwrap_or_default()
    }

    /// Optional array of strings, keeping absence distinct from empty.
    pub fn maybe_string_list(&self, key: &str) -> Option<Vec<String>> {
        self.raw(key).map(|v| self.as_string_list(key, v))
    }

    /// Required nested object.
    pub fn object(&self, key: &str) -> Option<Record<'a>> {
        let value = self.required(key)?;
        self.as_record(key, value, self.path(key))
    }

    /// Optional nested object.
    pub fn optional_object(&self, key: &str) -> Option<Record<'a>> {
        let value = self.raw(key)?;
        self.as_record(key, value, self.path(key))
    }

    fn as_record(&self, key: &str, value: &'a Value, path: String) -> Option<Record<'a>> {
        match value.as_object() {
            Some(map) => Some(self.nested(map, path)),
            None => {
                self.reject(key, format!("must be an object, got {}", type_name(value)));
                None
            }
        }
    }

    /// Optional nested artifact.
    pub fn optional_nested<T: Validate>(&self, key: &str) -> Option<T> {
        self.optional_object(key).map(|r| T::read(&r))
    }

    fn as_list<T: Validate>(&self, key: &str, value: &'a Value) -> Vec<T> {
        let Some(items) = value.as_array() else {
            self.reject(key, format!("must be an array, got {}", type_name(value)));
            return Vec::new();
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let index_key = format!("{}[{}]", key, i);
                self.as_record(&index_key, item, self.path(&index_key))
                    .map(|r| T::read(&r))
            })
            .collect()
    }

    /// Required array of nested artifacts, optionally non-empty.
    pub fn list<T: Validate>(&self, key: &str, non_empty: bool) -> Vec<T> {
        let Some(value) = self.required(key) else {
            return Vec::new();
        };
        if non_empty && value.as_array().is_some_and(|a| a.is_empty()) {
            self.reject(key, "must contain at least one entry");
        }
        self.as_list(key, value)
    }

    /// Optional array of nested artifacts, keeping absence distinct from empty.
    pub fn optional_list<T: Validate>(&self, key: &str) -> Option<Vec<T>> {
        self.raw(key).map(|v| self.as_list(key, v))
    }

    /// Optional open key-value map with no assumed value type.
    pub fn open_map(&self, key: &str) -> Map<String, Value> {
        match self.raw(key) {
            Some(Value::Object(map)) => map.clone(),
            Some(other) => {
                self.reject(key, format!("must be an object, got {}", type_name(other)));
                Map::new()
            }
            None => Map::new(),
        }
    }

    /// Optional map from ids to numbers.
    pub fn number_map(&self, key: &str) -> BTreeMap<String, f64> {
        let Some(record) = self.optional_object(key) else {
            return BTreeMap::new();
        };
        record
            .map
            .iter()
            .filter_map(|(k, v)| record.as_number(k, v).map(|n| (k.clone(), n)))
            .collect()
    }
}

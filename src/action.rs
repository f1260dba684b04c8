//! Actions, thunks, and the store's private action types.
//!
//! A dispatched value is an [`Action`]: either a candidate plain record
//! (validated when dispatched) or a [`Thunk`], which only an enhancer may
//! handle. Reducers never see raw dispatched values; they receive an
//! [`ActionRecord`], a JSON object guaranteed to carry a defined `type`
//! field.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::StoreError;
use crate::store::StoreApi;

/// True when the value is a plain record: a JSON object, not an array,
/// primitive, or null.
pub fn is_plain_record(value: &Value) -> bool {
    value.is_object()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A deferred action. The core store rejects thunks; the thunk enhancer
/// invokes them with the enhanced store instead of reducing them.
pub struct Thunk<S>(Box<dyn FnOnce(&dyn StoreApi<S>) -> Result<Action<S>, StoreError> + Send>);

impl<S> Thunk<S> {
    pub fn new<F>(run: F) -> Self
    where
        F: FnOnce(&dyn StoreApi<S>) -> Result<Action<S>, StoreError> + Send + 'static,
    {
        Self(Box::new(run))
    }

    pub(crate) fn run(self, store: &dyn StoreApi<S>) -> Result<Action<S>, StoreError> {
        (self.0)(store)
    }
}

impl<S> fmt::Debug for Thunk<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk")
    }
}

/// A value handed to `dispatch`.
pub enum Action<S> {
    /// Candidate plain-record action; validated at dispatch time.
    Value(Value),
    /// Deferred action; requires the thunk enhancer.
    Thunk(Thunk<S>),
}

impl<S> Action<S> {
    /// Plain-record action with a `type` and a `payload` field.
    pub fn record(kind: &str, payload: Value) -> Self {
        Action::Value(json!({ "type": kind, "payload": payload }))
    }

    /// Plain-record action carrying only a `type` field.
    pub fn of_type(kind: &str) -> Self {
        Action::Value(json!({ "type": kind }))
    }

    /// Plain-record action with a typed payload.
    pub fn with_payload<T: Serialize>(kind: &str, payload: T) -> Result<Self, StoreError> {
        let payload = serde_json::to_value(payload).map_err(|err| {
            StoreError::validation(format!("action payload is not serializable: {err}"))
        })?;
        Ok(Self::record(kind, payload))
    }

    /// Deferred action run by the thunk enhancer with `(dispatch, get_state)`
    /// access to the store.
    pub fn thunk<F>(run: F) -> Self
    where
        F: FnOnce(&dyn StoreApi<S>) -> Result<Action<S>, StoreError> + Send + 'static,
    {
        Action::Thunk(Thunk::new(run))
    }

    /// The raw record for `Value` actions.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Action::Value(value) => Some(value),
            Action::Thunk(_) => None,
        }
    }
}

impl<S> fmt::Debug for Action<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Action::Thunk(thunk) => thunk.fmt(f),
        }
    }
}

/// A validated plain-record action: a JSON object with a defined `type`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    fields: Map<String, Value>,
}

impl ActionRecord {
    /// Validate a raw dispatched value. Non-record values and records without
    /// a defined `type` are rejected.
    pub fn parse(value: &Value) -> Result<Self, StoreError> {
        if !is_plain_record(value) {
            return Err(StoreError::validation(format!(
                "actions must be plain records, got {}; use an enhancer to dispatch other values",
                json_kind(value),
            )));
        }
        let fields = match value.as_object() {
            Some(fields) => fields.clone(),
            None => Map::new(),
        };
        match fields.get("type") {
            Some(kind) if !kind.is_null() => Ok(Self { fields }),
            _ => Err(StoreError::validation(
                "actions must have a defined \"type\" field; did you misspell a constant?",
            )),
        }
    }

    /// Record carrying only a `type` field.
    pub fn of_type(kind: &str) -> Self {
        Self {
            fields: match json!({ "type": kind }) {
                Value::Object(fields) => fields,
                _ => Map::new(),
            },
        }
    }

    /// The action's `type` field. Any JSON value; strings by convention.
    pub fn kind(&self) -> &Value {
        self.fields.get("type").unwrap_or(&Value::Null)
    }

    /// The `type` field when it is a string.
    pub fn kind_str(&self) -> Option<&str> {
        self.kind().as_str()
    }

    /// Human-readable rendering of the `type` field for error messages.
    pub fn kind_text(&self) -> String {
        match self.kind_str() {
            Some(kind) => kind.to_string(),
            None => self.kind().to_string(),
        }
    }

    pub(crate) fn kind_is(&self, kind: &str) -> bool {
        self.kind_str() == Some(kind)
    }

    /// The `payload` field, when present.
    pub fn payload(&self) -> Option<&Value> {
        self.fields.get("payload")
    }

    /// Deserialize the payload into a typed value.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let payload = self.payload().cloned().unwrap_or(Value::Null);
        serde_json::from_value(payload).map_err(|err| {
            StoreError::validation(format!("action payload has the wrong shape: {err}"))
        })
    }

    /// Any other field of the record.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl TryFrom<&Value> for ActionRecord {
    type Error = StoreError;

    fn try_from(value: &Value) -> Result<Self, StoreError> {
        Self::parse(value)
    }
}

/// Private action types. Reducers must treat these as unknown actions; the
/// random suffix makes accidental matches in application code impractical,
/// and external code must never compare against them.
pub(crate) mod internal {
    use std::sync::LazyLock;

    use uuid::Uuid;

    pub(crate) static INIT: LazyLock<String> =
        LazyLock::new(|| format!("@@minidux/INIT-{}", Uuid::new_v4()));

    pub(crate) static REPLACE: LazyLock<String> =
        LazyLock::new(|| format!("@@minidux/REPLACE-{}", Uuid::new_v4()));

    /// A fresh, practically-unguessable action type for shape probing.
    pub(crate) fn probe() -> String {
        format!("@@minidux/PROBE_UNKNOWN_ACTION-{}", Uuid::new_v4())
    }
}

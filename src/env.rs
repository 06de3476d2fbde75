//! Environment-variable overrides: map `{PREFIX}__*` variables onto the
//! decoded settings value.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::merge::deep_merge;
use crate::overrides::{BoxError, OverrideApplier};

/// An [`OverrideApplier`] that overlays environment variables onto the
/// settings value.
///
/// With prefix `MYAPP`, variables map via double-underscore nesting:
///
/// | Env var | Settings key |
/// |---------|--------------|
/// | `MYAPP__HOST` | `host` |
/// | `MYAPP__DATABASE__URL` | `database.url` |
///
/// `__` (double underscore) separates nesting levels. Single `_` within a
/// segment is literal (part of the field name). Segments are lowercased to
/// match serialized field names.
///
/// Values are parsed heuristically: `true`/`false` → bool, then integer,
/// then float, then string.
///
/// Every variable is optional: unset variables leave the decoded value
/// untouched, so the environment is a sparse overlay like any other
/// override source.
pub struct EnvOverrides {
    prefix: String,
    vars: Vec<(String, String)>,
}

impl EnvOverrides {
    /// Capture the process environment for the given prefix.
    pub fn new(prefix: &str) -> Self {
        Self::from_vars(prefix, std::env::vars())
    }

    /// Build from explicit pairs instead of `std::env::vars()`, so tests can
    /// pass synthetic data.
    pub fn from_vars(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            prefix: prefix.to_string(),
            vars: vars.into_iter().collect(),
        }
    }

    /// Build the JSON overlay from the captured variables.
    fn overlay(&self) -> Map<String, Value> {
        let needle = format!("{}__", self.prefix);
        let mut overlay = Map::new();

        for (key, value) in &self.vars {
            let Some(rest) = key.strip_prefix(&needle) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }

            let segments: Vec<&str> = rest.split("__").collect();
            insert_nested(&mut overlay, &segments, parse_env_value(value));
        }

        overlay
    }
}

impl<S> OverrideApplier<S> for EnvOverrides
where
    S: Serialize + DeserializeOwned,
{
    /// Serialize the settings, deep-merge the env overlay on top, and
    /// deserialize back. A type-incompatible overlay value surfaces as an
    /// error from the final deserialize.
    fn apply(&self, settings: &mut S) -> Result<(), BoxError> {
        let overlay = self.overlay();
        if overlay.is_empty() {
            return Ok(());
        }

        let merged = match serde_json::to_value(&*settings)? {
            Value::Object(base) => Value::Object(deep_merge(base, overlay)),
            // A non-object settings value has no nested fields to override.
            other => other,
        };
        *settings = serde_json::from_value(merged)?;
        Ok(())
    }
}

fn insert_nested(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    debug_assert!(!segments.is_empty());

    let key = segments[0].to_lowercase();

    if segments.len() == 1 {
        map.insert(key, value);
    } else {
        let sub = map.entry(key).or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(sub_map) = sub {
            insert_nested(sub_map, &segments[1..], value);
        }
    }
}

/// Parse an env var value into a typed JSON value.
/// Tries: bool → integer → float → string.
fn parse_env_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>() {
        // Only use float if the string actually contains a dot,
        // to avoid "NaN" / "inf" being parsed as float.
        if s.contains('.')
            && let Some(n) = Number::from_f64(f)
        {
            return Value::Number(n);
        }
    }
    Value::String(s.to_string())
}

//! Bounded, named scalar parameters.
//!
//! Each law declares its parameters as static [`ParamSpec`]s. A [`ParamSet`]
//! holds the live values for the active law. The host writes into it (a
//! slider, a `--params` JSON object) and field models only read from it.
//! Every write is clamped to the declared bounds, so a model never sees an
//! out-of-range value.

use crate::error::FieldError;
use serde_json::{json, Map, Value};

/// Static declaration of one adjustable parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Machine name used for lookup and in JSON.
    pub name: &'static str,
    /// Human-readable description.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Unit suffix for display, empty when dimensionless.
    pub unit: &'static str,
}

impl ParamSpec {
    /// Clamps `value` into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// JSON schema entry for this parameter.
    pub fn schema(&self) -> Value {
        json!({
            "type": "number",
            "default": self.default,
            "min": self.min,
            "max": self.max,
            "unit": self.unit,
            "description": self.label,
        })
    }
}

/// A declared parameter together with its current in-bounds value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    spec: ParamSpec,
    value: f64,
}

impl Parameter {
    /// Creates a parameter at its default value (clamped, in case the
    /// declaration itself is out of bounds).
    pub fn new(spec: ParamSpec) -> Self {
        Self {
            value: spec.clamp(spec.default),
            spec,
        }
    }

    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Writes a new value, clamped to bounds. Returns the stored value.
    ///
    /// Returns `FieldError::ParamNotFinite` for NaN or infinite input.
    pub fn set(&mut self, value: f64) -> Result<f64, FieldError> {
        if !value.is_finite() {
            return Err(FieldError::ParamNotFinite(self.spec.name.to_string()));
        }
        self.value = self.spec.clamp(value);
        Ok(self.value)
    }
}

/// The live parameter values of one law, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    params: Vec<Parameter>,
}

impl ParamSet {
    /// Builds a set with every parameter at its default.
    pub fn from_specs(specs: &[ParamSpec]) -> Self {
        Self {
            params: specs.iter().copied().map(Parameter::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Current value of `name`, or `None` if not declared.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.params
            .iter()
            .find(|p| p.name() == name)
            .map(Parameter::value)
    }

    /// Current value of `name`, or `default` if not declared.
    pub fn get_or(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }

    /// Writes `value` into `name`, clamped to bounds. Returns the stored value.
    pub fn set(&mut self, name: &str, value: f64) -> Result<f64, FieldError> {
        self.params
            .iter_mut()
            .find(|p| p.name() == name)
            .ok_or_else(|| FieldError::ParamNotFound(name.to_string()))?
            .set(value)
    }

    /// Applies overrides from a JSON object.
    ///
    /// Numeric entries for declared parameters are written (clamped). Keys
    /// that are not declared fail with `ParamNotFound`; entries of the wrong
    /// JSON type are skipped. A non-object value is ignored. On error the
    /// set is left untouched.
    pub fn apply_json(&mut self, overrides: &Value) -> Result<(), FieldError> {
        let Some(map) = overrides.as_object() else {
            return Ok(());
        };
        if let Some(unknown) = map.keys().find(|key| self.get(key).is_none()) {
            return Err(FieldError::ParamNotFound(unknown.clone()));
        }
        let mut updated = self.clone();
        for (key, value) in map {
            if let Some(v) = value.as_f64() {
                updated.set(key, v)?;
            }
        }
        *self = updated;
        Ok(())
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name().to_string(), json!(p.value())))
            .collect();
        Value::Object(map)
    }
}

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

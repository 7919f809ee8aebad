use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ServiceError;

/// One stock-keeping entry.
///
/// `description` is optional and serialises as `null` when absent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64, in_stock: bool) -> Self {
        Self { name: name.into(), description: None, price, in_stock }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_name(&self.name)
    }

    /// Apply every field present in `patch`; absent fields keep their value.
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(description) = patch.description { self.description = description; }
        if let Some(price) = patch.price { self.price = price; }
        if let Some(in_stock) = patch.in_stock { self.in_stock = in_stock; }
    }
}

fn validate_name(name: &str) -> Result<(), ServiceError> {
    if name.is_empty() {
        return Err(ServiceError::Validation("name must not be empty".into()));
    }
    Ok(())
}

/// Typed set of patchable `Item` fields.
///
/// `description: Some(None)` clears the description; `None` leaves it alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl ItemPatch {
    /// Build a patch from an arbitrary JSON object.
    ///
    /// Known keys must carry a value of the field's type, otherwise the whole
    /// patch is rejected. Unknown keys are ignored.
    pub fn from_map(updates: &Map<String, Value>) -> Result<Self, ServiceError> {
        let mut patch = Self::default();
        for (key, value) in updates {
            match key.as_str() {
                "name" => {
                    let name = value.as_str().ok_or_else(|| mismatch(key, "a string"))?;
                    validate_name(name)?;
                    patch.name = Some(name.to_owned());
                }
                "description" => {
                    patch.description = Some(match value {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        _ => return Err(mismatch(key, "a string or null")),
                    });
                }
                "price" => {
                    patch.price = Some(value.as_f64().ok_or_else(|| mismatch(key, "a number"))?);
                }
                "in_stock" => {
                    patch.in_stock = Some(value.as_bool().ok_or_else(|| mismatch(key, "a boolean"))?);
                }
                other => debug!(field = %other, "ignoring unknown patch field"),
            }
        }
        Ok(patch)
    }
}

fn mismatch(field: &str, expected: &str) -> ServiceError {
    ServiceError::Validation(format!("field `{}` must be {}", field, expected))
}

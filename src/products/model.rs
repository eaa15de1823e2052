use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A product exactly as the catalog endpoint sent it.
///
/// The element is kept verbatim; the accessors read the well-known fields
/// (`id`, `name`, `pricePence`, `description`) and return `None` when a field
/// is missing or has another JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Value);

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self(json!({ "id": id.into(), "name": name.into() }))
    }

    pub fn with_price_pence(self, price_pence: impl Into<serde_json::Number>) -> Self {
        self.with_field("pricePence", Value::Number(price_pence.into()))
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_field("description", Value::String(description.into()))
    }

    fn with_field(mut self, key: &str, value: Value) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert(key.to_string(), value);
        }
        self
    }

    /// `id` as text; numeric ids are rendered as their JSON number
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name")?.as_str()
    }

    pub fn price_pence(&self) -> Option<f64> {
        self.0.get("pricePence")?.as_f64()
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description")?.as_str()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Product {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

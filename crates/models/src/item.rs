use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;
use crate::timestamp::Timestamp;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Persisted item record.
/// - `id` is assigned by the store and never changes
/// - `created_at` is fixed at creation; `updated_at` moves on every mutation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Item {
    /// Build a fresh record from validated input; both timestamps are `now`.
    pub fn new(id: u64, input: ItemCreate, now: Timestamp) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Input for creating an item. `id` and timestamps are generated by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ItemCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
}

impl ItemCreate {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        if let Some(d) = &self.description {
            validate_description(d)?;
        }
        validate_price(self.price)
    }
}

/// Partial update. A `None` field is left untouched.
///
/// `description` distinguishes "not sent" (`None`) from "sent as null"
/// (`Some(None)`, which clears it). `name` and `price` are not nullable, so an
/// explicit JSON `null` for either is rejected at deserialization.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemUpdate {
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl ItemUpdate {
    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(n) = &self.name {
            validate_name(n)?;
        }
        if let Some(Some(d)) = &self.description {
            validate_description(d)?;
        }
        if let Some(p) = self.price {
            validate_price(p)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into `item` and stamp `updated_at`.
    pub fn apply(self, item: &mut Item, now: Timestamp) {
        if let Some(n) = self.name {
            item.name = n;
        }
        if let Some(d) = self.description {
            item.description = d;
        }
        if let Some(p) = self.price {
            item.price = p;
        }
        item.updated_at = now;
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let len = name.chars().count();
    if len == 0 {
        return Err(ModelError::validation("name", "must not be empty"));
    }
    if len > NAME_MAX_CHARS {
        return Err(ModelError::validation(
            "name",
            format!("must be at most {NAME_MAX_CHARS} characters"),
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ModelError::validation(
            "description",
            format!("must be at most {DESCRIPTION_MAX_CHARS} characters"),
        ));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), ModelError> {
    if !price.is_finite() {
        return Err(ModelError::validation("price", "must be a finite number"));
    }
    if price <= 0.0 {
        return Err(ModelError::validation("price", "must be greater than 0"));
    }
    Ok(())
}

// Field present: wrap whatever was sent, including null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn laptop() -> ItemCreate {
        ItemCreate { name: "Laptop".into(), description: None, price: 999.99 }
    }

    #[test]
    fn create_input_validation() {
        assert!(laptop().validate().is_ok());

        let empty_name = ItemCreate { name: String::new(), ..laptop() };
        assert_eq!(empty_name.validate().unwrap_err().field(), "name");

        let long_name = ItemCreate { name: "x".repeat(101), ..laptop() };
        assert_eq!(long_name.validate().unwrap_err().field(), "name");

        // limits are in characters, not bytes
        let wide_name = ItemCreate { name: "é".repeat(100), ..laptop() };
        assert!(wide_name.validate().is_ok());

        let long_desc = ItemCreate { description: Some("d".repeat(501)), ..laptop() };
        assert_eq!(long_desc.validate().unwrap_err().field(), "description");
        let max_desc = ItemCreate { description: Some("d".repeat(500)), ..laptop() };
        assert!(max_desc.validate().is_ok());

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let input = ItemCreate { price: bad, ..laptop() };
            assert_eq!(input.validate().unwrap_err().field(), "price");
        }
    }

    #[test]
    fn update_distinguishes_absent_and_null() {
        let absent: ItemUpdate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent, ItemUpdate::default());

        let cleared: ItemUpdate = serde_json::from_value(json!({"description": null})).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: ItemUpdate = serde_json::from_value(json!({"description": "new", "price": 3.5})).unwrap();
        assert_eq!(set.description, Some(Some("new".to_string())));
        assert_eq!(set.price, Some(3.5));
        assert_eq!(set.name, None);

        assert!(serde_json::from_value::<ItemUpdate>(json!({"name": null})).is_err());
        assert!(serde_json::from_value::<ItemUpdate>(json!({"price": null})).is_err());
    }

    #[test]
    fn update_serializes_only_supplied_fields() {
        let upd = ItemUpdate { description: Some(None), ..Default::default() };
        assert_eq!(serde_json::to_value(&upd).unwrap(), json!({"description": null}));
    }

    #[test]
    fn apply_merges_supplied_fields() {
        let t0 = Timestamp::parse("2025-01-15T10:30:00.123456").unwrap();
        let mut item = Item::new(7, ItemCreate { description: Some("old".into()), ..laptop() }, t0.clone());
        let t1 = Timestamp::parse("2025-01-15T10:30:05Z").unwrap();

        ItemUpdate { price: Some(10.0), ..Default::default() }.apply(&mut item, t1.clone());
        assert_eq!(item.price, 10.0);
        assert_eq!(item.name, "Laptop");
        assert_eq!(item.description.as_deref(), Some("old"));
        assert_eq!(item.created_at, t0);
        assert_eq!(item.updated_at, t1);

        ItemUpdate { description: Some(None), ..Default::default() }.apply(&mut item, t1);
        assert_eq!(item.description, None);
    }

    #[test]
    fn item_wire_format() {
        let item = Item::new(1, laptop(), Timestamp::now());
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["id"], 1);
        assert_eq!(v["description"], serde_json::Value::Null);
        assert_eq!(v["created_at"], v["updated_at"]);
        let back: Item = serde_json::from_value(v).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn item_accepts_offset_less_timestamps() {
        let raw = json!({
            "id": 1,
            "name": "Laptop",
            "description": null,
            "price": 999.99,
            "created_at": "2025-01-15T10:30:00.123456",
            "updated_at": "2025-01-15T10:30:00.123456"
        });
        let item: Item = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.created_at.as_str(), "2025-01-15T10:30:00.123456");
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }
}

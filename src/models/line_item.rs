use serde::{Deserialize, Serialize, Serializer};
use validator::{Validate, ValidationError};

use crate::models::price::Price;

/// Free-form `key=value` attributes attached to a line item.
///
/// Keys keep the order they were first inserted in. Inserting an existing
/// key replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Details {
    entries: Vec<(String, String)>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Details {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut details = Details::new();
        for (key, value) in iter {
            details.insert(key, value);
        }
        details
    }
}

impl Serialize for Details {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// One cart entry. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    name: String,
    final_price: Price,
    details: Details,
}

impl LineItem {
    pub(crate) fn new(name: String, final_price: Price, details: Details) -> Self {
        Self {
            name,
            final_price,
            details,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn final_price(&self) -> Price {
        self.final_price
    }

    pub fn details(&self) -> &Details {
        &self.details
    }
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ItemRequest {
    #[validate(length(min = 1, message = "Item name must not be empty"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(custom = "validate_discounts")]
    pub discounts: Vec<f64>,

    #[serde(skip)]
    pub details: Details,
}

impl ItemRequest {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into().trim().to_string(),
            price,
            discounts: Vec::new(),
            details: Details::new(),
        }
    }

    pub fn with_discounts(mut self, discounts: Vec<f64>) -> Self {
        self.discounts = discounts;
        self
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }
}

fn validate_discounts(discounts: &[f64]) -> Result<(), ValidationError> {
    if discounts
        .iter()
        .any(|discount| !(0.0..=100.0).contains(discount))
    {
        let mut error = ValidationError::new("discount_range");
        error.message = Some("Discounts must be between 0 and 100".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_keep_first_insertion_order() {
        let mut details = Details::new();
        details.insert("color", "red");
        details.insert("size", "large");
        let previous = details.insert("color", "blue");

        assert_eq!(previous.as_deref(), Some("red"));
        assert_eq!(details.len(), 2);
        let pairs: Vec<_> = details.iter().collect();
        assert_eq!(pairs, vec![("color", "blue"), ("size", "large")]);
    }

    #[test]
    fn test_details_serialize_as_ordered_object() {
        let details: Details = [("size", "m"), ("color", "red")].into_iter().collect();
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(json, r#"{"size":"m","color":"red"}"#);
    }

    #[test]
    fn test_request_trims_name() {
        let request = ItemRequest::new("  Book  ", 20.0);
        assert_eq!(request.name, "Book");
    }

    #[test]
    fn test_request_validation() {
        assert!(ItemRequest::new("Book", 20.0)
            .with_discounts(vec![10.0, 50.0])
            .validate()
            .is_ok());

        assert!(ItemRequest::new("", 20.0).validate().is_err());
        assert!(ItemRequest::new("Book", -1.0).validate().is_err());
        assert!(ItemRequest::new("Book", 20.0)
            .with_discounts(vec![120.0])
            .validate()
            .is_err());
    }
}

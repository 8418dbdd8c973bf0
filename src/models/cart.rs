use thiserror::Error;

use crate::models::line_item::LineItem;
use crate::models::price::Price;

#[derive(Error, Debug, PartialEq)]
pub enum CartError {
    #[error("{name} is already in the cart")]
    DuplicateItem { name: String },
}

/// Insertion-ordered list of line items with unique, case-sensitive names.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name() == name)
    }

    /// Append `item`, rejecting it when its name is already taken.
    pub fn add(&mut self, item: LineItem) -> Result<&LineItem, CartError> {
        if self.contains(item.name()) {
            return Err(CartError::DuplicateItem {
                name: item.name().to_string(),
            });
        }

        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::final_price).sum()
    }
}

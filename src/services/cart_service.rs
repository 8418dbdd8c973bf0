use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::{
    models::{Cart, CartError, ItemRequest, LineItem},
    services::pricing::add_to_cart,
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("{name} is already in the cart")]
    DuplicateItem { name: String },

    #[error("Invalid item: {message}")]
    ValidationError { message: String },
}

impl From<CartError> for CartServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::DuplicateItem { name } => CartServiceError::DuplicateItem { name },
        }
    }
}

/// Owns the session's cart and applies the insertion rules to each request.
#[derive(Debug, Default)]
pub struct CartService {
    cart: Cart,
    strict: bool,
}

impl CartService {
    pub fn new(strict: bool) -> Self {
        Self {
            cart: Cart::new(),
            strict,
        }
    }

    /// Price the request and append it to the cart.
    ///
    /// The duplicate check runs first, on the trimmed, case-sensitive name.
    /// Field validation only runs in strict mode.
    pub fn add_item(&mut self, request: ItemRequest) -> Result<&LineItem, CartServiceError> {
        debug!(
            "Adding item '{}' at {} with {} discount(s)",
            request.name,
            request.price,
            request.discounts.len()
        );

        if self.cart.contains(&request.name) {
            info!("Skipping duplicate item '{}'", request.name);
            return Err(CartServiceError::DuplicateItem { name: request.name });
        }

        if self.strict {
            request.validate().map_err(|e| {
                warn!("Item '{}' failed validation: {}", request.name, e);
                CartServiceError::ValidationError {
                    message: validation_message(&e),
                }
            })?;
        }

        let ItemRequest {
            name,
            price,
            discounts,
            details,
        } = request;
        let item = add_to_cart(name, price, &discounts, details);

        let item = self.cart.add(item)?;
        info!("Added item '{}' at {}", item.name(), item.final_price());
        Ok(item)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }
}

/// First human readable message out of a validation failure.
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

pub mod cart;
pub mod line_item;
pub mod price;

pub use cart::{Cart, CartError};
pub use line_item::{Details, ItemRequest, LineItem};
pub use price::Price;

pub mod cart_service;
pub mod pricing;

pub use cart_service::*;
pub use pricing::*;

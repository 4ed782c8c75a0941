//! Pure data structures (DTOs) exchanged with the backend API.
//!
//! Field names on the wire are the backend's snake_case names (`product_code`,
//! `price_with_tax`, ...). Amounts are integers in the smallest currency unit.

pub mod cart_line;
pub mod product;
pub mod purchase;

pub use cart_line::*;
pub use product::*;
pub use purchase::*;

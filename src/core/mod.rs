pub mod cart_store;
pub mod demo;

pub use crate::domain::model::{Cart, CartSummary, ItemId, Quantity};
pub use crate::domain::ports::KeyValueStore;
pub use crate::utils::error::Result;
pub use cart_store::{CartStore, DEFAULT_SLOT};

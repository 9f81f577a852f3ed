use crate::core::{Cart, CartSummary, ItemId, KeyValueStore, Quantity, Result};
use tracing::{debug, info, warn};

pub const DEFAULT_SLOT: &str = "cart";

/// Cart persisted in a single slot of a [`KeyValueStore`].
///
/// The store is the only source of truth: every operation loads the slot,
/// mutates it and writes it back before returning.
pub struct CartStore<S: KeyValueStore> {
    store: S,
    slot: String,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_slot(store, DEFAULT_SLOT)
    }

    pub fn with_slot(store: S, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Reads the stored cart. Missing, unreadable or malformed data yields an
    /// empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(slot = %self.slot, "No stored cart, starting empty");
                return Cart::new();
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Failed to read cart, treating as empty");
                return Cart::new();
            }
        };

        match Cart::from_json(&raw) {
            Ok((cart, dropped)) => {
                if dropped > 0 {
                    warn!(slot = %self.slot, dropped, "Discarded zero-quantity cart entries");
                }
                debug!(slot = %self.slot, items = cart.len(), "Loaded cart");
                cart
            }
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Stored cart is malformed, treating as empty");
                Cart::new()
            }
        }
    }

    /// Overwrites the stored cart with `cart`.
    pub fn save(&mut self, cart: &Cart) -> Result<()> {
        let payload = cart.to_json()?;
        self.store.set(&self.slot, &payload)?;
        debug!(slot = %self.slot, items = cart.len(), "Saved cart");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(&self.slot)?;
        debug!(slot = %self.slot, "Cleared cart");
        Ok(())
    }

    pub fn add_one(&mut self, item: &ItemId) -> Result<()> {
        let mut cart = self.load();
        let quantity = cart.increment(item)?;
        self.save(&cart)?;
        debug!(%item, quantity, "Added one to cart");
        Ok(())
    }

    /// Removing from an absent entry is a silent no-op and does not rewrite
    /// the slot.
    pub fn remove_one(&mut self, item: &ItemId) -> Result<()> {
        let mut cart = self.load();
        match cart.decrement(item) {
            Some(quantity) => {
                self.save(&cart)?;
                debug!(%item, quantity, "Removed one from cart");
            }
            None => debug!(%item, "Item not in cart, nothing to remove"),
        }
        Ok(())
    }

    pub fn remove_all(&mut self, item: &ItemId) -> Result<()> {
        let mut cart = self.load();
        let removed = cart.remove(item);
        self.save(&cart)?;
        debug!(%item, removed = removed.unwrap_or(0), "Removed item from cart");
        Ok(())
    }

    pub fn quantity(&self, item: &ItemId) -> Quantity {
        self.load().quantity(item)
    }

    pub fn inspect(&self) -> CartSummary {
        self.load().summary()
    }

    /// Logs the cart contents prefixed with `msg`.
    pub fn display(&self, msg: &str) -> CartSummary {
        let summary = self.inspect();
        info!("{}, cart has {} item(s)", msg, summary.count);
        for (id, qty) in &summary.entries {
            info!("  Item {} has count {}", id, qty);
        }
        summary
    }
}

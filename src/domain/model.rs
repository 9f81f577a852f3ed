use crate::utils::error::{CartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque catalog identifier used as a cart key.
///
/// Numeric identifiers are stored in their decimal form, so `ItemId::numeric(1)`
/// and `ItemId::new("1")` name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses untrusted input, rejecting blank identifiers.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CartError::ValidationError {
                message: "Item identifier cannot be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn numeric(id: u64) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self::numeric(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub type Quantity = u32;

/// Item quantities held by the current user. Every stored quantity is >= 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<ItemId, Quantity>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a stored payload. Zero-quantity entries are dropped; the number
    /// of dropped entries is returned alongside the cart.
    pub fn from_json(raw: &str) -> serde_json::Result<(Self, usize)> {
        let mut items: BTreeMap<ItemId, Quantity> = serde_json::from_str(raw)?;
        let before = items.len();
        items.retain(|_, qty| *qty > 0);
        let dropped = before - items.len();
        Ok((Self { items }, dropped))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.items)
    }

    pub fn quantity(&self, item: &ItemId) -> Quantity {
        self.items.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.items.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, Quantity)> {
        self.items.iter().map(|(id, qty)| (id, *qty))
    }

    pub fn increment(&mut self, item: &ItemId) -> Result<Quantity> {
        let current = self.quantity(item);
        let next = current
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow {
                item: item.to_string(),
            })?;
        self.items.insert(item.clone(), next);
        Ok(next)
    }

    /// Returns `None` when there was nothing to decrement.
    pub fn decrement(&mut self, item: &ItemId) -> Option<Quantity> {
        let qty = self.items.get_mut(item)?;
        *qty -= 1;
        let remaining = *qty;
        if remaining == 0 {
            self.items.remove(item);
        }
        Some(remaining)
    }

    pub fn remove(&mut self, item: &ItemId) -> Option<Quantity> {
        self.items.remove(item)
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            count: self.items.len(),
            entries: self.items.iter().map(|(id, qty)| (id.clone(), *qty)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub count: usize,
    pub entries: Vec<(ItemId, Quantity)>,
}

impl fmt::Display for CartSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cart has {} item(s)", self.count)?;
        for (id, qty) in &self.entries {
            write!(f, "\n  Item {} has count {}", id, qty)?;
        }
        Ok(())
    }
}

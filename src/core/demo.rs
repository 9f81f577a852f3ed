use crate::core::{CartStore, CartSummary, ItemId, KeyValueStore, Result};

/// Runs the scripted walkthrough against `store`, displaying the cart after
/// every step. Returns the summaries in step order.
pub fn run_demo<S: KeyValueStore>(store: &mut CartStore<S>) -> Result<Vec<CartSummary>> {
    let first = ItemId::numeric(1);
    let second = ItemId::numeric(2);
    let mut summaries = Vec::with_capacity(7);

    store.clear()?;
    summaries.push(store.display("at start"));

    store.add_one(&first)?;
    summaries.push(store.display("after adding 1"));

    store.add_one(&first)?;
    summaries.push(store.display("after adding 1 again"));

    store.add_one(&second)?;
    summaries.push(store.display("after adding 2"));

    store.remove_one(&second)?;
    summaries.push(store.display("after removing 2"));

    store.remove_one(&second)?;
    summaries.push(store.display("after removing 2 again"));

    store.remove_all(&first)?;
    summaries.push(store.display("after removing all 1"));

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    #[test]
    fn test_demo_steps() {
        let mut store = CartStore::new(MemoryStore::new());
        let counts: Vec<usize> = run_demo(&mut store)
            .unwrap()
            .iter()
            .map(|s| s.count)
            .collect();

        assert_eq!(counts, vec![0, 1, 1, 2, 1, 1, 0]);
        assert!(store.load().is_empty());
    }
}

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tagdb::TagStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
}

pub fn item(id: u32) -> Item {
    Item { id }
}

/// Ids of a query result, `None` passed through
pub fn ids(items: Option<Vec<Item>>) -> Option<Vec<u32>> {
    items.map(|v| v.into_iter().map(|i| i.id).collect())
}

/// The five-item store used by the boolean scenarios:
/// 1 -> {1}, 2 -> {1, 2}, 3 -> {1, 2}, 4 -> {2}, 5 -> {3}
pub fn scenario_store() -> TagStore<Item> {
    let store = TagStore::new();
    fill_scenario(&store);
    store
}

pub fn fill_scenario(store: &TagStore<Item>) {
    store
        .add(item(1), &[1])
        .add(item(2), &[1, 2])
        .add(item(3), &[1, 2])
        .add(item(4), &[2])
        .add(item(5), &[3]);
}

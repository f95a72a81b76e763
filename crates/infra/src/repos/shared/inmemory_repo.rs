use promptbot_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

/// Finds the matching item that is ordered first by `order`
pub fn find_first_by<T, F, O, K>(collection: &Mutex<Vec<T>>, compare: F, order: O) -> Option<T>
where
    T: Clone,
    F: Fn(&T) -> bool,
    O: Fn(&T) -> K,
    K: Ord,
{
    let collection = collection.lock().unwrap();
    collection
        .iter()
        .filter(|item| compare(item))
        .min_by_key(|item| order(item))
        .cloned()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    for i in 0..collection.len() {
        if collection[i].id() == val_id {
            let deleted_val = collection.remove(i);
            return Some(deleted_val);
        }
    }
    None
}

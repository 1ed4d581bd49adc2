use steward_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

/// Replaces the stored entity with the same id, returns false if there was none
pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) -> bool {
    let mut collection = collection.lock().unwrap();
    match collection.iter_mut().find(|item| item.id() == val.id()) {
        Some(item) => {
            *item = val.clone();
            true
        }
        None => false,
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

/// Applies `update` to every item matching `compare` while holding the lock
/// and returns the updated items
pub fn update_many<T: Clone, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> Vec<T> {
    let mut collection = collection.lock().unwrap();
    let mut updated = Vec::new();
    for item in collection.iter_mut() {
        if compare(item) {
            update(item);
            updated.push(item.clone());
        }
    }
    updated
}

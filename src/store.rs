//! In-memory song list owned by the application shell.
//!
//! The shell keeps the only strong `Rc<ItemList>`; views bind to it through
//! `Weak` handles and learn about insertions and removals by subscribing a
//! [`ListObserver`]. Everything runs on the UI thread, so interior mutability
//! is plain `RefCell`.
//!
//! Each record sits behind its own [`SharedItem`] handle. Editing a record
//! borrows that record only, never the list, so the list stays readable while
//! an edit dialog is open.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::models::Item;

/// Handle to a single record in the list. Cloning the handle shares the
/// record; it does not copy it.
pub type SharedItem = Rc<RefCell<Item>>;

/// Describes a single mutation of the list, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    Added { index: usize },
    Removed { index: usize },
    Updated { index: usize },
}

/// Receives change notifications after the list has been mutated. The list is
/// no longer borrowed at that point, so observers may read it freely.
pub trait ListObserver {
    fn list_changed(&self, list: &ItemList, change: ListChange);
}

/// Order-preserving, observable sequence of songs.
pub struct ItemList {
    items: RefCell<Vec<SharedItem>>,
    observers: RefCell<Vec<Weak<dyn ListObserver>>>,
}

impl ItemList {
    pub fn new(items: Vec<Item>) -> Rc<Self> {
        Rc::new(Self {
            items: RefCell::new(items.into_iter().map(|item| Rc::new(RefCell::new(item))).collect()),
            observers: RefCell::new(Vec::new()),
        })
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Copy of the record at `index`.
    pub fn get(&self, index: usize) -> Option<Item> {
        self.items.borrow().get(index).map(|record| record.borrow().clone())
    }

    /// Shared handle to the record at `index`.
    pub fn record(&self, index: usize) -> Option<SharedItem> {
        self.items.borrow().get(index).cloned()
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.items
            .borrow()
            .iter()
            .map(|record| record.borrow().clone())
            .collect()
    }

    /// Run `f` over the current record handles without cloning them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[SharedItem]) -> R) -> R {
        f(&self.items.borrow())
    }

    /// Append a record and return its index.
    pub fn push(&self, item: Item) -> usize {
        self.push_shared(Rc::new(RefCell::new(item)))
    }

    /// Append an existing record handle, keeping its identity.
    pub fn push_shared(&self, record: SharedItem) -> usize {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(record);
            items.len() - 1
        };
        self.notify(ListChange::Added { index });
        index
    }

    pub fn remove(&self, index: usize) -> Option<Item> {
        let removed = {
            let mut items = self.items.borrow_mut();
            if index < items.len() {
                Some(items.remove(index))
            } else {
                None
            }
        };
        let record = removed?;
        self.notify(ListChange::Removed { index });
        Some(Rc::try_unwrap(record).map_or_else(|shared| shared.borrow().clone(), RefCell::into_inner))
    }

    /// Hand the record at `index` to `f` for in-place editing, then report it
    /// as updated.
    ///
    /// The list itself is not borrowed while `f` runs; `f` decides how long it
    /// borrows the record.
    pub fn edit<R>(&self, index: usize, f: impl FnOnce(&SharedItem) -> R) -> Option<R> {
        let record = self.record(index)?;
        let result = f(&record);
        // The record may have been removed or moved while `f` ran.
        let still_there = self
            .items
            .borrow()
            .get(index)
            .is_some_and(|current| Rc::ptr_eq(current, &record));
        if still_there {
            self.notify(ListChange::Updated { index });
        }
        Some(result)
    }

    /// Register an observer. Observers are held weakly and pruned once they
    /// have been dropped; registering the same observer twice is a no-op.
    pub fn subscribe(&self, observer: Weak<dyn ListObserver>) {
        let mut observers = self.observers.borrow_mut();
        if !observers.iter().any(|known| Weak::ptr_eq(known, &observer)) {
            observers.push(observer);
        }
    }

    fn notify(&self, change: ListChange) {
        let live: Vec<Rc<dyn ListObserver>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.list_changed(self, change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<(ListChange, usize)>>,
    }

    impl ListObserver for Recorder {
        fn list_changed(&self, list: &ItemList, change: ListChange) {
            self.seen.borrow_mut().push((change, list.len()));
        }
    }

    fn subscribed(list: &ItemList) -> Rc<Recorder> {
        let recorder = Rc::new(Recorder::default());
        let observer: Rc<dyn ListObserver> = recorder.clone();
        list.subscribe(Rc::downgrade(&observer));
        recorder
    }

    #[test]
    fn push_appends_in_order_and_notifies() {
        let list = ItemList::new(vec![Item::new("A", "1:00")]);
        let recorder = subscribed(&list);

        assert_eq!(list.push(Item::new("B", "2:00")), 1);
        assert_eq!(
            list.snapshot(),
            vec![Item::new("A", "1:00"), Item::new("B", "2:00")]
        );
        assert_eq!(
            *recorder.seen.borrow(),
            vec![(ListChange::Added { index: 1 }, 2)]
        );
    }

    #[test]
    fn remove_out_of_range_is_silent() {
        let list = ItemList::new(vec![Item::new("A", "1:00")]);
        let recorder = subscribed(&list);

        assert_eq!(list.remove(3), None);
        assert_eq!(list.len(), 1);
        assert!(recorder.seen.borrow().is_empty());

        assert_eq!(list.remove(0), Some(Item::new("A", "1:00")));
        assert!(list.is_empty());
        assert_eq!(
            *recorder.seen.borrow(),
            vec![(ListChange::Removed { index: 0 }, 0)]
        );
    }

    #[test]
    fn edit_mutates_in_place() {
        let list = ItemList::new(vec![Item::new("A", "1:00"), Item::new("B", "2:00")]);
        let recorder = subscribed(&list);

        let renamed = list.edit(1, |record| {
            let mut item = record.borrow_mut();
            item.name.push_str(" (live)");
            item.name.clone()
        });

        assert_eq!(renamed.as_deref(), Some("B (live)"));
        assert_eq!(list.get(1), Some(Item::new("B (live)", "2:00")));
        assert_eq!(
            *recorder.seen.borrow(),
            vec![(ListChange::Updated { index: 1 }, 2)]
        );
        assert_eq!(list.edit(5, |_| ()), None);
    }

    #[test]
    fn list_stays_readable_while_a_record_is_edited() {
        let list = ItemList::new(vec![Item::new("A", "1:00"), Item::new("B", "2:00")]);

        let seen = list.edit(0, |record| {
            let during = (list.len(), list.snapshot());
            record.borrow_mut().time = "1:30".to_string();
            during
        });

        assert_eq!(
            seen,
            Some((2, vec![Item::new("A", "1:00"), Item::new("B", "2:00")]))
        );
        assert_eq!(list.get(0), Some(Item::new("A", "1:30")));
    }

    #[test]
    fn pushed_handle_keeps_identity() {
        let list = ItemList::new(Vec::new());
        let record = Rc::new(RefCell::new(Item::new("A", "1:00")));

        let index = list.push_shared(record.clone());
        record.borrow_mut().name = "A2".to_string();

        assert_eq!(list.get(index), Some(Item::new("A2", "1:00")));
        assert!(list.record(index).is_some_and(|stored| Rc::ptr_eq(&stored, &record)));
    }

    #[test]
    fn subscribing_twice_notifies_once() {
        let list = ItemList::new(Vec::new());
        let recorder = Rc::new(Recorder::default());
        let observer: Rc<dyn ListObserver> = recorder.clone();
        list.subscribe(Rc::downgrade(&observer));
        list.subscribe(Rc::downgrade(&observer));

        list.push(Item::new("A", "1:00"));
        assert_eq!(recorder.seen.borrow().len(), 1);
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let list = ItemList::new(Vec::new());
        let recorder = subscribed(&list);
        drop(recorder);

        list.push(Item::new("A", "1:00"));
        assert!(list.observers.borrow().is_empty());
    }
}

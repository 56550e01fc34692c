use std::cell::{Cell, RefCell};
use std::ptr;
use std::rc::{Rc, Weak};

use crate::models::Item;
use crate::store::{ItemList, ListChange, ListObserver};

/// Callback fired with the newly selected record (or `None`).
type SelectionListener = Box<dyn Fn(Option<&Item>)>;

/// A table column: a header plus the accessor that reads the cell text from a
/// record.
#[derive(Clone, Copy)]
pub struct Column {
    title: &'static str,
    value: fn(&Item) -> &str,
}

impl Column {
    pub fn new(title: &'static str, value: fn(&Item) -> &str) -> Self {
        Self { title, value }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn cell<'a>(&self, item: &'a Item) -> &'a str {
        (self.value)(item)
    }
}

/// Live view over an [`ItemList`] with single-row selection.
///
/// The table never copies the list: rows are projected from the bound list on
/// every call to [`SongTable::rows`].
pub struct SongTable {
    columns: Vec<Column>,
    binding: Rc<Binding>,
}

/// Selection state shared with the bound list as its observer.
struct Binding {
    items: RefCell<Weak<ItemList>>,
    selected: Cell<Option<usize>>,
    listeners: RefCell<Vec<SelectionListener>>,
}

impl Default for SongTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SongTable {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            binding: Rc::new(Binding {
                items: RefCell::new(Weak::new()),
                selected: Cell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn configure_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Display `list` from now on. The previous selection is dropped.
    /// Binding the list that is already shown only resets the selection.
    pub fn set_items(&mut self, list: &Rc<ItemList>) {
        self.binding.set_selected(None);
        if ptr::eq(self.binding.items.borrow().as_ptr(), Rc::as_ptr(list)) {
            return;
        }
        *self.binding.items.borrow_mut() = Rc::downgrade(list);
        let observer: Rc<dyn ListObserver> = self.binding.clone();
        list.subscribe(Rc::downgrade(&observer));
    }

    pub fn on_selection_changed(&mut self, listener: impl Fn(Option<&Item>) + 'static) {
        self.binding.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.binding.list().map_or(0, |list| list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.binding.selected.get()
    }

    pub fn selected_item(&self) -> Option<Item> {
        let index = self.selected_index()?;
        self.binding.list()?.get(index)
    }

    /// Select a row. Indices past the end clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        let len = self.len();
        self.binding.set_selected(index.filter(|&index| index < len));
    }

    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    /// Move the selection by `offset` rows, clamped to the table. With nothing
    /// selected, moving down starts at the top and moving up at the bottom.
    pub fn move_selection(&mut self, offset: isize) {
        let len = self.len();
        if len == 0 {
            return;
        }
        let next = match self.selected_index() {
            None if offset < 0 => len - 1,
            None => 0,
            Some(current) => {
                let max = len as isize - 1;
                (current as isize + offset).clamp(0, max) as usize
            }
        };
        self.select(Some(next));
    }

    pub fn select_first(&mut self) {
        if !self.is_empty() {
            self.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.len();
        if len > 0 {
            self.select(Some(len - 1));
        }
    }

    /// Cell text for every row, in list order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let Some(list) = self.binding.list() else {
            return Vec::new();
        };
        list.with_items(|items| {
            items
                .iter()
                .map(|record| {
                    let item = record.borrow();
                    self.columns
                        .iter()
                        .map(|column| column.cell(&item).to_string())
                        .collect()
                })
                .collect()
        })
    }
}

impl Binding {
    fn list(&self) -> Option<Rc<ItemList>> {
        self.items.borrow().upgrade()
    }

    fn set_selected(&self, next: Option<usize>) {
        if self.selected.replace(next) != next {
            self.fire(next);
        }
    }

    fn fire(&self, index: Option<usize>) {
        let item = index.and_then(|index| self.list().and_then(|list| list.get(index)));
        tracing::debug!(?index, "song selection changed");
        for listener in self.listeners.borrow().iter() {
            listener(item.as_ref());
        }
    }
}

impl ListObserver for Binding {
    fn list_changed(&self, list: &ItemList, change: ListChange) {
        if !ptr::eq(self.items.borrow().as_ptr(), list) {
            return;
        }
        let Some(selected) = self.selected.get() else {
            return;
        };
        if let ListChange::Removed { index } = change {
            if index == selected {
                // The selected record is gone: fall through to its successor,
                // or the new last row, so the selection never dangles.
                let next = if list.is_empty() {
                    None
                } else {
                    Some(index.min(list.len() - 1))
                };
                self.selected.set(next);
                self.fire(next);
            } else if index < selected {
                self.selected.set(Some(selected - 1));
            }
        }
    }
}

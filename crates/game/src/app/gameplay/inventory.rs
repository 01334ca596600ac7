/// Fixed-capacity item list mirrored into display slots. Every mutation
/// rewrites all slots; slot i shows item i or is empty.
#[derive(Debug, Default)]
pub(crate) struct Inventory {
    items: Vec<Rc<Item>>,
    slots: Vec<Option<Rc<Item>>>,
    open: bool,
}

impl Inventory {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            slots: vec![None; capacity],
            open: false,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn item_count(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn slot(&self, index: usize) -> Option<&Rc<Item>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub(crate) fn add_item(&mut self, item: Rc<Item>) -> bool {
        if self.items.len() >= self.slots.len() {
            info!("inventory is full");
            return false;
        }
        self.items.push(item);
        self.sync_slots();
        true
    }

    /// Removes the first matching reference, compared by identity rather
    /// than by value. No-op when absent.
    pub(crate) fn remove_item(&mut self, item: &Rc<Item>) {
        let Some(index) = self
            .items
            .iter()
            .position(|held| Rc::ptr_eq(held, item))
        else {
            return;
        };
        self.items.remove(index);
        self.sync_slots();
    }

    fn sync_slots(&mut self) {
        if self.items.len() > self.slots.len() {
            error!(
                items = self.items.len(),
                slots = self.slots.len(),
                "inventory item count exceeds slot count"
            );
            return;
        }
        for index in 0..self.slots.len() {
            self.slots[index] = self.items.get(index).cloned();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    PauseToggled,
    InventoryToggled,
    InventorySlotCleared,
    CharacterMoved,
    CharacterStopped,
    CharacterAttacked,
    ItemCollected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct EventPayload {
    pub(crate) trigger: Option<EntityId>,
    pub(crate) target: Option<EntityId>,
    pub(crate) target_position: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListenerId(u64);

/// Outbox handed to event callbacks and to anything that emits outside a
/// dispatch. A publish issued while the bus is dispatching lands here and
/// is drained FIFO once the current chain has finished, so nested
/// publishes never interleave with the chain that caused them.
#[derive(Debug, Default)]
pub(crate) struct EventWriter {
    queue: VecDeque<(EventKind, EventPayload)>,
}

impl EventWriter {
    pub(crate) fn publish(&mut self, kind: EventKind, payload: EventPayload) {
        self.queue.push_back((kind, payload));
    }

    pub(crate) fn pop(&mut self) -> Option<(EventKind, EventPayload)> {
        self.queue.pop_front()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

type EventCallback<C> = Box<dyn FnMut(&mut C, &mut EventWriter, &EventPayload)>;

struct Listener<C> {
    id: ListenerId,
    callback: EventCallback<C>,
}

pub(crate) struct EventBus<C> {
    listeners: HashMap<EventKind, Vec<Listener<C>>>,
    next_listener_id: u64,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            next_listener_id: 0,
        }
    }
}

impl<C> EventBus<C> {
    /// Appends the callback to the kind's chain, creating the chain if
    /// absent. Duplicate callbacks are chained, not deduplicated.
    pub(crate) fn subscribe(
        &mut self,
        kind: EventKind,
        callback: impl FnMut(&mut C, &mut EventWriter, &EventPayload) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id = self.next_listener_id.saturating_add(1);
        self.listeners.entry(kind).or_default().push(Listener {
            id,
            callback: Box::new(callback),
        });
        id
    }

    pub(crate) fn unsubscribe(&mut self, kind: EventKind, id: ListenerId) {
        let Some(chain) = self.listeners.get_mut(&kind) else {
            return;
        };
        chain.retain(|listener| listener.id != id);
        if chain.is_empty() {
            self.listeners.remove(&kind);
        }
    }

    pub(crate) fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub(crate) fn publish(&mut self, ctx: &mut C, kind: EventKind, payload: EventPayload) {
        let mut deferred = EventWriter::default();
        self.dispatch(ctx, &mut deferred, kind, &payload);
        while let Some((kind, payload)) = deferred.pop() {
            self.dispatch(ctx, &mut deferred, kind, &payload);
        }
    }

    fn dispatch(
        &mut self,
        ctx: &mut C,
        deferred: &mut EventWriter,
        kind: EventKind,
        payload: &EventPayload,
    ) {
        // Callbacks only see ctx and the writer, never the registry, so
        // the chain can be taken out for the walk and put back whole.
        let Some(mut chain) = self.listeners.remove(&kind) else {
            return;
        };
        for listener in &mut chain {
            (listener.callback)(ctx, deferred, payload);
        }
        self.listeners.insert(kind, chain);
    }
}

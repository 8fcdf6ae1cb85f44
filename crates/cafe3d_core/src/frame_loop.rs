//! Frame loop
//!
//! The FrameLoop holds every registered producer and fans a tick out to them.
//! Keys are generational, so a key kept after `unregister` never reaches a
//! producer registered later in the same slot.

use slotmap::{new_key_type, SlotMap};

use crate::clock::Tick;
use crate::producer::{DirtyFlags, DrawList, Producer};

new_key_type! {
    /// Key to a producer registered in a [`FrameLoop`]
    pub struct ProducerKey;
}

/// Owner of all per-frame producers
#[derive(Default)]
pub struct FrameLoop {
    producers: SlotMap<ProducerKey, Box<dyn Producer>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            producers: SlotMap::with_key(),
        }
    }

    /// Register a producer; it is advanced on every tick from now on
    pub fn register<P: Producer + 'static>(&mut self, producer: P) -> ProducerKey {
        self.register_boxed(Box::new(producer))
    }

    pub fn register_boxed(&mut self, producer: Box<dyn Producer>) -> ProducerKey {
        log::debug!("Registering producer '{}'", producer.name());
        self.producers.insert(producer)
    }

    /// Remove a producer, returning it if the key was live
    pub fn unregister(&mut self, key: ProducerKey) -> Option<Box<dyn Producer>> {
        let removed = self.producers.remove(key);
        if let Some(producer) = &removed {
            log::debug!("Unregistered producer '{}'", producer.name());
        }
        removed
    }

    pub fn contains(&self, key: ProducerKey) -> bool {
        self.producers.contains_key(key)
    }

    pub fn get(&self, key: ProducerKey) -> Option<&dyn Producer> {
        self.producers.get(key).map(|p| p.as_ref())
    }

    /// Advance every producer once, returning the union of their reports
    pub fn tick(&mut self, tick: &Tick) -> DirtyFlags {
        let mut dirty = DirtyFlags::NONE;
        for producer in self.producers.values_mut() {
            dirty |= producer.advance(tick);
        }
        dirty
    }

    /// Let every producer append its drawables
    pub fn collect<'a>(&'a self, list: &mut DrawList<'a>) {
        for producer in self.producers.values() {
            producer.emit(list);
        }
    }

    /// Collect into a fresh draw list
    pub fn draw_list(&self) -> DrawList<'_> {
        let mut list = DrawList::new();
        self.collect(&mut list);
        list
    }

    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }
}

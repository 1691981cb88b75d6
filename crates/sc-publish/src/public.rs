//! The readable side of publishing: attribute slots and event signals.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::warn;

use crate::{Delivery, PublishConfig, Signal};

#[derive(Debug, Default)]
struct Slots {
    declared:   bool,
    attributes: BTreeMap<String, Value>,
    events:     BTreeMap<String, Arc<Signal>>,
}

/// Latest published attribute values and event signals, readable from any
/// task.  Share it as `Arc<PublicInterface>`.
///
/// The set of fields is fixed by the first [`declare`](Self::declare); a
/// later declaration is ignored with a warning.
#[derive(Debug, Default)]
pub struct PublicInterface {
    slots: RwLock<Slots>,
}

impl PublicInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot for every `Attribute` field and a signal for every
    /// `Event` field of `config`.  Returns `false` (and changes nothing) if
    /// the interface was already declared.
    pub fn declare(&self, config: &PublishConfig) -> bool {
        let mut slots = self.slots.write();
        if slots.declared {
            warn!(fields = config.len(), "public interface already declared; keeping the first");
            return false;
        }
        for (name, delivery) in config.fields() {
            match delivery {
                Delivery::Attribute => {
                    slots.attributes.insert(name.clone(), Value::Null);
                }
                Delivery::Event => {
                    slots.events.insert(name.clone(), Arc::new(Signal::new()));
                }
                Delivery::Hateoas { .. } | Delivery::Rson { .. } => {}
            }
        }
        slots.declared = true;
        true
    }

    pub fn is_declared(&self) -> bool {
        self.slots.read().declared
    }

    /// The last value published for attribute `name`.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.slots.read().attributes.get(name).cloned()
    }

    /// The signal for event `name`.
    pub fn event(&self, name: &str) -> Option<Arc<Signal>> {
        self.slots.read().events.get(name).cloned()
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.slots.read().attributes.keys().cloned().collect()
    }

    /// Store `value` in attribute slot `name`.  Undeclared names are ignored.
    pub(crate) fn store(&self, name: &str, value: Value) {
        if let Some(slot) = self.slots.write().attributes.get_mut(name) {
            *slot = value;
        }
    }
}

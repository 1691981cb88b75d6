//! `Publisher`: bridges `sc_sim::Publish` to a [`PublishConfig`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use sc_core::Tick;
use sc_sim::{BoxError, Publish, TickScope};

use crate::delivery::truthy;
use crate::{Delivery, PublicInterface, PublishConfig, PublishError, PublishResult};

/// A [`Publish`] implementation that delivers every configured field once
/// per tick, in configuration order.
///
/// Errors abort the tick: a failed file write is returned to the Shifter,
/// which stops the run and reports it.
pub struct Publisher {
    config:    PublishConfig,
    public:    Arc<PublicInterface>,
    published: u64,
}

impl Publisher {
    /// Declare `config` on `public` and return a publisher for it.
    ///
    /// If `public` was already declared, its existing fields are kept and
    /// attributes or events unknown to it are not mirrored.
    pub fn new(config: PublishConfig, public: Arc<PublicInterface>) -> Self {
        public.declare(&config);
        Self { config, public, published: 0 }
    }

    /// A publisher with its own fresh public interface.
    pub fn standalone(config: PublishConfig) -> Self {
        Self::new(config, Arc::new(PublicInterface::new()))
    }

    pub fn public(&self) -> &Arc<PublicInterface> {
        &self.public
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Number of ticks delivered so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Deliver every configured field of `scope`.
    pub fn deliver(&mut self, scope: &TickScope<'_>) -> PublishResult<()> {
        for (name, delivery) in self.config.fields() {
            match delivery {
                Delivery::Attribute => {
                    let value = require(scope, name, name)?;
                    self.public.store(name, value);
                }
                Delivery::Event => {
                    let value = require(scope, name, name)?;
                    if let Some(signal) = self.public.event(name) {
                        if truthy(&value) { signal.set() } else { signal.clear() }
                    }
                }
                Delivery::Hateoas { attr, dst } => {
                    let mut value = require(scope, name, attr)?;
                    link_items(&mut value);
                    let mut bytes = serde_json::to_vec_pretty(&value)?;
                    bytes.push(b'\n');
                    dst.write(&bytes)?;
                }
                Delivery::Rson { attr, dst } => {
                    let value = require(scope, name, attr)?;
                    let mut elements = match value {
                        Value::Array(elements) => elements,
                        other => {
                            return Err(PublishError::NotAList { field: name.clone(), kind: kind(&other) });
                        }
                    };
                    if let Some(record) = TickScope::record_type(attr) {
                        elements.iter_mut().for_each(|e| tag(e, record));
                    }
                    let mut bytes = Vec::new();
                    for element in &elements {
                        serde_json::to_writer(&mut bytes, element)?;
                        bytes.push(b'\n');
                    }
                    dst.write(&bytes)?;
                }
            }
        }
        self.published += 1;
        debug!(ts = %scope.tick.ts, fields = self.config.len(), "published");
        Ok(())
    }
}

impl Publish for Publisher {
    fn publish(&mut self, scope: &TickScope<'_>) -> Result<(), BoxError> {
        self.deliver(scope).map_err(Into::into)
    }

    fn finish(&mut self, last: &Tick) -> Result<(), BoxError> {
        info!(ticks = self.published, last = %last, "publishing finished");
        Ok(())
    }
}

fn require(scope: &TickScope<'_>, field: &str, attr: &str) -> PublishResult<Value> {
    scope.value(attr)?.ok_or_else(|| PublishError::MissingValue {
        field: field.to_owned(),
        attr:  attr.to_owned(),
    })
}

/// Give every object in a document's `items` list empty `_links` and its
/// `_type`.
fn link_items(doc: &mut Value) {
    let record = TickScope::record_type("items");
    if let Some(Value::Array(items)) = doc.get_mut("items") {
        for item in items.iter_mut() {
            if let Value::Object(fields) = &mut *item {
                fields.entry("_links").or_insert_with(|| Value::Array(Vec::new()));
            }
            if let Some(record) = record {
                tag(item, record);
            }
        }
    }
}

fn tag(record: &mut Value, type_name: &str) {
    if let Value::Object(fields) = record {
        fields.entry("_type").or_insert_with(|| Value::String(type_name.to_owned()));
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "a list",
        Value::Object(_) => "an object",
    }
}

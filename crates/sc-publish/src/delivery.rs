//! What gets published, and how.

use std::path::Path;

use serde_json::Value;

use crate::Endpoint;

/// How one published field is delivered.
#[derive(Clone, Debug)]
pub enum Delivery {
    /// Mirror the tick value of the same name into the public interface.
    Attribute,
    /// Set the public signal of the same name while the tick value is truthy,
    /// clear it otherwise.
    Event,
    /// Write the tick value `attr` as a pretty-printed JSON document.  Each
    /// object in its `items` list gains `_links: []` and a `_type`.
    Hateoas { attr: String, dst: Endpoint },
    /// Write each element of the list at tick value `attr` as one compact
    /// JSON line, tagged with its `_type`.
    Rson { attr: String, dst: Endpoint },
}

/// Ordered `(field name, delivery)` pairs.  Fields are delivered in order.
#[derive(Clone, Debug, Default)]
pub struct PublishConfig {
    fields: Vec<(String, Delivery)>,
}

impl PublishConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn with(mut self, name: impl Into<String>, delivery: Delivery) -> Self {
        self.fields.push((name.into(), delivery));
        self
    }

    pub fn fields(&self) -> &[(String, Delivery)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The Shifter's standard outputs under `parent`:
    ///
    /// | Field       | Delivery                                  |
    /// |-------------|-------------------------------------------|
    /// | `tick`      | attribute                                 |
    /// | `bridging`  | attribute                                 |
    /// | `page`      | attribute                                 |
    /// | `colliding` | event                                     |
    /// | `positions` | `page` as JSON at `parent/positions.json` |
    /// | `stages`    | `items` as lines at `parent/stages.rson`  |
    pub fn for_shifter(parent: &Path) -> Self {
        Self::new()
            .with("tick", Delivery::Attribute)
            .with("bridging", Delivery::Attribute)
            .with("page", Delivery::Attribute)
            .with("colliding", Delivery::Event)
            .with("positions", Delivery::Hateoas {
                attr: "page".to_owned(),
                dst:  Endpoint::File(parent.join("positions.json")),
            })
            .with("stages", Delivery::Rson {
                attr: "items".to_owned(),
                dst:  Endpoint::File(parent.join("stages.rson")),
            })
    }
}

/// Whether a tick value raises an event: `true`, a non-zero number, or a
/// non-empty string, list, or object.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null      => false,
        Value::Bool(b)   => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a)  => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

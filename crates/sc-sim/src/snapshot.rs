//! The per-tick snapshot page and the scope handed to publishers.
//!
//! # Page shape
//!
//! ```json
//! {
//!   "info":    {"title": "Shifter", "version": "0.1.0", "ts": 1718000000.25, "interval": 200},
//!   "nav":     [],
//!   "items":   [{"uuid": "…32 hex…", "label": "Bus", "class": "vehicle", "pos": ["160", "100"]}],
//!   "options": [{"label": "Bus - A", "deadline": "5"}]
//! }
//! ```
//!
//! Coordinates and deadlines are exact decimals and serialize as strings.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Value, json};

use sc_core::{Scalar, Tick};

use crate::{Cast, PendingMap};

/// Crate version reported in every page.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageInfo {
    pub title:    String,
    pub version:  String,
    /// Wall-clock seconds since the Unix epoch when the page was built.
    pub ts:       f64,
    /// Suggested client refresh interval in milliseconds.
    pub interval: u64,
}

/// One positioned stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageItem {
    pub uuid:  String,
    pub label: String,
    pub class: String,
    pub pos:   [Scalar; 2],
}

/// One pending collision, offered as a choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageOption {
    /// `"<first label> - <second label>"`.
    pub label:    String,
    /// Simulation time left before the collision expires.
    pub deadline: Scalar,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    pub info:    PageInfo,
    pub nav:     Vec<Value>,
    pub items:   Vec<PageItem>,
    pub options: Vec<PageOption>,
}

impl Page {
    /// An empty page stamped with the current wall-clock time.
    pub fn new(title: &str, interval: u64) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or_default();
        Self {
            info: PageInfo { title: title.to_owned(), version: VERSION.to_owned(), ts, interval },
            nav:     Vec::new(),
            items:   Vec::new(),
            options: Vec::new(),
        }
    }
}

// ── TickScope ─────────────────────────────────────────────────────────────────

/// Everything a publisher may read at the end of one tick, by field name.
///
/// | Name        | Value                                              |
/// |-------------|----------------------------------------------------|
/// | `tick`      | `{start, stop, step, ts}`                          |
/// | `page`      | the full [`Page`]                                  |
/// | `items`     | `page.items`                                       |
/// | `options`   | `page.options`                                     |
/// | `bridging`  | pending collisions `[{stages: [a, b], expiry}]`    |
/// | `colliding` | `true` if any collision is pending                 |
/// | `cast`      | `{actor: stage}`                                   |
#[derive(Copy, Clone, Debug)]
pub struct TickScope<'a> {
    pub tick:      Tick,
    pub page:      &'a Page,
    pub items:     &'a [PageItem],
    pub options:   &'a [PageOption],
    pub bridging:  &'a PendingMap,
    pub colliding: bool,
    pub cast:      &'a Cast,
}

impl TickScope<'_> {
    pub const FIELDS: [&'static str; 7] =
        ["tick", "page", "items", "options", "bridging", "colliding", "cast"];

    /// Type name of the records in list field `name`.  File deliveries tag
    /// each record with it as `_type`.
    pub fn record_type(name: &str) -> Option<&'static str> {
        match name {
            "items"    => Some("PageItem"),
            "options"  => Some("PageOption"),
            "bridging" => Some("Bridge"),
            _ => None,
        }
    }

    /// The JSON value of field `name`, or `None` if there is no such field.
    pub fn value(&self, name: &str) -> serde_json::Result<Option<Value>> {
        let value = match name {
            "tick"      => serde_json::to_value(self.tick)?,
            "page"      => serde_json::to_value(self.page)?,
            "items"     => serde_json::to_value(self.items)?,
            "options"   => serde_json::to_value(self.options)?,
            "colliding" => Value::Bool(self.colliding),
            "cast"      => serde_json::to_value(self.cast)?,
            "bridging"  => Value::Array(
                self.bridging
                    .iter()
                    .map(|(pair, expiry)| json!({ "stages": pair, "expiry": expiry }))
                    .collect(),
            ),
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}

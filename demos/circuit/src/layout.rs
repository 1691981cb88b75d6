//! The demo theatre: three fixed zones and a bus on a four-corner loop.
//!
//! Coordinates are screen pixels, so the page renders directly onto an
//! SVG canvas of roughly 640 x 480.

use rust_decimal_macros::dec;

use sc_core::{Point3, StageId};
use sc_motion::Itinerary;
use sc_sim::{Theatre, TheatreBuilder};

/// Stage ids for the pieces of the layout the caller cares about.
pub struct Landmarks {
    pub zones: [StageId; 3],
    pub bus:   StageId,
}

/// Build the circuit theatre.  Stage keys derive from `seed`.
pub fn build_theatre(seed: u64) -> anyhow::Result<(Theatre, Landmarks)> {
    let mut b = TheatreBuilder::new(seed);

    let zone_a = b.fixed("A", "zone", Point3::new(285, 60, 0), dec!(45))?;
    let zone_b = b.fixed("B", "zone", Point3::new(530, 245, 0), dec!(50))?;
    let zone_c = b.fixed("C", "zone", Point3::new(120, 245, 0), dec!(42))?;

    // Clockwise from the north-west corner, 24 time units per side.
    let route = Itinerary::circuit(
        &[
            Point3::new(160, 100, 0),
            Point3::new(484, 106, 0),
            Point3::new(478, 386, 0),
            Point3::new(160, 386, 0),
        ],
        dec!(24),
    )?;
    let bus = b.mobile("Bus", "vehicle", route, dec!(10))?;

    Ok((b.build(), Landmarks { zones: [zone_a, zone_b, zone_c], bus }))
}

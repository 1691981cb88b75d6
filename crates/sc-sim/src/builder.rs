//! Fluent builder for constructing a [`Shifter`].

use tokio::sync::mpsc;

use sc_core::{ActorId, Scalar, StageId};

use crate::{Cast, Collisions, Pacing, Publish, RunState, Shifter, ShifterConfig, SimError, SimResult, Theatre};

/// Fluent builder for [`Shifter<P>`].
///
/// # Required inputs
///
/// - [`Theatre`]: from [`TheatreBuilder`][crate::TheatreBuilder]
/// - `P: Publish`: where snapshots go (e.g. `sc_publish::Publisher`)
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                         |
/// |----------------------------|---------------------------------|
/// | `.config(c)`               | `ShifterConfig::default()`      |
/// | `.title(s)`                | `"Shifter"`                     |
/// | `.collision_window(w)`     | `5`                             |
/// | `.pacing(p)`               | `RealTime { floor: 200 ms }`    |
/// | `.initial_placements(v)`   | empty cast                      |
///
/// # Example
///
/// ```rust,ignore
/// let mut shifter = ShifterBuilder::new(theatre, NoopPublisher)
///     .pacing(Pacing::Immediate)
///     .initial_placements(vec![bus, bus])
///     .build()?;
/// shifter.run(dec!(0), dec!(10), dec!(1)).await?;
/// ```
pub struct ShifterBuilder<P: Publish> {
    theatre:    Theatre,
    publisher:  P,
    config:     ShifterConfig,
    placements: Vec<StageId>,
}

impl<P: Publish> ShifterBuilder<P> {
    pub fn new(theatre: Theatre, publisher: P) -> Self {
        Self {
            theatre,
            publisher,
            config:     ShifterConfig::default(),
            placements: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ShifterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn collision_window(mut self, window: Scalar) -> Self {
        self.config.collision_window = window;
        self
    }

    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.config.pacing = pacing;
        self
    }

    /// Place actor `i` on stage `placements[i]`.
    pub fn initial_placements(mut self, placements: Vec<StageId>) -> Self {
        self.placements = placements;
        self
    }

    /// Validate inputs and return a ready-to-run [`Shifter`].
    pub fn build(self) -> SimResult<Shifter<P>> {
        if self.config.inbox_capacity == 0 {
            return Err(SimError::Config("inbox capacity must be at least 1".to_owned()));
        }
        if self.config.collision_window < Scalar::ZERO {
            return Err(SimError::Config(format!(
                "collision window must not be negative, got {}",
                self.config.collision_window
            )));
        }

        let mut cast = Cast::new();
        for (i, &stage) in self.placements.iter().enumerate() {
            if !self.theatre.contains(stage) {
                return Err(SimError::UnknownStage(stage));
            }
            let actor = ActorId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many actors: {}", self.placements.len())))?;
            cast.place(actor, stage);
        }

        let (inbox_tx, inbox_rx) = mpsc::channel(self.config.inbox_capacity);

        Ok(Shifter {
            config:     self.config,
            theatre:    self.theatre,
            collisions: Collisions::new(),
            cast,
            publisher:  self.publisher,
            inbox_tx,
            inbox_rx,
            state:      RunState::Idle,
        })
    }
}

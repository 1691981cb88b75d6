//! The `Shifter` and its tick loop.

use std::time::Duration;

use rust_decimal::prelude::ToPrimitive;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use sc_core::{ActorId, CoreError, RunConfig, Scalar, StageId, Tick};
use sc_motion::{Impulse, MotionResult};

use crate::{
    Cast, Collisions, MoveRequest, Page, PageItem, PageOption, Publish, RequestRejected,
    SimError, SimResult, Theatre, TickScope,
};

// ── Configuration ─────────────────────────────────────────────────────────────

/// What the Shifter waits for between ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pacing {
    /// Only yield to the scheduler.  For tests and batch runs.
    Immediate,
    /// Sleep for the tick's step in seconds, but never less than `floor`.
    RealTime { floor: Duration },
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::RealTime { floor: Duration::from_millis(200) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShifterConfig {
    /// `info.title` of every published page.
    pub title:            String,
    /// `info.interval` of every published page, in milliseconds.
    pub interval_ms:      u64,
    /// Simulation time a detected collision stays pending.
    pub collision_window: Scalar,
    pub pacing:           Pacing,
    /// Capacity of the relocation request inbox.
    pub inbox_capacity:   usize,
}

impl Default for ShifterConfig {
    fn default() -> Self {
        Self {
            title:            "Shifter".to_owned(),
            interval_ms:      200,
            collision_window: Scalar::from(5),
            pacing:           Pacing::default(),
            inbox_capacity:   64,
        }
    }
}

/// Lifecycle of a [`Shifter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Terminated,
}

// ── Shifter ───────────────────────────────────────────────────────────────────

/// Moves stages around a [`Theatre`], detects collisions, and publishes one
/// snapshot per tick.
///
/// Per tick, at simulation time `ts`:
///
/// 1. **Requests**: drain the inbox; apply valid [`MoveRequest`]s to the cast.
/// 2. **Movement**: position every stage ([`Theatre::movement`]).
/// 3. **Evict**: drop pending collisions that expired before `ts`.
/// 4. **Detect**: observe every positioned stage with expiry
///    `ts + collision_window`.
/// 5. **Publish**: build the [`Page`] and call [`Publish::publish`] once.
///
/// Create via [`ShifterBuilder`][crate::ShifterBuilder].
pub struct Shifter<P: Publish> {
    pub(crate) config:     ShifterConfig,
    pub(crate) theatre:    Theatre,
    pub(crate) collisions: Collisions,
    pub(crate) cast:       Cast,
    pub(crate) publisher:  P,
    pub(crate) inbox_tx:   mpsc::Sender<MoveRequest>,
    pub(crate) inbox_rx:   mpsc::Receiver<MoveRequest>,
    pub(crate) state:      RunState,
}

impl<P: Publish> Shifter<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run ticks at `ts = start, start + step, …` while `ts < stop`.
    ///
    /// Starts with no pending collisions.  Returns the last tick published
    /// and then calls [`Publish::finish`] with it.
    pub async fn run(&mut self, start: Scalar, stop: Scalar, step: Scalar) -> SimResult<Tick> {
        let run = RunConfig::new(start, stop, step);
        run.validate()?;

        info!(%start, %stop, %step, stages = self.theatre.len(), "run start");
        self.state = RunState::Running;
        // Pending collisions belong to one run.
        self.collisions = Collisions::new();

        let mut ts = start;
        let mut last = None;
        while ts < stop {
            last = Some(self.tick(&run, ts)?);
            ts += step;
            self.pace(step).await;
        }

        self.state = RunState::Terminated;
        let last = last.ok_or(CoreError::EmptyRun { start, stop })?;
        self.publisher.finish(&last).map_err(SimError::Publish)?;
        info!(ts = %last.ts, "run complete");
        Ok(last)
    }

    /// Execute one tick of `run` at simulation time `ts`.
    pub fn tick(&mut self, run: &RunConfig, ts: Scalar) -> SimResult<Tick> {
        self.drain_inbox(ts);

        let moved: Vec<(StageId, Impulse)> =
            self.theatre.movement(run.start, ts).collect::<MotionResult<_>>()?;

        let evicted = self.collisions.evict_expired(ts);
        let expiry = ts + self.config.collision_window;

        let mut page = Page::new(&self.config.title, self.config.interval_ms);
        for (stage, impulse) in &moved {
            self.collisions.observe(&self.theatre, *stage, impulse, expiry);
            if let Some(meta) = self.theatre.stage(*stage) {
                page.items.push(PageItem {
                    uuid:  meta.key.clone(),
                    label: meta.label.clone(),
                    class: meta.class.clone(),
                    pos:   impulse.pos.xy(),
                });
            }
        }
        page.options = self
            .collisions
            .pending()
            .iter()
            .map(|(pair, expiry)| PageOption {
                label:    format!("{} - {}", self.label(pair.first()), self.label(pair.second())),
                deadline: *expiry - ts,
            })
            .collect();

        let tick = run.tick_at(ts);
        let scope = TickScope {
            tick,
            page:      &page,
            items:     &page.items,
            options:   &page.options,
            bridging:  self.collisions.pending(),
            colliding: !self.collisions.is_empty(),
            cast:      &self.cast,
        };
        self.publisher.publish(&scope).map_err(SimError::Publish)?;

        debug!(
            ts       = %ts,
            items    = page.items.len(),
            pending  = self.collisions.len(),
            evicted,
            "tick"
        );
        Ok(tick)
    }

    /// Validate `request` at simulation time `ts` and, if it passes, move
    /// the actor.
    pub fn relocate(&mut self, request: MoveRequest, ts: Scalar) -> Result<(), RequestRejected> {
        let from = request.validate(self.collisions.pending(), &self.cast, ts)?;
        self.cast.place(request.actor, request.destination);
        info!(
            actor = %request.actor,
            from  = self.label(from),
            to    = self.label(request.destination),
            "actor moved"
        );
        Ok(())
    }

    /// A sender for relocation requests, applied at the start of the next
    /// tick.  Hand one to [`watch`][crate::watch] per input source.
    pub fn inbox(&self) -> mpsc::Sender<MoveRequest> {
        self.inbox_tx.clone()
    }

    /// Put `actor` on `stage` directly, without a collision.
    pub fn place(&mut self, actor: ActorId, stage: StageId) -> SimResult<Option<StageId>> {
        if !self.theatre.contains(stage) {
            return Err(SimError::UnknownStage(stage));
        }
        Ok(self.cast.place(actor, stage))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn theatre(&self) -> &Theatre {
        &self.theatre
    }

    pub fn collisions(&self) -> &Collisions {
        &self.collisions
    }

    pub fn cast(&self) -> &Cast {
        &self.cast
    }

    pub fn config(&self) -> &ShifterConfig {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    pub fn into_publisher(self) -> P {
        self.publisher
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn drain_inbox(&mut self, ts: Scalar) {
        while let Ok(request) = self.inbox_rx.try_recv() {
            if let Err(reason) = self.relocate(request, ts) {
                warn!(%reason, actor = %request.actor, "request rejected");
            }
        }
    }

    async fn pace(&self, step: Scalar) {
        match self.config.pacing {
            Pacing::Immediate => tokio::task::yield_now().await,
            Pacing::RealTime { floor } => {
                let wait = step
                    .to_f64()
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                    .map_or(floor, |d| d.max(floor));
                tokio::time::sleep(wait).await;
            }
        }
    }

    fn label(&self, stage: StageId) -> &str {
        self.theatre.stage(stage).map_or("?", |s| s.label.as_str())
    }
}

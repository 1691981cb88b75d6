//! Relocation requests and the sources that deliver them.
//!
//! A [`MoveRequest`] asks to move an actor across a pending collision: from
//! the stage it is on to the other stage of the colliding pair.  Requests
//! reach the Shifter through its inbox channel; [`watch`] forwards any
//! [`RequestSource`] into that inbox from an independently scheduled task.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. the collision is pending,
//! 2. it has not expired (`ts <= expiry`),
//! 3. the actor is on one of the pair's stages,
//! 4. the destination is the pair's other stage.

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use sc_core::{ActorId, Scalar, StageId};

use crate::{Cast, PendingMap, StagePair};

// ── MoveRequest ───────────────────────────────────────────────────────────────

/// One relocation request.
///
/// Wire form (one JSON object per line):
///
/// ```json
/// {"collision": [0, 3], "actor": 7, "destination": 3}
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub collision:   StagePair,
    pub actor:       ActorId,
    pub destination: StageId,
}

/// Why a [`MoveRequest`] was not applied.  Never fatal to the run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RequestRejected {
    #[error("no pending collision {0}")]
    UnknownCollision(StagePair),

    #[error("collision {collision} expired at {expiry}, now {ts}")]
    Expired { collision: StagePair, expiry: Scalar, ts: Scalar },

    #[error("{actor} is not on either stage of {collision}")]
    ActorNotOnStage { actor: ActorId, collision: StagePair },

    #[error("{destination} is not reachable across {collision}")]
    InvalidDestination { destination: StageId, collision: StagePair },
}

impl MoveRequest {
    /// Check this request against the pending collisions and current cast.
    ///
    /// Returns the stage the actor would leave.
    pub fn validate(
        &self,
        pending: &PendingMap,
        cast:    &Cast,
        ts:      Scalar,
    ) -> Result<StageId, RequestRejected> {
        let collision = self.collision;
        let expiry = *pending
            .get(&collision)
            .ok_or(RequestRejected::UnknownCollision(collision))?;
        if ts > expiry {
            return Err(RequestRejected::Expired { collision, expiry, ts });
        }
        let from = cast
            .stage_of(self.actor)
            .filter(|s| collision.contains(*s))
            .ok_or(RequestRejected::ActorNotOnStage { actor: self.actor, collision })?;
        if collision.other(from) != Some(self.destination) {
            return Err(RequestRejected::InvalidDestination {
                destination: self.destination,
                collision,
            });
        }
        Ok(from)
    }
}

// ── Sources ───────────────────────────────────────────────────────────────────

/// Anything that yields relocation requests until it runs dry.
pub trait RequestSource {
    /// The next request, or `None` once the source is exhausted.
    fn next_request(&mut self) -> impl Future<Output = Option<MoveRequest>> + Send;
}

impl RequestSource for mpsc::Receiver<MoveRequest> {
    fn next_request(&mut self) -> impl Future<Output = Option<MoveRequest>> + Send {
        self.recv()
    }
}

/// Newline-delimited JSON requests from any async reader (a pipe, a socket,
/// a file).  Blank lines are ignored; malformed lines are logged and skipped.
pub struct LineSource<R> {
    lines:   Lines<R>,
    line_no: u64,
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_no: 0 }
    }
}

impl<R: AsyncBufRead + Unpin + Send> RequestSource for LineSource<R> {
    fn next_request(&mut self) -> impl Future<Output = Option<MoveRequest>> + Send {
        async move {
            loop {
                let line = match self.lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None)       => return None,
                    Err(e) => {
                        warn!(error = %e, "request source failed");
                        return None;
                    }
                };
                self.line_no += 1;
                let text = line.trim();
                if text.is_empty() {
                    continue;
                }
                match serde_json::from_str::<MoveRequest>(text) {
                    Ok(request) => return Some(request),
                    Err(e) => warn!(line = self.line_no, error = %e, "malformed request skipped"),
                }
            }
        }
    }
}

/// Forward every request from `source` into `inbox` until the source ends or
/// the inbox closes.  Returns the number forwarded.
pub async fn watch<S: RequestSource>(mut source: S, inbox: mpsc::Sender<MoveRequest>) -> usize {
    let mut forwarded = 0;
    while let Some(request) = source.next_request().await {
        if inbox.send(request).await.is_err() {
            debug!(forwarded, "inbox closed");
            break;
        }
        forwarded += 1;
    }
    forwarded
}

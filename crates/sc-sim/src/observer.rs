//! The publish contract between the Shifter and its outputs.

use sc_core::Tick;

use crate::TickScope;

/// Error type publishers report.  Boxed so output crates keep their own
/// error enums.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Receives one [`TickScope`] per tick from [`Shifter`][crate::Shifter].
///
/// `publish` is called exactly once per tick, synchronously, after movement
/// and collision detection.  An `Err` aborts the run and is returned from
/// `Shifter::tick` / `Shifter::run`.
///
/// # Example: tick counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl Publish for Counter {
///     fn publish(&mut self, _scope: &TickScope<'_>) -> Result<(), BoxError> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Publish {
    fn publish(&mut self, scope: &TickScope<'_>) -> Result<(), BoxError>;

    /// Called once after the final tick of a run.
    fn finish(&mut self, _last: &Tick) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<P: Publish + ?Sized> Publish for &mut P {
    fn publish(&mut self, scope: &TickScope<'_>) -> Result<(), BoxError> {
        (**self).publish(scope)
    }

    fn finish(&mut self, last: &Tick) -> Result<(), BoxError> {
        (**self).finish(last)
    }
}

/// A [`Publish`] that discards everything.
pub struct NoopPublisher;

impl Publish for NoopPublisher {
    fn publish(&mut self, _scope: &TickScope<'_>) -> Result<(), BoxError> {
        Ok(())
    }
}

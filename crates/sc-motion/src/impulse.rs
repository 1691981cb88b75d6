//! The `Impulse` motion record.

use sc_core::{Point3, Scalar, Vector3};

const HALF: Scalar = Scalar::from_parts(5, 0, 0, false, 1);

/// Motion of one stage over the interval `[t_begin, t_end)`.
///
/// `pos` is the position at `t_begin`; `accel` is the acceleration held for
/// the interval.  Impulses are immutable values: the integrator emits new
/// ones rather than editing old ones.
///
/// Invariant: `t_end >= t_begin`.  A stationary stage uses `Scalar::MAX` as
/// its `t_end` to mean "until further notice".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Impulse {
    pub t_begin: Scalar,
    pub t_end:   Scalar,
    pub accel:   Vector3,
    pub pos:     Point3,
}

impl Impulse {
    #[inline]
    pub fn new(t_begin: Scalar, t_end: Scalar, accel: Vector3, pos: Point3) -> Self {
        Self { t_begin, t_end, accel, pos }
    }

    /// A stage held at `pos` from `t_begin` with no end time.
    #[inline]
    pub fn fixed(t_begin: Scalar, pos: Point3) -> Self {
        Self { t_begin, t_end: Scalar::MAX, accel: Vector3::ZERO, pos }
    }

    /// The second bootstrap impulse for a stage that was at `origin` one
    /// step earlier, moving with velocity `vel` under constant `accel`.
    ///
    /// `pos = origin + vel*dt + accel*dt²/2`, covering `[t_begin, t_begin + dt)`.
    pub fn launch(origin: Point3, vel: Vector3, accel: Vector3, t_begin: Scalar, dt: Scalar) -> Self {
        let pos = origin + vel * dt + accel * (dt * dt * HALF);
        Self { t_begin, t_end: t_begin + dt, accel, pos }
    }

    /// `t_end - t_begin`.
    #[inline]
    pub fn duration(&self) -> Scalar {
        self.t_end - self.t_begin
    }
}

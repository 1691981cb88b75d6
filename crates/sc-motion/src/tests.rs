//! Unit tests for sc-motion.

use rust_decimal_macros::dec;
use sc_core::{Point3, Scalar, Vector3};

use crate::{Impulse, Trajectory};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn on_x(x: Scalar) -> Point3 {
    Point3::new(x, 0, 0)
}

/// Drive a fresh trajectory the way a ballistic caller does: first impulse
/// at `first`, second at `second`, then every later impulse restates the
/// previous output's position over the next `dt`.
fn integrate(first: Point3, second: Point3, dt: Scalar, accels: &[Vector3]) -> Vec<Impulse> {
    let mut traj = Trajectory::new();
    let mut out: Vec<Impulse> = Vec::with_capacity(accels.len());
    for (n, &accel) in accels.iter().enumerate() {
        let input = match n {
            0 => Impulse::new(Scalar::ZERO, dt, accel, first),
            1 => Impulse::new(out[0].t_end, out[0].t_end + dt, accel, second),
            _ => {
                let prev = out[n - 1];
                Impulse::new(prev.t_end, prev.t_end + dt, accel, prev.pos)
            }
        };
        out.push(traj.step(input));
    }
    out
}

const PROJECTILE: [Scalar; 26] = [
    dec!(0),            dec!(29.41800004),  dec!(56.38450008),  dec!(80.89950012),
    dec!(102.96300016), dec!(122.5750002),  dec!(139.73550024), dec!(154.44450028),
    dec!(166.70200032), dec!(176.50800036), dec!(183.8625004),  dec!(188.76550044),
    dec!(191.21700048), dec!(191.21700052), dec!(188.76550056), dec!(183.8625006),
    dec!(176.50800064), dec!(166.70200068), dec!(154.44450072), dec!(139.73550076),
    dec!(122.5750008),  dec!(102.96300084), dec!(80.89950088),  dec!(56.38450092),
    dec!(29.41800096),  dec!(0.000001),
];

fn projectile() -> Vec<Impulse> {
    let dt = dec!(0.5);
    let accel = Vector3::new(dec!(-9.806), 0, 0);
    let launch = Impulse::launch(
        Point3::ORIGIN,
        Vector3::new(dec!(61.28750008), 0, 0),
        accel,
        dt,
        dt,
    );
    integrate(Point3::ORIGIN, launch.pos, dt, &[accel; 26])
}

// ── Impulse ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod impulse {
    use super::*;

    #[test]
    fn launch_applies_half_accel() {
        let imp = Impulse::launch(
            Point3::ORIGIN,
            Vector3::new(dec!(61.28750008), 0, 0),
            Vector3::new(dec!(-9.806), 0, 0),
            dec!(0.5),
            dec!(0.5),
        );
        assert_eq!(imp.pos, on_x(dec!(29.41800004)));
        assert_eq!(imp.t_begin, dec!(0.5));
        assert_eq!(imp.t_end, dec!(1.0));
        assert_eq!(imp.duration(), dec!(0.5));
    }

    #[test]
    fn fixed_never_ends() {
        let imp = Impulse::fixed(dec!(3), Point3::new(285, 60, 0));
        assert_eq!(imp.t_end, Scalar::MAX);
        assert_eq!(imp.accel, Vector3::ZERO);
        assert!(imp.t_end >= imp.t_begin);
    }
}

// ── Trajectory ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trajectory {
    use super::*;
    use crate::TrajectoryState;

    #[test]
    fn projectile_matches_reference_exactly() {
        let out = projectile();
        for (n, (imp, want)) in out.iter().zip(PROJECTILE).enumerate() {
            assert_eq!(imp.pos, on_x(want), "step {n}");
        }
    }

    #[test]
    fn projectile_is_symmetric_about_peak() {
        let out = projectile();
        let tol = dec!(0.000001);
        for n in 0..13 {
            let rise = out[n].pos.x;
            let fall = out[25 - n].pos.x;
            assert!((rise - fall).abs() <= tol, "step {n}: {rise} vs {fall}");
        }
        assert!(out[25].pos.x.abs() <= tol);
    }

    #[test]
    fn polynomial_with_varying_accel() {
        let accels: Vec<Vector3> = [
            dec!(-14),   dec!(-12.56), dec!(-11.12), dec!(-9.68), dec!(-8.24), dec!(-6.8),
            dec!(-5.36), dec!(-3.92),  dec!(-2.48),  dec!(-1.04), dec!(0.4),   dec!(1.84),
            dec!(3.28),  dec!(4.72),   dec!(6.16),   dec!(7.6),   dec!(9.04),  dec!(10.48),
            dec!(11.92), dec!(13.36),  dec!(14.8),   dec!(16.24), dec!(17.68), dec!(19.12),
            dec!(20.56), dec!(22),
        ]
        .into_iter()
        .map(|a| Vector3::new(a, 0, 0))
        .collect();
        let expected = [
            dec!(0),         dec!(0.502656),  dec!(0.824448),  dec!(0.986112),  dec!(1.008384),
            dec!(0.912),     dec!(0.717696),  dec!(0.446208),  dec!(0.118272),  dec!(-0.245376),
            dec!(-0.624),    dec!(-0.996864), dec!(-1.343232), dec!(-1.642368), dec!(-1.873536),
            dec!(-2.016),    dec!(-2.049024), dec!(-1.951872), dec!(-1.703808), dec!(-1.284096),
            dec!(-0.672),    dec!(0.153216),  dec!(1.212288),  dec!(2.525952),  dec!(4.114944),
            dec!(6),
        ];

        let out = integrate(Point3::ORIGIN, on_x(dec!(0.502656)), dec!(0.12), &accels);
        for (n, (imp, want)) in out.iter().zip(expected).enumerate() {
            assert_eq!(imp.pos, on_x(want), "step {n}");
        }
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        assert_eq!(projectile(), projectile());
    }

    #[test]
    fn states_progress_to_steady() {
        let mut traj = Trajectory::new();
        assert_eq!(traj.state(), TrajectoryState::Empty);
        assert!(traj.latest().is_none());

        let a = Impulse::new(dec!(0), dec!(1), Vector3::ZERO, on_x(dec!(0)));
        assert_eq!(traj.step(a), a);
        assert_eq!(traj.state(), TrajectoryState::OneImpulse);

        let b = Impulse::new(dec!(1), dec!(2), Vector3::ZERO, on_x(dec!(5)));
        assert_eq!(traj.step(b), b);
        assert_eq!(traj.state(), TrajectoryState::Steady);
        assert_eq!(traj.latest(), Some(&b));

        traj.reset();
        assert_eq!(traj.state(), TrajectoryState::Empty);
    }

    #[test]
    fn emitted_impulse_spans_latest_end_to_input_end() {
        let mut traj = Trajectory::new();
        let accel = Vector3::new(1, 0, 0);
        traj.step(Impulse::new(dec!(0), dec!(1), accel, on_x(dec!(0))));
        traj.step(Impulse::new(dec!(1), dec!(2), accel, on_x(dec!(1))));
        let out = traj.step(Impulse::new(dec!(2), dec!(3), Vector3::ZERO, on_x(dec!(1))));
        assert_eq!(out.t_begin, dec!(2));
        assert_eq!(out.t_end, dec!(3));
        assert_eq!(out.accel, Vector3::ZERO);
        // 1 + (1 - 0) + 1 * 1²
        assert_eq!(out.pos, on_x(dec!(3)));
    }

    #[test]
    fn unequal_steps_scale_displacement() {
        let mut traj = Trajectory::new();
        traj.step(Impulse::new(dec!(0), dec!(2), Vector3::ZERO, on_x(dec!(0))));
        traj.step(Impulse::new(dec!(2), dec!(3), Vector3::ZERO, on_x(dec!(4))));
        let out = traj.step(Impulse::new(dec!(3), dec!(4), Vector3::ZERO, on_x(dec!(4))));
        // 4 + (4 - 0) * (-1 / -2)
        assert_eq!(out.pos, on_x(dec!(6)));
    }

    #[test]
    fn position_override_is_accepted_verbatim() {
        let mut traj = Trajectory::new();
        traj.step(Impulse::new(dec!(0), dec!(1), Vector3::ZERO, on_x(dec!(0))));
        traj.step(Impulse::new(dec!(1), dec!(2), Vector3::ZERO, on_x(dec!(1))));
        let third = traj.step(Impulse::new(dec!(2), dec!(3), Vector3::ZERO, on_x(dec!(1))));
        assert_eq!(third.pos, on_x(dec!(2)));

        let jump = Impulse::new(dec!(3), dec!(4), Vector3::ZERO, on_x(dec!(10)));
        assert_eq!(traj.step(jump), jump);

        // Recurrence continues from the override: 10 + (10 - 2).
        let next = traj.step(Impulse::new(dec!(4), dec!(5), Vector3::ZERO, on_x(dec!(10))));
        assert_eq!(next.pos, on_x(dec!(18)));
    }

    #[test]
    fn first_steady_step_integrates_whatever_position_it_carries() {
        let mut traj = Trajectory::new();
        traj.step(Impulse::new(dec!(0), dec!(1), Vector3::ZERO, on_x(dec!(0))));
        traj.step(Impulse::new(dec!(1), dec!(2), Vector3::ZERO, on_x(dec!(1.5))));

        // A different position on the third step is not an override.
        let out = traj.step(Impulse::new(dec!(2), dec!(3), Vector3::ZERO, on_x(dec!(0))));
        assert_eq!(out.pos, on_x(dec!(3)));
        assert_eq!(out.t_begin, dec!(2));
    }

    #[test]
    fn zero_length_previous_interval_uses_unit_ratio() {
        let mut traj = Trajectory::new();
        traj.step(Impulse::new(dec!(0), dec!(0), Vector3::ZERO, on_x(dec!(0))));
        traj.step(Impulse::new(dec!(0), dec!(1), Vector3::ZERO, on_x(dec!(1))));
        let out = traj.step(Impulse::new(dec!(1), dec!(2), Vector3::ZERO, on_x(dec!(1))));
        assert_eq!(out.pos, on_x(dec!(2)));
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use super::*;
    use crate::{Itinerary, Leg, MotionError, SteadyPace};

    fn shuttle() -> SteadyPace {
        let itinerary = Itinerary::circuit(&[on_x(dec!(0)), on_x(dec!(10))], dec!(10)).unwrap();
        SteadyPace::new(itinerary)
    }

    fn xs(router: &mut SteadyPace, ts: std::ops::RangeInclusive<i64>) -> Vec<Scalar> {
        ts.map(|t| router.advance(Scalar::from(t)).unwrap().unwrap().pos.x).collect()
    }

    #[test]
    fn unprimed_advance_is_an_error() {
        let mut r = shuttle();
        assert!(!r.is_primed());
        assert!(matches!(r.advance(dec!(0)), Err(MotionError::NotPrimed)));
    }

    #[test]
    fn first_advance_only_records_baseline() {
        let mut r = shuttle();
        r.prime();
        assert_eq!(r.advance(dec!(0)).unwrap(), None);
        assert_eq!(r.position(), None);

        let imp = r.advance(dec!(1)).unwrap().unwrap();
        assert_eq!(imp.pos, on_x(dec!(0)));
        assert_eq!(imp.t_begin, dec!(0));
        assert_eq!(imp.t_end, dec!(1));
    }

    #[test]
    fn steady_pace_along_first_leg() {
        let mut r = shuttle();
        r.prime();
        r.advance(dec!(0)).unwrap();
        let got = xs(&mut r, 1..=10);
        let want: Vec<Scalar> = (0..=9).map(Scalar::from).collect();
        assert_eq!(got, want);
        assert_eq!(r.legs_completed(), 0);
    }

    #[test]
    fn arrival_after_transit_takes_next_leg() {
        let mut r = shuttle();
        r.prime();
        r.advance(dec!(0)).unwrap();
        xs(&mut r, 1..=10);

        let arrived = r.advance(dec!(11)).unwrap().unwrap();
        assert_eq!(arrived.pos, on_x(dec!(10)));
        assert_eq!(r.legs_completed(), 1);
        assert_eq!(r.leg(), Leg::new(on_x(dec!(10)), on_x(dec!(0))));

        // Next leg starts with one hop back towards the origin, then carries on.
        assert_eq!(xs(&mut r, 12..=14), vec![dec!(9), dec!(8), dec!(7)]);
    }

    #[test]
    fn full_circuit_returns_to_first_leg() {
        let mut r = shuttle();
        r.prime();
        r.advance(dec!(0)).unwrap();
        xs(&mut r, 1..=21);
        assert_eq!(r.legs_completed(), 2);
        assert_eq!(r.position(), Some(on_x(dec!(0))));
        assert_eq!(r.leg(), Leg::new(on_x(dec!(0)), on_x(dec!(10))));
    }

    #[test]
    fn prime_restarts_from_first_leg() {
        let mut r = shuttle();
        r.prime();
        r.advance(dec!(0)).unwrap();
        xs(&mut r, 1..=15);
        r.prime();
        assert_eq!(r.legs_completed(), 0);
        assert_eq!(r.advance(dec!(0)).unwrap(), None);
        assert_eq!(r.advance(dec!(1)).unwrap().map(|i| i.pos), Some(on_x(dec!(0))));
    }

    #[test]
    fn leg_reached_on_launch_still_extrapolates_once() {
        let itinerary = Itinerary::circuit(&[on_x(dec!(0)), on_x(dec!(1.5))], dec!(1)).unwrap();
        let mut r = SteadyPace::new(itinerary);
        r.prime();
        r.advance(dec!(0)).unwrap();
        // The launch hop lands on the destination; the next step is still
        // integrated rather than restarted on the return leg.
        assert_eq!(xs(&mut r, 1..=3), vec![dec!(0), dec!(1.5), dec!(3)]);
        assert_eq!(r.legs_completed(), 1);
    }

    #[test]
    fn wider_tolerance_arrives_earlier() {
        let itinerary = Itinerary::circuit(&[on_x(dec!(0)), on_x(dec!(10))], dec!(10))
            .unwrap()
            .with_tolerance(dec!(2.5))
            .unwrap();
        let mut r = SteadyPace::new(itinerary);
        r.prime();
        r.advance(dec!(0)).unwrap();
        xs(&mut r, 1..=9);
        assert_eq!(r.position(), Some(on_x(dec!(8))));
        assert_eq!(r.legs_completed(), 1);
    }

    #[test]
    fn routers_share_no_state() {
        let mut a = shuttle();
        let mut b = shuttle();
        a.prime();
        b.prime();
        a.advance(dec!(0)).unwrap();
        xs(&mut a, 1..=5);
        assert_eq!(b.advance(dec!(0)).unwrap(), None);
        assert_eq!(b.position(), None);
    }

    #[test]
    fn circuit_closes_the_loop() {
        let w = [Point3::new(160, 100, 0), Point3::new(484, 106, 0), Point3::new(478, 386, 0)];
        let it = Itinerary::circuit(&w, dec!(24)).unwrap();
        assert_eq!(it.legs().len(), 3);
        assert_eq!(it.legs()[2], Leg::new(w[2], w[0]));
        assert_eq!(it.transits(), &[dec!(24)]);
        assert_eq!(it.tolerance(), dec!(1));
    }

    #[test]
    fn invalid_itineraries_are_rejected() {
        let leg = Leg::new(on_x(dec!(0)), on_x(dec!(1)));
        assert!(matches!(Itinerary::new(vec![], vec![dec!(1)]), Err(MotionError::NoLegs)));
        assert!(matches!(Itinerary::new(vec![leg], vec![]), Err(MotionError::NoTransits)));
        assert!(matches!(
            Itinerary::new(vec![leg], vec![dec!(1), dec!(0)]),
            Err(MotionError::NonPositiveTransit(t)) if t == dec!(0)
        ));
        assert!(matches!(
            Itinerary::circuit(&[on_x(dec!(0))], dec!(1)),
            Err(MotionError::ShortCircuit(1))
        ));
        let ok = Itinerary::new(vec![leg], vec![dec!(1)]).unwrap();
        assert!(matches!(ok.with_tolerance(dec!(-1)), Err(MotionError::NonPositiveTolerance(_))));
    }
}

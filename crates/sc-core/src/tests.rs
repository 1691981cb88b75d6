//! Unit tests for sc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActorId, StageId};

    #[test]
    fn index_roundtrip() {
        let id = StageId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StageId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_follows_insertion() {
        assert!(StageId(0) < StageId(1));
        assert!(ActorId(100) > ActorId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(StageId::INVALID.0, u32::MAX);
        assert_eq!(ActorId::default(), ActorId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(StageId(7).to_string(), "stage 7");
        assert_eq!(ActorId(3).to_string(), "actor 3");
    }
}

#[cfg(test)]
mod geom {
    use rust_decimal_macros::dec;

    use crate::{Point3, Scalar, Vector3};

    #[test]
    fn point_minus_point_is_vector() {
        let a = Point3::new(484, 106, 0);
        let b = Point3::new(160, 100, 0);
        assert_eq!(a - b, Vector3::new(324, 6, 0));
        assert_eq!(b + (a - b), a);
    }

    #[test]
    fn scale_is_exact() {
        let v = Vector3::new(dec!(61.28750008), 0, 0);
        assert_eq!(v * dec!(0.5), Vector3::new(dec!(30.64375004), 0, 0));
    }

    #[test]
    fn magnitude_of_pythagorean_triple() {
        let v = Vector3::new(3, 4, 12);
        assert_eq!(v.magnitude_squared(), dec!(169));
        assert_eq!(v.magnitude(), dec!(13));
        assert_eq!(Point3::ORIGIN.distance(Point3::new(3, 4, 12)), dec!(13));
    }

    #[test]
    fn magnitude_of_zero_vector() {
        assert_eq!(Vector3::ZERO.magnitude(), Scalar::ZERO);
    }

    #[test]
    fn checked_div_by_zero_is_none() {
        let v = Vector3::new(1, 2, 3);
        assert!(v.checked_div(Scalar::ZERO).is_none());
        assert_eq!(v.checked_div(dec!(2)), Some(Vector3::new(dec!(0.5), 1, dec!(1.5))));
    }

    #[test]
    fn negation_and_subtraction_agree() {
        let a = Vector3::new(1, -2, 3);
        let b = Vector3::new(4, 5, -6);
        assert_eq!(a - b, a + -b);
    }

    #[test]
    fn xy_projection() {
        assert_eq!(Point3::new(1, 2, 3).xy(), [dec!(1), dec!(2)]);
    }

    #[test]
    fn is_within_is_strict() {
        let o = Point3::ORIGIN;
        assert!(!o.is_within(Point3::new(3, 4, 0), dec!(5)));
        assert!(o.is_within(Point3::new(3, 4, 0), dec!(5.000001)));
        assert!(!o.is_within(o, dec!(0)));
    }

    #[test]
    fn is_within_survives_huge_coordinates() {
        let far = Point3::new(Scalar::from(u64::MAX), 0, 0);
        assert_eq!(Vector3::new(u64::MAX, 0, 0).checked_magnitude_squared(), None);
        assert!(!Point3::ORIGIN.is_within(far, dec!(10)));
        assert!(Point3::ORIGIN.is_within(Point3::new(1, 0, 0), Scalar::from(u64::MAX)));
        assert!(Point3::ORIGIN.is_within(far, Scalar::from(u64::MAX) * dec!(2)));
        assert!(!Point3::ORIGIN.is_within(far, Scalar::from(u64::MAX) / dec!(2)));
    }

    #[test]
    fn arithmetic_is_reproducible() {
        let run = || {
            let mut p = Point3::ORIGIN;
            let v = Vector3::new(dec!(0.1), dec!(-0.3), dec!(1) / dec!(3));
            for _ in 0..1_000 {
                p = p + v;
            }
            p
        };
        assert_eq!(run(), run());
        assert_eq!(run().x, dec!(100));
    }
}

#[cfg(test)]
mod time {
    use rust_decimal_macros::dec;

    use crate::{CoreError, RunConfig};

    #[test]
    fn decimal_steps_sum_exactly() {
        let cfg = RunConfig::new(dec!(0), dec!(0.3), dec!(0.1));
        let mut ts = cfg.start;
        let mut n = 0;
        while ts < cfg.stop {
            ts += cfg.step;
            n += 1;
        }
        assert_eq!(n, 3);
        assert_eq!(ts, dec!(0.3));
    }

    #[test]
    fn validate_rejects_bad_spans() {
        assert!(matches!(
            RunConfig::new(dec!(0), dec!(1), dec!(0)).validate(),
            Err(CoreError::NonPositiveStep(_))
        ));
        assert!(matches!(
            RunConfig::new(dec!(1), dec!(1), dec!(0.1)).validate(),
            Err(CoreError::EmptyRun { .. })
        ));
        assert!(RunConfig::unbounded(dec!(0), dec!(1)).validate().is_ok());
    }

    #[test]
    fn tick_is_final() {
        let cfg = RunConfig::new(dec!(0), dec!(0.3), dec!(0.1));
        assert!(!cfg.tick_at(dec!(0.1)).is_final());
        assert!(cfg.tick_at(dec!(0.2)).is_final());
    }
}

#[cfg(test)]
mod rng {
    use crate::{StageId, StageKeys};

    #[test]
    fn deterministic_same_seed() {
        let a = StageKeys::new(12345);
        let b = StageKeys::new(12345);
        for i in 0..50 {
            assert_eq!(a.key(StageId(i)), b.key(StageId(i)));
        }
    }

    #[test]
    fn keys_are_32_hex_chars() {
        let key = StageKeys::new(1).key(StageId(0));
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn different_stages_differ() {
        let keys = StageKeys::new(1);
        assert_ne!(keys.key(StageId(0)), keys.key(StageId(1)));
    }
}

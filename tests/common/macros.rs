/// Asserts that the live population matches the expected count.
#[macro_export]
macro_rules! assert_population {
    ($sim:expr, $count:expr) => {
        assert_eq!(
            $sim.population().len(),
            $count,
            "Population count mismatch"
        );
    };
}

/// Asserts that a nomad with the given ID is no longer alive.
#[macro_export]
macro_rules! assert_nomad_dead {
    ($sim:expr, $id:expr) => {
        assert!(
            $sim.population().get($id).is_none(),
            "Nomad {} should be dead but was found alive",
            $id
        );
    };
}

/// Asserts that a live nomad stands at `(x, y)`.
#[macro_export]
macro_rules! assert_nomad_at {
    ($sim:expr, $id:expr, $x:expr, $y:expr) => {
        let nomad = $sim.population().get($id).expect("Nomad not found");
        assert_eq!(
            nomad.position,
            nomads_data::Position::new($x, $y),
            "Nomad {} is not where expected",
            $id
        );
    };
}

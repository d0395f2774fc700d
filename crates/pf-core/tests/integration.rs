//! Integration tests exercising the field end to end:
//! seeding → expiry/replenishment → debounced resize → eviction.

use pf_core::{
    DeviceHints, DeviceTier, Environment, FieldConfig, NullContainer, ParticleField,
    RecordingContainer, ResizeEvent, Scenario, Viewport, run_scenario, target_count,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const LOW_END: DeviceHints = DeviceHints {
    hardware_concurrency: Some(2),
    device_memory_gb: Some(2.0),
};

const STANDARD: DeviceHints = DeviceHints {
    hardware_concurrency: Some(8),
    device_memory_gb: Some(16.0),
};

fn make_field(
    width: f64,
    device: DeviceHints,
    seed: u64,
) -> ParticleField<SmallRng, RecordingContainer> {
    ParticleField::new(
        Environment::new(Viewport::new(width, 800.0)).with_device(device),
        FieldConfig::default(),
        SmallRng::seed_from_u64(seed),
        RecordingContainer::new(),
    )
}

#[test]
fn width_1024_boundary_both_tiers() {
    assert_eq!(target_count(1023.0, DeviceTier::Standard), 45);
    assert_eq!(target_count(1024.0, DeviceTier::Standard), 60);
    assert_eq!(target_count(1023.0, DeviceTier::LowEnd), 35);
    assert_eq!(target_count(1024.0, DeviceTier::LowEnd), 40);

    // Same boundary seen through a live field.
    assert_eq!(make_field(1023.0, STANDARD, 1).target_count(), 45);
    assert_eq!(make_field(1024.0, STANDARD, 1).target_count(), 60);
    assert_eq!(make_field(1023.0, LOW_END, 1).target_count(), 35);
    assert_eq!(make_field(1024.0, LOW_END, 1).target_count(), 40);
}

#[test]
fn documented_targets() {
    assert_eq!(make_field(300.0, LOW_END, 1).target_count(), 15);
    assert_eq!(make_field(900.0, STANDARD, 1).target_count(), 45);
    assert_eq!(make_field(1200.0, LOW_END, 1).target_count(), 40);
}

#[test]
fn population_holds_at_target_after_seeding() {
    let mut field = make_field(1200.0, STANDARD, 3);
    field.advance_to(6_000);
    for t in (6_000..60_000).step_by(250) {
        field.advance_to(t);
        assert_eq!(field.len(), 60, "at t={t}");
    }
    let stats = field.stats();
    assert!(stats.expired > 60, "particles should cycle: {stats:?}");
    assert_eq!(stats.created, 60 + stats.expired);
}

#[test]
fn repeated_resize_reaction_is_idempotent_in_size() {
    let mut field = make_field(1200.0, STANDARD, 5);
    field.advance_to(8_000);
    field.set_viewport(Viewport::new(700.0, 500.0));

    field.apply_resize();
    let after_first = field.len();
    let ids_first = field.population().ids();
    let positions_first: Vec<_> = field.population().iter().map(|p| p.position).collect();

    field.apply_resize();
    assert_eq!(field.len(), after_first);
    assert_eq!(field.len(), 35);
    assert_eq!(field.population().ids(), ids_first, "only positions change");
    let positions_second: Vec<_> = field.population().iter().map(|p| p.position).collect();
    assert_ne!(positions_first, positions_second);
}

#[test]
fn repositioning_keeps_size_and_opacity() {
    let mut field = make_field(1200.0, STANDARD, 11);
    field.advance_to(8_000);
    let before: Vec<_> = field
        .population()
        .iter()
        .map(|p| (p.id, p.size, p.opacity))
        .collect();
    field.set_viewport(Viewport::new(1600.0, 300.0));
    field.apply_resize();
    let after: Vec<_> = field
        .population()
        .iter()
        .map(|p| (p.id, p.size, p.opacity))
        .collect();
    assert_eq!(before, after);
    for p in field.population().iter() {
        assert!(p.position.x < 1600.0 && p.position.y < 300.0);
        let shown = field.container().element(p.id).expect("attached");
        assert_eq!(shown.position, p.position);
    }
}

#[test]
fn shrink_removes_exactly_the_surplus() {
    let mut field = make_field(1200.0, STANDARD, 17);
    field.advance_to(9_000);
    let n = field.len();
    let ids = field.population().ids();

    field.set_viewport(Viewport::new(400.0, 800.0));
    field.apply_resize();
    let m = field.len();

    assert_eq!((n, m), (60, 25));
    assert_eq!(field.stats().evicted as usize, n - m);
    assert_eq!(field.population().ids(), ids[n - m..].to_vec());
    assert_eq!(field.container().attached_count(), m);
}

#[test]
fn evicted_timers_never_fire() {
    let mut field = make_field(1200.0, STANDARD, 23);
    field.advance_to(7_000);
    field.resize(Viewport::new(300.0, 800.0));
    field.advance_to(120_000);
    assert_eq!(field.stats().dangling, 0);
    assert_eq!(field.len(), 25);
}

#[test]
fn same_seed_same_timeline() {
    let scenario = Scenario {
        duration_ms: 30_000,
        sample_every_ms: 700,
        resizes: vec![
            ResizeEvent {
                at_ms: 4_000,
                width: 500.0,
                height: 900.0,
            },
            ResizeEvent {
                at_ms: 12_000,
                width: 1400.0,
                height: 900.0,
            },
        ],
    };
    let run = |seed| {
        let mut field = make_field(1000.0, STANDARD, seed);
        run_scenario(&mut field, &scenario);
        field.population().iter().cloned().collect::<Vec<_>>()
    };
    assert_eq!(run(99), run(99));
    assert_ne!(run(99), run(100));
}

#[test]
fn huge_stagger_saturates_instead_of_wrapping() {
    let config = FieldConfig {
        stagger_ms: 1_000_000_000_000_000_000,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::new(
        Environment::new(Viewport::new(1200.0, 800.0)).with_device(STANDARD),
        config,
        SmallRng::seed_from_u64(2),
        NullContainer,
    );
    field.advance_to(60_000);
    assert_eq!(field.len(), 1, "only the first seed is due");
    assert!(field.next_wake().is_some_and(|t| t > 60_000));
}

fn arb_resizes() -> impl Strategy<Value = Vec<ResizeEvent>> {
    prop::collection::vec(
        (0u64..40_000, 150.0f64..2_500.0, 200.0f64..1_400.0)
            .prop_map(|(at_ms, width, height)| ResizeEvent {
                at_ms,
                width,
                height,
            }),
        0..8,
    )
}

fn arb_device() -> impl Strategy<Value = DeviceHints> {
    (
        prop::option::of(1u32..16),
        prop::option::of(prop::sample::select(vec![0.5, 1.0, 2.0, 4.0, 8.0])),
    )
        .prop_map(|(cores, memory)| DeviceHints {
            hardware_concurrency: cores,
            device_memory_gb: memory,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn target_matches_table(width in 0.0f64..4_000.0, low_end in any::<bool>()) {
        let tier = if low_end { DeviceTier::LowEnd } else { DeviceTier::Standard };
        let bucket = [480.0, 768.0, 1024.0].iter().filter(|&&edge| width >= edge).count();
        let expected = if low_end { [15, 25, 35, 40][bucket] } else { [25, 35, 45, 60][bucket] };
        prop_assert_eq!(target_count(width, tier), expected);
        prop_assert!((15..=60).contains(&expected));
    }

    #[test]
    fn never_over_target_once_settled(
        seed in any::<u64>(),
        width in 150.0f64..2_500.0,
        device in arb_device(),
        resizes in arb_resizes(),
    ) {
        let env = Environment::new(Viewport::new(width, 800.0)).with_device(device);
        let rng = SmallRng::seed_from_u64(seed);
        let mut field = ParticleField::new(env, FieldConfig::default(), rng, NullContainer);
        let stagger_end = field.target_count() as u64 * 100;
        let scenario = Scenario { duration_ms: 50_000, sample_every_ms: 125, resizes };
        let report = run_scenario(&mut field, &scenario);
        for s in report.samples.iter().filter(|s| s.t >= stagger_end && !s.resize_pending) {
            prop_assert!(
                !s.over_target(),
                "t={} population={} target={}",
                s.t,
                s.population,
                s.target
            );
        }
        let last = report.samples.last().unwrap();
        if !last.resize_pending {
            prop_assert_eq!(last.population, last.target);
        }
    }

    #[test]
    fn reduced_motion_never_creates(
        seed in any::<u64>(),
        width in 150.0f64..2_500.0,
        duration_ms in 0u64..500_000,
        resizes in arb_resizes(),
    ) {
        let env = Environment::new(Viewport::new(width, 800.0)).with_reduced_motion(true);
        let rng = SmallRng::seed_from_u64(seed);
        let container = RecordingContainer::new();
        let mut field = ParticleField::new(env, FieldConfig::default(), rng, container);
        let scenario = Scenario { duration_ms, sample_every_ms: 5_000, resizes };
        let report = run_scenario(&mut field, &scenario);
        prop_assert!(report.disabled);
        prop_assert_eq!(report.stats.created, 0);
        prop_assert_eq!(report.peak_population(), 0);
        prop_assert!(field.container().log().is_empty());
    }

    #[test]
    fn shrink_keeps_newest_members(
        seed in any::<u64>(),
        from in 1024.0f64..3_000.0,
        to in 100.0f64..1_024.0,
    ) {
        let mut field = make_field(from, STANDARD, seed);
        field.advance_to(10_000);
        let ids = field.population().ids();
        let n = ids.len();
        field.set_viewport(Viewport::new(to, 800.0));
        field.apply_resize();
        let m = field.target_count();
        prop_assert!(m < n);
        prop_assert_eq!(field.len(), m);
        prop_assert_eq!(field.population().ids(), ids[n - m..].to_vec());
    }
}

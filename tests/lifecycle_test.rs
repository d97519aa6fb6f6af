//! City lifecycle and sequence generator tests

use std::sync::{Arc, Mutex};

use city_sim::simulation::{
    clamp_delta, clamp_density, City, CityConfig, CityManager, CityObserver, CitySummary,
    SeqRng, MAX_TICK_DELTA,
};
use rand::{Rng, RngCore};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Generated(u32),
    Disposed(u32),
}

struct Recorder(Arc<Mutex<Vec<Event>>>);

impl CityObserver for Recorder {
    fn city_generated(&mut self, summary: &CitySummary) {
        self.0.lock().unwrap().push(Event::Generated(summary.seed));
    }

    fn city_disposed(&mut self, seed: u32) {
        self.0.lock().unwrap().push(Event::Disposed(seed));
    }
}

fn recorded_manager() -> (CityManager, Arc<Mutex<Vec<Event>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut manager = CityManager::new(CityConfig::default()).unwrap();
    manager.add_observer(Box::new(Recorder(events.clone())));
    (manager, events)
}

#[test]
fn test_dispose_without_city_is_noop() {
    let (mut manager, events) = recorded_manager();
    manager.dispose();
    manager.dispose();
    assert!(manager.city().is_none());
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_regenerate_replaces_and_releases_once() {
    let (mut manager, events) = recorded_manager();

    let summary = manager.regenerate(Some(42)).unwrap().clone();
    assert_eq!(summary.seed, 42);
    assert_eq!(summary.block_count, 144);
    assert_eq!(summary.car_count, 432);
    assert_eq!(manager.generation(), 1);

    manager.regenerate(Some(7)).unwrap();
    assert_eq!(manager.city().map(|c| c.seed), Some(7));
    assert_eq!(manager.generation(), 2);

    manager.dispose();
    manager.dispose();
    assert!(manager.city().is_none());

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            Event::Generated(42),
            Event::Disposed(42),
            Event::Generated(7),
            Event::Disposed(7),
        ]
    );
}

#[test]
fn test_regenerate_matches_direct_generation() {
    let (mut manager, _) = recorded_manager();
    manager.regenerate(Some(555)).unwrap();
    let direct = City::generate(CityConfig::default(), 555).unwrap();

    let city = manager.city().unwrap();
    assert_eq!(city.buildings, direct.buildings);
    assert_eq!(city.vehicles, direct.vehicles);
}

#[test]
fn test_regenerate_without_seed_builds_a_city() {
    let (mut manager, events) = recorded_manager();
    let seed = manager.regenerate(None).unwrap().seed;
    assert_eq!(manager.city().map(|c| c.seed), Some(seed));
    assert_eq!(*events.lock().unwrap(), vec![Event::Generated(seed)]);
}

#[test]
fn test_invalid_config_is_rejected_at_construction() {
    let config = CityConfig {
        road_width: 80.0,
        ..CityConfig::default()
    };
    assert!(CityManager::new(config).is_err());
}

#[test]
fn test_tick_clamps_large_deltas() {
    let (mut manager, _) = recorded_manager();
    manager.regenerate(Some(12)).unwrap();

    let mut expected = manager.city().unwrap().clone();
    expected.tick(MAX_TICK_DELTA);

    manager.tick(10.0);
    assert_eq!(manager.city().unwrap().vehicles, expected.vehicles);

    // Negative or non-finite deltas never move traffic backwards
    let before = manager.city().unwrap().vehicles.clone();
    manager.tick(-1.0);
    manager.tick(f32::NAN);
    assert_eq!(manager.city().unwrap().vehicles, before);
}

#[test]
fn test_tick_without_city_is_noop() {
    let (mut manager, _) = recorded_manager();
    manager.tick(0.016);
    assert!(manager.city().is_none());
}

#[test]
fn test_clamp_helpers() {
    assert_eq!(clamp_delta(0.01), 0.01);
    assert_eq!(clamp_delta(1.0), MAX_TICK_DELTA);
    assert_eq!(clamp_delta(-0.5), 0.0);

    assert!((clamp_density(5.0) - 3.0).abs() < 1e-6);
    assert!((clamp_density(0.0) - 0.1).abs() < 1e-6);
    assert!((clamp_density(1.26) - 1.3).abs() < 1e-5);
    assert_eq!(clamp_density(f32::NAN), 1.0);
}

#[test]
fn test_set_density_applies_to_next_city() {
    let (mut manager, _) = recorded_manager();
    manager.regenerate(Some(3)).unwrap();
    let before = manager.city().unwrap().building_count();

    assert!((manager.set_density(2.5) - 2.5).abs() < 1e-5);
    assert_eq!(manager.city().unwrap().building_count(), before);

    let summary = manager.regenerate(Some(3)).unwrap();
    assert!((summary.density - 2.5).abs() < 1e-5);
    assert!(summary.building_count > before);
}

#[test]
fn test_sequence_generator_known_values() {
    // Reference outputs of the multiply-xor-shift step
    assert_eq!(SeqRng::new(0).next_u32(), 1_144_304_738);
    assert_eq!(SeqRng::new(1).next_u32(), 2_693_262_067);
    assert_eq!(SeqRng::new(42).next_u32(), 0x99e1_ef7c);
}

#[test]
fn test_sequence_generator_ranges() {
    let mut rng = SeqRng::new(u32::MAX);
    let mut seen = [false; 4];
    for _ in 0..10_000 {
        let v = rng.next();
        assert!((0.0..1.0).contains(&v));

        let r = rng.range(-3.0, 5.0);
        assert!((-3.0..=5.0).contains(&r));

        let i = rng.int_range(0, 3);
        assert!((0..=3).contains(&i));
        seen[i as usize] = true;
    }
    assert!(seen.iter().all(|&s| s), "int_range must reach both ends");
}

#[test]
fn test_sequence_generator_works_with_rand() {
    let mut a = SeqRng::new(77);
    let mut b = SeqRng::new(77);
    let xs: Vec<u16> = (0..32).map(|_| a.random_range(0..1000)).collect();
    let ys: Vec<u16> = (0..32).map(|_| b.random_range(0..1000)).collect();
    assert_eq!(xs, ys);
    assert_eq!(a.state(), b.state());
}

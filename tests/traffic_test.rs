//! Traffic simulation tests
//!
//! Vehicles loop along their lanes; these tests cover progress wrapping, lane
//! confinement and the derived wheel transforms.

use std::f32::consts::{FRAC_PI_2, PI};

use city_sim::simulation::{
    advance_progress, build_lanes, heading, lane_position, Axis, City, CityConfig, Lane,
    WHEELS_PER_VEHICLE,
};

#[test]
fn test_lanes_pair_every_grid_line() {
    let config = CityConfig {
        blocks_x: 4,
        blocks_z: 2,
        ..CityConfig::default()
    };
    let lanes = build_lanes(&config);

    assert_eq!(lanes.len(), 2 * (3 + 5));
    for pair in lanes.chunks(2) {
        assert_eq!(pair[0].axis, pair[1].axis);
        assert_eq!(pair[0].direction, 1.0);
        assert_eq!(pair[1].direction, -1.0);
        assert!((pair[0].offset - pair[1].offset - 2.0 * config.lane_offset).abs() < 1e-4);
    }

    let x_lane = lanes.iter().find(|l| l.axis == Axis::X).unwrap();
    let z_lane = lanes.iter().find(|l| l.axis == Axis::Z).unwrap();
    assert_eq!(x_lane.length, config.extent_x() + config.block_size);
    assert_eq!(z_lane.length, config.extent_z() + config.block_size);
}

#[test]
fn test_vehicle_population_is_capped() {
    let city = City::generate(CityConfig::default(), 3).unwrap();
    assert_eq!(city.vehicle_count(), (12 + 12) * 18);

    let capped = City::generate(
        CityConfig {
            max_vehicles: 40,
            ..CityConfig::default()
        },
        3,
    )
    .unwrap();
    assert_eq!(capped.vehicle_count(), 40);
    assert_eq!(capped.vehicle_instances.wheels.count(), 40 * WHEELS_PER_VEHICLE);

    for vehicle in &city.vehicles {
        let lane = &city.lanes[vehicle.lane.0];
        assert_eq!(vehicle.length, lane.length);
        assert!((0.0..1.0).contains(&vehicle.t));
        assert!(vehicle.speed >= 12.0 && vehicle.speed <= 26.0);
        for channel in [vehicle.color.r, vehicle.color.g, vehicle.color.b] {
            assert!((0.0..=1.0).contains(&channel));
        }
    }
}

#[test]
fn test_progress_wraps_after_one_cycle() {
    let length = 780.0;
    let speed = 17.5;
    let start = 0.37;

    // Uneven steps that together cover exactly one lane length
    let fractions = [0.1, 0.25, 0.05, 0.3, 0.2, 0.1];
    let total_time = length / speed;
    let mut t = start;
    for fraction in fractions {
        t = advance_progress(t, speed, total_time * fraction, length);
        assert!((0.0..1.0).contains(&t));
    }
    assert!((t - start).abs() < 1e-4, "t drifted to {t}");
}

#[test]
fn test_progress_stays_in_unit_interval() {
    let mut t = 0.999_999;
    for _ in 0..10_000 {
        t = advance_progress(t, 25.0, 0.05, 780.0);
        assert!(t >= 0.0 && t < 1.0);
    }
}

#[test]
fn test_lane_position_is_centered() {
    let lane = Lane {
        axis: Axis::X,
        offset: 33.0,
        direction: 1.0,
        length: 100.0,
    };
    let start = lane_position(&lane, 0.0, lane.length);
    let middle = lane_position(&lane, 0.5, lane.length);
    assert_eq!(start.x, -50.0);
    assert_eq!(middle.x, 0.0);
    assert_eq!(middle.z, 33.0);

    let reverse = Lane {
        direction: -1.0,
        ..lane
    };
    assert_eq!(lane_position(&reverse, 0.0, reverse.length).x, 50.0);
    assert_eq!(lane_position(&reverse, 0.75, reverse.length).x, -25.0);
}

#[test]
fn test_headings_are_cardinal() {
    assert_eq!(heading(Axis::X, 1.0), FRAC_PI_2);
    assert_eq!(heading(Axis::X, -1.0), -FRAC_PI_2);
    assert_eq!(heading(Axis::Z, 1.0), 0.0);
    assert_eq!(heading(Axis::Z, -1.0), PI);
}

#[test]
fn test_vehicle_estimate_handles_huge_grids() {
    let config = CityConfig {
        blocks_x: u32::MAX,
        blocks_z: u32::MAX,
        ..CityConfig::default()
    };
    assert_eq!(config.vehicle_count(), 600);

    let small = CityConfig {
        blocks_x: 2,
        blocks_z: 3,
        ..CityConfig::default()
    };
    assert_eq!(small.vehicle_count(), 5 * 18);
}

#[test]
fn test_vehicles_stay_in_their_lane() {
    let mut city = City::generate(CityConfig::default(), 4242).unwrap();

    for _ in 0..600 {
        city.tick(0.05);
        for (index, vehicle) in city.vehicles.iter().enumerate() {
            let lane = &city.lanes[vehicle.lane.0];
            let body = city.vehicle_instances.bodies.get(index).unwrap();
            assert_eq!(body.translation.across(lane.axis), lane.offset);
            assert_eq!(body.yaw, heading(lane.axis, lane.direction));
            assert!(body.translation.along(lane.axis).abs() <= lane.length / 2.0);
        }
    }
}

#[test]
fn test_roof_and_wheels_follow_body() {
    let mut city = City::generate(CityConfig::default(), 11).unwrap();
    city.tick(0.03);

    let instances = &city.vehicle_instances;
    for (index, vehicle) in city.vehicles.iter().enumerate() {
        let lane = &city.lanes[vehicle.lane.0];
        let body = instances.bodies.get(index).unwrap();
        assert_eq!(instances.roofs.get(index), Some(body));

        let wheels = &instances.wheels.live()
            [index * WHEELS_PER_VEHICLE..(index + 1) * WHEELS_PER_VEHICLE];
        for (wheel, transform) in wheels.iter().enumerate() {
            let ahead = (transform.translation.along(lane.axis)
                - body.translation.along(lane.axis))
                * lane.direction;
            let side = (transform.translation.across(lane.axis)
                - body.translation.across(lane.axis))
            .abs();
            // The first two wheels are the front axle
            let expected_ahead = if wheel < 2 { 1.3 } else { -1.3 };
            assert!((ahead - expected_ahead).abs() < 1e-3, "wheel {wheel} ahead {ahead}");
            assert!((side - 0.9).abs() < 1e-3);
            assert!((transform.translation.y - 0.35).abs() < 1e-6);
        }
    }
}

#[test]
fn test_ticks_are_reproducible() {
    let mut a = City::generate(CityConfig::default(), 9).unwrap();
    let mut b = City::generate(CityConfig::default(), 9).unwrap();
    for _ in 0..100 {
        a.tick(0.016);
        b.tick(0.016);
    }
    assert_eq!(a.vehicles, b.vehicles);
    assert_eq!(a.vehicle_instances, b.vehicle_instances);
}

#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use lanesim::simulation::config::{SensorConfig, VehicleConfig};
use lanesim::simulation::control::{Controls, DriverKind};
use lanesim::simulation::geometric_utils::{Point, Polygon};
use lanesim::simulation::network::Network;
use lanesim::simulation::road::Road;
use lanesim::simulation::vehicle::Vehicle;

fn manual_at(x: f32, y: f32) -> Vehicle {
    Vehicle::manual(x, y, &VehicleConfig::default(), &SensorConfig::default())
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_friction_stops_forward_motion_exactly() {
    let mut vehicle = manual_at(100.0, 100.0);
    vehicle.speed = 1.0;
    vehicle.friction = 0.125;

    for _ in 0..8 {
        vehicle.update(&[], &[]);
        assert!(vehicle.speed >= 0.0, "speed changed sign: {}", vehicle.speed);
    }

    assert_eq!(vehicle.speed, 0.0);
    // 0.875 + 0.75 + ... + 0.125
    assert_eq!(vehicle.y, 96.5);
    assert_eq!(vehicle.x, 100.0);
    assert_eq!(vehicle.distance, 3.5);
}

#[test]
fn test_friction_stops_reverse_motion_exactly() {
    let mut vehicle = manual_at(100.0, 100.0);
    vehicle.speed = -0.75;
    vehicle.friction = 0.25;

    for _ in 0..3 {
        vehicle.update(&[], &[]);
        assert!(vehicle.speed <= 0.0, "speed changed sign: {}", vehicle.speed);
    }

    assert_eq!(vehicle.speed, 0.0);
}

#[test]
fn test_friction_stop_within_ceil_bound() {
    // (speed, friction, ceil(speed / friction)) with values not exact in binary
    let cases = [(3.0, 0.05, 60), (0.3, 0.1, 3), (2.85, 0.05, 57), (1.0, 0.3, 4)];

    for (speed, friction, bound) in cases {
        let mut vehicle = manual_at(100.0, 100.0);
        vehicle.speed = speed;
        vehicle.friction = friction;

        let mut steps = 0;
        while vehicle.speed != 0.0 && steps <= bound {
            vehicle.update(&[], &[]);
            assert!(vehicle.speed >= 0.0, "speed changed sign: {}", vehicle.speed);
            steps += 1;
        }

        assert_eq!(vehicle.speed, 0.0, "speed {} friction {}", speed, friction);
        assert!(
            steps <= bound,
            "speed {} friction {} took {} steps",
            speed,
            friction,
            steps
        );
    }
}

#[test]
fn test_reverse_friction_stop_within_ceil_bound() {
    let mut vehicle = manual_at(100.0, 100.0);
    vehicle.speed = -1.5;
    vehicle.friction = 0.05;

    let mut steps = 0;
    while vehicle.speed != 0.0 && steps <= 30 {
        vehicle.update(&[], &[]);
        assert!(vehicle.speed <= 0.0, "speed changed sign: {}", vehicle.speed);
        steps += 1;
    }

    assert_eq!(vehicle.speed, 0.0);
    assert!(steps <= 30, "took {} steps", steps);
}

#[test]
fn test_speed_limits() {
    let config = VehicleConfig::default();

    let mut forward = manual_at(100.0, 100.0);
    forward.set_controls(Controls {
        forward: true,
        ..Controls::default()
    });
    forward.update(&[], &[]);
    assert!(close(forward.speed, config.acceleration - config.friction));

    for _ in 0..100 {
        forward.update(&[], &[]);
    }
    assert!(close(forward.speed, config.max_speed - config.friction));

    // Reverse is capped at half the top speed
    let mut reverse = manual_at(100.0, 100.0);
    reverse.set_controls(Controls {
        reverse: true,
        ..Controls::default()
    });
    for _ in 0..100 {
        reverse.update(&[], &[]);
    }
    assert!(close(reverse.speed, -config.max_speed / 2.0 + config.friction));
    assert!(reverse.y > 100.0);
}

#[test]
fn test_steering_flips_when_reversing() {
    let mut forward = manual_at(100.0, 100.0);
    forward.set_controls(Controls {
        forward: true,
        left: true,
        ..Controls::default()
    });
    forward.update(&[], &[]);
    assert_eq!(forward.angle, forward.rotation_speed);

    let mut reverse = manual_at(100.0, 100.0);
    reverse.set_controls(Controls {
        reverse: true,
        left: true,
        ..Controls::default()
    });
    reverse.update(&[], &[]);
    assert_eq!(reverse.angle, -reverse.rotation_speed);
}

#[test]
fn test_no_steering_while_stopped() {
    let mut vehicle = manual_at(100.0, 100.0);
    vehicle.set_controls(Controls {
        left: true,
        ..Controls::default()
    });

    vehicle.update(&[], &[]);

    assert_eq!(vehicle.speed, 0.0);
    assert_eq!(vehicle.angle, 0.0);
}

#[test]
fn test_polygon_corners() {
    let vehicle = manual_at(100.0, 200.0);
    let points = vehicle.polygon().points();

    // Front right, front left, back left, back right
    let expected = [(115.0, 175.0), (85.0, 175.0), (85.0, 225.0), (115.0, 225.0)];
    assert_eq!(points.len(), 4);
    for (point, (x, y)) in points.iter().zip(expected) {
        assert!(close(point.x, x), "x {} != {}", point.x, x);
        assert!(close(point.y, y), "y {} != {}", point.y, y);
    }
}

#[test]
fn test_position_is_polygon_center() {
    let mut vehicle = manual_at(20.0, 30.0);
    vehicle.angle = 37.0;
    vehicle.speed = 2.0;
    vehicle.update(&[], &[]);

    let center = vehicle.polygon().center();
    assert!(close(center.x, vehicle.x), "{} != {}", center.x, vehicle.x);
    assert!(close(center.y, vehicle.y), "{} != {}", center.y, vehicle.y);
    assert_eq!(vehicle.pose().center, Point { x: vehicle.x, y: vehicle.y });
}

#[test]
fn test_border_damage_on_first_overlap() {
    // Left border of the default road sits at x = 315
    let road = Road::new(450.0, 300.0, 3);
    let mut vehicle = manual_at(342.5, 100.0);
    vehicle.angle = 90.0;
    vehicle.speed = 1.0;
    vehicle.friction = 0.0;

    // Turned sideways the body reaches 25 units left of center
    vehicle.update(road.borders(), &[]);
    assert!(!vehicle.is_damaged());
    vehicle.update(road.borders(), &[]);
    assert!(!vehicle.is_damaged());
    vehicle.update(road.borders(), &[]);
    assert!(vehicle.is_damaged());
    assert_eq!(vehicle.speed, 0.0);

    let (x, y) = (vehicle.x, vehicle.y);
    for _ in 0..5 {
        vehicle.update(road.borders(), &[]);
    }
    assert_eq!(vehicle.x, x);
    assert_eq!(vehicle.y, y);
    assert_eq!(vehicle.speed, 0.0);
}

#[test]
fn test_traffic_damage() {
    let mut vehicle = manual_at(450.0, 100.0);
    let clear = Polygon::rect(Point { x: 440.0, y: 0.0 }, Point { x: 460.0, y: 20.0 });
    let overlapping = Polygon::rect(Point { x: 440.0, y: 60.0 }, Point { x: 460.0, y: 80.0 });

    vehicle.update(&[], &[&clear]);
    assert!(!vehicle.is_damaged());

    vehicle.update(&[], &[&overlapping]);
    assert!(vehicle.is_damaged());
}

#[test]
fn test_dummy_always_drives_forward() {
    let config = VehicleConfig::default();
    let mut dummy = Vehicle::dummy(450.0, 0.0, &config);

    assert_eq!(dummy.kind(), DriverKind::Dummy);
    assert!(dummy.sensor().is_none());
    assert!(dummy.network().is_none());

    // Manual controls are ignored
    dummy.set_controls(Controls::default());
    assert_eq!(dummy.controls(), Controls::always_forward());

    for _ in 0..100 {
        dummy.update(&[], &[]);
        assert_eq!(dummy.controls(), Controls::always_forward());
    }

    assert!(close(dummy.speed, config.traffic_max_speed - config.friction));
    assert!(dummy.y < 0.0);
    assert_eq!(dummy.angle, 0.0);
}

#[test]
fn test_agent_controls_follow_network() {
    let mut agent = Vehicle::agent(
        450.0,
        100.0,
        &VehicleConfig::default(),
        &SensorConfig::default(),
        Network::new(&[5, 6, 4]),
    );
    let road = Road::new(450.0, 300.0, 3);
    let obstacle = Polygon::rect(Point { x: 430.0, y: -20.0 }, Point { x: 470.0, y: 0.0 });

    agent.update(road.borders(), &[&obstacle]);

    let sensor = agent.sensor().expect("agents carry a sensor");
    assert_eq!(sensor.rays().len(), 5);

    let network = agent.network().expect("agents carry a network");
    let outputs = &network.layers[network.layers.len() - 1].outputs;
    assert_eq!(agent.controls(), Controls::from_outputs(outputs));
    assert_eq!(network.layers[0].inputs, sensor.signals());
}

#[test]
#[should_panic(expected = "network inputs must match")]
fn test_agent_rejects_mismatched_network() {
    let _ = Vehicle::agent(
        0.0,
        0.0,
        &VehicleConfig::default(),
        &SensorConfig::default(),
        Network::new(&[3, 4]),
    );
}

#[test]
fn test_lock_vertical_keeps_y() {
    let config = VehicleConfig {
        lock_vertical: true,
        ..VehicleConfig::default()
    };
    let mut vehicle = Vehicle::manual(100.0, 100.0, &config, &SensorConfig::default());
    vehicle.set_controls(Controls {
        forward: true,
        ..Controls::default()
    });

    for _ in 0..10 {
        vehicle.update(&[], &[]);
    }

    assert_eq!(vehicle.y, 100.0);
    assert!(vehicle.distance > 0.0);
}

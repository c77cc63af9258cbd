//! Vehicle kinematics, collision state and driver dispatch.
//!
//! Vehicles move with a 1-D speed along their heading. Each update rebuilds the
//! bounding polygon and checks it against the road borders and the polygons of
//! the vehicles passed in. Once damaged, a vehicle stops for good but keeps
//! sensing and evaluating so hosts can still inspect it.

use super::config::{SensorConfig, VehicleConfig};
use super::control::{Controls, DriverKind};
use super::geometric_utils::{Point, Polygon, Segment, project};
use super::network::Network;
use super::sensor::{Pose, Sensor};

/// Relative slack on the friction snap. Repeated f32 subtraction leaves a
/// remainder a few ulps above `friction`, which must still stop the vehicle.
const FRICTION_SNAP_TOLERANCE: f32 = 1e-3;

/// Who decides a vehicle's controls.
#[derive(Debug, Clone)]
pub enum Driver {
    /// Constant forward traffic.
    Dummy,
    /// Host-supplied controls, sensor kept for overlays.
    Manual {
        /// Ray sensor.
        sensor: Sensor,
    },
    /// Network-driven.
    Agent {
        /// Ray sensor feeding the network.
        sensor: Sensor,
        /// Decision network.
        network: Network,
    },
}

impl Driver {
    /// Tag of this driver.
    pub fn kind(&self) -> DriverKind {
        match self {
            Driver::Dummy => DriverKind::Dummy,
            Driver::Manual { .. } => DriverKind::Manual,
            Driver::Agent { .. } => DriverKind::Agent,
        }
    }
}

/// A simulated vehicle.
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Center x.
    pub x: f32,
    /// Center y, absolute world coordinate.
    pub y: f32,
    /// Body width.
    pub width: f32,
    /// Body length.
    pub height: f32,
    /// Heading in degrees, 0 = up, positive turns left.
    pub angle: f32,
    /// Signed speed along the heading; negative while reversing.
    pub speed: f32,
    /// Speed gained per tick while accelerating.
    pub acceleration: f32,
    /// Speed lost per tick to friction.
    pub friction: f32,
    /// Top forward speed; reverse is capped at half of it.
    pub max_speed: f32,
    /// Heading change per tick while steering, degrees.
    pub rotation_speed: f32,
    /// Skip the vertical position update.
    pub lock_vertical: bool,
    /// Sum of per-tick signed speed.
    pub distance: f32,
    damaged: bool,
    controls: Controls,
    polygon: Polygon,
    driver: Driver,
}

impl Vehicle {
    fn with_driver(x: f32, y: f32, config: &VehicleConfig, driver: Driver) -> Self {
        let mut vehicle = Self {
            x,
            y,
            width: config.width,
            height: config.height,
            angle: 0.0,
            speed: 0.0,
            acceleration: config.acceleration,
            friction: config.friction,
            max_speed: config.max_speed,
            rotation_speed: config.rotation_speed,
            lock_vertical: false,
            distance: 0.0,
            damaged: false,
            controls: Controls::default(),
            polygon: Polygon::rect(Point { x, y }, Point { x, y }),
            driver,
        };
        vehicle.polygon = vehicle.build_polygon();
        vehicle
    }

    /// Always-forward traffic vehicle centered at (`x`, `y`).
    pub fn dummy(x: f32, y: f32, config: &VehicleConfig) -> Self {
        let mut vehicle = Self::with_driver(x, y, config, Driver::Dummy);
        vehicle.max_speed = config.traffic_max_speed;
        vehicle.controls = Controls::always_forward();
        vehicle
    }

    /// Host-controlled vehicle with a sensor.
    pub fn manual(x: f32, y: f32, config: &VehicleConfig, sensor: &SensorConfig) -> Self {
        let sensor = Sensor::new(sensor.ray_count, sensor.ray_length, sensor.ray_spread);
        let mut vehicle = Self::with_driver(x, y, config, Driver::Manual { sensor });
        vehicle.lock_vertical = config.lock_vertical;
        vehicle
    }

    /// Network-driven vehicle.
    ///
    /// The network's input count must equal the sensor's ray count and its
    /// output count must be 4.
    pub fn agent(
        x: f32,
        y: f32,
        config: &VehicleConfig,
        sensor: &SensorConfig,
        network: Network,
    ) -> Self {
        let sensor = Sensor::new(sensor.ray_count, sensor.ray_length, sensor.ray_spread);
        assert_eq!(
            network.topology().first().copied(),
            Some(sensor.ray_count()),
            "network inputs must match the sensor ray count"
        );
        let mut vehicle = Self::with_driver(x, y, config, Driver::Agent { sensor, network });
        vehicle.lock_vertical = config.lock_vertical;
        vehicle
    }

    /// Current pose.
    pub fn pose(&self) -> Pose {
        Pose {
            center: Point {
                x: self.x,
                y: self.y,
            },
            heading_deg: self.angle,
        }
    }

    /// Bounding polygon as of the last update.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// True once the vehicle has hit a border or another vehicle.
    pub fn is_damaged(&self) -> bool {
        self.damaged
    }

    /// Controls that the next update will apply.
    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Sets the controls of a manual vehicle. Ignored for other drivers.
    pub fn set_controls(&mut self, controls: Controls) {
        if matches!(self.driver, Driver::Manual { .. }) {
            self.controls = controls;
        }
    }

    /// The driver.
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Driver tag.
    pub fn kind(&self) -> DriverKind {
        self.driver.kind()
    }

    /// Sensor, if the driver has one.
    pub fn sensor(&self) -> Option<&Sensor> {
        match &self.driver {
            Driver::Dummy => None,
            Driver::Manual { sensor } | Driver::Agent { sensor, .. } => Some(sensor),
        }
    }

    /// Network, agents only.
    pub fn network(&self) -> Option<&Network> {
        match &self.driver {
            Driver::Agent { network, .. } => Some(network),
            _ => None,
        }
    }

    /// Mutable network, agents only.
    pub fn network_mut(&mut self) -> Option<&mut Network> {
        match &mut self.driver {
            Driver::Agent { network, .. } => Some(network),
            _ => None,
        }
    }

    /// Advances the vehicle by one tick.
    ///
    /// Moves (unless damaged), rebuilds the polygon, checks for damage against
    /// `borders` and `traffic`, then refreshes the sensor and picks the
    /// controls for the next tick.
    ///
    /// # Arguments
    ///
    /// * `borders` - Road border segments
    /// * `traffic` - Polygons this vehicle can collide with and see, excluding itself
    pub fn update(&mut self, borders: &[Segment], traffic: &[&Polygon]) {
        if self.damaged {
            self.speed = 0.0;
        } else {
            self.apply_motion();
            self.polygon = self.build_polygon();
            if self.assess_damage(borders, traffic) {
                self.damaged = true;
                self.speed = 0.0;
                log::debug!(
                    "{:?} vehicle damaged at ({:.1}, {:.1})",
                    self.kind(),
                    self.x,
                    self.y
                );
            }
        }

        let pose = self.pose();
        match &mut self.driver {
            Driver::Dummy => self.controls = Controls::always_forward(),
            Driver::Manual { sensor } => sensor.update(&pose, borders, traffic),
            Driver::Agent { sensor, network } => {
                sensor.update(&pose, borders, traffic);
                let outputs = network.evaluate(&sensor.signals());
                self.controls = Controls::from_outputs(&outputs);
            }
        }
    }

    #[allow(clippy::float_cmp)]
    fn apply_motion(&mut self) {
        if self.controls.forward {
            self.speed += self.acceleration;
        }
        if self.controls.reverse {
            self.speed -= self.acceleration;
        }

        self.speed = self.speed.clamp(-self.max_speed / 2.0, self.max_speed);

        if self.speed.abs() <= self.friction * (1.0 + FRICTION_SNAP_TOLERANCE) {
            self.speed = 0.0;
        } else {
            self.speed -= self.friction.copysign(self.speed);
        }

        if self.speed != 0.0 {
            let flip = if self.speed > 0.0 { 1.0 } else { -1.0 };
            if self.controls.left {
                self.angle += self.rotation_speed * flip;
            }
            if self.controls.right {
                self.angle -= self.rotation_speed * flip;
            }
        }

        let heading = self.angle.to_radians();
        self.x -= heading.sin() * self.speed;
        if !self.lock_vertical {
            self.y -= heading.cos() * self.speed;
        }
        self.distance += self.speed;
    }

    fn assess_damage(&self, borders: &[Segment], traffic: &[&Polygon]) -> bool {
        borders
            .iter()
            .any(|border| self.polygon.touches_segment(border))
            || traffic.iter().any(|other| self.polygon.intersects(other))
    }

    fn build_polygon(&self) -> Polygon {
        let center = Point {
            x: self.x,
            y: self.y,
        };
        let radius = self.width.hypot(self.height) / 2.0;
        let alpha = self.width.atan2(self.height);
        let heading = self.angle.to_radians();
        let back = heading + std::f32::consts::PI;

        Polygon::new(vec![
            project(center, heading - alpha, radius),
            project(center, heading + alpha, radius),
            project(center, back - alpha, radius),
            project(center, back + alpha, radius),
        ])
    }
}

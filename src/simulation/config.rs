//! Simulation parameters.
//!
//! Every tunable lives here and is handed to the [`World`](super::world::World)
//! on construction. Configs load from TOML; missing sections and fields fall
//! back to [`Default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::control::CONTROL_OUTPUTS;
use super::error::ConfigError;

/// Road geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadConfig {
    /// X of the road's center line.
    pub center_x: f32,
    /// Full road width before the border inset.
    pub width: f32,
    /// Number of lanes.
    pub lane_count: usize,
    /// Length of one lane-divider dash.
    pub dash_length: f32,
    /// Gap between dashes.
    pub dash_gap: f32,
    /// Scroll added per tick (visual only).
    pub scroll_speed: f32,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            center_x: 450.0,
            width: 300.0,
            lane_count: 3,
            dash_length: 20.0,
            dash_gap: 20.0,
            scroll_speed: 0.0,
        }
    }
}

/// Vehicle size and handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Body width.
    pub width: f32,
    /// Body length.
    pub height: f32,
    /// Speed gained per tick while accelerating.
    pub acceleration: f32,
    /// Speed lost per tick to friction.
    pub friction: f32,
    /// Top speed of agents and manual vehicles.
    pub max_speed: f32,
    /// Top speed of dummy traffic.
    pub traffic_max_speed: f32,
    /// Heading change per tick while steering, degrees.
    pub rotation_speed: f32,
    /// Keep agents at a fixed y (the host scrolls the road instead).
    pub lock_vertical: bool,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 50.0,
            acceleration: 0.2,
            friction: 0.05,
            max_speed: 3.0,
            traffic_max_speed: 2.0,
            rotation_speed: 2.0,
            lock_vertical: false,
        }
    }
}

/// Ray sensor layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Number of rays.
    pub ray_count: usize,
    /// Reach of each ray.
    pub ray_length: f32,
    /// Angle between the outermost rays, radians.
    pub ray_spread: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ray_count: 5,
            ray_length: 150.0,
            ray_spread: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Network shape between the sensor inputs and the four control outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Hidden layer sizes, in order.
    pub hidden_layers: Vec<usize>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hidden_layers: vec![6],
        }
    }
}

/// Agent batch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Agents spawned per generation.
    pub agent_count: usize,
    /// Mutation amount applied to every agent but the first when seeding.
    pub mutation_amount: f32,
    /// Lane agents start in.
    pub start_lane: usize,
    /// Y agents start at.
    pub start_y: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agent_count: 100,
            mutation_amount: 0.1,
            start_lane: 1,
            start_y: 100.0,
        }
    }
}

/// One dummy traffic vehicle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrafficSpawn {
    /// Lane index (clamped to the road).
    pub lane: usize,
    /// Starting y.
    pub y: f32,
}

/// Dummy traffic layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Fixed spawns.
    pub vehicles: Vec<TrafficSpawn>,
    /// Extra vehicles placed in random lanes ahead of the fixed ones.
    pub random_count: usize,
    /// Vertical gap between random vehicles.
    pub random_spacing: f32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        let spawn = |lane, y| TrafficSpawn { lane, y };
        Self {
            vehicles: vec![
                spawn(1, -100.0),
                spawn(0, -300.0),
                spawn(2, -300.0),
                spawn(0, -500.0),
                spawn(1, -500.0),
                spawn(1, -700.0),
                spawn(2, -700.0),
            ],
            random_count: 0,
            random_spacing: 200.0,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Road geometry.
    pub road: RoadConfig,
    /// Vehicle handling.
    pub vehicle: VehicleConfig,
    /// Agent sensors.
    pub sensor: SensorConfig,
    /// Agent networks.
    pub network: NetworkConfig,
    /// Agent batch.
    pub population: PopulationConfig,
    /// Dummy traffic.
    pub traffic: TrafficConfig,
}

impl SimConfig {
    /// Reads and validates a TOML config.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses and validates a TOML config.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Neuron counts: sensor rays, hidden layers, then the control outputs.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.network.hidden_layers.len() + 2);
        sizes.push(self.sensor.ray_count);
        sizes.extend(&self.network.hidden_layers);
        sizes.push(CONTROL_OUTPUTS);
        sizes
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.road.lane_count == 0 {
            return invalid("road.lane_count must be at least 1");
        }
        if self.road.width <= 0.0 {
            return invalid("road.width must be positive");
        }
        if self.road.dash_length + self.road.dash_gap <= 0.0 {
            return invalid("road.dash_length + road.dash_gap must be positive");
        }
        if self.vehicle.width <= 0.0 || self.vehicle.height <= 0.0 {
            return invalid("vehicle.width and vehicle.height must be positive");
        }
        if self.vehicle.friction < 0.0 || self.vehicle.acceleration < 0.0 {
            return invalid("vehicle.friction and vehicle.acceleration must not be negative");
        }
        if self.vehicle.max_speed < 0.0 || self.vehicle.traffic_max_speed < 0.0 {
            return invalid("vehicle speeds must not be negative");
        }
        if self.sensor.ray_count == 0 {
            return invalid("sensor.ray_count must be at least 1");
        }
        if self.sensor.ray_length <= 0.0 {
            return invalid("sensor.ray_length must be positive");
        }
        if self.network.hidden_layers.contains(&0) {
            return invalid("network.hidden_layers must not contain empty layers");
        }
        if !(0.0..=1.0).contains(&self.population.mutation_amount) {
            return invalid("population.mutation_amount must lie in [0, 1]");
        }
        Ok(())
    }
}

//! # Lanesim - Lane Driving Simulation
//!
//! Vehicles drive on a straight multi-lane road. Agent vehicles read a fan of
//! ray-cast distance sensors and feed them to a small threshold network that
//! decides whether to accelerate, brake or steer. Dummy traffic drives
//! straight ahead.
//!
//! ## Features
//!
//! - Segment intersection and polygon overlap collision detection
//! - Ray-cast sensors against road borders and traffic
//! - Feed-forward network with step activation, random mutation only
//! - Previous-tick snapshots for order-independent collision checks
//! - Generation turnover seeded from the best agent
//! - Save/load of the best network as JSON
//!
//! ## Core Modules
//!
//! - [`simulation::geometric_utils`] - Intersections and polygons
//! - [`simulation::network`] - Threshold network
//! - [`simulation::sensor`] - Ray sensor
//! - [`simulation::vehicle`] - Vehicle motion and damage
//! - [`simulation::road`] - Lanes and borders
//! - [`simulation::world`] - Per-tick orchestration

/// Core simulation logic and data structures.
pub mod simulation {
    /// Simulation parameters and TOML loading.
    pub mod config;
    /// Control flags and driver kinds.
    pub mod control;
    /// Error types.
    pub mod error;
    /// Segment intersection, interpolation and polygon overlap.
    pub mod geometric_utils;
    /// Feed-forward threshold network.
    pub mod network;
    /// Model file storage.
    pub mod persistence;
    /// Agent batches, seeding and traffic placement.
    pub mod population;
    /// Road geometry.
    pub mod road;
    /// Ray-cast sensor.
    pub mod sensor;
    /// Vehicles and their drivers.
    pub mod vehicle;
    /// Tick orchestration.
    pub mod world;
}

//! Agent batches and dummy traffic placement.
//!
//! The only learning in the simulation happens here: agents of a new batch
//! take the weights of a chosen network and all but the first one are
//! mutated.

use rand::Rng;

use super::config::SimConfig;
use super::network::Network;
use super::road::Road;
use super::vehicle::Vehicle;

/// Spawns `config.population.agent_count` agents with fresh random networks.
///
/// Agents start centered in the configured start lane at `start_y`.
pub fn spawn_agents(config: &SimConfig, road: &Road) -> Vec<Vehicle> {
    let width = config.vehicle.width;
    let x = road.lane_center(config.population.start_lane, width) + width / 2.0;
    let layer_sizes = config.layer_sizes();

    (0..config.population.agent_count)
        .map(|_| {
            Vehicle::agent(
                x,
                config.population.start_y,
                &config.vehicle,
                &config.sensor,
                Network::new(&layer_sizes),
            )
        })
        .collect()
}

/// Copies `parent` into every agent and mutates all but the first.
///
/// Returns the number of agents that received the parent's weights. Agents
/// whose topology differs are left untouched and logged.
pub fn seed_from(agents: &mut [Vehicle], parent: &Network, mutation_amount: f32) -> usize {
    let mut seeded = 0;
    for (i, agent) in agents.iter_mut().enumerate() {
        let Some(network) = agent.network_mut() else {
            continue;
        };

        if let Err(e) = network.restore_from(parent) {
            log::warn!("Skipping agent {} while seeding: {}", i, e);
            continue;
        }
        if i != 0 {
            network.mutate(mutation_amount);
        }
        seeded += 1;
    }
    seeded
}

/// Builds the dummy traffic described by `config.traffic`.
///
/// Fixed spawns come first, then `random_count` vehicles in random lanes,
/// each `random_spacing` further up than the previous one.
pub fn spawn_traffic(config: &SimConfig, road: &Road) -> Vec<Vehicle> {
    let width = config.vehicle.width;
    let mut traffic: Vec<Vehicle> = config
        .traffic
        .vehicles
        .iter()
        .map(|spawn| {
            let x = road.lane_center(spawn.lane, width) + width / 2.0;
            Vehicle::dummy(x, spawn.y, &config.vehicle)
        })
        .collect();

    let mut y = config
        .traffic
        .vehicles
        .iter()
        .map(|spawn| spawn.y)
        .fold(config.population.start_y, f32::min);

    let mut rng = rand::rng();
    for _ in 0..config.traffic.random_count {
        y -= config.traffic.random_spacing;
        let lane = rng.random_range(0..road.lane_count());
        let x = road.lane_center(lane, width) + width / 2.0;
        traffic.push(Vehicle::dummy(x, y, &config.vehicle));
    }

    traffic
}

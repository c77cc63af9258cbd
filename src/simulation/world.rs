//! Tick orchestration for one road, its traffic and a batch of agents.
//!
//! A tick updates every traffic vehicle, then every agent, then scrolls the
//! road. All collision and sensor reads within a tick see the traffic
//! polygons as they were when the tick started, so the result does not
//! depend on update order.
//!
//! Traffic collides with the borders and with other traffic. Agents collide
//! with the borders and with traffic, never with each other: a batch starts
//! stacked on the same spot.

use super::config::SimConfig;
use super::error::ModelError;
use super::geometric_utils::Polygon;
use super::persistence::ModelStore;
use super::population;
use super::road::Road;
use super::vehicle::Vehicle;

/// The whole simulation state.
#[derive(Debug, Clone)]
pub struct World {
    /// Parameters the world was built from.
    pub config: SimConfig,
    /// The road.
    pub road: Road,
    /// Dummy traffic.
    pub traffic: Vec<Vehicle>,
    /// Network-driven agents.
    pub agents: Vec<Vehicle>,
    /// Ticks run in the current generation.
    pub tick: u64,
    /// Generations started, counting the first.
    pub generation: u32,
}

impl World {
    /// Builds a world with fresh random agents.
    pub fn new(config: SimConfig) -> Self {
        let road = Road::from_config(&config.road);
        let traffic = population::spawn_traffic(&config, &road);
        let agents = population::spawn_agents(&config, &road);

        log::info!(
            "World created: {} lanes, {} traffic vehicles, {} agents",
            road.lane_count(),
            traffic.len(),
            agents.len()
        );

        Self {
            config,
            road,
            traffic,
            agents,
            tick: 0,
            generation: 1,
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        let snapshot: Vec<Polygon> = self
            .traffic
            .iter()
            .map(|vehicle| vehicle.polygon().clone())
            .collect();
        let borders = self.road.borders();

        for (i, vehicle) in self.traffic.iter_mut().enumerate() {
            let others: Vec<&Polygon> = snapshot
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, polygon)| polygon)
                .collect();
            vehicle.update(borders, &others);
        }

        let all_traffic: Vec<&Polygon> = snapshot.iter().collect();
        for agent in &mut self.agents {
            agent.update(borders, &all_traffic);
        }

        self.road.advance();
        self.tick += 1;
    }

    /// Number of agents not yet damaged.
    pub fn alive_agents(&self) -> usize {
        self.agents.iter().filter(|a| !a.is_damaged()).count()
    }

    /// True once every agent is damaged.
    pub fn is_extinct(&self) -> bool {
        self.alive_agents() == 0
    }

    /// Index of the agent that has travelled furthest, first one on ties.
    pub fn best_agent_index(&self) -> Option<usize> {
        self.agents
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, agent)| match best {
                Some((_, distance)) if distance >= agent.distance => best,
                _ => Some((i, agent.distance)),
            })
            .map(|(i, _)| i)
    }

    /// The agent that has travelled furthest.
    pub fn best_agent(&self) -> Option<&Vehicle> {
        self.best_agent_index().map(|i| &self.agents[i])
    }

    /// Starts a new generation seeded from the current best agent.
    ///
    /// Traffic and agents are respawned; the first new agent carries the best
    /// network unchanged, the rest are mutated copies.
    pub fn next_generation(&mut self) {
        let parent = self.best_agent().and_then(Vehicle::network).cloned();

        self.traffic = population::spawn_traffic(&self.config, &self.road);
        self.agents = population::spawn_agents(&self.config, &self.road);
        if let Some(parent) = parent {
            population::seed_from(
                &mut self.agents,
                &parent,
                self.config.population.mutation_amount,
            );
        }

        self.tick = 0;
        self.generation += 1;
        log::info!("Generation {} started", self.generation);
    }

    /// Saves the best agent's network. Returns `Ok(false)` if there are no agents.
    pub fn save_best(&self, store: &ModelStore) -> Result<bool, ModelError> {
        match self.best_agent().and_then(Vehicle::network) {
            Some(network) => {
                store.save(network)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Seeds every agent from the stored model if one exists.
    ///
    /// Returns `Ok(false)` when there is no model file. The stored topology is
    /// checked against the configured one before any agent changes.
    pub fn restore_best(&mut self, store: &ModelStore) -> Result<bool, ModelError> {
        if !store.exists() {
            return Ok(false);
        }

        let record = store.read()?;
        if let Some(network) = self.agents.first().and_then(Vehicle::network) {
            network.check_compatible(&record.network)?;
        }

        let seeded = population::seed_from(
            &mut self.agents,
            &record.network,
            self.config.population.mutation_amount,
        );
        log::info!(
            "Seeded {} agents from {} (saved at {})",
            seeded,
            store.path().display(),
            record.saved_at
        );
        Ok(true)
    }
}

//! Drives a strategy against a world state until every parcel is delivered.
//!
//! The runner is an explicit fold: `state = state.transition(decide(state, memory))`.
//! Strategies never see or touch the loop.

use rand::Rng;
use serde::Serialize;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::graph::{Location, RoadGraph};
use crate::state::VillageState;
use crate::strategy::{Memory, Strategy};

/// Outcome of a single traced run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub turns: usize,
    /// Place occupied after each turn.
    pub path: Vec<Location>,
}

/// Averaged turn counts of two strategies over the same tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub trials: usize,
    pub average_a: f64,
    pub average_b: f64,
}

/// Run `strategy` until the job is done, returning the number of turns.
///
/// With `turn_cap` set, gives up with [`SimError::TurnLimitExceeded`] once that
/// many turns have passed without finishing.
pub fn run(
    graph: &RoadGraph,
    state: VillageState,
    strategy: &Strategy,
    memory: Memory,
    turn_cap: Option<usize>,
    rng: &mut impl Rng,
) -> Result<usize> {
    fold(graph, state, strategy, memory, turn_cap, rng, |_| {})
}

/// Like [`run`], also recording where the robot was after each turn.
pub fn run_traced(
    graph: &RoadGraph,
    state: VillageState,
    strategy: &Strategy,
    memory: Memory,
    turn_cap: Option<usize>,
    rng: &mut impl Rng,
) -> Result<RunReport> {
    let mut path = Vec::new();
    let turns = fold(graph, state, strategy, memory, turn_cap, rng, |s| {
        path.push(s.place().clone())
    })?;
    Ok(RunReport { turns, path })
}

fn fold(
    graph: &RoadGraph,
    mut state: VillageState,
    strategy: &Strategy,
    mut memory: Memory,
    turn_cap: Option<usize>,
    rng: &mut impl Rng,
    mut on_turn: impl FnMut(&VillageState),
) -> Result<usize> {
    let mut turn = 0;
    while !state.is_complete() {
        if let Some(limit) = turn_cap {
            if turn >= limit {
                return Err(SimError::TurnLimitExceeded { limit });
            }
        }
        let action = strategy.decide(graph, &state, memory, rng)?;
        state = state.transition(graph, &action.direction);
        memory = action.memory;
        log::trace!("{} moved to {}", strategy.name(), action.direction);
        on_turn(&state);
        turn += 1;
    }
    log::debug!(
        "Robot finished the job! Turns taken: {} ({})",
        turn,
        strategy.name()
    );
    Ok(turn)
}

/// Run two strategies over `config.trials` random tasks and average their turns.
///
/// Each task is generated once and handed to both strategies.
pub fn compare(
    graph: &RoadGraph,
    (strategy_a, memory_a): (&Strategy, &Memory),
    (strategy_b, memory_b): (&Strategy, &Memory),
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Result<Comparison> {
    let config = config.clone().validated()?;
    let start = config.start_location(graph)?;

    let mut total_a = 0;
    let mut total_b = 0;
    for _ in 0..config.trials {
        let task = VillageState::random(graph, config.parcel_count, &start, rng)?;
        total_a += run(
            graph,
            task.clone(),
            strategy_a,
            memory_a.clone(),
            config.turn_cap,
            rng,
        )?;
        total_b += run(
            graph,
            task,
            strategy_b,
            memory_b.clone(),
            config.turn_cap,
            rng,
        )?;
    }

    let comparison = Comparison {
        trials: config.trials,
        average_a: total_a as f64 / config.trials as f64,
        average_b: total_b as f64 / config.trials as f64,
    };
    log::debug!(
        "{} vs {}: {:.2} vs {:.2} over {} trials",
        strategy_a.name(),
        strategy_b.name(),
        comparison.average_a,
        comparison.average_b,
        comparison.trials
    );
    Ok(comparison)
}

//! Delivery strategies.
//!
//! Every strategy answers the same question each turn: given the world and
//! the memory carried from last turn, where do I go next, and what do I
//! remember? Strategies never hold state of their own; the runner owns the
//! memory and passes it in and out by value.
//!
//! | Strategy | Plans | Behaviour |
//! |----------|-------|-----------|
//! | [`Strategy::Random`] | no | Random neighbor every turn |
//! | [`Strategy::FixedRoute`] | no | Walks a fixed tour over and over |
//! | [`Strategy::GoalOriented`] | yes | Routes to the first parcel, then to its address |
//! | [`Strategy::CostOptimal`] | yes | Takes the cheapest pickup or delivery, favouring pickups |

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SimError};
use crate::graph::{Location, RoadGraph};
use crate::pathfinding::{find_route, Route};
use crate::state::VillageState;
use crate::village;

/// What a strategy carries between turns: the rest of its current plan.
pub type Memory = Route;

/// Bonus a pickup gets over a delivery of equal length.
pub const PICKUP_BONUS: f64 = 0.5;

/// One turn's decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Location,
    pub memory: Memory,
}

/// A candidate plan considered by [`Strategy::CostOptimal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub route: Route,
    pub pick_up: bool,
}

impl Candidate {
    /// Pickups get a half-step bonus; shorter routes score higher.
    pub fn score(&self) -> f64 {
        let bonus = if self.pick_up { PICKUP_BONUS } else { 0.0 };
        bonus - self.route.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Random,
    FixedRoute(Route),
    GoalOriented,
    CostOptimal,
}

impl Strategy {
    /// Fixed-route strategy walking the village mail tour.
    pub fn mail_route() -> Self {
        Strategy::FixedRoute(village::mail_route())
    }

    /// Every strategy, with the fixed route set to the village mail tour.
    pub fn all() -> Vec<Strategy> {
        vec![
            Strategy::Random,
            Strategy::mail_route(),
            Strategy::GoalOriented,
            Strategy::CostOptimal,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::FixedRoute(_) => "route",
            Strategy::GoalOriented => "goal-oriented",
            Strategy::CostOptimal => "lazy",
        }
    }

    /// Decide the next move.
    ///
    /// The direction is only useful if it neighbors `state.place()`; anything
    /// else leaves the world unchanged for the turn.
    pub fn decide(
        &self,
        graph: &RoadGraph,
        state: &VillageState,
        memory: Memory,
        rng: &mut impl Rng,
    ) -> Result<Decision> {
        match self {
            Strategy::Random => {
                let direction = graph
                    .neighbors(state.place())?
                    .choose(rng)
                    .cloned()
                    .ok_or_else(|| SimError::UnknownLocation(state.place().clone()))?;
                Ok(Decision { direction, memory })
            }
            Strategy::FixedRoute(tour) => {
                let memory = if memory.is_empty() {
                    tour.clone()
                } else {
                    memory
                };
                follow(memory)
            }
            Strategy::GoalOriented => {
                let memory = if memory.is_empty() {
                    plan_goal_oriented(graph, state)?
                } else {
                    memory
                };
                follow(memory)
            }
            Strategy::CostOptimal => {
                let memory = if memory.is_empty() {
                    plan_cost_optimal(graph, state)?.route
                } else {
                    memory
                };
                follow(memory)
            }
        }
    }
}

/// Take the first hop of a plan; the rest becomes memory.
fn follow(memory: Memory) -> Result<Decision> {
    let mut hops = memory.into_iter();
    let direction = hops.next().ok_or(SimError::EmptyRoute)?;
    Ok(Decision {
        direction,
        memory: hops.collect(),
    })
}

/// Route to the first parcel, or to its address if the robot is standing on it.
fn plan_goal_oriented(graph: &RoadGraph, state: &VillageState) -> Result<Route> {
    let parcel = state.parcels().first().ok_or(SimError::NothingToDeliver)?;
    if &parcel.place != state.place() {
        find_route(graph, state.place(), &parcel.place)
    } else {
        find_route(graph, state.place(), &parcel.address)
    }
}

/// One candidate per parcel: go get it, or deliver it if it's already here.
pub fn candidates(graph: &RoadGraph, state: &VillageState) -> Result<Vec<Candidate>> {
    state
        .parcels()
        .iter()
        .map(|parcel| {
            if &parcel.place != state.place() {
                Ok(Candidate {
                    route: find_route(graph, state.place(), &parcel.place)?,
                    pick_up: true,
                })
            } else {
                Ok(Candidate {
                    route: find_route(graph, state.place(), &parcel.address)?,
                    pick_up: false,
                })
            }
        })
        .collect()
}

/// The highest-scoring candidate. Earlier candidates win ties.
pub fn best_candidate(candidates: Vec<Candidate>) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for candidate in candidates {
        match &best {
            Some(current) if candidate.score() <= current.score() => {}
            _ => best = Some(candidate),
        }
    }
    best
}

fn plan_cost_optimal(graph: &RoadGraph, state: &VillageState) -> Result<Candidate> {
    best_candidate(candidates(graph, state)?).ok_or(SimError::NothingToDeliver)
}

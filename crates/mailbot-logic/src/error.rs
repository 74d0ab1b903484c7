//! Error taxonomy for graph construction, route planning and simulation runs.

use thiserror::Error;

use crate::config::ConfigError;
use crate::graph::Location;

/// Everything that can go wrong in the simulation core.
///
/// Illegal moves are deliberately absent: a robot that walks off-road just
/// doesn't move (see [`crate::state::VillageState::transition`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// An edge specification did not split into two distinct, non-empty endpoints.
    #[error("malformed edge specification {0:?}")]
    MalformedEdge(String),
    /// Neighbor lookup on a location the graph never registered.
    #[error("unknown location {0}")]
    UnknownLocation(Location),
    /// BFS exhausted the reachable set without hitting the target.
    #[error("no route from {from} to {to}")]
    NoRouteFound { from: Location, to: Location },
    /// A planning strategy was asked to move with no parcels outstanding.
    #[error("no parcels left to deliver")]
    NothingToDeliver,
    /// A strategy ended up with no hop to take.
    #[error("strategy produced an empty route")]
    EmptyRoute,
    #[error("robot did not finish within {limit} turns")]
    TurnLimitExceeded { limit: usize },
    #[error("invalid configuration: {0:?}")]
    InvalidConfig(Vec<ConfigError>),
}

pub type Result<T> = std::result::Result<T, SimError>;

//! Breadth-first route search over the road graph.
//!
//! Routes exclude the starting location and include the destination, so a
//! route's length is its hop count. Ties between equally short routes go to
//! whichever was discovered first, following adjacency-list order.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{Result, SimError};
use crate::graph::{Location, RoadGraph};

/// Hop sequence from a source (exclusive) to a destination (inclusive).
pub type Route = Vec<Location>;

/// Find a shortest route from `from` to `to`.
///
/// Returns an empty route if `from == to`. Returns
/// [`SimError::NoRouteFound`] if `to` is unreachable, never an empty route.
pub fn find_route(graph: &RoadGraph, from: &Location, to: &Location) -> Result<Route> {
    if from == to {
        return Ok(vec![]);
    }

    let mut visited = HashSet::new();
    let mut queue: VecDeque<(&Location, Route)> = VecDeque::new();
    visited.insert(from);
    queue.push_back((from, vec![]));

    while let Some((current, route)) = queue.pop_front() {
        for next in graph.neighbors(current)? {
            if next == to {
                let mut result = route;
                result.push(next.clone());
                return Ok(result);
            }
            if visited.insert(next) {
                let mut new_route = route.clone();
                new_route.push(next.clone());
                queue.push_back((next, new_route));
            }
        }
    }

    Err(SimError::NoRouteFound {
        from: from.clone(),
        to: to.clone(),
    })
}

/// Hop distance from `from` to every location reachable from it (itself included).
pub fn distances_from(graph: &RoadGraph, from: &Location) -> Result<HashMap<Location, usize>> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    if !graph.contains(from) {
        return Err(SimError::UnknownLocation(from.clone()));
    }
    dist.insert(from.clone(), 0);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let d = dist[current];
        for next in graph.neighbors(current)? {
            if !dist.contains_key(next) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }

    Ok(dist)
}

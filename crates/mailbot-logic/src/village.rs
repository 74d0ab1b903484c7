//! The reference village of Meadowfield: its roads and the postal tour.
//!
//! Eleven places joined by fourteen roads. The Town Hall and the Marketplace
//! are the hubs; the Cabin hangs off Alice's House as a dead end.

use crate::error::Result;
use crate::graph::{Location, RoadGraph};
use crate::pathfinding::Route;

/// The 14 roads of the village.
pub const ROADS: [&str; 14] = [
    "Alice's House-Bob's House",
    "Alice's House-Cabin",
    "Alice's House-Post Office",
    "Bob's House-Town Hall",
    "Daria's House-Ernie's House",
    "Daria's House-Town Hall",
    "Ernie's House-Grete's House",
    "Grete's House-Farm",
    "Grete's House-Shop",
    "Marketplace-Farm",
    "Marketplace-Post Office",
    "Marketplace-Shop",
    "Marketplace-Town Hall",
    "Shop-Town Hall",
];

/// A round trip from the Post Office that passes every place in the village.
pub const MAIL_ROUTE: [&str; 13] = [
    "Alice's House",
    "Cabin",
    "Alice's House",
    "Bob's House",
    "Town Hall",
    "Daria's House",
    "Ernie's House",
    "Grete's House",
    "Shop",
    "Grete's House",
    "Farm",
    "Marketplace",
    "Post Office",
];

/// Where the robot starts by default.
pub const DEFAULT_START: &str = "Post Office";

/// Parcels in a randomly generated task by default.
pub const DEFAULT_PARCEL_COUNT: usize = 5;

/// The village road graph.
pub fn road_graph() -> Result<RoadGraph> {
    RoadGraph::build(ROADS)
}

pub fn mail_route() -> Route {
    MAIL_ROUTE.iter().map(|&name| Location::from(name)).collect()
}

/// Every place named in [`ROADS`], in order of first mention.
pub fn places() -> Vec<Location> {
    let mut seen: Vec<Location> = Vec::new();
    for name in ROADS.iter().flat_map(|road| road.split('-')) {
        if !seen.iter().any(|l| l == name) {
            seen.push(Location::from(name));
        }
    }
    seen
}

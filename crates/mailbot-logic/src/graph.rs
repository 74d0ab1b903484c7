//! Undirected road graph over named locations.
//!
//! `RoadGraph` is built once from edge specifications like `"Alice's House-Cabin"`
//! and is read-only afterwards. Adjacency lists keep the order in which edges
//! were registered, which is what makes route search deterministic.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Separator between the two endpoints of an edge specification.
pub const EDGE_SEPARATOR: char = '-';

/// A named place the robot can occupy. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(Arc<str>);

impl Location {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label with apostrophes and whitespace stripped, usable as an element id.
    ///
    /// ```
    /// use mailbot_logic::graph::Location;
    /// assert_eq!(Location::new("Alice's House").slug(), "AlicesHouse");
    /// ```
    pub fn slug(&self) -> String {
        self.0
            .chars()
            .filter(|c| *c != '\'' && !c.is_whitespace())
            .collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Location {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Location {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Location {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Location {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Symmetric adjacency structure. Every edge is stored in both directions.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    /// location → neighbors, in registration order
    adj: HashMap<Location, Vec<Location>>,
    /// locations in first-registration order
    order: Vec<Location>,
}

impl RoadGraph {
    /// Build a graph from `"A-B"` edge specifications.
    ///
    /// Fails with [`SimError::MalformedEdge`] if a specification doesn't split
    /// into exactly two distinct, non-empty endpoints.
    pub fn build<I, S>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = Self::default();
        for spec in edges {
            let spec = spec.as_ref();
            let mut parts = spec.split(EDGE_SEPARATOR);
            let (from, to) = match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), None) => endpoints(a, b),
                _ => None,
            }
            .ok_or_else(|| SimError::MalformedEdge(spec.to_string()))?;
            graph.add_edge(from, to);
        }
        Ok(graph)
    }

    /// Build a graph from endpoint pairs that are already split.
    pub fn from_pairs<I, A, B>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut graph = Self::default();
        for (a, b) in pairs {
            let (a, b) = (a.as_ref(), b.as_ref());
            let (from, to) = endpoints(a, b)
                .ok_or_else(|| SimError::MalformedEdge(format!("{a}{EDGE_SEPARATOR}{b}")))?;
            graph.add_edge(from, to);
        }
        Ok(graph)
    }

    fn add_edge(&mut self, a: Location, b: Location) {
        self.add_direction(a.clone(), b.clone());
        self.add_direction(b, a);
    }

    fn add_direction(&mut self, from: Location, to: Location) {
        let list = match self.adj.entry(from) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.order.push(e.key().clone());
                e.insert(Vec::new())
            }
        };
        if !list.contains(&to) {
            list.push(to);
        }
    }

    /// Neighbors of `loc` in registration order.
    pub fn neighbors(&self, loc: &Location) -> Result<&[Location]> {
        self.adj
            .get(loc)
            .map(|v| v.as_slice())
            .ok_or_else(|| SimError::UnknownLocation(loc.clone()))
    }

    /// True if a road connects `from` directly to `to`.
    pub fn is_adjacent(&self, from: &Location, to: &Location) -> bool {
        self.adj.get(from).is_some_and(|n| n.contains(to))
    }

    pub fn contains(&self, loc: &Location) -> bool {
        self.adj.contains_key(loc)
    }

    /// Look up the registered location with this name.
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.adj.get_key_value(name).map(|(k, _)| k)
    }

    /// All locations, in the order they were first registered.
    pub fn locations(&self) -> &[Location] {
        &self.order
    }

    pub fn location_count(&self) -> usize {
        self.order.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(Vec::len).sum::<usize>() / 2
    }
}

fn endpoints(a: &str, b: &str) -> Option<(Location, Location)> {
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() || a == b {
        return None;
    }
    Some((Location::from(a), Location::from(b)))
}

//! Immutable world state: where the robot is and which parcels are outstanding.
//!
//! A `VillageState` is never modified. [`VillageState::transition`] returns the
//! next state, and the runner drops the old one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::graph::{Location, RoadGraph};

/// A pending delivery: currently at `place`, destined for `address`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parcel {
    pub place: Location,
    pub address: Location,
}

impl Parcel {
    pub fn new(place: impl Into<Location>, address: impl Into<Location>) -> Self {
        Self {
            place: place.into(),
            address: address.into(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.place == self.address
    }
}

/// Snapshot of the simulation. Terminal when no parcels remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawVillageState")]
pub struct VillageState {
    place: Location,
    parcels: Vec<Parcel>,
}

/// Wire form of a state; goes through [`VillageState::new`] on the way in.
#[derive(Deserialize)]
struct RawVillageState {
    place: Location,
    parcels: Vec<Parcel>,
}

impl From<RawVillageState> for VillageState {
    fn from(raw: RawVillageState) -> Self {
        VillageState::new(raw.place, raw.parcels)
    }
}

impl VillageState {
    /// Create a state. Parcels already at their address are dropped.
    pub fn new(place: impl Into<Location>, parcels: Vec<Parcel>) -> Self {
        let parcels = parcels.into_iter().filter(|p| !p.is_delivered()).collect();
        Self {
            place: place.into(),
            parcels,
        }
    }

    pub fn place(&self) -> &Location {
        &self.place
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn is_complete(&self) -> bool {
        self.parcels.is_empty()
    }

    /// Parcels waiting at `loc`.
    pub fn parcels_at<'a>(&'a self, loc: &'a Location) -> impl Iterator<Item = &'a Parcel> + 'a {
        self.parcels.iter().filter(move |p| &p.place == loc)
    }

    /// Parcels the robot is carrying, i.e. those at its current place.
    pub fn carried(&self) -> impl Iterator<Item = &Parcel> + '_ {
        self.parcels_at(&self.place)
    }

    /// Move the robot to `destination`.
    ///
    /// If no road leads there the state comes back unchanged. Otherwise every
    /// parcel at the current place travels along, and those that reach their
    /// address are dropped.
    pub fn transition(&self, graph: &RoadGraph, destination: &Location) -> VillageState {
        if !graph.is_adjacent(&self.place, destination) {
            log::warn!("No road from {} to {}, staying put", self.place, destination);
            return self.clone();
        }

        let parcels = self
            .parcels
            .iter()
            .map(|p| {
                if p.place != self.place {
                    p.clone()
                } else {
                    Parcel {
                        place: destination.clone(),
                        address: p.address.clone(),
                    }
                }
            })
            .filter(|p| !p.is_delivered())
            .collect();

        VillageState {
            place: destination.clone(),
            parcels,
        }
    }

    /// Generate `parcel_count` parcels at random places with random addresses,
    /// the robot starting at `start`.
    pub fn random(
        graph: &RoadGraph,
        parcel_count: usize,
        start: &Location,
        rng: &mut impl Rng,
    ) -> Result<VillageState> {
        if !graph.contains(start) {
            return Err(SimError::UnknownLocation(start.clone()));
        }
        // `start` is registered, so it has a road to some other location:
        // at least two places exist and the rejection loop below terminates.
        let places = graph.locations();

        let mut parcels = Vec::with_capacity(parcel_count);
        for _ in 0..parcel_count {
            let address = pick(places, rng);
            let place = loop {
                let candidate = pick(places, rng);
                if candidate != address {
                    break candidate;
                }
            };
            parcels.push(Parcel { place, address });
        }

        Ok(VillageState {
            place: start.clone(),
            parcels,
        })
    }
}

/// Uniform pick from a non-empty slice.
fn pick(places: &[Location], rng: &mut impl Rng) -> Location {
    places[rng.gen_range(0..places.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn loc(name: &str) -> Location {
        Location::from(name)
    }

    fn pqr() -> RoadGraph {
        RoadGraph::build(["P-Q", "Q-R"]).unwrap()
    }

    #[test]
    fn test_walk_delivers_parcel() {
        let graph = pqr();
        let state = VillageState::new("P", vec![Parcel::new("P", "R")]);

        let state = state.transition(&graph, &loc("Q"));
        assert_eq!(state, VillageState::new("Q", vec![Parcel::new("Q", "R")]));
        assert!(!state.is_complete());

        let state = state.transition(&graph, &loc("R"));
        assert_eq!(state.place(), &loc("R"));
        assert!(state.parcels().is_empty());
        assert!(state.is_complete());
    }

    #[test]
    fn test_illegal_move_is_noop() {
        let graph = pqr();
        let state = VillageState::new("P", vec![Parcel::new("P", "R"), Parcel::new("Q", "P")]);
        assert_eq!(state.transition(&graph, &loc("R")), state);
        assert_eq!(state.transition(&graph, &loc("Nowhere")), state);
    }

    #[test]
    fn test_self_move_is_noop() {
        let graph = pqr();
        let state = VillageState::new("Q", vec![Parcel::new("Q", "R"), Parcel::new("P", "Q")]);
        let next = state.transition(&graph, &loc("Q"));
        assert_eq!(next, state);
        assert_eq!(next.parcels().len(), 2);
    }

    #[test]
    fn test_parcels_elsewhere_untouched_and_order_kept() {
        let graph = pqr();
        let state = VillageState::new(
            "Q",
            vec![
                Parcel::new("P", "R"),
                Parcel::new("Q", "P"),
                Parcel::new("Q", "R"),
                Parcel::new("R", "P"),
            ],
        );
        let next = state.transition(&graph, &loc("R"));
        assert_eq!(
            next.parcels(),
            &[
                Parcel::new("P", "R"),
                Parcel::new("R", "P"),
                Parcel::new("R", "P"),
            ]
        );
        // The predecessor is untouched.
        assert_eq!(state.parcels().len(), 4);
        assert_eq!(state.place(), &loc("Q"));
    }

    #[test]
    fn test_new_drops_delivered_parcels() {
        let state = VillageState::new("P", vec![Parcel::new("Q", "Q"), Parcel::new("P", "Q")]);
        assert_eq!(state.parcels(), &[Parcel::new("P", "Q")]);
    }

    #[test]
    fn test_deserialize_drops_delivered_parcels() {
        let json = r#"{"place":"P","parcels":[{"place":"P","address":"P"}]}"#;
        let state: VillageState = serde_json::from_str(json).unwrap();
        assert!(state.is_complete());
        assert_eq!(state, VillageState::new("P", vec![]));

        let json = r#"{"place":"P","parcels":[{"place":"Q","address":"Q"},{"place":"P","address":"R"}]}"#;
        let state: VillageState = serde_json::from_str(json).unwrap();
        assert_eq!(state.parcels(), &[Parcel::new("P", "R")]);
    }

    #[test]
    fn test_serialized_state_reads_back() {
        let state = VillageState::new("Q", vec![Parcel::new("P", "R"), Parcel::new("Q", "P")]);
        let json = serde_json::to_string(&state).unwrap();
        let back: VillageState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_random_state_on_smallest_graph() {
        // One road is the fewest places a registered start can have.
        let graph = RoadGraph::build(["P-Q"]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let state = VillageState::random(&graph, 20, &loc("P"), &mut rng).unwrap();
        assert_eq!(state.parcels().len(), 20);
        for p in state.parcels() {
            assert_ne!(p.place, p.address);
        }
    }

    #[test]
    fn test_carried() {
        let state = VillageState::new("P", vec![Parcel::new("P", "Q"), Parcel::new("Q", "R")]);
        let carried: Vec<_> = state.carried().collect();
        assert_eq!(carried, vec![&Parcel::new("P", "Q")]);
        assert_eq!(state.parcels_at(&loc("Q")).count(), 1);
    }

    #[test]
    fn test_random_state_properties() {
        let graph = RoadGraph::build(["A-B", "B-C", "C-D", "D-A"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let state = VillageState::random(&graph, 5, &loc("A"), &mut rng).unwrap();
            assert_eq!(state.place(), &loc("A"));
            assert_eq!(state.parcels().len(), 5);
            for p in state.parcels() {
                assert_ne!(p.place, p.address);
                assert!(graph.contains(&p.place));
                assert!(graph.contains(&p.address));
            }
        }
    }

    #[test]
    fn test_random_state_is_seedable() {
        let graph = RoadGraph::build(["A-B", "B-C", "C-D"]).unwrap();
        let a = VillageState::random(&graph, 8, &loc("B"), &mut StdRng::seed_from_u64(3)).unwrap();
        let b = VillageState::random(&graph, 8, &loc("B"), &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_state_errors() {
        let graph = pqr();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            VillageState::random(&graph, 3, &loc("Z"), &mut rng),
            Err(SimError::UnknownLocation(loc("Z")))
        );
        let empty = RoadGraph::default();
        assert_eq!(
            VillageState::random(&empty, 0, &loc("P"), &mut rng),
            Err(SimError::UnknownLocation(loc("P")))
        );
        let zero = VillageState::random(&graph, 0, &loc("P"), &mut rng).unwrap();
        assert!(zero.is_complete());
    }

    #[test]
    fn test_transition_never_leaves_delivered_parcels() {
        let graph = RoadGraph::build(["A-B", "B-C", "C-A", "C-D"]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = VillageState::random(&graph, 10, &loc("A"), &mut rng).unwrap();
        for _ in 0..200 {
            let options = graph.neighbors(state.place()).unwrap();
            let next = options.choose(&mut rng).unwrap().clone();
            state = state.transition(&graph, &next);
            assert!(state.parcels().iter().all(|p| !p.is_delivered()));
        }
    }
}

//! End-to-end delivery scenarios.
//!
//! Exercises: RoadGraph → find_route → Strategy → run / compare
//!
//! All tests use a seeded RNG and are fully deterministic.

use mailbot_logic::config::SimConfig;
use mailbot_logic::graph::{Location, RoadGraph};
use mailbot_logic::pathfinding::find_route;
use mailbot_logic::runner::{compare, run, run_traced};
use mailbot_logic::state::{Parcel, VillageState};
use mailbot_logic::strategy::{Memory, Strategy};
use mailbot_logic::village;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ────────────────────────────────────────────────────────────

fn loc(name: &str) -> Location {
    Location::from(name)
}

fn village_task(rng: &mut StdRng) -> VillageState {
    let graph = village::road_graph().unwrap();
    VillageState::random(&graph, 5, &loc(village::DEFAULT_START), rng).unwrap()
}

/// Turns the goal-oriented robot needs, computed by walking its plans directly.
fn goal_oriented_plan_length(graph: &RoadGraph, mut state: VillageState) -> usize {
    let mut total = 0;
    while let Some(parcel) = state.parcels().first().cloned() {
        let target = if &parcel.place != state.place() {
            parcel.place
        } else {
            parcel.address
        };
        let route = find_route(graph, state.place(), &target).unwrap();
        total += route.len();
        for hop in &route {
            state = state.transition(graph, hop);
        }
    }
    total
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn pqr_walk() {
    let graph = RoadGraph::build(["P-Q", "Q-R"]).unwrap();
    assert_eq!(
        find_route(&graph, &loc("P"), &loc("R")).unwrap(),
        vec![loc("Q"), loc("R")]
    );

    let state = VillageState::new("P", vec![Parcel::new("P", "R")]);
    let state = state.transition(&graph, &loc("Q"));
    assert_eq!(state, VillageState::new("Q", vec![Parcel::new("Q", "R")]));
    let state = state.transition(&graph, &loc("R"));
    assert_eq!(state, VillageState::new("R", vec![]));
    assert!(state.is_complete());

    let mut rng = StdRng::seed_from_u64(0);
    let start = VillageState::new("P", vec![Parcel::new("P", "R")]);
    for strategy in [Strategy::GoalOriented, Strategy::CostOptimal] {
        assert_eq!(
            run(&graph, start.clone(), &strategy, vec![], Some(10), &mut rng),
            Ok(2)
        );
    }
}

#[test]
fn goal_oriented_turns_match_sequential_plans() {
    let graph = village::road_graph().unwrap();
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..50 {
        let task = village_task(&mut rng);
        let planned = goal_oriented_plan_length(&graph, task.clone());
        let turns = run(&graph, task, &Strategy::GoalOriented, vec![], Some(1_000), &mut rng)
            .unwrap();
        assert!(turns >= planned);
        assert_eq!(turns, planned);
    }
}

#[test]
fn every_move_is_on_a_road() {
    let graph = village::road_graph().unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    for strategy in [Strategy::Random, Strategy::GoalOriented, Strategy::CostOptimal] {
        let task = village_task(&mut rng);
        let report =
            run_traced(&graph, task, &strategy, vec![], Some(10_000), &mut rng).unwrap();
        let mut at = loc(village::DEFAULT_START);
        for place in &report.path {
            assert!(graph.is_adjacent(&at, place), "{} jumped {at} -> {place}", strategy.name());
            at = place.clone();
        }
        assert_eq!(report.path.len(), report.turns);
    }
}

#[test]
fn lazy_picks_up_before_delivering_equally_far() {
    // Post Office → Marketplace is 1 hop, Post Office → Alice's House is 1 hop.
    let graph = village::road_graph().unwrap();
    let state = VillageState::new(
        village::DEFAULT_START,
        vec![
            Parcel::new("Post Office", "Marketplace"),
            Parcel::new("Alice's House", "Cabin"),
        ],
    );
    let mut rng = StdRng::seed_from_u64(0);
    let decision = Strategy::CostOptimal
        .decide(&graph, &state, vec![], &mut rng)
        .unwrap();
    assert_eq!(decision.direction, loc("Alice's House"));
}

#[test]
fn seeded_comparisons_are_reproducible() {
    let graph = village::road_graph().unwrap();
    let config = SimConfig {
        trials: 30,
        ..Default::default()
    };
    let empty = Memory::new();
    let once = |seed| {
        compare(
            &graph,
            (&Strategy::GoalOriented, &empty),
            (&Strategy::CostOptimal, &empty),
            &config,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap()
    };
    assert_eq!(once(3), once(3));
}

#[test]
fn planners_beat_random_on_average() {
    let graph = village::road_graph().unwrap();
    let config = SimConfig {
        trials: 50,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(12);
    let empty = Memory::new();
    let c = compare(
        &graph,
        (&Strategy::Random, &empty),
        (&Strategy::GoalOriented, &empty),
        &config,
        &mut rng,
    )
    .unwrap();
    assert!(c.average_b < c.average_a, "{c:?}");
}

#[test]
fn fixed_route_resumes_from_memory() {
    let graph = village::road_graph().unwrap();
    let task = VillageState::new("Alice's House", vec![Parcel::new("Cabin", "Alice's House")]);
    let mut rng = StdRng::seed_from_u64(0);
    // Start mid-tour: the remaining memory goes Cabin, Alice's House.
    let memory = village::mail_route()[1..].to_vec();
    let turns = run(&graph, task, &Strategy::mail_route(), memory, Some(50), &mut rng).unwrap();
    assert_eq!(turns, 2);
}

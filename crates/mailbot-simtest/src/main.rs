//! Mailbot Headless Simulation Harness
//!
//! Compares delivery strategies on the reference village and sanity-checks
//! the routing and state logic along the way. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p mailbot-simtest
//!   cargo run -p mailbot-simtest -- --verbose
//!   cargo run -p mailbot-simtest -- --config data/simtest.json --seed 7 --trials 500
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::error::Error;
use std::path::Path;

use mailbot_logic::config::SimConfig;
use mailbot_logic::graph::{Location, RoadGraph};
use mailbot_logic::pathfinding::{distances_from, find_route};
use mailbot_logic::pgroup::PGroup;
use mailbot_logic::runner::{compare, run, Comparison};
use mailbot_logic::state::VillageState;
use mailbot_logic::strategy::{Memory, Strategy};
use mailbot_logic::village;
use mailbot_logic::SimError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Debug, Default)]
struct Args {
    verbose: bool,
    config: Option<String>,
    seed: Option<u64>,
    trials: Option<usize>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, Box<dyn Error>> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => parsed.verbose = true,
            "--config" => parsed.config = Some(args.next().ok_or("--config needs a path")?),
            "--seed" => parsed.seed = Some(args.next().ok_or("--seed needs a value")?.parse()?),
            "--trials" => {
                parsed.trials = Some(args.next().ok_or("--trials needs a value")?.parse()?)
            }
            other => return Err(format!("unknown argument {other:?}").into()),
        }
    }
    Ok(parsed)
}

fn load_config(args: &Args) -> Result<SimConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(Path::new(path))?;
            serde_json::from_str(&text)?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(trials) = args.trials {
        config.trials = trials;
    }
    Ok(config.validated()?)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        seed,
        trials = config.trials,
        parcels = config.parcel_count,
        "configuration loaded"
    );

    println!("=== Mailbot Simulation Harness ===\n");

    let graph = match village::road_graph() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error: village roads: {e}");
            std::process::exit(1);
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut results = Vec::new();

    // 1. Road graph shape
    results.extend(validate_graph(&graph));

    // 2. Routes against BFS distances
    results.extend(validate_routes(&graph));

    // 3. State transitions
    results.extend(validate_transitions(&graph, &config, &mut rng));

    // 4. Strategy comparisons
    results.extend(compare_strategies(&graph, &config, &mut rng));

    // 5. Persistent group
    results.extend(validate_pgroup());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed (seed {}) ===",
        passed, total, failed, seed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Road graph ───────────────────────────────────────────────────────

fn validate_graph(graph: &RoadGraph) -> Vec<TestResult> {
    println!("--- Road Graph ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "graph_place_count".into(),
        passed: graph.location_count() == village::places().len(),
        detail: format!("{} places", graph.location_count()),
    });

    results.push(TestResult {
        name: "graph_edge_count".into(),
        passed: graph.edge_count() == village::ROADS.len(),
        detail: format!("{} roads", graph.edge_count()),
    });

    let asymmetric: Vec<String> = graph
        .locations()
        .iter()
        .flat_map(|a| {
            graph
                .neighbors(a)
                .unwrap_or(&[])
                .iter()
                .filter(move |b| !graph.is_adjacent(b, a))
                .map(move |b| format!("{a}→{b}"))
        })
        .collect();
    results.push(TestResult {
        name: "graph_symmetric".into(),
        passed: asymmetric.is_empty(),
        detail: if asymmetric.is_empty() {
            "every road runs both ways".into()
        } else {
            format!("one-way: {}", asymmetric.join(", "))
        },
    });

    let malformed = RoadGraph::build(["Cabin"]);
    results.push(TestResult {
        name: "graph_rejects_malformed".into(),
        passed: matches!(malformed, Err(SimError::MalformedEdge(_))),
        detail: "\"Cabin\" is not an edge".into(),
    });

    results
}

// ── 2. Routes ───────────────────────────────────────────────────────────

fn validate_routes(graph: &RoadGraph) -> Vec<TestResult> {
    println!("--- Routes ---");
    let mut results = Vec::new();

    let mut checked = 0;
    let mut mismatches = Vec::new();
    for from in graph.locations() {
        let dist = match distances_from(graph, from) {
            Ok(d) => d,
            Err(e) => {
                mismatches.push(format!("{from}: {e}"));
                continue;
            }
        };
        for to in graph.locations() {
            checked += 1;
            match find_route(graph, from, to) {
                Ok(route) if Some(&route.len()) == dist.get(to) => {}
                Ok(route) => mismatches.push(format!("{from}→{to}: {} hops", route.len())),
                Err(e) => mismatches.push(format!("{from}→{to}: {e}")),
            }
        }
    }
    results.push(TestResult {
        name: "routes_are_shortest".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            format!("{checked} pairs match BFS distance")
        } else {
            mismatches.join("; ")
        },
    });

    let cabin = Location::from("Cabin");
    let grete = Location::from("Grete's House");
    let far = find_route(graph, &cabin, &grete).map(|r| r.len());
    results.push(TestResult {
        name: "route_cabin_grete".into(),
        passed: far == Ok(5),
        detail: format!("Cabin→Grete's House = {far:?} hops"),
    });

    let island = RoadGraph::build(["Cabin-Alice's House", "Farm-Shop"]);
    let unreachable = island.and_then(|g| find_route(&g, &cabin, &Location::from("Farm")));
    results.push(TestResult {
        name: "route_unreachable_is_error".into(),
        passed: matches!(unreachable, Err(SimError::NoRouteFound { .. })),
        detail: "disconnected target → NoRouteFound".into(),
    });

    results
}

// ── 3. Transitions ──────────────────────────────────────────────────────

fn validate_transitions(
    graph: &RoadGraph,
    config: &SimConfig,
    rng: &mut StdRng,
) -> Vec<TestResult> {
    println!("--- Transitions ---");
    let mut results = Vec::new();

    let start = match config.start_location(graph) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "start_location".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    let task = match VillageState::random(graph, config.parcel_count, &start, rng) {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult {
                name: "random_task".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "random_task_shape".into(),
        passed: task.place() == &start
            && task.parcels().len() == config.parcel_count
            && task.parcels().iter().all(|p| p.place != p.address),
        detail: format!("{} parcels from {}", task.parcels().len(), start),
    });

    let off_road = task.transition(graph, &Location::from("Cabin"));
    results.push(TestResult {
        name: "off_road_move_noop".into(),
        passed: graph.is_adjacent(&start, &Location::from("Cabin")) || off_road == task,
        detail: format!("{start}→Cabin leaves the state unchanged"),
    });

    let mut state = task;
    let mut leftover = 0;
    for _ in 0..100 {
        let Ok(Some(next)) = graph.neighbors(state.place()).map(|n| n.first().cloned()) else {
            break;
        };
        state = state.transition(graph, &next);
        leftover += state.parcels().iter().filter(|p| p.is_delivered()).count();
    }
    results.push(TestResult {
        name: "delivered_parcels_dropped".into(),
        passed: leftover == 0,
        detail: format!("{leftover} delivered parcels kept over 100 moves"),
    });

    results
}

// ── 4. Strategy comparisons ─────────────────────────────────────────────

fn compare_strategies(graph: &RoadGraph, config: &SimConfig, rng: &mut StdRng) -> Vec<TestResult> {
    println!("--- Strategy Comparison ---");
    let mut results = Vec::new();
    let empty = Memory::new();

    let pairs = [
        (Strategy::mail_route(), Strategy::GoalOriented),
        (Strategy::GoalOriented, Strategy::CostOptimal),
        (Strategy::Random, Strategy::CostOptimal),
    ];

    let mut averages: Vec<(&'static str, f64)> = Vec::new();
    for (a, b) in &pairs {
        match compare(graph, (a, &empty), (b, &empty), config, rng) {
            Ok(Comparison {
                average_a,
                average_b,
                trials,
            }) => {
                println!("  {} vs {} ({} trials)", a.name(), b.name(), trials);
                println!("    Robot 1 average turns: {average_a:.2}");
                println!("    Robot 2 average turns: {average_b:.2}");
                averages.push((a.name(), average_a));
                averages.push((b.name(), average_b));
            }
            Err(e) => {
                warn!(error = %e, "{} vs {} failed", a.name(), b.name());
                results.push(TestResult {
                    name: format!("compare_{}_{}", a.name(), b.name()),
                    passed: false,
                    detail: e.to_string(),
                });
            }
        }
    }

    let avg = |name: &str| {
        averages
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    };

    if let (Some(route), Some(goal), Some(lazy), Some(random)) =
        (avg("route"), avg("goal-oriented"), avg("lazy"), avg("random"))
    {
        results.push(TestResult {
            name: "route_bounded_by_two_tours".into(),
            passed: route <= (2 * village::MAIL_ROUTE.len()) as f64,
            detail: format!("route avg {route:.2}"),
        });
        results.push(TestResult {
            name: "lazy_beats_route".into(),
            passed: lazy < route,
            detail: format!("lazy {lazy:.2} < route {route:.2}"),
        });
        results.push(TestResult {
            name: "goal_beats_random".into(),
            passed: goal < random,
            detail: format!("goal-oriented {goal:.2} < random {random:.2}"),
        });
    }

    // One full run at default settings, reported the way a human would read it.
    let start = Location::from(config.start.as_str());
    let single = VillageState::random(graph, config.parcel_count, &start, rng)
        .and_then(|task| run(graph, task, &Strategy::Random, vec![], config.turn_cap, rng));
    match single {
        Ok(turns) => info!("Robot finished the job! Turns taken: {turns}"),
        Err(e) => warn!(error = %e, "random robot did not finish"),
    }

    results
}

// ── 5. Persistent group ─────────────────────────────────────────────────

fn validate_pgroup() -> Vec<TestResult> {
    println!("--- Persistent Group ---");

    let a = PGroup::empty().add("a");
    let ab = a.add("b");
    let b = ab.delete(&"a");

    vec![
        TestResult {
            name: "pgroup_a_has_a".into(),
            passed: a.has(&"a"),
            detail: format!("{a:?}"),
        },
        TestResult {
            name: "pgroup_ab_has_b".into(),
            passed: ab.has(&"b"),
            detail: format!("{ab:?}"),
        },
        TestResult {
            name: "pgroup_b_lacks_a".into(),
            passed: !b.has(&"a"),
            detail: format!("{b:?}"),
        },
        TestResult {
            name: "pgroup_a_lacks_b".into(),
            passed: !a.has(&"b"),
            detail: "original untouched by later adds".into(),
        },
    ]
}

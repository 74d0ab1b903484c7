//! Pure simulation logic for Mailbot.
//!
//! A delivery robot walks the roads of a small village, picking up parcels and
//! dropping them off at their addresses. This crate holds everything needed to
//! simulate it and to compare delivery strategies. Functions take plain data
//! and return new values; nothing here does I/O or mutates shared state.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Run configuration (trials, parcels, turn cap, seed) and validation |
//! | [`error`] | Error taxonomy shared by every module |
//! | [`graph`] | Undirected road graph over named locations |
//! | [`pathfinding`] | BFS shortest routes and hop distances |
//! | [`pgroup`] | Persistent set with structural sharing |
//! | [`runner`] | Runs a strategy to completion; compares two strategies |
//! | [`state`] | Immutable village state and its transition function |
//! | [`strategy`] | Random, fixed-route, goal-oriented and lazy robots |
//! | [`village`] | The reference village's roads and mail tour |
//!
//! # Example
//!
//! ```
//! use mailbot_logic::graph::Location;
//! use mailbot_logic::runner::run;
//! use mailbot_logic::state::VillageState;
//! use mailbot_logic::strategy::Strategy;
//! use mailbot_logic::village;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let graph = village::road_graph().unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let start = Location::from(village::DEFAULT_START);
//! let task = VillageState::random(&graph, 5, &start, &mut rng).unwrap();
//! let turns = run(&graph, task, &Strategy::CostOptimal, vec![], Some(1_000), &mut rng).unwrap();
//! assert!(turns > 0);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod pathfinding;
pub mod pgroup;
pub mod runner;
pub mod state;
pub mod strategy;
pub mod village;

pub use error::{Result, SimError};

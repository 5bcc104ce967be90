//! Route planner.
//!
//! This module implements the search that answers: "what is the best way
//! from this station to that one, leaving at this time?"
//!
//! Routes are found with a best-first search over the network, ordered by
//! travel time or by crowding depending on the requested mode.

mod config;
mod route;
mod search;
mod strategy;

#[cfg(test)]
mod search_tests;

pub use config::SearchConfig;
pub use route::{PathStep, Route};
pub use search::{Planner, SearchError};
pub use strategy::{Optimize, Strategy};

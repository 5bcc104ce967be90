//! Metro route finder.
//!
//! Answers shortest-path queries over a fixed metro network: stations joined
//! by timed, costed, line-tagged connections. A route can be optimized for
//! travel time or for passenger crowding, and stations that are closed at the
//! queried departure time are never entered.
//!
//! The [`network`] module holds the in-memory graph and its JSON loader; the
//! [`planner`] module runs the search against a loaded [`network::Network`].

pub mod domain;
pub mod network;
pub mod planner;

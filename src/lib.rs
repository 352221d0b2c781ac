/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A time-expanded K-shortest-paths search engine for a multi-modal
//! (bus + train) grid country.
//!
//! Cities sit on a `rows x cols` grid, each with up to two stations (a
//! bus station and a train station). [`ModelBuilder`] assembles the
//! domain model from scheduled legs; [`GraphBuilder`] compiles it once
//! into an immutable adjacency structure, inserting a synthetic
//! intra-city transfer edge between a city's two stations where both
//! exist; [`Engine::k_shortest`] (or the free function [`k_shortest`])
//! then searches that structure for up to `k` distinct journeys ranked
//! by time, price, or transfer count.
//!
//! This crate does not parse any input format, persist anything, or
//! render anything: it consumes an in-memory model built by the caller
//! and returns [`Route`] values. Those concerns belong to whatever
//! embeds this engine.

pub mod demo;
mod engine;
mod errors;
mod graph;
mod model;
mod route;
mod time;

pub use engine::{Criterion, Engine, QueryResult, QueryStatus, SearchConfig};
pub use errors::RoutingError;
pub use graph::{Graph, GraphBuilder};
pub use model::{
    is_transfer_id, station_id, transfer_leg_id, CityId, City, Leg, Model, ModelBuilder, Station,
    StationId, StationKind, TRANSFER_PREFIX,
};
pub use route::{transfer_count, Route};
pub use time::{duration_minutes, next_feasible_boarding, TimeOfDay, MINUTES_PER_DAY};

/// Convenience entry point equivalent to `Engine::new(graph).k_shortest(..)`,
/// using the default [`SearchConfig`].
pub fn k_shortest(
    graph: &Graph,
    origin: CityId,
    destination: CityId,
    criterion: Criterion,
    k: usize,
) -> Result<QueryResult, RoutingError> {
    Engine::new(graph).k_shortest(origin, destination, criterion, k)
}

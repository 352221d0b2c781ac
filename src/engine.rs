/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The time-expanded K-shortest-paths search engine.
//!
//! A query owns its own frontier and its own per-query maps
//! (`station_best_cost`, `station_visits`, seen signatures); nothing is
//! shared across concurrent queries. The graph itself is read-only and
//! may be shared by several queries at once.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use priority_queue::PriorityQueue;

use crate::errors::RoutingError;
use crate::graph::Graph;
use crate::model::{CityId, Leg};
use crate::route::Route;
use crate::time::{next_feasible_boarding, TimeOfDay};

/// The optimization criterion a query is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Time,
    Price,
    Transfers,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Time => "time",
            Criterion::Price => "price",
            Criterion::Transfers => "transfers",
        }
    }
}

impl std::str::FromStr for Criterion {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Criterion::Time),
            "price" => Ok(Criterion::Price),
            "transfers" => Ok(Criterion::Transfers),
            other => Err(RoutingError::InvalidQuery(format!(
                "unknown criterion: {other}"
            ))),
        }
    }
}

/// Tunable pruning parameters, exposed rather than hard-coded per the
/// source's own note that these thresholds are heuristics. Defaults
/// reproduce the reference numbers exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    pub max_path_len: usize,
    pub max_total_time: i64,
    pub max_transfers: u32,
    pub max_visits_time: u32,
    pub max_visits_price: u32,
    pub max_visits_transfers: u32,
    pub time_tolerance_floor: f64,
    pub time_tolerance_frac: f64,
    pub price_tolerance_floor: f64,
    pub price_tolerance_frac: f64,
    pub transfers_tolerance: f64,
    pub transfer_time_penalty: f64,
    pub transfer_price_penalty: f64,
    pub iteration_cap: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_path_len: 100,
            max_total_time: 20 * 1440,
            max_transfers: 30,
            max_visits_time: 100,
            max_visits_price: 50,
            max_visits_transfers: 50,
            time_tolerance_floor: 120.0,
            time_tolerance_frac: 0.5,
            price_tolerance_floor: 100.0,
            price_tolerance_frac: 0.4,
            transfers_tolerance: 1.0,
            transfer_time_penalty: 5.0,
            transfer_price_penalty: 1.0,
            iteration_cap: 1_000_000,
        }
    }
}

/// Observable search outcome; the engine never returns an `Err` once a
/// query has started (see `errors::RoutingError`'s doc comment).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Ok,
    NoRoute,
    BudgetExhausted,
}

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub routes: Vec<Route>,
    pub status: QueryStatus,
}

/// A total-order, NaN-free cost value, needed because `priority_queue`
/// requires its priority type to implement `Ord` and the PRICE
/// criterion's per-transfer penalty is fractional.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// One entry on the search frontier: a time-expanded state as defined
/// by the state-space model (station, path so far, running cost,
/// arrival minute, accumulated time, transfer count, visited set, and
/// enough of the last real leg's schedule to materialize a following
/// transfer).
#[derive(Debug, Clone)]
struct FrontierState {
    seq: u64,
    station: usize,
    path: Vec<Leg>,
    visited: HashSet<usize>,
    cost: Cost,
    arrival_minute: i64,
    total_time: i64,
    total_price: u32,
    /// Running count of mode switches (§4.4), used both as the
    /// TRANSFERS cost and as a pruning guard. Recomputed authoritatively
    /// from the finished path at emission time.
    transfers: u32,
    /// Count of synthetic transfer legs traversed, used only for the
    /// TIME/PRICE per-transfer penalty.
    transfer_leg_count: u32,
    last_real_leg_id: Option<String>,
    last_real_min_wait: i64,
}

impl PartialEq for FrontierState {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for FrontierState {}

impl Hash for FrontierState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seq.hash(state);
    }
}

type Priority = (Reverse<Cost>, Reverse<u64>);

fn max_visits(criterion: Criterion, config: &SearchConfig) -> u32 {
    match criterion {
        Criterion::Time => config.max_visits_time,
        Criterion::Price => config.max_visits_price,
        Criterion::Transfers => config.max_visits_transfers,
    }
}

fn tolerance(criterion: Criterion, best: f64, config: &SearchConfig) -> f64 {
    match criterion {
        Criterion::Time => config.time_tolerance_floor.max(config.time_tolerance_frac * best),
        Criterion::Price => config
            .price_tolerance_floor
            .max(config.price_tolerance_frac * best),
        Criterion::Transfers => config.transfers_tolerance,
    }
}

fn state_cost(
    criterion: Criterion,
    total_time: i64,
    total_price: u32,
    transfers: u32,
    transfer_leg_count: u32,
    config: &SearchConfig,
) -> Cost {
    match criterion {
        Criterion::Time => Cost(
            total_time as f64 + config.transfer_time_penalty * transfer_leg_count as f64,
        ),
        Criterion::Price => Cost(
            total_price as f64 + config.transfer_price_penalty * transfer_leg_count as f64,
        ),
        Criterion::Transfers => Cost(transfers as f64),
    }
}

fn sort_routes(routes: &mut [Route], criterion: Criterion) {
    match criterion {
        Criterion::Time => routes.sort_by_key(|r| r.total_time),
        Criterion::Price => routes.sort_by_key(|r| (r.total_price, r.total_time)),
        Criterion::Transfers => routes.sort_by_key(|r| (r.transfer_count, r.total_time)),
    }
}

/// Expands `leg` from `state`, applying the boarding-time computation,
/// transfer materialization, and all pruning guards. Returns `None` if
/// the successor is inadmissible for any reason.
fn try_expand(
    graph: &Graph,
    config: &SearchConfig,
    state: &FrontierState,
    leg: &Leg,
    criterion: Criterion,
) -> Option<FrontierState> {
    let to_idx = graph.station_index(&leg.to)?;
    if state.visited.contains(&to_idx) {
        return None; // simple-path constraint
    }
    if leg.is_transfer() && state.path.is_empty() {
        return None; // no leading transfer
    }

    let (assembled, wait, duration, arrival_minute) = if leg.is_transfer() {
        let mw_last = state.last_real_min_wait;
        let dep = state.arrival_minute;
        let arr = dep + mw_last;
        let assembled = Leg {
            id: leg.id.clone(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            departure_time: TimeOfDay::from_absolute_minute(dep),
            arrival_time: TimeOfDay::from_absolute_minute(arr),
            price: 0,
            min_wait: 0,
            absolute_departure_minute: Some(dep),
        };
        (assembled, 0i64, mw_last, arr)
    } else {
        let t_dep = next_feasible_boarding(state.arrival_minute, leg.min_wait, leg.departure_time);
        let duration = leg.duration();
        let arr = t_dep + duration;
        let wait = t_dep - state.arrival_minute;
        let assembled = Leg {
            id: leg.id.clone(),
            from: leg.from.clone(),
            to: leg.to.clone(),
            departure_time: TimeOfDay::from_absolute_minute(t_dep),
            arrival_time: TimeOfDay::from_absolute_minute(arr),
            price: leg.price,
            min_wait: leg.min_wait,
            absolute_departure_minute: Some(t_dep),
        };
        (assembled, wait, duration, arr)
    };

    if wait < 0 {
        return None;
    }

    let new_path_len = state.path.len() + 1;
    if new_path_len > config.max_path_len {
        return None;
    }

    let new_total_time = state.total_time + wait + duration;
    if new_total_time > config.max_total_time {
        return None;
    }

    let is_transfer = leg.is_transfer();
    let new_transfers = if is_transfer {
        state.transfers
    } else {
        match &state.last_real_leg_id {
            Some(id) if id != &leg.id => state.transfers + 1,
            _ => state.transfers,
        }
    };
    if new_transfers > config.max_transfers {
        return None;
    }

    let new_transfer_leg_count = state.transfer_leg_count + u32::from(is_transfer);
    let new_total_price = state.total_price + if is_transfer { 0 } else { leg.price };
    let cost = state_cost(
        criterion,
        new_total_time,
        new_total_price,
        new_transfers,
        new_transfer_leg_count,
        config,
    );

    let mut visited = state.visited.clone();
    visited.insert(to_idx);
    let mut path = state.path.clone();
    path.push(assembled);

    Some(FrontierState {
        seq: 0, // overwritten by the caller before pushing
        station: to_idx,
        path,
        visited,
        cost,
        arrival_minute,
        total_time: new_total_time,
        total_price: new_total_price,
        transfers: new_transfers,
        transfer_leg_count: new_transfer_leg_count,
        last_real_leg_id: if is_transfer {
            state.last_real_leg_id.clone()
        } else {
            Some(leg.id.clone())
        },
        last_real_min_wait: if is_transfer {
            state.last_real_min_wait
        } else {
            leg.min_wait
        },
    })
}

/// Runs a K-shortest-paths query against `graph`. Start time is minute
/// 0 of "day 0"; both stations of `origin` seed the frontier and both
/// stations of `destination` are acceptable terminals.
pub fn k_shortest(
    graph: &Graph,
    config: &SearchConfig,
    origin: CityId,
    destination: CityId,
    criterion: Criterion,
    k: usize,
) -> Result<QueryResult, RoutingError> {
    if k == 0 {
        return Err(RoutingError::InvalidQuery("k must be positive".to_owned()));
    }
    if origin == destination {
        return Err(RoutingError::InvalidQuery(
            "origin equals destination".to_owned(),
        ));
    }

    let (origin_bus, origin_train) = graph
        .city_station_indices(origin)
        .ok_or(RoutingError::UnknownCity(origin))?;
    let (dest_bus, dest_train) = graph
        .city_station_indices(destination)
        .ok_or(RoutingError::UnknownCity(destination))?;

    let starts: Vec<usize> = [origin_bus, origin_train].into_iter().flatten().collect();
    if starts.is_empty() || (dest_bus.is_none() && dest_train.is_none()) {
        return Ok(QueryResult {
            routes: Vec::new(),
            status: QueryStatus::NoRoute,
        });
    }

    let mut pq: PriorityQueue<FrontierState, Priority> = PriorityQueue::new();
    let mut seq: u64 = 0;
    for station in starts {
        let mut visited = HashSet::new();
        visited.insert(station);
        let state = FrontierState {
            seq,
            station,
            path: Vec::new(),
            visited,
            cost: Cost(0.0),
            arrival_minute: 0,
            total_time: 0,
            total_price: 0,
            transfers: 0,
            transfer_leg_count: 0,
            last_real_leg_id: None,
            last_real_min_wait: 0,
        };
        let priority = (Reverse(state.cost), Reverse(seq));
        pq.push(state, priority);
        seq += 1;
    }

    let mut station_best_cost: HashMap<usize, f64> = HashMap::new();
    let mut station_visits: HashMap<usize, u32> = HashMap::new();
    let mut seen_signatures: HashSet<String> = HashSet::new();
    let mut emitted: Vec<Route> = Vec::new();
    let mut iterations: u64 = 0;
    let mut budget_exhausted = false;

    while let Some((state, _)) = pq.pop() {
        iterations += 1;
        if iterations > config.iteration_cap {
            budget_exhausted = true;
            log::warn!(
                "k_shortest: iteration cap ({}) reached with {} route(s) found",
                config.iteration_cap,
                emitted.len()
            );
            break;
        }

        let visits = station_visits.entry(state.station).or_insert(0);
        *visits += 1;
        if *visits >= max_visits(criterion, config) {
            continue;
        }

        let cost_val = state.cost.0;
        match station_best_cost.get(&state.station).copied() {
            Some(best) if cost_val > best + tolerance(criterion, best, config) => continue,
            Some(best) if cost_val < best => {
                station_best_cost.insert(state.station, cost_val);
            }
            None => {
                station_best_cost.insert(state.station, cost_val);
            }
            _ => {}
        }

        if graph.station_city(state.station) == destination && !state.path.is_empty() {
            let route = Route::assemble(origin, destination, state.path.clone(), state.total_time);
            if route.has_real_leg() {
                if seen_signatures.insert(route.signature()) {
                    emitted.push(route);
                    if emitted.len() >= k {
                        break;
                    }
                }
            } else {
                log::debug!(
                    "dropping degenerate transfer-only candidate at {}",
                    graph.station_id(state.station)
                );
            }
            continue; // arrived: do not expand further from a terminal state
        }

        for leg in graph.adjacency(state.station) {
            if let Some(mut successor) = try_expand(graph, config, &state, leg, criterion) {
                successor.seq = seq;
                let priority = (Reverse(successor.cost), Reverse(seq));
                pq.push(successor, priority);
                seq += 1;
            }
        }
    }

    let status = if budget_exhausted {
        QueryStatus::BudgetExhausted
    } else if emitted.is_empty() {
        QueryStatus::NoRoute
    } else {
        QueryStatus::Ok
    };

    sort_routes(&mut emitted, criterion);
    emitted.truncate(k);
    Ok(QueryResult {
        routes: emitted,
        status,
    })
}

/// Thin convenience wrapper pairing a graph with the config to query it
/// against, so callers embedding several criteria don't have to thread
/// `&SearchConfig` through every call site themselves.
pub struct Engine<'g> {
    graph: &'g Graph,
    config: SearchConfig,
}

impl<'g> Engine<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Engine {
            graph,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(graph: &'g Graph, config: SearchConfig) -> Self {
        Engine { graph, config }
    }

    pub fn k_shortest(
        &self,
        origin: CityId,
        destination: CityId,
        criterion: Criterion,
        k: usize,
    ) -> Result<QueryResult, RoutingError> {
        k_shortest(self.graph, &self.config, origin, destination, criterion, k)
    }
}

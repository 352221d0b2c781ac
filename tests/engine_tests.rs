/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */


use std::collections::HashSet;

use gridrail::{Criterion, Engine, GraphBuilder, QueryStatus, SearchConfig};

fn check_universal_invariants(routes: &[gridrail::Route]) {
    for route in routes {
        for pair in route.legs.windows(2) {
            assert_eq!(pair[0].to, pair[1].from, "invariant 1: station chaining");
        }
        for pair in route.legs.windows(2) {
            let prev_arrival = pair[0].absolute_departure_minute.unwrap() + pair[0].duration();
            let next_departure = pair[1].absolute_departure_minute.unwrap();
            let required_wait = if pair[1].is_transfer() { 0 } else { pair[1].min_wait };
            assert!(
                next_departure >= prev_arrival + required_wait,
                "invariant 2: wait feasibility"
            );
        }
        let mut seen = HashSet::new();
        for leg in &route.legs {
            assert!(seen.insert(&leg.from), "invariant 3: simple-path on stations");
        }
        assert!(
            !route.legs[0].is_transfer(),
            "invariant 4: no leading transfer"
        );
        let expected_price: u32 = route
            .legs
            .iter()
            .filter(|l| !l.is_transfer())
            .map(|l| l.price)
            .sum();
        assert_eq!(route.total_price, expected_price, "invariant 5: total price");
        let last = route.legs.last().unwrap();
        assert_eq!(
            route.total_time,
            last.absolute_departure_minute.unwrap() + last.duration(),
            "invariant 5: total time"
        );
        assert_eq!(
            route.transfer_count,
            gridrail::transfer_count(&route.legs),
            "invariant 6: transfer count"
        );
    }
}

#[test]
fn scenario_a_direct_bus() {
    let model = test_data::direct_bus();
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 2, Criterion::Time, 3)
        .unwrap();
    assert_eq!(result.status, QueryStatus::Ok);
    assert_eq!(result.routes.len(), 1);
    let route = &result.routes[0];
    assert_eq!(route.legs.len(), 1);
    assert_eq!(route.total_time, 540);
    assert_eq!(route.total_price, 10);
    assert_eq!(route.transfer_count, 0);
    check_universal_invariants(&result.routes);
}

#[test]
fn scenario_b_missed_connection_wraps_to_next_day() {
    let model = test_data::missed_connection_wraps();
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 3, Criterion::Time, 1)
        .unwrap();
    assert_eq!(result.status, QueryStatus::Ok);
    let route = &result.routes[0];
    let real_leg = route.legs.iter().find(|l| l.id == "bus1").unwrap();
    assert_eq!(real_leg.absolute_departure_minute, Some(1920));
    check_universal_invariants(&result.routes);
}

#[test]
fn scenario_c_mid_route_transfer() {
    let model = test_data::intra_city_transfer();
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 3, Criterion::Time, 1)
        .unwrap();
    assert_eq!(result.status, QueryStatus::Ok);
    let route = &result.routes[0];
    assert_eq!(route.legs.len(), 3);
    assert!(!route.legs[0].is_transfer());
    assert_eq!(route.legs[0].id, "train1");
    assert!(route.legs[1].is_transfer());
    assert_eq!(route.legs[1].from, "Z_0_1");
    assert_eq!(route.legs[1].to, "A_0_1");
    assert_eq!(route.legs[2].id, "bus2");
    check_universal_invariants(&result.routes);
}

#[test]
fn scenario_d_price_ties_broken_by_time() {
    let model = test_data::price_tie_broken_by_time();
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 3, Criterion::Price, 5)
        .unwrap();
    assert_eq!(result.status, QueryStatus::Ok);
    assert!(result.routes.len() >= 2);
    assert_eq!(result.routes[0].total_price, 30);
    assert_eq!(result.routes[0].total_time, 540);
    assert_eq!(result.routes[1].total_time, 600);
    check_universal_invariants(&result.routes);
}

#[test]
fn scenario_e_duplicate_signatures_collapse() {
    let model = test_data::dense_bus_grid(2, 3);
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 6, Criterion::Time, 10)
        .unwrap();
    let mut signatures = HashSet::new();
    for route in &result.routes {
        assert!(signatures.insert(route.signature()), "no duplicate signatures");
    }
}

#[test]
fn scenario_f_k_bound_is_respected() {
    let model = test_data::dense_bus_grid(3, 4);
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 12, Criterion::Time, 5)
        .unwrap();
    assert!(result.routes.len() <= 5);
    let times: Vec<i64> = result.routes.iter().map(|r| r.total_time).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted, "ranking law 7: non-decreasing total_time");
}

#[test]
fn ranking_law_price_then_time() {
    let model = test_data::dense_bus_grid(3, 4);
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 12, Criterion::Price, 10)
        .unwrap();
    for pair in result.routes.windows(2) {
        let a = (pair[0].total_price, pair[0].total_time);
        let b = (pair[1].total_price, pair[1].total_time);
        assert!(a <= b, "ranking law 8: non-decreasing (price, time)");
    }
}

#[test]
fn ranking_law_transfers_then_time() {
    let model = test_data::dense_bus_grid(3, 4);
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(1, 12, Criterion::Transfers, 10)
        .unwrap();
    for pair in result.routes.windows(2) {
        let a = (pair[0].transfer_count, pair[0].total_time);
        let b = (pair[1].transfer_count, pair[1].total_time);
        assert!(a <= b, "ranking law 9: non-decreasing (transfers, time)");
    }
}

#[test]
fn origin_equals_destination_is_invalid_query() {
    let model = test_data::direct_bus();
    let graph = GraphBuilder::build(&model);
    let err = Engine::new(&graph).k_shortest(1, 1, Criterion::Time, 1);
    assert!(err.is_err());
}

#[test]
fn zero_k_is_invalid_query() {
    let model = test_data::direct_bus();
    let graph = GraphBuilder::build(&model);
    let err = Engine::new(&graph).k_shortest(1, 2, Criterion::Time, 0);
    assert!(err.is_err());
}

#[test]
fn unknown_city_is_a_hard_error() {
    let model = test_data::direct_bus();
    let graph = GraphBuilder::build(&model);
    let err = Engine::new(&graph).k_shortest(1, 999, Criterion::Time, 1);
    assert!(err.is_err());
}

#[test]
fn no_route_when_destination_is_unreachable() {
    let model = test_data::direct_bus();
    // city 2 has no outgoing legs at all and city 1's only leg terminates
    // there, so querying in the opposite direction must fail cleanly.
    let graph = GraphBuilder::build(&model);
    let result = Engine::new(&graph)
        .k_shortest(2, 1, Criterion::Time, 3)
        .unwrap();
    assert_eq!(result.status, QueryStatus::NoRoute);
    assert!(result.routes.is_empty());
}

#[test]
fn iteration_cap_yields_non_failing_status() {
    let model = test_data::dense_bus_grid(3, 3);
    let graph = GraphBuilder::build(&model);
    let mut config = SearchConfig::default();
    config.iteration_cap = 3;
    let result = Engine::with_config(&graph, config)
        .k_shortest(1, 9, Criterion::Time, 5)
        .unwrap();
    assert!(result.routes.len() <= 5);
    assert!(matches!(
        result.status,
        QueryStatus::BudgetExhausted | QueryStatus::NoRoute | QueryStatus::Ok
    ));
}

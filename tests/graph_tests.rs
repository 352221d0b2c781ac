/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */


use gridrail::GraphBuilder;

#[test]
fn transfer_city_gets_bidirectional_transfer_edges() {
    let model = test_data::intra_city_transfer();
    let graph = GraphBuilder::build(&model);

    let bus_idx = graph.station_index("A_0_1").unwrap();
    let train_idx = graph.station_index("Z_0_1").unwrap();

    assert!(graph
        .adjacency(bus_idx)
        .iter()
        .any(|l| l.is_transfer() && l.to == "Z_0_1"));
    assert!(graph
        .adjacency(train_idx)
        .iter()
        .any(|l| l.is_transfer() && l.to == "A_0_1"));
}

#[test]
fn single_station_city_gets_no_transfer_edge() {
    let model = test_data::direct_bus();
    let graph = GraphBuilder::build(&model);
    let idx = graph.station_index("A_0_0").unwrap();
    assert!(graph.adjacency(idx).iter().all(|l| !l.is_transfer()));
}

#[test]
fn real_legs_survive_unchanged() {
    let model = test_data::direct_bus();
    let graph = GraphBuilder::build(&model);
    let idx = graph.station_index("A_0_0").unwrap();
    let legs = graph.adjacency(idx);
    assert_eq!(legs.len(), 1);
    assert_eq!(legs[0].id, "bus1");
    assert_eq!(legs[0].price, 10);
}

#[test]
fn grid_station_count_matches_model() {
    let model = test_data::dense_bus_grid(3, 3);
    let graph = GraphBuilder::build(&model);
    assert_eq!(graph.station_count(), model.stations().count());
}

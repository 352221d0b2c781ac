/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Builds the immutable adjacency structure the engine searches over.
//!
//! The builder is the only mutable phase: it walks the model's real
//! legs and inserts, per station, the synthetic intra-city transfer
//! edge to the sibling station. The resulting [`Graph`] is read-only
//! and safe to share across concurrent queries.

use std::collections::HashMap;

use crate::model::{transfer_leg_id, CityId, Leg, Model};

/// An immutable, per-station outgoing-edge table, including synthetic
/// transfer edges. Stations are addressed by dense arena index.
pub struct Graph {
    /// Outgoing edges per station index; mirrors `Model::stations`.
    adjacency: Vec<Vec<Leg>>,
    station_ids: Vec<String>,
    station_city: Vec<CityId>,
    station_index: HashMap<String, usize>,
    city_stations: HashMap<CityId, (Option<usize>, Option<usize>)>,
}

impl Graph {
    pub fn adjacency(&self, station_idx: usize) -> &[Leg] {
        &self.adjacency[station_idx]
    }

    pub fn station_id(&self, station_idx: usize) -> &str {
        &self.station_ids[station_idx]
    }

    pub fn station_city(&self, station_idx: usize) -> CityId {
        self.station_city[station_idx]
    }

    /// Resolves a station id (as referenced by a leg's `from`/`to`
    /// field) to its dense arena index. Unknown ids return `None`; the
    /// engine treats that as a skip during expansion (§4.9).
    pub fn station_index(&self, id: &str) -> Option<usize> {
        self.station_index.get(id).copied()
    }

    pub fn city_station_indices(&self, city: CityId) -> Option<(Option<usize>, Option<usize>)> {
        self.city_stations.get(&city).copied()
    }

    pub fn station_count(&self) -> usize {
        self.adjacency.len()
    }
}

/// Builds a [`Graph`] from a [`Model`]. This is the single supported
/// boundary between the loader-built domain model and the read-only
/// structure the engine queries.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build(model: &Model) -> Graph {
        let station_count = model.stations().count();
        let mut adjacency: Vec<Vec<Leg>> = Vec::with_capacity(station_count);
        let mut station_ids = Vec::with_capacity(station_count);
        let mut station_city = Vec::with_capacity(station_count);
        let mut city_stations = HashMap::new();
        let mut transfer_edges = 0usize;

        let mut station_index = HashMap::with_capacity(station_count);
        for (idx, station) in model.stations().enumerate() {
            adjacency.push(station.outgoing.clone());
            station_ids.push(station.id.clone());
            station_city.push(station.city);
            station_index.insert(station.id.clone(), idx);
        }

        for city in model.cities() {
            city_stations.insert(city.id, (city.bus_station, city.train_station));
            // Invariant 5: a transfer edge exists between a city's two
            // stations in both directions iff both stations exist.
            if let (Some(bus_idx), Some(train_idx)) = (city.bus_station, city.train_station) {
                let bus_id = station_ids[bus_idx].clone();
                let train_id = station_ids[train_idx].clone();
                adjacency[bus_idx].push(transfer_template(&bus_id, &train_id));
                adjacency[train_idx].push(transfer_template(&train_id, &bus_id));
                transfer_edges += 2;
            }
        }

        log::info!(
            "graph built: {} cities, {} stations, {} synthetic transfer edges",
            model.cities().count(),
            station_count,
            transfer_edges,
        );

        Graph {
            adjacency,
            station_ids,
            station_city,
            station_index,
            city_stations,
        }
    }
}

/// A transfer edge's own schedule fields are never read: its effective
/// duration is computed at search time from the most recent real leg's
/// `min_wait` (see the engine's expansion rule). Its template carries
/// placeholder zero times-of-day and zero price, as required for a
/// transfer leg's id prefix.
fn transfer_template(from: &str, to: &str) -> Leg {
    use crate::time::TimeOfDay;
    Leg {
        id: transfer_leg_id(from, to),
        from: from.to_owned(),
        to: to.to_owned(),
        departure_time: TimeOfDay::from_hm(0, 0),
        arrival_time: TimeOfDay::from_hm(0, 0),
        price: 0,
        min_wait: 0,
        absolute_departure_minute: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Leg, ModelBuilder, StationKind};
    use crate::time::TimeOfDay;

    #[test]
    fn transfer_edges_only_appear_when_both_stations_exist() {
        let mut b = ModelBuilder::new(1, 2);
        b.add_city(1, 0, 0).unwrap();
        b.add_city(2, 0, 1).unwrap();
        b.add_station(1, StationKind::Bus, vec![]).unwrap();
        b.add_station(1, StationKind::Train, vec![]).unwrap();
        b.add_station(2, StationKind::Bus, vec![]).unwrap();
        let model = b.build();
        let graph = GraphBuilder::build(&model);

        let city1 = model.city_by_id(1).unwrap();
        let (bus1, train1) = model.city_stations(city1);
        let bus1_idx = model.station_index(&bus1.unwrap().id).unwrap();
        let train1_idx = model.station_index(&train1.unwrap().id).unwrap();
        assert!(graph
            .adjacency(bus1_idx)
            .iter()
            .any(|l| l.is_transfer() && l.to == train1.unwrap().id));
        assert!(graph
            .adjacency(train1_idx)
            .iter()
            .any(|l| l.is_transfer() && l.to == bus1.unwrap().id));

        let city2 = model.city_by_id(2).unwrap();
        let (bus2, _train2) = model.city_stations(city2);
        let bus2_idx = model.station_index(&bus2.unwrap().id).unwrap();
        assert!(graph.adjacency(bus2_idx).iter().all(|l| !l.is_transfer()));
    }

    #[test]
    fn real_legs_are_preserved() {
        let mut b = ModelBuilder::new(1, 2);
        b.add_city(1, 0, 0).unwrap();
        b.add_city(2, 0, 1).unwrap();
        let leg = Leg::scheduled(
            "l1",
            "A_0_0",
            "A_0_1",
            TimeOfDay::from_hm(8, 0),
            60,
            10,
            0,
        )
        .unwrap();
        b.add_station(1, StationKind::Bus, vec![leg]).unwrap();
        b.add_station(2, StationKind::Bus, vec![]).unwrap();
        let model = b.build();
        let graph = GraphBuilder::build(&model);
        let idx = model.station_index("A_0_0").unwrap();
        assert_eq!(graph.adjacency(idx).len(), 1);
        assert_eq!(graph.adjacency(idx)[0].id, "l1");
    }
}

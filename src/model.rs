/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Domain model: cities on a grid, their stations, and scheduled legs.
//!
//! Cities, stations and loader-provided legs are immutable once built.
//! Cyclic station <-> city references are expressed as arena indices
//! rather than pointers, per the source's own design note: the model
//! owns two vectors (`cities`, `stations`) and everything else refers
//! to entries by index or by the public identifier strings.

use std::collections::HashMap;

use crate::errors::RoutingError;
use crate::time::{duration_minutes, TimeOfDay};

/// Reserved prefix marking a synthetic intra-city transfer leg.
pub const TRANSFER_PREFIX: &str = "transfer_";

pub type CityId = u64;
pub type StationId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKind {
    Bus,
    Train,
}

impl StationKind {
    /// The single-character marker used in the station id convention,
    /// `"A_<row>_<col>"` for bus, `"Z_<row>_<col>"` for train.
    pub fn marker(&self) -> char {
        match self {
            StationKind::Bus => 'A',
            StationKind::Train => 'Z',
        }
    }
}

/// Builds a conventional station id for a city at `(row, col)`.
pub fn station_id(kind: StationKind, row: usize, col: usize) -> StationId {
    format!("{}_{}_{}", kind.marker(), row, col)
}

/// Builds the conventional id of the synthetic transfer leg between two
/// stations (see §6 of the design document: any id starting with
/// `transfer_` is a synthetic leg everywhere in the engine).
pub fn transfer_leg_id(from: &str, to: &str) -> String {
    format!("{}{}_to_{}", TRANSFER_PREFIX, from, to)
}

pub fn is_transfer_id(id: &str) -> bool {
    id.starts_with(TRANSFER_PREFIX)
}

/// A single scheduled vehicle movement, or a synthetic intra-city transfer.
///
/// `absolute_departure_minute` is `None` on every leg stored in the
/// model/graph (a schedule template); the engine fills it in when the
/// leg is taken as part of an assembled [`crate::route::Route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub id: String,
    pub from: StationId,
    pub to: StationId,
    pub departure_time: TimeOfDay,
    pub arrival_time: TimeOfDay,
    pub price: u32,
    pub min_wait: i64,
    pub absolute_departure_minute: Option<i64>,
}

impl Leg {
    /// Construct a real (non-transfer) scheduled leg from a departure
    /// time-of-day and a duration in minutes, per the model-input shape
    /// in the external interfaces section. Rejects a strictly negative
    /// duration; a zero duration collapses to an instantaneous hop.
    pub fn scheduled(
        id: impl Into<String>,
        from: impl Into<StationId>,
        to: impl Into<StationId>,
        departure_time: TimeOfDay,
        duration_minutes_param: i64,
        price: u32,
        min_wait: i64,
    ) -> Result<Self, RoutingError> {
        let id = id.into();
        if duration_minutes_param < 0 {
            return Err(RoutingError::NegativeDuration {
                id,
                duration: duration_minutes_param,
            });
        }
        let arrival_time =
            TimeOfDay::from_absolute_minute(departure_time.as_minutes() + duration_minutes_param);
        Ok(Leg {
            id,
            from: from.into(),
            to: to.into(),
            departure_time,
            arrival_time,
            price,
            min_wait,
            absolute_departure_minute: None,
        })
    }

    pub fn is_transfer(&self) -> bool {
        is_transfer_id(&self.id)
    }

    pub fn duration(&self) -> i64 {
        duration_minutes(self.departure_time, self.arrival_time)
    }
}

#[derive(Debug, Clone)]
pub struct Station {
    pub id: StationId,
    pub kind: StationKind,
    pub city: CityId,
    /// Real, loader-provided outgoing legs. The graph builder appends
    /// the synthetic transfer edge separately (see [`crate::graph`]).
    pub outgoing: Vec<Leg>,
}

#[derive(Debug, Clone)]
pub struct City {
    pub id: CityId,
    pub row: usize,
    pub col: usize,
    pub bus_station: Option<usize>,
    pub train_station: Option<usize>,
}

/// The arena-backed domain model: a grid of cities, their stations, and
/// loader-provided real legs. Immutable once built by [`ModelBuilder`].
#[derive(Debug, Clone)]
pub struct Model {
    rows: usize,
    cols: usize,
    cities: Vec<City>,
    stations: Vec<Station>,
    city_by_id: HashMap<CityId, usize>,
    city_by_coord: HashMap<(usize, usize), usize>,
    station_by_id: HashMap<StationId, usize>,
}

impl Model {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn city_by_id(&self, id: CityId) -> Option<&City> {
        self.city_by_id.get(&id).map(|&idx| &self.cities[idx])
    }

    pub fn city_at(&self, row: usize, col: usize) -> Option<&City> {
        self.city_by_coord
            .get(&(row, col))
            .map(|&idx| &self.cities[idx])
    }

    pub fn station_by_id(&self, id: &str) -> Option<&Station> {
        self.station_by_id.get(id).map(|&idx| &self.stations[idx])
    }

    pub fn station_at_index(&self, idx: usize) -> &Station {
        &self.stations[idx]
    }

    pub fn station_index(&self, id: &str) -> Option<usize> {
        self.station_by_id.get(id).copied()
    }

    pub fn city_stations(&self, city: &City) -> (Option<&Station>, Option<&Station>) {
        (
            city.bus_station.map(|idx| &self.stations[idx]),
            city.train_station.map(|idx| &self.stations[idx]),
        )
    }
}

/// Mutable construction phase for [`Model`]. Separated from the
/// immutable read-only model per the design note distinguishing the
/// mutable build phase from the read-only query phase.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    rows: usize,
    cols: usize,
    cities: Vec<City>,
    stations: Vec<Station>,
    city_by_id: HashMap<CityId, usize>,
    city_by_coord: HashMap<(usize, usize), usize>,
    station_by_id: HashMap<StationId, usize>,
}

impl ModelBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        ModelBuilder {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Registers a city at `(row, col)`. Returns an error if the cell is
    /// already occupied.
    pub fn add_city(&mut self, id: CityId, row: usize, col: usize) -> Result<(), RoutingError> {
        if self.city_by_coord.contains_key(&(row, col)) {
            return Err(RoutingError::DuplicateCity { row, col });
        }
        let idx = self.cities.len();
        self.cities.push(City {
            id,
            row,
            col,
            bus_station: None,
            train_station: None,
        });
        self.city_by_id.insert(id, idx);
        self.city_by_coord.insert((row, col), idx);
        Ok(())
    }

    /// Registers a station of the given kind for `city`, with its real
    /// outgoing legs. At most one station per kind per city is allowed.
    pub fn add_station(
        &mut self,
        city: CityId,
        kind: StationKind,
        outgoing: Vec<Leg>,
    ) -> Result<StationId, RoutingError> {
        let city_idx = *self
            .city_by_id
            .get(&city)
            .ok_or(RoutingError::UnknownCity(city))?;
        let row = self.cities[city_idx].row;
        let col = self.cities[city_idx].col;
        let id = station_id(kind, row, col);
        if self.station_by_id.contains_key(&id) {
            return Err(RoutingError::DuplicateStation(id));
        }
        let station_idx = self.stations.len();
        self.stations.push(Station {
            id: id.clone(),
            kind,
            city,
            outgoing,
        });
        match kind {
            StationKind::Bus => self.cities[city_idx].bus_station = Some(station_idx),
            StationKind::Train => self.cities[city_idx].train_station = Some(station_idx),
        }
        self.station_by_id.insert(id.clone(), station_idx);
        Ok(id)
    }

    pub fn build(self) -> Model {
        Model {
            rows: self.rows,
            cols: self.cols,
            cities: self.cities,
            stations: self.stations,
            city_by_id: self.city_by_id,
            city_by_coord: self.city_by_coord,
            station_by_id: self.station_by_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_ids_follow_convention() {
        assert_eq!(station_id(StationKind::Bus, 2, 5), "A_2_5");
        assert_eq!(station_id(StationKind::Train, 2, 5), "Z_2_5");
    }

    #[test]
    fn transfer_ids_are_recognized() {
        let id = transfer_leg_id("A_0_0", "Z_0_0");
        assert!(is_transfer_id(&id));
        assert!(!is_transfer_id("A_0_0"));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = Leg::scheduled("l1", "A_0_0", "A_0_1", TimeOfDay::from_hm(8, 0), -5, 10, 0);
        assert!(err.is_err());
    }

    #[test]
    fn zero_duration_is_admissible() {
        let leg = Leg::scheduled("l1", "A_0_0", "A_0_1", TimeOfDay::from_hm(8, 0), 0, 10, 0)
            .expect("zero duration is admissible");
        assert_eq!(leg.duration(), 0);
    }

    #[test]
    fn duplicate_city_is_rejected() {
        let mut b = ModelBuilder::new(2, 2);
        b.add_city(1, 0, 0).unwrap();
        assert!(b.add_city(2, 0, 0).is_err());
    }

    #[test]
    fn duplicate_station_is_rejected() {
        let mut b = ModelBuilder::new(2, 2);
        b.add_city(1, 0, 0).unwrap();
        b.add_station(1, StationKind::Bus, vec![]).unwrap();
        assert!(b.add_station(1, StationKind::Bus, vec![]).is_err());
    }
}

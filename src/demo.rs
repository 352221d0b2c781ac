/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! A deterministic synthetic grid generator used by the demo CLI, the
//! benchmark suite, and engine tests that want a network larger than a
//! handful of hand-built cities.
//!
//! This is not the JSON/GTFS-style loader a real deployment would use;
//! that loader is an external collaborator. This generator exists only
//! so the library can be exercised without one.

use crate::model::{Leg, Model, ModelBuilder, StationKind};
use crate::time::TimeOfDay;

/// Builds a `rows x cols` grid where every city has both a bus and a
/// train station. Bus legs run along each row (east-bound and
/// west-bound); train legs run along each column (south-bound and
/// north-bound). Departure times are a deterministic function of the
/// city's coordinates so the network is reproducible across runs.
pub fn synthetic_grid(rows: usize, cols: usize) -> Model {
    let mut builder = ModelBuilder::new(rows, cols);
    let mut next_city_id: u64 = 0;
    for row in 0..rows {
        for col in 0..cols {
            next_city_id += 1;
            builder
                .add_city(next_city_id, row, col)
                .expect("grid cells are unique by construction");
        }
    }

    for row in 0..rows {
        for col in 0..cols {
            let city_id = (row * cols + col) as u64 + 1;
            let bus_legs = horizontal_legs(row, col, cols);
            let train_legs = vertical_legs(row, col, rows);
            builder
                .add_station(city_id, StationKind::Bus, bus_legs)
                .expect("city was just registered");
            builder
                .add_station(city_id, StationKind::Train, train_legs)
                .expect("city was just registered");
        }
    }

    builder.build()
}

fn dep_time(seed: usize) -> TimeOfDay {
    let minute_of_day = (seed * 37) % 1440;
    TimeOfDay::from_absolute_minute(minute_of_day as i64)
}

fn horizontal_legs(row: usize, col: usize, cols: usize) -> Vec<Leg> {
    let mut legs = Vec::new();
    if col + 1 < cols {
        let from = crate::model::station_id(StationKind::Bus, row, col);
        let to = crate::model::station_id(StationKind::Bus, row, col + 1);
        legs.push(
            Leg::scheduled(
                format!("bus_{row}_{col}_east"),
                from,
                to,
                dep_time(row * 10 + col),
                20 + (col % 4) as i64 * 5,
                8 + (col % 3) as u32 * 2,
                5,
            )
            .expect("synthetic schedule has nonnegative duration"),
        );
    }
    if col > 0 {
        let from = crate::model::station_id(StationKind::Bus, row, col);
        let to = crate::model::station_id(StationKind::Bus, row, col - 1);
        legs.push(
            Leg::scheduled(
                format!("bus_{row}_{col}_west"),
                from,
                to,
                dep_time(row * 10 + col + 500),
                20 + (col % 4) as i64 * 5,
                8 + (col % 3) as u32 * 2,
                5,
            )
            .expect("synthetic schedule has nonnegative duration"),
        );
    }
    legs
}

fn vertical_legs(row: usize, col: usize, rows: usize) -> Vec<Leg> {
    let mut legs = Vec::new();
    if row + 1 < rows {
        let from = crate::model::station_id(StationKind::Train, row, col);
        let to = crate::model::station_id(StationKind::Train, row + 1, col);
        legs.push(
            Leg::scheduled(
                format!("train_{row}_{col}_south"),
                from,
                to,
                dep_time(col * 13 + row + 200),
                15 + (row % 5) as i64 * 4,
                15 + (row % 4) as u32 * 3,
                10,
            )
            .expect("synthetic schedule has nonnegative duration"),
        );
    }
    if row > 0 {
        let from = crate::model::station_id(StationKind::Train, row, col);
        let to = crate::model::station_id(StationKind::Train, row - 1, col);
        legs.push(
            Leg::scheduled(
                format!("train_{row}_{col}_north"),
                from,
                to,
                dep_time(col * 13 + row + 700),
                15 + (row % 5) as i64 * 4,
                15 + (row % 4) as u32 * 3,
                10,
            )
            .expect("synthetic schedule has nonnegative duration"),
        );
    }
    legs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_expected_city_count() {
        let model = synthetic_grid(4, 5);
        assert_eq!(model.cities().count(), 20);
        assert_eq!(model.stations().count(), 40);
    }

    #[test]
    fn corner_city_has_fewer_legs_than_interior() {
        let model = synthetic_grid(4, 5);
        let corner = model.station_by_id("A_0_0").unwrap();
        let interior = model.station_by_id("A_1_1").unwrap();
        assert!(corner.outgoing.len() < interior.outgoing.len());
    }
}

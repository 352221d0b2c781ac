/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The immutable route record and the post-hoc transfer-count rule.

use std::fmt;

use crate::model::{CityId, Leg};

/// Counts mode switches in an assembled path: the number of times two
/// consecutive *non-transfer* legs carry different leg ids. Synthetic
/// transfer legs are skipped entirely and never themselves increment
/// the count. This is the authoritative count at emission time; the
/// engine's in-flight `transfers` field is only a search heuristic.
pub fn transfer_count(legs: &[Leg]) -> u32 {
    let mut count = 0;
    let mut prev_id: Option<&str> = None;
    for leg in legs {
        if leg.is_transfer() {
            continue;
        }
        if let Some(prev) = prev_id {
            if prev != leg.id {
                count += 1;
            }
        }
        prev_id = Some(&leg.id);
    }
    count
}

/// A complete, time-consistent journey from a station in the origin
/// city to a station in the destination city.
#[derive(Debug, Clone)]
pub struct Route {
    pub origin: CityId,
    pub destination: CityId,
    pub legs: Vec<Leg>,
    pub total_price: u32,
    pub total_time: i64,
    pub transfer_count: u32,
}

impl Route {
    /// Assembles a route from a terminal path. `total_time` is the
    /// arrival minute of the last leg, matching the terminal search
    /// state's accumulated `total_time`.
    pub fn assemble(origin: CityId, destination: CityId, legs: Vec<Leg>, total_time: i64) -> Self {
        let total_price = legs
            .iter()
            .filter(|l| !l.is_transfer())
            .map(|l| l.price)
            .sum();
        let transfer_count = transfer_count(&legs);
        Route {
            origin,
            destination,
            legs,
            total_price,
            total_time,
            transfer_count,
        }
    }

    /// True if the route contains at least one real (non-transfer) leg.
    /// A route failing this is degenerate and must be rejected at
    /// emission time.
    pub fn has_real_leg(&self) -> bool {
        self.legs.iter().any(|l| !l.is_transfer())
    }

    /// Canonical identity of this route's leg sequence, used to
    /// suppress duplicate itineraries reached via different search
    /// orders.
    pub fn signature(&self) -> String {
        signature_of(&self.legs)
    }
}

pub fn signature_of(legs: &[Leg]) -> String {
    let mut sig = String::new();
    for (i, leg) in legs.iter().enumerate() {
        if i > 0 {
            sig.push('|');
        }
        sig.push_str(&format!(
            "{}:{}->{}_{}_{}",
            i, leg.from, leg.to, leg.id, leg.departure_time
        ));
    }
    sig
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leg in &self.legs {
            if leg.is_transfer() {
                writeln!(f, "transfer: {} -> {} ({})", leg.from, leg.to, leg.departure_time)?;
            } else {
                writeln!(
                    f,
                    "{}: {} ({}) -> {} ({})",
                    leg.id, leg.from, leg.departure_time, leg.to, leg.arrival_time
                )?;
            }
        }
        writeln!(
            f,
            "total: {} min, {} price, {} transfers",
            self.total_time, self.total_price, self.transfer_count
        )
    }
}

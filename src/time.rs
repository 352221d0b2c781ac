/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Wall-clock time-of-day <-> monotonic "minutes since epoch" arithmetic.
//!
//! The search engine never stores wall-clock times in its frontier; it
//! works exclusively in `absolute_minute` (minutes since the virtual
//! midnight of "day 0") and only converts to a time-of-day at display
//! boundaries. This sidesteps overnight-wraparound bugs entirely.

use std::fmt;

pub const MINUTES_PER_DAY: i64 = 1440;

/// A wall-clock time-of-day, `00:00`-`23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    minutes: u32,
}

impl TimeOfDay {
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        assert!(hour < 24 && minute < 60, "time-of-day out of range");
        TimeOfDay {
            minutes: hour * 60 + minute,
        }
    }

    /// Build a time-of-day from an absolute minute, wrapping modulo a day.
    pub fn from_absolute_minute(minute: i64) -> Self {
        let m = minute.rem_euclid(MINUTES_PER_DAY) as u32;
        TimeOfDay { minutes: m }
    }

    pub fn hour(&self) -> u32 {
        self.minutes / 60
    }

    pub fn minute(&self) -> u32 {
        self.minutes % 60
    }

    /// Minutes since midnight, in `0..MINUTES_PER_DAY`.
    pub fn as_minutes(&self) -> i64 {
        self.minutes as i64
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// `(arrival - departure) mod MINUTES_PER_DAY`. Never negative; a leg that
/// crosses midnight simply wraps around.
pub fn duration_minutes(departure: TimeOfDay, arrival: TimeOfDay) -> i64 {
    (arrival.as_minutes() - departure.as_minutes()).rem_euclid(MINUTES_PER_DAY)
}

/// The earliest absolute minute `t_dep` such that:
/// - `t_dep mod MINUTES_PER_DAY == departure_tod`
/// - `t_dep >= arrival_minute + min_wait`
///
/// This is the day-wraparound rule from the expansion rule: today's slot is
/// used if it is not earlier than the feasible boarding instant, otherwise
/// tomorrow's instance of the same time-of-day is used.
pub fn next_feasible_boarding(arrival_minute: i64, min_wait: i64, departure_tod: TimeOfDay) -> i64 {
    let earliest = arrival_minute + min_wait;
    let day = arrival_minute.div_euclid(MINUTES_PER_DAY);
    let candidate = day * MINUTES_PER_DAY + departure_tod.as_minutes();
    if candidate >= earliest {
        candidate
    } else {
        candidate + MINUTES_PER_DAY
    }
}

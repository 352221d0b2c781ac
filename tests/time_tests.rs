/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use gridrail::{duration_minutes, next_feasible_boarding, TimeOfDay, MINUTES_PER_DAY};

#[test]
fn duration_round_trips_through_time_of_day() {
    let dep = TimeOfDay::from_hm(22, 0);
    let duration = 180;
    let arr = TimeOfDay::from_absolute_minute(dep.as_minutes() + duration);
    assert_eq!(duration_minutes(dep, arr), duration);
}

#[test]
fn time_of_day_is_periodic_across_many_days() {
    let base = 713;
    let tod = TimeOfDay::from_absolute_minute(base);
    for k in 1..5 {
        assert_eq!(
            tod,
            TimeOfDay::from_absolute_minute(base + k * MINUTES_PER_DAY)
        );
    }
}

#[test]
fn boarding_never_precedes_earliest_instant() {
    let dep_tod = TimeOfDay::from_hm(6, 15);
    for arrival in [0, 100, 370, 1000, 1439, 2000] {
        for min_wait in [0, 5, 45] {
            let t_dep = next_feasible_boarding(arrival, min_wait, dep_tod);
            assert!(t_dep >= arrival + min_wait);
            assert_eq!(t_dep.rem_euclid(MINUTES_PER_DAY), dep_tod.as_minutes());
        }
    }
}

#[test]
fn missed_connection_rolls_to_next_day() {
    let dep_tod = TimeOfDay::from_hm(8, 0);
    assert_eq!(next_feasible_boarding(540, 30, dep_tod), 1920);
}

/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

use crate::model::CityId;

/// Hard-fail conditions, reported before any search begins.
///
/// `NO_ROUTE` and `BUDGET_EXHAUSTED` are not represented here: per the
/// engine's error policy the search never throws once it starts. It
/// reports those through [`crate::engine::QueryStatus`] on a successful
/// [`crate::engine::QueryResult`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unknown city: {0:?}")]
    UnknownCity(CityId),

    #[error("duplicate station id: {0}")]
    DuplicateStation(String),

    #[error("duplicate city at ({row}, {col})")]
    DuplicateCity { row: usize, col: usize },

    #[error("rejected leg {id}: duration {duration} is negative")]
    NegativeDuration { id: String, duration: i64 },
}

/* Copyright (C) 2020 Yuval Deutscher

* This Source Code Form is subject to the terms of the Mozilla Public
* License, v. 2.0. If a copy of the MPL was not distributed with this
* file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::error::Error;
use std::str::FromStr;

use clap::{App, Arg};

use gridrail::{demo, Criterion, Engine, GraphBuilder, QueryStatus};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let matches = App::new("GridRail")
        .version("0.1")
        .author("GridRail Contributors")
        .about("K-shortest-paths demo over a synthetic bus+train grid")
        .arg(
            Arg::with_name("rows")
                .long("rows")
                .value_name("N")
                .help("Number of grid rows")
                .takes_value(true)
                .default_value("6"),
        )
        .arg(
            Arg::with_name("cols")
                .long("cols")
                .value_name("N")
                .help("Number of grid columns")
                .takes_value(true)
                .default_value("6"),
        )
        .arg(
            Arg::with_name("from")
                .long("from")
                .value_name("ROW,COL")
                .help("Origin city coordinates")
                .takes_value(true)
                .default_value("0,0"),
        )
        .arg(
            Arg::with_name("to")
                .long("to")
                .value_name("ROW,COL")
                .help("Destination city coordinates")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("criterion")
                .short("c")
                .long("criterion")
                .value_name("CRITERION")
                .help("Ranking criterion: time, price, or transfers")
                .takes_value(true)
                .default_value("time"),
        )
        .arg(
            Arg::with_name("k")
                .short("k")
                .long("count")
                .value_name("K")
                .help("Number of routes to return")
                .takes_value(true)
                .default_value("3"),
        )
        .get_matches();

    let rows: usize = matches.value_of("rows").unwrap().parse()?;
    let cols: usize = matches.value_of("cols").unwrap().parse()?;
    let criterion = Criterion::from_str(matches.value_of("criterion").unwrap())?;
    let k: usize = matches.value_of("k").unwrap().parse()?;

    let origin = parse_coord(matches.value_of("from").unwrap(), cols)?;
    let destination = parse_coord(matches.value_of("to").unwrap(), cols)?;

    let model = demo::synthetic_grid(rows, cols);
    let graph = GraphBuilder::build(&model);
    let engine = Engine::new(&graph);
    let result = engine.k_shortest(origin, destination, criterion, k)?;

    match result.status {
        QueryStatus::Ok => {
            for (i, route) in result.routes.iter().enumerate() {
                println!("--- route {} ---", i + 1);
                print!("{}", route);
            }
        }
        QueryStatus::NoRoute => println!("no route found"),
        QueryStatus::BudgetExhausted => {
            println!("search budget exhausted; returning best {} found", result.routes.len());
            for (i, route) in result.routes.iter().enumerate() {
                println!("--- route {} ---", i + 1);
                print!("{}", route);
            }
        }
    }

    Ok(())
}

/// City ids in the synthetic grid are assigned row-major starting at 1
/// (see [`gridrail::demo::synthetic_grid`]); this recovers the id from
/// the `"row,col"` coordinates a user types on the command line.
fn parse_coord(s: &str, cols: usize) -> Result<u64, Box<dyn Error>> {
    let mut parts = s.splitn(2, ',');
    let row: usize = parts
        .next()
        .ok_or("missing row")?
        .trim()
        .parse()?;
    let col: usize = parts
        .next()
        .ok_or("missing col")?
        .trim()
        .parse()?;
    Ok((row * cols + col) as u64 + 1)
}

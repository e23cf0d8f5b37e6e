//! CSV waypoint loader.
//!
//! # CSV format
//!
//! One row per waypoint, in travel order:
//!
//! ```csv
//! x,y
//! 120,470
//! 600,470
//! 830,200
//! ```
//!
//! An empty file (header only) loads as an empty, inert [`Path`].

use std::io::Read;

use serde::Deserialize;

use rts_core::Vec2;

use crate::{Path, PathError, PathResult};

#[derive(Deserialize)]
struct WaypointRecord {
    x: f32,
    y: f32,
}

/// Load a patrol or follow route from a CSV file.
pub fn load_path_csv(path: &std::path::Path) -> PathResult<Path> {
    let file = std::fs::File::open(path).map_err(PathError::Io)?;
    load_path_reader(file)
}

/// Like [`load_path_csv`] but accepts any `Read` source.
pub fn load_path_reader<R: Read>(reader: R) -> PathResult<Path> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut waypoints = Vec::new();
    for (line, result) in csv_reader.deserialize::<WaypointRecord>().enumerate() {
        let row = result.map_err(|e| PathError::Parse(e.to_string()))?;
        if !row.x.is_finite() || !row.y.is_finite() {
            return Err(PathError::Parse(format!(
                "waypoint {} is not finite: ({}, {})",
                line + 1,
                row.x,
                row.y
            )));
        }
        waypoints.push(Vec2::new(row.x, row.y));
    }

    Ok(Path::new(waypoints))
}

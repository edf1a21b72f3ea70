//! CSV export of a recorded trajectory
//!
//! One row per body per snapshot:
//!
//! ```text
//! time,body_name,x,y,z,vx,vy,vz
//! 0,Earth,-4670...,0,0,0,12.4...,0
//! ```
//!
//! The exporter only reads the trajectory; it never touches the runner.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::simulation::runner::Trajectory;

pub const HEADER: [&str; 8] = ["time", "body_name", "x", "y", "z", "vx", "vy", "vz"];

#[derive(Serialize)]
struct Row<'a> {
    time: f64,
    body_name: &'a str,
    x: f64,
    y: f64,
    z: f64,
    vx: f64,
    vy: f64,
    vz: f64,
}

/// Write `trajectory` to any writer. Returns the number of data rows.
pub fn write_trajectory<W: Write>(trajectory: &Trajectory, out: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(HEADER)?;

    let mut rows = 0;
    for (time, bodies) in trajectory.records() {
        for (name, x, v) in bodies {
            wtr.serialize(Row {
                time,
                body_name: name,
                x: x.x,
                y: x.y,
                z: x.z,
                vx: v.x,
                vy: v.y,
                vz: v.z,
            })?;
            rows += 1;
        }
    }

    wtr.flush()?;
    Ok(rows)
}

/// Write `trajectory` to a CSV file at `path`
pub fn export_trajectory<P: AsRef<Path>>(trajectory: &Trajectory, path: P) -> Result<usize> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let rows = write_trajectory(trajectory, file).with_context(|| format!("cannot write {}", path.display()))?;

    info!(
        "exported {} snapshots ({} rows) to {}",
        trajectory.len(),
        rows,
        path.display()
    );
    Ok(rows)
}

//! Route files exchanged with an external flight controller.
//!
//! The text form has one waypoint per line written as `(x, y, z)`. Blank lines are skipped and
//! whitespace around numbers is ignored. The JSON form is a list of `[x, y, z]` triples.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path as FsPath;

use crate::error::WaypointError;
use crate::path::Path;
use crate::point::*;

/// Parses `(x, y, z)`. The parentheses are optional.
pub fn parse_triple(line: &str) -> Option<Point> {
    let line = line.trim();
    let inner = line
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(line);

    let mut coords = inner.split(',').map(|c| c.trim().parse::<f64>());
    match (coords.next(), coords.next(), coords.next(), coords.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Some(point(x, y, z)),
        _ => None,
    }
}

pub fn format_triple(p: &Point) -> String {
    format!("({}, {}, {})", p.x, p.y, p.z)
}

pub fn write_route<W: Write>(mut writer: W, path: &Path) -> Result<(), WaypointError> {
    for p in &path.waypoints {
        writeln!(writer, "{}", format_triple(p))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_route<R: BufRead>(reader: R) -> Result<Path, WaypointError> {
    let mut waypoints = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let p = parse_triple(&line).ok_or_else(|| WaypointError::Parse {
            line: i + 1,
            content: line.clone(),
        })?;
        waypoints.push(p);
    }
    Ok(Path::new(waypoints))
}

pub fn save_route(file: impl AsRef<FsPath>, path: &Path) -> Result<(), WaypointError> {
    write_route(BufWriter::new(File::create(file)?), path)
}

pub fn load_route(file: impl AsRef<FsPath>) -> Result<Path, WaypointError> {
    read_route(BufReader::new(File::open(file)?))
}

pub fn save_json(file: impl AsRef<FsPath>, path: &Path) -> Result<(), WaypointError> {
    let mut writer = BufWriter::new(File::create(file)?);
    serde_json::to_writer_pretty(&mut writer, path)?;
    writer.flush()?;
    Ok(())
}

pub fn load_json(file: impl AsRef<FsPath>) -> Result<Path, WaypointError> {
    let mut json = String::new();
    File::open(file)?.read_to_string(&mut json)?;
    Ok(serde_json::from_str(&json)?)
}

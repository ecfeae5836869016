//! CSV telemetry of per-step summary records.

use crate::error::{IoError, Result};
use nomads_data::PopulationStats;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub const CSV_HEADER: &str =
    "time,world area,plant count,population,female population,sense,stamina,allegiance,tribal";

/// Writes one CSV row per summary record. The header goes out on creation.
pub struct StatsWriter<W: Write = BufWriter<File>> {
    out: W,
    rows: usize,
}

impl StatsWriter<BufWriter<File>> {
    /// Creates (truncating) the CSV file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_writer(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> StatsWriter<W> {
    pub fn from_writer(mut out: W) -> Result<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out, rows: 0 })
    }

    pub fn record(&mut self, stats: &PopulationStats) -> Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{},{},{}",
            stats.time,
            stats.world_area,
            stats.vegetation_count,
            stats.population,
            stats.female_population,
            stats.mean_sense,
            stats.mean_stamina,
            stats.mean_allegiance,
            stats.mean_tribal_loyalty
        )?;
        self.rows += 1;
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

fn parse_row(line: usize, row: &str) -> Result<PopulationStats> {
    let fields: Vec<&str> = row.split(',').map(str::trim).collect();
    if fields.len() != 9 {
        return Err(IoError::InvalidStats {
            line,
            reason: format!("expected 9 fields, found {}", fields.len()),
        });
    }
    let bad = |name: &str| IoError::InvalidStats {
        line,
        reason: format!("bad {name} value"),
    };
    let int = |i: usize, name: &str| fields[i].parse::<u64>().map_err(|_| bad(name));
    let float = |i: usize, name: &str| fields[i].parse::<f64>().map_err(|_| bad(name));
    Ok(PopulationStats {
        time: int(0, "time")?,
        world_area: int(1, "world area")? as usize,
        vegetation_count: int(2, "plant count")? as usize,
        population: int(3, "population")? as usize,
        female_population: int(4, "female population")? as usize,
        mean_sense: float(5, "sense")?,
        mean_stamina: float(6, "stamina")?,
        mean_allegiance: float(7, "allegiance")?,
        mean_tribal_loyalty: float(8, "tribal")?,
    })
}

/// Parses CSV text produced by [`StatsWriter`]. Blank lines are ignored.
pub fn parse_stats<R: BufRead>(reader: R) -> Result<Vec<PopulationStats>> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || (i == 0 && line.starts_with("time")) {
            continue;
        }
        rows.push(parse_row(i + 1, &line)?);
    }
    Ok(rows)
}

pub fn read_stats<P: AsRef<Path>>(path: P) -> Result<Vec<PopulationStats>> {
    parse_stats(BufReader::new(File::open(path)?))
}

//! Hospital dataset loader (CSV).
//!
//! Expected header (order does not matter, names are case-insensitive):
//!
//! ```text
//! ID,Name,Level,Latitude,Longtitude
//! ```
//!
//! The published dataset spells the longitude column `Longtitude`; the
//! correct `Longitude` spelling is accepted too. `Level` is optional and
//! defaults to `Unknown`. Rows that fail to parse are counted and logged,
//! and only fail the load when no row survives.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{ensure_unique_hospital_ids, RegistryError};
use crate::types::Hospital;

const UNKNOWN_LEVEL: &str = "Unknown";

// ============================================================================
// CSV Quote-Aware Parsing
// ============================================================================

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

// ============================================================================
// Column Mapping
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    id: usize,
    name: usize,
    level: Option<usize>,
    latitude: usize,
    longitude: usize,
}

impl ColumnMap {
    fn from_header(header: &str, path: &Path) -> Result<Self, RegistryError> {
        let columns: Vec<String> = csv_split(header)
            .iter()
            .map(|c| c.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();
        let find = |names: &[&str]| columns.iter().position(|c| names.contains(&c.as_str()));
        let require = |names: &[&str], label: &'static str| {
            find(names).ok_or_else(|| RegistryError::MissingColumn(path.to_path_buf(), label))
        };

        Ok(Self {
            id: require(&["id"], "ID")?,
            name: require(&["name"], "Name")?,
            level: find(&["level"]),
            latitude: require(&["latitude", "lat"], "Latitude")?,
            longitude: require(&["longitude", "longtitude", "lon", "lng"], "Longitude")?,
        })
    }
}

fn parse_row(line: &str, cols: ColumnMap) -> Result<Hospital, String> {
    let fields = csv_split(line);
    let field = |idx: usize, label: &str| {
        fields
            .get(idx)
            .map(|s| s.trim())
            .ok_or_else(|| format!("missing {label} field"))
    };

    let id_raw = field(cols.id, "ID")?;
    // Datasets exported from spreadsheets sometimes carry ids as "3.0"
    let id = id_raw
        .parse::<u32>()
        .or_else(|_| match id_raw.parse::<f64>() {
            Ok(v) if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) => Ok(v as u32),
            _ => Err(format!("invalid ID '{id_raw}'")),
        })?;

    let name = field(cols.name, "Name")?;
    if name.is_empty() {
        return Err(format!("hospital {id} has an empty name"));
    }

    let level = cols
        .level
        .and_then(|idx| fields.get(idx))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_LEVEL);

    let parse_coord = |idx: usize, label: &str| -> Result<f64, String> {
        let raw = field(idx, label)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid {label} '{raw}'"))
    };
    let latitude = parse_coord(cols.latitude, "Latitude")?;
    let longitude = parse_coord(cols.longitude, "Longitude")?;

    Ok(Hospital::new(id, name, level, latitude, longitude))
}

// ============================================================================
// Loader
// ============================================================================

/// Load the hospital registry from a CSV file, in file order.
pub fn load_hospitals_csv(path: impl AsRef<Path>) -> Result<Vec<Hospital>, RegistryError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RegistryError::Io(path.to_path_buf(), e))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| RegistryError::Io(path.to_path_buf(), e))?,
        None => {
            return Err(RegistryError::NoRows {
                path: path.to_path_buf(),
                errors: 0,
                blank: 0,
            })
        }
    };
    let cols = ColumnMap::from_header(&header, path)?;

    let mut hospitals = Vec::new();
    let mut errors = 0usize;
    let mut blank = 0usize;

    for (idx, line_result) in lines.enumerate() {
        let line_num = idx + 2;
        let line = line_result.map_err(|e| RegistryError::Io(path.to_path_buf(), e))?;
        if line.trim().is_empty() {
            blank += 1;
            continue;
        }

        match parse_row(&line, cols) {
            Ok(h) => hospitals.push(h),
            Err(e) => {
                if errors < 10 {
                    tracing::warn!(
                        file = %path.display(),
                        line = line_num,
                        error = %e,
                        "Skipping hospital row"
                    );
                }
                errors += 1;
            }
        }
    }

    if hospitals.is_empty() {
        return Err(RegistryError::NoRows {
            path: path.to_path_buf(),
            errors,
            blank,
        });
    }
    ensure_unique_hospital_ids(&hospitals)?;

    tracing::info!(
        file = %path.display(),
        hospitals = hospitals.len(),
        skipped = errors,
        "Hospital registry loaded"
    );

    Ok(hospitals)
}

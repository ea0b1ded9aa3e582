//! Ship catalog loading and management.
//!
//! This module loads drive profiles from CSV files and provides catalog
//! lookup functionality.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::actor::{Ship, TravelProfile, WormholeStrategy};
use crate::error::{Error, Result};

/// Mapping of canonical field name -> possible header synonyms.
const HEADER_SYNONYMS: &[(&str, &[&str])] = &[
    ("name", &["name", "shipname", "ship_name", "ship"]),
    (
        "hyperdrive_fuel",
        &["hyperdrive_fuel", "hyperlane_fuel", "hyperdrive", "hyper_fuel"],
    ),
    ("jump_fuel", &["jump_fuel", "jumpdrive_fuel", "jump_drive_fuel"]),
    ("jump_range", &["jump_range", "range", "jumprange_ly"]),
    ("wormholes", &["wormholes", "wormhole_strategy", "wormhole"]),
];

const REQUIRED_FIELDS: &[&str] = &["name", "hyperdrive_fuel", "jump_fuel", "jump_range"];

/// Collection of ship definitions loaded from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct ShipCatalog {
    ships: HashMap<String, Ship>,
    source: Option<PathBuf>,
}

impl ShipCatalog {
    /// Load a ship catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        debug!(path = %path.display(), ships = catalog.ships.len(), "loaded ship catalog");
        Ok(catalog)
    }

    /// Load a ship catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::ShipDataValidation {
                message: format!("failed to read ship catalog headers: {err}"),
            })?
            .clone();
        let index_map = resolve_columns(&headers)?;

        let mut ships = HashMap::new();
        let mut row_num: usize = 1; // header is typically line 1
        for result in csv_reader.records() {
            row_num += 1;
            let record = result.map_err(|e| Error::ShipDataValidation {
                message: e.to_string(),
            })?;
            let ship = parse_row(&index_map, &record, row_num)?;

            let key = normalize_name(&ship.name);
            if ships.contains_key(&key) {
                return Err(Error::DuplicateShipName { name: key });
            }
            ships.insert(key, ship);
        }

        Ok(Self {
            ships,
            source: None,
        })
    }

    /// Get a ship by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Ship> {
        self.ships.get(&normalize_name(name))
    }

    /// Get a sorted list of all ship names.
    pub fn ship_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ships.values().map(|s| s.name.clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Normalize header strings for robust matching.
fn normalize_header(s: &str) -> String {
    s.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

fn resolve_columns(headers: &StringRecord) -> Result<BTreeMap<&'static str, usize>> {
    let normalized_headers: Vec<String> = headers.iter().map(normalize_header).collect();

    let mut index_map = BTreeMap::new();
    for (canon, alts) in HEADER_SYNONYMS {
        let found = alts.iter().find_map(|alt| {
            let alt_n = normalize_header(alt);
            normalized_headers.iter().position(|h| *h == alt_n)
        });
        if let Some(index) = found {
            index_map.insert(*canon, index);
        }
    }

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !index_map.contains_key(field))
        .collect();
    if !missing.is_empty() {
        return Err(Error::ShipDataValidation {
            message: format!(
                "ship catalog missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }

    Ok(index_map)
}

fn parse_row(
    index_map: &BTreeMap<&'static str, usize>,
    record: &StringRecord,
    row: usize,
) -> Result<Ship> {
    let get = |field: &str| -> Option<&str> {
        index_map
            .get(field)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let name = get("name").unwrap_or_default().to_string();
    if name.is_empty() {
        return Err(Error::ShipDataValidation {
            message: format!("ship name must not be empty (row {row})"),
        });
    }

    let parse_fuel = |field: &str| -> Result<u32> {
        get(field)
            .ok_or_else(|| Error::ShipDataValidation {
                message: format!("missing {field} for ship '{name}' at row {row}"),
            })?
            .parse::<u32>()
            .map_err(|e| Error::ShipDataValidation {
                message: format!("invalid {field} for ship '{name}' at row {row}: {e}"),
            })
    };
    let hyperlane_fuel = parse_fuel("hyperdrive_fuel")?;
    let jump_fuel = parse_fuel("jump_fuel")?;

    let jump_range = get("jump_range")
        .ok_or_else(|| Error::ShipDataValidation {
            message: format!("missing jump_range for ship '{name}' at row {row}"),
        })?
        .parse::<f64>()
        .map_err(|e| Error::ShipDataValidation {
            message: format!("invalid jump_range for ship '{name}' at row {row}: {e}"),
        })?;
    if !jump_range.is_finite() || jump_range < 0.0 {
        return Err(Error::ShipDataValidation {
            message: format!("jump_range for ship '{name}' must be a finite non-negative number"),
        });
    }

    let wormholes = match get("wormholes") {
        Some(value) => value
            .parse::<WormholeStrategy>()
            .map_err(|message| Error::ShipDataValidation {
                message: format!("ship '{name}' at row {row}: {message}"),
            })?,
        None => WormholeStrategy::None,
    };

    Ok(Ship::new(
        name,
        TravelProfile {
            hyperlane_fuel,
            jump_fuel,
            jump_range,
            wormholes,
        },
    ))
}

/// Normalize a ship name for case-insensitive lookup.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn header_synonyms_are_accepted() {
        let csv = "Ship Name,hyperlane_fuel,jump_drive_fuel,Range\nCourier,100,200,9.5\n";
        let catalog = ShipCatalog::from_reader(Cursor::new(csv)).expect("synonyms resolve");
        let ship = catalog.get("courier").expect("ship exists");
        assert_eq!(ship.profile.hyperlane_fuel, 100);
        assert_eq!(ship.profile.jump_fuel, 200);
        assert_eq!(ship.profile.jump_range, 9.5);
        assert_eq!(ship.profile.wormholes, WormholeStrategy::None);
    }

    #[test]
    fn wormhole_column_is_optional_but_validated() {
        let csv = "name,hyperdrive_fuel,jump_fuel,jump_range,wormholes\nScout,100,0,0,sometimes\n";
        let err = ShipCatalog::from_reader(Cursor::new(csv)).expect_err("bad strategy");
        assert!(err.to_string().contains("sometimes"));
    }
}

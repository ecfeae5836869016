//! Fixed terrain layouts loaded from TOML map files.
//!
//! ```toml
//! width = 6
//! height = 2
//! rows = [
//!     "..~~..",
//!     ".~~~..",
//! ]
//! ```
//!
//! `~` and `#` mark water; any other character is dry land.

use crate::error::{IoError, Result};
use nomads_data::TerrainLayout;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MapFile {
    width: u16,
    height: u16,
    rows: Vec<String>,
}

fn is_water(c: char) -> bool {
    matches!(c, '~' | '#')
}

/// Parses map text into a layout, checking that rows match the declared size.
pub fn parse_map(content: &str) -> Result<TerrainLayout> {
    let map: MapFile = toml::from_str(content)?;
    if map.width == 0 || map.height == 0 {
        return Err(IoError::invalid_map("dimensions must be positive"));
    }
    if map.rows.len() != map.height as usize {
        return Err(IoError::invalid_map(format!(
            "declared height {} but found {} rows",
            map.height,
            map.rows.len()
        )));
    }

    let mut water = Vec::with_capacity(map.width as usize * map.height as usize);
    for (i, row) in map.rows.iter().enumerate() {
        let cells = row.chars().count();
        if cells != map.width as usize {
            return Err(IoError::invalid_map(format!(
                "row {} has {} cells, expected {}",
                i + 1,
                cells,
                map.width
            )));
        }
        water.extend(row.chars().map(is_water));
    }

    Ok(TerrainLayout {
        width: map.width,
        height: map.height,
        water,
    })
}

pub fn load_map<P: AsRef<Path>>(path: P) -> Result<TerrainLayout> {
    let content = std::fs::read_to_string(path)?;
    parse_map(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_map() {
        let layout = parse_map(
            r#"
            width = 4
            height = 2
            rows = ["~..#", "...."]
            "#,
        )
        .unwrap();
        assert_eq!(layout.width, 4);
        assert_eq!(
            layout.water,
            vec![true, false, false, true, false, false, false, false]
        );
        assert!(layout.is_water(0, 3));
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = parse_map("width = 2\nheight = 3\nrows = [\"..\", \"..\"]\n").unwrap_err();
        assert!(matches!(err, IoError::InvalidMap(_)));
    }

    #[test]
    fn test_ragged_row() {
        let err = parse_map("width = 3\nheight = 2\nrows = [\"...\", \"..\"]\n").unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(parse_map("width = "), Err(IoError::Toml(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pond.toml");
        std::fs::write(&path, "width = 1\nheight = 1\nrows = [\"~\"]\n").unwrap();
        assert!(load_map(&path).unwrap().is_water(0, 0));
    }
}

//! TOML-backed palette mapping voxel ids to names and colors.
//!
//! The palette exists for diagnostics and external renderers; the grid core
//! stores and compares raw ids only.

use std::fmt;
use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::Deserialize;

use crate::Voxel;

#[derive(Clone, Debug, PartialEq)]
pub struct PaletteEntry {
    pub voxel: Voxel,
    pub name: String,
    pub color: [u8; 3],
}

/// Ordered palette with a name index. Id 0 is always air.
#[derive(Default, Clone, Debug)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,
    pub by_name: HashMap<String, Voxel>,
}

#[derive(Debug)]
pub enum PaletteError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    ReservedId(String),
    DuplicateId(u16),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Io(e) => write!(f, "palette io error: {}", e),
            PaletteError::Parse(e) => write!(f, "palette parse error: {}", e),
            PaletteError::ReservedId(name) => {
                write!(f, "palette entry '{}' uses reserved id 0 (air)", name)
            }
            PaletteError::DuplicateId(id) => write!(f, "palette defines id {} twice", id),
        }
    }
}

impl std::error::Error for PaletteError {}

impl From<std::io::Error> for PaletteError {
    fn from(e: std::io::Error) -> Self {
        PaletteError::Io(e)
    }
}

impl From<toml::de::Error> for PaletteError {
    fn from(e: toml::de::Error) -> Self {
        PaletteError::Parse(e)
    }
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, v: Voxel) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.voxel == v)
    }

    pub fn id_by_name(&self, name: &str) -> Option<Voxel> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, v: Voxel) -> &str {
        if v.is_air() {
            return "air";
        }
        self.get(v).map(|e| e.name.as_str()).unwrap_or("unknown")
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, PaletteError> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        let mut entries: Vec<(String, BlockEntry)> = cfg.blocks.into_iter().collect();
        // Table iteration order is nondeterministic; sort by id so the
        // palette listing is stable.
        entries.sort_by_key(|(_, e)| e.id);
        let mut palette = Palette::new();
        for (name, entry) in entries {
            if entry.id == 0 {
                return Err(PaletteError::ReservedId(name));
            }
            let voxel = Voxel::new(entry.id);
            if palette.entries.iter().any(|e| e.voxel == voxel) {
                return Err(PaletteError::DuplicateId(entry.id));
            }
            palette.by_name.insert(name.clone(), voxel);
            palette.entries.push(PaletteEntry {
                voxel,
                name,
                color: entry.color,
            });
        }
        Ok(palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
struct PaletteConfig {
    blocks: std::collections::HashMap<String, BlockEntry>,
}

#[derive(Deserialize)]
struct BlockEntry {
    id: u16,
    #[serde(default = "default_color")]
    color: [u8; 3],
}

fn default_color() -> [u8; 3] {
    [255, 0, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[blocks.stone]
id = 1
color = [128, 128, 128]

[blocks.dirt]
id = 2
color = [134, 96, 67]

[blocks.grass]
id = 3
"#;

    #[test]
    fn parses_and_indexes_by_name() {
        let p = Palette::from_toml_str(SAMPLE).unwrap();
        assert_eq!(p.entries.len(), 3);
        assert_eq!(p.id_by_name("stone"), Some(Voxel::new(1)));
        assert_eq!(p.name_of(Voxel::new(2)), "dirt");
        assert_eq!(p.get(Voxel::new(3)).unwrap().color, default_color());
    }

    #[test]
    fn air_is_always_named() {
        let p = Palette::new();
        assert_eq!(p.name_of(Voxel::AIR), "air");
        assert_eq!(p.name_of(Voxel::new(9)), "unknown");
    }

    #[test]
    fn rejects_reserved_id_zero() {
        let bad = "[blocks.void]\nid = 0\n";
        assert!(matches!(
            Palette::from_toml_str(bad),
            Err(PaletteError::ReservedId(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let bad = "[blocks.a]\nid = 1\n[blocks.b]\nid = 1\n";
        assert!(matches!(
            Palette::from_toml_str(bad),
            Err(PaletteError::DuplicateId(1))
        ));
    }
}

//! Configuration file handling.
//!
//! TilePack reads an INI config from `~/.tilepack/config.ini`:
//!
//! ```ini
//! [catalog]
//! directory = /home/user/.tilepack/data
//! manifest_file = tiles.bin
//! regions_file = regions.txt
//! extension = .tile
//! ```
//!
//! Every key is optional; missing keys keep their defaults. The tile
//! filename extension lives here and is threaded into the region
//! builder and the catalog scanner; core code never hard-codes it.

use std::io;
use std::path::{Path, PathBuf};

use ini::Ini;

/// Default extension of tile data files.
pub const DEFAULT_EXTENSION: &str = ".tile";

/// Default manifest filename inside the catalog directory.
pub const DEFAULT_MANIFEST_FILE: &str = "tiles.bin";

/// Default region description filename inside the catalog directory.
pub const DEFAULT_REGIONS_FILE: &str = "regions.txt";

/// Catalog location and naming settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory holding downloaded tile files, the manifest, and the
    /// region description.
    pub directory: PathBuf,

    /// Manifest filename inside the catalog directory.
    pub manifest_file: String,

    /// Region description filename inside the catalog directory.
    pub regions_file: String,

    /// Filename extension of tile data files.
    pub extension: String,
}

impl CatalogConfig {
    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.directory.join(&self.manifest_file)
    }

    /// Full path of the region description file.
    pub fn regions_path(&self) -> PathBuf {
        self.directory.join(&self.regions_file)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: default_data_dir(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            regions_file: DEFAULT_REGIONS_FILE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

/// Loaded configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    /// Catalog settings.
    pub catalog: CatalogConfig,
}

impl ConfigFile {
    /// Load from the default location.
    pub fn load() -> io::Result<Self> {
        Self::load_from(&default_config_path())
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let ini = Ini::load_from_file(path)
            .map_err(|e| io::Error::other(format!("Failed to read config: {}", e)))?;

        let mut config = Self::default();
        if let Some(section) = ini.section(Some("catalog")) {
            if let Some(directory) = section.get("directory") {
                config.catalog.directory = PathBuf::from(directory);
            }
            if let Some(manifest_file) = section.get("manifest_file") {
                config.catalog.manifest_file = manifest_file.to_string();
            }
            if let Some(regions_file) = section.get("regions_file") {
                config.catalog.regions_file = regions_file.to_string();
            }
            if let Some(extension) = section.get("extension") {
                config.catalog.extension = extension.to_string();
            }
        }

        Ok(config)
    }
}

/// TilePack's data directory under the user's home.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilepack")
}

fn default_config_path() -> PathBuf {
    default_data_dir().join("config.ini")
}

/// Format a byte count for display.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

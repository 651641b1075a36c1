//! Manifest management CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use tilepack::catalog::{load_manifest, save_manifest, scan_directory};
use tilepack::cell::is_valid_cell_id;
use tilepack::config::{format_size, ConfigFile};

use crate::error::CliError;

/// Manifest action subcommands.
#[derive(Debug, Subcommand)]
pub enum ManifestAction {
    /// Build the manifest by scanning the catalog directory
    Create {
        /// Quadtree level of cell-addressed tiles
        #[arg(long, default_value_t = 10)]
        level: i32,

        /// Catalog directory to scan (defaults to the configured one)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show manifest version and catalog totals
    Show,
}

/// Run a manifest subcommand.
pub fn run(action: ManifestAction) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let catalog = config.catalog;

    match action {
        ManifestAction::Create { level, dir } => {
            let dir = dir.unwrap_or_else(|| catalog.directory.clone());
            println!("Scanning catalog directory: {}", dir.display());

            let (data_files, common_files) = scan_directory(&dir, level, &catalog.extension)
                .map_err(|e| CliError::Manifest(e.to_string()))?;
            println!(
                "Indexed {} cell tiles, {} common files",
                data_files.len(),
                common_files.len()
            );

            let path = catalog.manifest_path();
            save_manifest(&path, level, data_files, common_files)
                .map_err(|e| CliError::Manifest(e.to_string()))?;
            println!("Wrote manifest: {}", path.display());
            Ok(())
        }
        ManifestAction::Show => {
            let path = catalog.manifest_path();
            let (index, version) = load_manifest(&path)
                .map_err(|e| CliError::Manifest(format!("{}: {}", path.display(), e)))?;

            let cell_tiles = index.iter().filter(|t| is_valid_cell_id(&t.id)).count();
            println!("Manifest: {}", path.display());
            println!("  Version: {}", version);
            println!(
                "  Entries: {} ({} cell tiles, {} common)",
                index.len(),
                cell_tiles,
                index.len() - cell_tiles
            );
            println!("  Remote size: {}", format_size(index.total_size()));
            Ok(())
        }
    }
}

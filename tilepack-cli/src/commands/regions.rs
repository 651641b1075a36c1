//! Region tree inspection CLI commands.

use clap::Subcommand;
use tilepack::catalog::load_tile_index;
use tilepack::config::{format_size, ConfigFile};
use tilepack::region::{size, NodeId, RegionTree, RegionTreeBuilder};
use tilepack::storage::DirectoryProbe;

use crate::error::CliError;

/// Region tree subcommands.
#[derive(Debug, Subcommand)]
pub enum RegionsAction {
    /// Parse the region description and print the tree with download
    /// status per node
    Show,
}

/// Run a regions subcommand.
pub fn run(action: RegionsAction) -> Result<(), CliError> {
    match action {
        RegionsAction::Show => run_show(),
    }
}

fn run_show() -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let catalog = config.catalog;

    let (index, version) = load_tile_index(&catalog.manifest_path());
    tracing::debug!(entries = index.len(), version, "Loaded tile index");

    let regions_path = catalog.regions_path();
    let text = std::fs::read_to_string(&regions_path)
        .map_err(|e| CliError::Regions(format!("{}: {}", regions_path.display(), e)))?;

    let builder = RegionTreeBuilder::new(catalog.extension.clone());
    let mut tree = RegionTree::new();
    builder
        .load_regions(&text, &index, &mut tree)
        .map_err(|e| CliError::Regions(e.to_string()))?;

    let probe = DirectoryProbe::new(&catalog.directory);
    println!("{} top-level regions", tree.top_level_count());
    print_subtree(&tree, tree.root(), 0, &probe);
    Ok(())
}

fn print_subtree(tree: &RegionTree, id: NodeId, indent: usize, probe: &DirectoryProbe) {
    for &child in tree.children(id) {
        let node = tree.node(child);
        if node.tiles().is_empty() {
            println!("{:indent$}{}", "", node.name(), indent = indent * 2);
        } else {
            let sizes = size(node, probe);
            println!(
                "{:indent$}{} [{} of {} downloaded]",
                "",
                node.name(),
                format_size(sizes.local),
                format_size(sizes.remote),
                indent = indent * 2
            );
        }
        print_subtree(tree, child, indent + 1, probe);
    }
}

// src/discovery/walker.rs

use crate::config::DiscoveryConfig;
use ignore::WalkBuilder;
use log::debug;
use std::path::Path;

/// Configures and builds the `ignore::Walk` for one input.
pub(super) fn build_walker(config: &DiscoveryConfig, input: &Path) -> ignore::Walk {
    let mut walker_builder = WalkBuilder::new(input);

    if config.use_gitignore {
        walker_builder.standard_filters(true);
        debug!("Configuring WalkBuilder: standard_filters enabled.");
    } else {
        walker_builder.standard_filters(false);
        debug!("Configuring WalkBuilder: standard_filters disabled (gitignore usage off).");
    }
    // Respect .gitignore files even outside of a git repository.
    walker_builder.require_git(false);

    if !config.recursive {
        // Depth 1 is the input's immediate children; a file input yields just itself.
        walker_builder.max_depth(Some(1));
        debug!("Recursion disabled (max depth: 1).");
    }

    // Deterministic order within each directory.
    walker_builder.sort_by_file_path(|a, b| a.cmp(b));

    walker_builder.build()
}

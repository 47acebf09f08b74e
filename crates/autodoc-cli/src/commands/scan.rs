//! Scan command implementation.
//!
//! Lists the Python files a run would process, without calling the model.

use anyhow::Result;
use autodoc_ops::{display_relative, Config};
use tracing::info;

use super::{build_request, offline_context, Output};
use crate::TargetArgs;

/// Execute the scan command on a local path.
pub fn execute(config: Config, args: &TargetArgs, output: Output) -> Result<()> {
    let ctx = offline_context(config);
    let request = build_request(args);
    info!(path = %request.root.display(), "Scanning directory");

    let response = ctx.scan(&request)?;
    if output.emit_json(&response)? || output.quiet {
        return Ok(());
    }

    println!("🔍 {}", response.root.display());
    println!("Python files: {}", response.files.len());
    println!(
        "Total size:   {}",
        humansize::format_size(response.total_size(), humansize::DECIMAL)
    );
    println!("Excluded:     {}", response.exclude_dirs.join(", "));
    println!();
    for file in &response.files {
        println!(
            "  {} ({})",
            display_relative(&response.root, &file.path),
            humansize::format_size(file.size, humansize::DECIMAL)
        );
    }
    Ok(())
}

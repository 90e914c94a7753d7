//! CLI command implementations

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use umlify_loader::{Config, load_inputs};
use umlify_render::{CompactEncoder, Framing};

/// Load, filter, assemble and render the inputs into one document.
fn build_document(config: &Config, inputs: &[PathBuf]) -> anyhow::Result<String> {
    let filter = config.filter.package_filter()?;
    let sets = filter.apply(load_inputs(inputs)?);

    let snapshot = umlify_core::build_snapshot(&sets)?;
    tracing::info!(
        "Assembled {} entities, {} edges",
        snapshot.graph().entity_count(),
        snapshot.graph().edge_count()
    );

    Ok(umlify_render::render(&snapshot)?)
}

fn compact(config: &Config, inputs: &[PathBuf], zlib: bool) -> anyhow::Result<String> {
    let document = build_document(config, inputs)?;
    let framing = if zlib { Framing::Zlib } else { Framing::Raw };
    CompactEncoder::new(framing)
        .encode(&document)
        .context("failed to encode document")
}

pub fn render(config: &Config, inputs: &[PathBuf], output: Option<PathBuf>) -> anyhow::Result<()> {
    let document = build_document(config, inputs)?;
    let path = output.unwrap_or_else(|| config.output.path.clone());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, document).with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!("Document written to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

pub fn encode(config: &Config, inputs: &[PathBuf], zlib: bool) -> anyhow::Result<()> {
    println!("{}", compact(config, inputs, zlib)?);
    Ok(())
}

pub fn url(config: &Config, inputs: &[PathBuf], zlib: bool) -> anyhow::Result<()> {
    let encoded = compact(config, inputs, zlib)?;
    println!("{}", config.server.diagram_url(&encoded));
    Ok(())
}

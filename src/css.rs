//! The `css` command: load an export, select layers, resolve and compile each
//! one, and write the combined stylesheet.

use anyhow::{Context, Result};
use keyframer_core::{animated_layer_names, resolve_layer};
use keyframer_css::{compile, stylesheet_source, FormatOptions};
use keyframer_data::AnimationJson;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

pub struct CssArgs {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub layout: bool,
    pub rem: bool,
    pub font_size: f32,
    pub layers: Vec<String>,
    pub all: bool,
}

pub fn run(args: CssArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let data: AnimationJson = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", args.path.display()))?;

    let candidates = animated_layer_names(&data);
    if candidates.is_empty() {
        info!("no animated layers in {}", args.path.display());
        return Ok(());
    }

    let selected = if !args.layers.is_empty() {
        args.layers.clone()
    } else if args.all {
        candidates.clone()
    } else {
        crate::prompt::select_layers(&candidates)?
    };
    if selected.is_empty() {
        info!("nothing selected");
        return Ok(());
    }

    let opts = FormatOptions {
        layout: args.layout,
        rem: args.rem,
        font_size: args.font_size,
    };

    let results = convert_layers(&data, &selected, &opts);

    let mut sheets = Vec::new();
    let mut failures = 0usize;
    for (name, result) in results {
        match result {
            Ok(css) => {
                info!(layer = %name, "converted");
                sheets.push(css);
            }
            Err(err) => {
                failures += 1;
                error!(layer = %name, "conversion failed: {err:#}");
            }
        }
    }

    if sheets.is_empty() {
        anyhow::bail!("all {} selected layers failed to convert", failures);
    }

    let output = args.output.unwrap_or_else(|| {
        args.path
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("animation.css")
    });
    fs::write(&output, sheets.join("\n"))
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        "wrote {} ({} layers, {} failed)",
        output.display(),
        sheets.len(),
        failures
    );
    Ok(())
}

/// Resolve and compile each selected layer in parallel. Layers are
/// independent, so one failing keeps its error while the rest still
/// produce CSS.
fn convert_layers(
    data: &AnimationJson,
    selected: &[String],
    opts: &FormatOptions,
) -> Vec<(String, Result<String>)> {
    data.layers
        .par_iter()
        .filter(|layer| selected.contains(&layer.display_name()))
        .map(|layer| {
            let name = layer.display_name();
            let css = resolve_layer(layer, data.fr)
                .map_err(anyhow::Error::from)
                .and_then(|resolved| {
                    let asset = layer.ref_id.as_deref().and_then(|id| data.asset(id));
                    let source = stylesheet_source(&resolved, asset, opts);
                    compile(&source).map_err(anyhow::Error::from)
                });
            (name, css)
        })
        .collect()
}

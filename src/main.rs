//! # keyframer
//!
//! Converts animation-tool keyframe exports (bodymovin-style JSON) into CSS
//! keyframe animations.
//!
//! ## Commands
//! - `css`: resolve selected layers and write a compiled stylesheet

mod css;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyframer")]
#[command(about = "Convert keyframe animation exports into CSS")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an export file and emit CSS keyframe animations
    Css {
        /// Path to the exported animation data
        #[arg(short, long, default_value = "./animations/data.json")]
        path: PathBuf,

        /// Output path for the compiled stylesheet (defaults to
        /// `animation.css` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit absolute positioning and size/background declarations
        /// (disable with --layout=false)
        #[arg(short, long, action = clap::ArgAction::Set, default_value_t = true)]
        layout: bool,

        /// Convert pixel lengths to rem
        #[arg(short, long)]
        rem: bool,

        /// Root font size for the px-to-rem ratio
        #[arg(short, long, default_value_t = 1000.0)]
        fontsize: f32,

        /// Convert only these layers (comma-separated names); skips the prompt
        #[arg(long, value_delimiter = ',')]
        layers: Vec<String>,

        /// Convert every animated layer without prompting
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Css {
            path,
            output,
            layout,
            rem,
            fontsize,
            layers,
            all,
        } => css::run(css::CssArgs {
            path,
            output,
            layout,
            rem,
            font_size: fontsize,
            layers,
            all,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_defaults_on_and_can_be_disabled() {
        let cli = Cli::try_parse_from(["keyframer", "css"]).unwrap();
        let Commands::Css { layout, .. } = cli.command;
        assert!(layout);

        let cli = Cli::try_parse_from(["keyframer", "css", "--layout", "false"]).unwrap();
        let Commands::Css { layout, .. } = cli.command;
        assert!(!layout);

        let cli = Cli::try_parse_from(["keyframer", "css", "--layout=true"]).unwrap();
        let Commands::Css { layout, .. } = cli.command;
        assert!(layout);
    }
}

//! Interactive layer selection on the terminal.

use anyhow::{Context, Result};
use console::style;

/// Print the animated layers and read a selection from stdin.
///
/// Accepts comma-separated indices (`1,3`) or layer names; an empty line
/// selects everything. Unknown entries are ignored with a warning.
pub fn select_layers(candidates: &[String]) -> Result<Vec<String>> {
    println!(
        "{}",
        style("Select the animations to export").bold().underlined()
    );
    for (i, name) in candidates.iter().enumerate() {
        println!("  {} {}", style(format!("{}.", i + 1)).yellow(), name);
    }
    println!(
        "{}",
        style("Comma-separated numbers or names, empty for all:").dim()
    );

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read selection")?;
    Ok(parse_selection(&line, candidates))
}

fn parse_selection(line: &str, candidates: &[String]) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return candidates.to_vec();
    }

    let mut selected = Vec::new();
    for entry in line.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let found = if let Ok(index) = entry.parse::<usize>() {
            index
                .checked_sub(1)
                .and_then(|i| candidates.get(i))
                .cloned()
        } else {
            candidates.iter().find(|name| *name == entry).cloned()
        };
        match found {
            Some(name) => {
                if !selected.contains(&name) {
                    selected.push(name);
                }
            }
            None => eprintln!("{} unknown layer `{entry}`", style("warning:").yellow()),
        }
    }
    selected
}

//! Black-box stylesheet compilation: parse the generated source with
//! lightningcss and re-print it with vendor-prefixing browser targets.

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("stylesheet parse failed: {0}")]
    Parse(String),
    #[error("stylesheet print failed: {0}")]
    Print(String),
}

const fn version(major: u32, minor: u32, patch: u32) -> u32 {
    (major << 16) | (minor << 8) | patch
}

/// Browser floor for prefix generation, roughly "everything above 1% share".
fn browser_targets() -> Targets {
    Targets::from(Browsers {
        chrome: Some(version(30, 0, 0)),
        firefox: Some(version(20, 0, 0)),
        safari: Some(version(9, 0, 0)),
        ios_saf: Some(version(9, 0, 0)),
        android: Some(version(4, 4, 0)),
        edge: Some(version(12, 0, 0)),
        ..Browsers::default()
    })
}

/// Compile stylesheet source into canonical, vendor-prefixed CSS text.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let sheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|err| CompileError::Parse(err.to_string()))?;
    let output = sheet
        .to_css(PrinterOptions {
            targets: browser_targets(),
            ..PrinterOptions::default()
        })
        .map_err(|err| CompileError::Print(err.to_string()))?;
    Ok(output.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_a_keyframes_block() {
        let source = "\
.spin-style {
  transform: rotate(45deg);
  animation: spin-ani 1000ms linear infinite;
}
@keyframes spin-ani {
  0% { transform: rotate(0); }
  100% { transform: rotate(360deg); }
}
";
        let css = compile(source).unwrap();
        assert!(css.contains("@keyframes spin-ani"), "css:\n{css}");
        assert!(css.contains(".spin-style"));
    }

    #[test]
    fn malformed_source_is_a_parse_error() {
        // A stray closing brace cannot be recovered into any rule.
        let err = compile("}").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }
}

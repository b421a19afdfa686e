//! Line grammar for `META.txt`.
//!
//! Whitespace-separated tokens, first matching form wins:
//!
//! ```text
//! # comment / blank          -> ignored
//! name width height target   -> explicit dimensions, custom target
//! name width height          -> explicit dimensions
//! name <scale>x target       -> scale factor, custom target
//! name <scale>x              -> scale factor
//! name                       -> scale 1.0
//! ```

use thiserror::Error;

use super::Manifest;
use super::descriptor::{AssetDescriptor, Sizing};

/// A manifest line that matches none of the recognized forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Incorrect format on line {line}: {text}")]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// The offending line, trimmed.
    pub text: String,
}

/// Parse one manifest line into `manifest`.
///
/// Inserts zero or one descriptor. A later line with the same target key
/// replaces the earlier entry.
pub fn parse_line(line: &str, line_number: usize, manifest: &mut Manifest) -> Result<(), LineError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(());
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let descriptor = match_tokens(&tokens).ok_or_else(|| LineError {
        line: line_number,
        text: trimmed.to_string(),
    })?;

    manifest.insert(descriptor);
    Ok(())
}

fn match_tokens(tokens: &[&str]) -> Option<AssetDescriptor> {
    match *tokens {
        [name, width, height, target] => {
            let sizing = dimensions(width, height)?;
            Some(AssetDescriptor::new(name, Some(target), sizing))
        }
        [name, first, second] => {
            if let Some(sizing) = dimensions(first, second) {
                return Some(AssetDescriptor::new(name, None, sizing));
            }
            let scale = parse_scale(first)?;
            Some(AssetDescriptor::new(name, Some(second), Sizing::Scale(scale)))
        }
        [name, scale] => {
            let scale = parse_scale(scale)?;
            Some(AssetDescriptor::new(name, None, Sizing::Scale(scale)))
        }
        [name] => Some(AssetDescriptor::new(name, None, Sizing::default())),
        _ => None,
    }
}

fn dimensions(width: &str, height: &str) -> Option<Sizing> {
    Some(Sizing::Dimensions {
        width: parse_number(width)?,
        height: parse_number(height)?,
    })
}

/// Parse a scale token such as `2x` or `12.30x`.
fn parse_scale(token: &str) -> Option<f64> {
    parse_number(token.strip_suffix('x')?)
}

/// Parse a plain positive decimal: digits and dots only.
///
/// Rejects signs, exponents, `inf`/`NaN` and zero, which `f64::from_str`
/// would otherwise accept.
fn parse_number(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| *n > 0.0)
}

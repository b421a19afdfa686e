//! Asset descriptor: one conversion unit declared in `META.txt`.

use std::fmt;

/// Output sizing for a descriptor.
///
/// A descriptor either scales the SVG's intrinsic size or pins explicit
/// pixel dimensions, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Multiply the intrinsic SVG size by this factor.
    Scale(f64),
    /// Render at exactly `width` x `height`.
    Dimensions { width: f64, height: f64 },
}

impl Sizing {
    /// Multiply the sizing by a density factor.
    pub fn times(self, factor: f64) -> Self {
        match self {
            Self::Scale(scale) => Self::Scale(scale * factor),
            Self::Dimensions { width, height } => Self::Dimensions {
                width: width * factor,
                height: height * factor,
            },
        }
    }
}

#[cfg(test)]
impl Sizing {
    pub fn scale(&self) -> Option<f64> {
        match self {
            Self::Scale(scale) => Some(*scale),
            Self::Dimensions { .. } => None,
        }
    }

    pub fn width(&self) -> Option<f64> {
        match self {
            Self::Scale(_) => None,
            Self::Dimensions { width, .. } => Some(*width),
        }
    }

    pub fn height(&self) -> Option<f64> {
        match self {
            Self::Scale(_) => None,
            Self::Dimensions { height, .. } => Some(*height),
        }
    }
}

impl Default for Sizing {
    fn default() -> Self {
        Self::Scale(1.0)
    }
}

impl fmt::Display for Sizing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale(scale) => write!(f, "{scale}x"),
            Self::Dimensions { width, height } => write!(f, "{width}x{height}px"),
        }
    }
}

/// One line of the manifest after normalization.
///
/// `source` and `target` are base names: the `.svg` and `.png` suffixes are
/// stripped during parsing. `target` is also the manifest key.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescriptor {
    pub source: String,
    pub target: String,
    pub sizing: Sizing,
}

impl AssetDescriptor {
    /// Build a descriptor, stripping the source and target suffixes.
    ///
    /// A missing `target` falls back to the (stripped) source name.
    pub fn new(source: &str, target: Option<&str>, sizing: Sizing) -> Self {
        let source = strip_suffix(source, super::SOURCE_SUFFIX);
        let target = match target {
            Some(target) => strip_suffix(target, super::TARGET_SUFFIX),
            None => source.clone(),
        };
        Self {
            source,
            target,
            sizing,
        }
    }

    /// Whether two descriptors would render the same output.
    ///
    /// The target is the manifest key and is not compared.
    pub fn same_render(&self, other: &Self) -> bool {
        self.source == other.source && self.sizing == other.sizing
    }
}

fn strip_suffix(name: &str, suffix: &str) -> String {
    name.strip_suffix(suffix).unwrap_or(name).to_string()
}

//! Process-wide chart font.
//!
//! Plotters resolves text through fonts registered by family name. The font is
//! chosen once during startup and is read-only afterwards.

use std::path::Path;
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};
use thiserror::Error;
use tracing::{info, warn};

/// Family name the bundled Hangul font is registered under
pub const BUNDLED_FAMILY: &str = "NanumGothic";

/// Family name used when the bundled font is missing
pub const FALLBACK_FAMILY: &str = "sans-serif";

const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static CHART_FONT: OnceLock<Option<&'static str>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum FontError {
    #[error("Font file not found: {0}")]
    NotFound(String),
    #[error("Failed to read font {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid font data in {0}")]
    Invalid(String),
}

/// Pick the chart font family, registering the bundled font if present.
///
/// Only the first call does any work. Returns `None` when no usable font
/// exists at all, in which case charts are drawn without text.
pub fn init_chart_font(font_path: &Path) -> Option<&'static str> {
    *CHART_FONT.get_or_init(|| resolve_chart_font(font_path))
}

/// The family chosen at startup, if any
pub fn chart_font() -> Option<&'static str> {
    CHART_FONT.get().copied().flatten()
}

fn resolve_chart_font(font_path: &Path) -> Option<&'static str> {
    match register_font_file(BUNDLED_FAMILY, font_path) {
        Ok(()) => {
            info!("Chart font set to {} from {}", BUNDLED_FAMILY, font_path.display());
            return Some(BUNDLED_FAMILY);
        }
        Err(e) => warn!("{}. Hangul text in charts may not display correctly.", e),
    }

    for candidate in FALLBACK_FONT_PATHS {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match register_font_file(FALLBACK_FAMILY, path) {
            Ok(()) => {
                info!("Chart font falling back to {} ({})", FALLBACK_FAMILY, candidate);
                return Some(FALLBACK_FAMILY);
            }
            Err(e) => warn!("Skipping fallback font: {}", e),
        }
    }

    warn!("No usable font found; charts will be drawn without labels");
    None
}

fn register_font_file(family: &str, path: &Path) -> Result<(), FontError> {
    if !path.exists() {
        return Err(FontError::NotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path).map_err(|source| FontError::Read {
        path: path.display().to_string(),
        source,
    })?;

    // Registered fonts live for the whole process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());

    register_font(family, FontStyle::Normal, bytes)
        .map_err(|_| FontError::Invalid(path.display().to_string()))
}

/// Settle the process-wide font before a test renders, so every render in the
/// test binary sees the same choice.
#[cfg(test)]
pub(crate) fn init_for_tests() -> Option<&'static str> {
    init_chart_font(Path::new("/nonexistent/NanumGothic.ttf"))
}

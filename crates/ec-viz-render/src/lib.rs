//! Renders effcorr plot artifacts (JSON produced by `ec-viz`) to SVG, and to
//! PNG with the `png` feature.
//!
//! ```
//! let config = ec_viz_render::config::resolve_config(None).unwrap();
//! let err = ec_viz_render::render_svg("{}", "nope", &config).unwrap_err();
//! assert!(matches!(err, ec_viz_render::RenderError::UnknownKind(_)));
//! ```

pub mod canvas;
pub mod color;
pub mod config;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use config::VizConfig;
use plots::triplet1d::YScale;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Artifact kinds understood by [`render_svg`].
pub const KINDS: &[&str] =
    &["triplet1d", "triplet1d_logy", "triplet2d", "weight_control", "weights"];

/// Render an artifact JSON to SVG string.
pub fn render_svg(artifact_json: &str, kind: &str, config: &VizConfig) -> Result<String> {
    let svg = match kind {
        "triplet1d" | "triplet1d_logy" => {
            let art: ec_viz::Triplet1DArtifact = serde_json::from_str(artifact_json)?;
            let scale = if kind == "triplet1d_logy" { YScale::Log } else { YScale::Linear };
            plots::triplet1d::render(&art, config, scale)?
        }
        "triplet2d" => {
            let art: ec_viz::Triplet2DArtifact = serde_json::from_str(artifact_json)?;
            plots::triplet2d::render(&art, config)?
        }
        "weight_control" => {
            let art: ec_viz::WeightControlArtifact = serde_json::from_str(artifact_json)?;
            plots::weight_control::render(&art, config)?
        }
        "weights" => {
            let art: ec_viz::WeightDistributionArtifact = serde_json::from_str(artifact_json)?;
            plots::weights::render(&art, config)?
        }
        other => return Err(RenderError::UnknownKind(other.to_string())),
    };
    Ok(svg)
}

/// Render an artifact JSON to bytes in the specified format.
pub fn render_to_bytes(
    artifact_json: &str,
    kind: &str,
    format: &str,
    config: &VizConfig,
) -> Result<Vec<u8>> {
    let svg = render_svg(artifact_json, kind, config)?;
    svg_to_format(svg, format, config)
}

/// Encode an already rendered SVG in `format` (`svg`, or `png` with the feature).
#[cfg_attr(not(feature = "png"), allow(unused_variables))]
pub fn svg_to_format(svg: String, format: &str, config: &VizConfig) -> Result<Vec<u8>> {
    match format {
        "svg" => Ok(svg.into_bytes()),
        #[cfg(feature = "png")]
        "png" => output::png::svg_to_png(&svg, config.output.dpi),
        other => Err(RenderError::UnknownKind(format!("format: {other}"))),
    }
}

/// Render an artifact JSON to a file (format inferred from extension).
pub fn render_to_file(
    artifact_json: &str,
    kind: &str,
    path: &std::path::Path,
    config: &VizConfig,
) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    let bytes = render_to_bytes(artifact_json, kind, ext, config)?;
    output::write_bytes(path, &bytes)
}

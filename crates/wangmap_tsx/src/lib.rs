//! Tiled `.tsx` tileset reader and writer
//!
//! Parses tileset definition files into the `wangmap_core` model and
//! re-emits them in the element and attribute order Tiled writes, so a
//! load/save cycle of an authored file stays reviewable.
//!
//! Only the stanzas the model covers are read: the `<tileset>` root,
//! `<tile>`/`<image>` entries, and `<wangsets>`. Anything else
//! (`<properties>`, `<objectgroup>`, ...) is skipped with a debug log
//! line rather than rejected, since authored files routinely carry
//! editor-only data.
//!
//! # Example
//!
//! ```rust,ignore
//! use wangmap_tsx::load_tileset;
//!
//! let tileset = load_tileset("assets/sinnoh_tileset_1x.tsx")?;
//! for ws in &tileset.wang_sets {
//!     println!("{}: {} signatures", ws.name, ws.wang_tiles.len());
//! }
//! ```

mod reader;
mod writer;

pub use reader::{load_tileset, parse_tileset};
pub use writer::{tileset_to_string, write_tileset};

use thiserror::Error;

/// Errors from loading, parsing, or emitting a `.tsx` file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TsxError {
    #[error("failed to access {path}: {message}")]
    Io { path: String, message: String },
    #[error("XML error: {0}")]
    Xml(String),
    #[error("missing attribute '{attribute}' in <{element}>")]
    MissingAttribute { element: String, attribute: String },
    #[error("invalid value '{value}' for attribute '{attribute}' in <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
    #[error("unexpected element <{0}>")]
    UnexpectedElement(String),
}

pub(crate) fn xml_err<E: std::fmt::Display>(e: E) -> TsxError {
    TsxError::Xml(e.to_string())
}

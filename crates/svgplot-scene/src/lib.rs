#![forbid(unsafe_code)]

pub mod canvas;
pub mod color;
pub mod glyphs;
pub mod matrix;
pub mod scene;
pub mod style;
pub mod text;

pub use canvas::PrintableCanvas;
pub use color::{Color, hex_to_color};
pub use matrix::{Matrix, Vector, identity};
pub use scene::{Node, NodeId, NodeKind, PathElement, Scene};
pub use text::{HorizontalAnchor, Text, VerticalAnchor};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("matrix dimension mismatch: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error("domain error: {message}")]
    Domain { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

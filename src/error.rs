use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid maze size {rows}x{columns}: rows and columns must be at least 1")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("viewport {width}x{height} is too small for a {rows}x{columns} maze")]
    ViewportTooSmall {
        width: u16,
        height: u16,
        rows: usize,
        columns: usize,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

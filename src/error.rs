use std::fmt;
use thiserror::Error;

/**
Which dimension of the grid an index refers to.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
	Hue,
	Tone,
}

impl fmt::Display for Axis {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hue => f.write_str("hue"),
			Self::Tone => f.write_str("tone"),
		}
	}
}

/**
Everything that can go wrong in the palette core.

Removing the last hue or tone is not listed here: it is a routine boundary of normal use and the editor answers it with an unchanged snapshot instead.
*/
#[derive(Debug, Error)]
pub enum PaletteError {
	#[error("Invalid color format: {0}")]
	InvalidColorFormat(String),

	#[error("{axis} index {index} is out of range (len {len})")]
	IndexOutOfRange { axis: Axis, index: usize, len: usize },

	#[error("Malformed palette: {0}")]
	MalformedPalette(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(#[from] serde_json::Error),

	#[error("Config error: {0}")]
	Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PaletteError>;

pub(crate) fn check_index(axis: Axis, index: usize, len: usize) -> Result<()> {
	if index < len {
		Ok(())
	} else {
		Err(PaletteError::IndexOutOfRange { axis, index, len })
	}
}

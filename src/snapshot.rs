use crate::{
	color::Color,
	error::{Axis, Result, check_index},
	grid::Palette,
	selection::Selection,
};

/**
An immutable view of the editor state: a palette and the selected cell.

Every `GridEditor` command takes a snapshot and returns a new one. Nothing ever mutates a snapshot after it is built, so old snapshots can be kept for undo and redo, shared between threads, and compared with `==` to tell whether a command changed anything.
*/
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
	palette: Palette,
	selection: Selection,
}

impl Snapshot {
	/**
	Wraps a palette with nothing selected.
	*/
	pub fn new(palette: Palette) -> Self {
		Self {
			palette,
			selection: Selection::none(),
		}
	}

	/**
	Wraps a palette with a selection, which must point at an existing cell.
	*/
	pub fn with_selection(palette: Palette, selection: Selection) -> Result<Self> {
		if let Some(position) = selection.position() {
			check_index(Axis::Hue, position.hue, palette.hues())?;
			check_index(Axis::Tone, position.tone, palette.tones())?;
		}
		Ok(Self { palette, selection })
	}

	pub(crate) fn from_parts(palette: Palette, selection: Selection) -> Self {
		debug_assert!(selection.fits(palette.hues(), palette.tones()));
		Self { palette, selection }
	}

	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	pub fn selection(&self) -> Selection {
		self.selection
	}

	pub fn selected_color(&self) -> Option<&Color> {
		let position = self.selection.position()?;
		self.palette.color(position.hue, position.tone).ok()
	}
}

use crate::{
	color::Color,
	color_space::{ColorSpace, Lch},
	config::EditorConfig,
	error::{Axis, PaletteError, Result, check_index},
	grid::Palette,
	parse::parse_color,
	selection::{Direction, Selection},
	snapshot::Snapshot,
};

/**
The command surface over palette snapshots.

Every command is a pure transform: it reads a `Snapshot` and returns a new one, leaving the input untouched. A command either succeeds, fails with `IndexOutOfRange` or `InvalidColorFormat` without side effects, or, for removing the last remaining hue or tone, returns a snapshot equal to its input.

```rust
use palette_grid::{GridEditor, Snapshot};

let editor = GridEditor::default();
let snapshot = Snapshot::default();

let next = editor.duplicate_hue(&snapshot, 0)?;
assert_eq!(next.palette().hues(), snapshot.palette().hues() + 1);
assert_eq!(next.palette().hue_names()[1], "Red copy");
# Ok::<(), palette_grid::PaletteError>(())
```
*/
#[derive(Debug, Clone, Default)]
pub struct GridEditor {
	config: EditorConfig,
}

/// Which LCH channel a nudge targets.
#[derive(Debug, Clone, Copy)]
enum Channel {
	Lightness,
	Chroma,
	Hue,
}

impl GridEditor {
	pub fn new(config: EditorConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/**
	A fresh snapshot holding the starter palette in the configured profile.
	*/
	pub fn default_snapshot(&self) -> Snapshot {
		Snapshot::new(Palette::default().with_color_space(self.config.color_space))
	}

	/**
	Parses a palette from JSON into a fresh snapshot with nothing selected. On failure no snapshot is produced, so the caller's current one stays in use.
	*/
	pub fn load(&self, json: &str) -> Result<Snapshot> {
		Ok(Snapshot::new(Palette::from_json(json)?))
	}

	// Hues

	/**
	Appends a row. Its cells are neutral grays matching the lightness of the last row, so the tone steps carry over.
	*/
	pub fn add_hue(&self, snapshot: &Snapshot) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		let space = palette.color_space();
		let row = palette
			.row(palette.hues() - 1)?
			.iter()
			.map(|color| color.grayscale(space))
			.collect();
		palette.insert_hue(palette.hues(), self.config.new_hue_name.clone(), row);

		log::debug!("Added hue, now {} hues", palette.hues());
		Ok(Snapshot::from_parts(palette, snapshot.selection()))
	}

	/**
	Removes a row. With a single row left this does nothing and returns an equal snapshot.
	*/
	pub fn remove_hue(&self, snapshot: &Snapshot, hue: usize) -> Result<Snapshot> {
		self.remove(snapshot, Axis::Hue, hue)
	}

	pub fn rename_hue(&self, snapshot: &Snapshot, hue: usize, name: impl Into<String>) -> Result<Snapshot> {
		self.rename(snapshot, Axis::Hue, hue, name.into())
	}

	/**
	Moves the row at `from` so it ends up at index `to`. Its colors and name travel with it, and so does the selection.
	*/
	pub fn move_hue(&self, snapshot: &Snapshot, from: usize, to: usize) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		palette.move_hue(from, to)?;

		log::debug!("Moved hue {from} to {to}");
		Ok(Snapshot::from_parts(
			palette,
			snapshot.selection().after_move(Axis::Hue, from, to),
		))
	}

	/**
	Inserts a copy of a row right after it, named with the configured suffix.
	*/
	pub fn duplicate_hue(&self, snapshot: &Snapshot, hue: usize) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		let row = palette.row(hue)?.to_vec();
		let name = format!("{}{}", palette.hue_names()[hue], self.config.duplicate_suffix);
		palette.insert_hue(hue + 1, name, row);

		log::debug!("Duplicated hue {hue}");
		Ok(Snapshot::from_parts(
			palette,
			snapshot.selection().after_insert(Axis::Hue, hue + 1),
		))
	}

	// Tones

	/**
	Appends a column. Each row gets the neutral gray of its current last cell.
	*/
	pub fn add_tone(&self, snapshot: &Snapshot) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		let space = palette.color_space();
		let column = palette
			.column(palette.tones() - 1)?
			.into_iter()
			.map(|color| color.grayscale(space))
			.collect();
		palette.insert_tone(palette.tones(), self.config.new_tone_name.clone(), column);

		log::debug!("Added tone, now {} tones", palette.tones());
		Ok(Snapshot::from_parts(palette, snapshot.selection()))
	}

	/**
	Removes a column. With a single column left this does nothing and returns an equal snapshot.
	*/
	pub fn remove_tone(&self, snapshot: &Snapshot, tone: usize) -> Result<Snapshot> {
		self.remove(snapshot, Axis::Tone, tone)
	}

	pub fn rename_tone(&self, snapshot: &Snapshot, tone: usize, name: impl Into<String>) -> Result<Snapshot> {
		self.rename(snapshot, Axis::Tone, tone, name.into())
	}

	pub fn move_tone(&self, snapshot: &Snapshot, from: usize, to: usize) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		palette.move_tone(from, to)?;

		log::debug!("Moved tone {from} to {to}");
		Ok(Snapshot::from_parts(
			palette,
			snapshot.selection().after_move(Axis::Tone, from, to),
		))
	}

	pub fn duplicate_tone(&self, snapshot: &Snapshot, tone: usize) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		let column = palette.column(tone)?.into_iter().cloned().collect();
		let name = format!("{}{}", palette.tone_names()[tone], self.config.duplicate_suffix);
		palette.insert_tone(tone + 1, name, column);

		log::debug!("Duplicated tone {tone}");
		Ok(Snapshot::from_parts(
			palette,
			snapshot.selection().after_insert(Axis::Tone, tone + 1),
		))
	}

	// Cells

	/**
	Adds `delta` to one cell's lightness, clamped to 0...100.
	*/
	pub fn nudge_lightness(&self, snapshot: &Snapshot, hue: usize, tone: usize, delta: f64) -> Result<Snapshot> {
		self.nudge(snapshot, hue, tone, Channel::Lightness, delta)
	}

	/**
	Adds `delta` to one cell's chroma, clamped at 0.
	*/
	pub fn nudge_chroma(&self, snapshot: &Snapshot, hue: usize, tone: usize, delta: f64) -> Result<Snapshot> {
		self.nudge(snapshot, hue, tone, Channel::Chroma, delta)
	}

	/**
	Adds `delta` to one cell's hue. Hue is circular and wraps modulo 360 instead of clamping.
	*/
	pub fn nudge_hue(&self, snapshot: &Snapshot, hue: usize, tone: usize, delta: f64) -> Result<Snapshot> {
		self.nudge(snapshot, hue, tone, Channel::Hue, delta)
	}

	/**
	Replaces one cell with an LCH value. Lightness outside 0...100 or negative chroma fails with `InvalidColorFormat` instead of being clamped; the hue wraps.
	*/
	pub fn set_color(&self, snapshot: &Snapshot, hue: usize, tone: usize, lch: Lch) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		palette.set_lch(hue, tone, lch)?;
		Ok(Snapshot::from_parts(palette, snapshot.selection()))
	}

	/**
	Replaces one cell with a hex color, e.g. from the clipboard. Malformed hex fails with `InvalidColorFormat`.
	*/
	pub fn set_color_hex(&self, snapshot: &Snapshot, hue: usize, tone: usize, hex: &str) -> Result<Snapshot> {
		let lch = snapshot.palette().color_space().from_hex(hex)?;
		self.set_color(snapshot, hue, tone, lch)
	}

	/**
	Replaces one cell with a pasted color in any supported notation: hex, `rgb()`/`rgba()` or `hsl()`/`hsla()`. Unrecognized text fails with `InvalidColorFormat` and leaves nothing changed.
	*/
	pub fn paste_color(&self, snapshot: &Snapshot, hue: usize, tone: usize, text: &str) -> Result<Snapshot> {
		let rgb = parse_color(text)?;
		log::trace!("Pasted {text:?} as {rgb} into ({hue}, {tone})");
		self.set_color(snapshot, hue, tone, snapshot.palette().color_space().from_rgb(rgb))
	}

	/**
	Switches the palette to another profile. Every cell keeps its displayed hex.
	*/
	pub fn set_color_space(&self, snapshot: &Snapshot, space: ColorSpace) -> Result<Snapshot> {
		Ok(Snapshot::from_parts(
			snapshot.palette().with_color_space(space),
			snapshot.selection(),
		))
	}

	// Selection

	pub fn set_selection(&self, snapshot: &Snapshot, hue: usize, tone: usize) -> Result<Snapshot> {
		Snapshot::with_selection(snapshot.palette().clone(), Selection::at(hue, tone))
	}

	pub fn clear_selection(&self, snapshot: &Snapshot) -> Result<Snapshot> {
		Ok(Snapshot::from_parts(snapshot.palette().clone(), Selection::none()))
	}

	/**
	Moves the selection one cell, stopping at the edges. With nothing selected, selects the first cell.
	*/
	pub fn move_selection(&self, snapshot: &Snapshot, direction: Direction) -> Result<Snapshot> {
		let palette = snapshot.palette();
		let selection = snapshot.selection().step(direction, palette.hues(), palette.tones());

		log::trace!("Selection moved {direction:?} to {:?}", selection.position());
		Ok(Snapshot::from_parts(palette.clone(), selection))
	}

	fn remove(&self, snapshot: &Snapshot, axis: Axis, index: usize) -> Result<Snapshot> {
		let palette = snapshot.palette();
		let len = match axis {
			Axis::Hue => palette.hues(),
			Axis::Tone => palette.tones(),
		};

		if len <= 1 {
			log::debug!("Kept the last {axis}, nothing removed");
			return Ok(snapshot.clone());
		}
		check_index(axis, index, len)?;

		let mut palette = palette.clone();
		match axis {
			Axis::Hue => palette.remove_hue(index)?,
			Axis::Tone => palette.remove_tone(index)?,
		}

		log::debug!("Removed {axis} {index}");
		Ok(Snapshot::from_parts(
			palette,
			snapshot.selection().after_remove(axis, index, len - 1),
		))
	}

	fn rename(&self, snapshot: &Snapshot, axis: Axis, index: usize, name: String) -> Result<Snapshot> {
		let mut palette = snapshot.palette().clone();
		palette.rename(axis, index, name)?;
		Ok(Snapshot::from_parts(palette, snapshot.selection()))
	}

	fn nudge(&self, snapshot: &Snapshot, hue: usize, tone: usize, channel: Channel, delta: f64) -> Result<Snapshot> {
		if !delta.is_finite() {
			return Err(PaletteError::InvalidColorFormat(format!("non-finite nudge {delta}")));
		}

		let color: &Color = snapshot.palette().color(hue, tone)?;
		let mut lch = color.lch();
		match channel {
			Channel::Lightness => lch.l += delta,
			Channel::Chroma => lch.c += delta,
			Channel::Hue => lch.h += delta,
		}

		log::trace!("Nudged {channel:?} of ({hue}, {tone}) by {delta}");
		let lch = snapshot.palette().color_space().clamp_to_gamut(lch);
		self.set_color(snapshot, hue, tone, lch)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::selection::Position;

	fn grid(hues: usize, tones: usize) -> Snapshot {
		let hue_names = (0..hues).map(|h| format!("hue {h}")).collect();
		let tone_names = (0..tones).map(|t| format!("tone {t}")).collect();
		let colors = (0..hues)
			.map(|h| {
				(0..tones)
					.map(|t| Lch::new(90.0 - 15.0 * t as f64, 40.0, 60.0 * h as f64 + 10.0))
					.collect()
			})
			.collect();
		Snapshot::new(Palette::new(ColorSpace::CieLch, hue_names, tone_names, colors).unwrap())
	}

	fn assert_rectangular(snapshot: &Snapshot) {
		let palette = snapshot.palette();
		assert_eq!(palette.colors().len(), palette.hue_names().len());
		for row in palette.colors() {
			assert_eq!(row.len(), palette.tone_names().len());
		}
		assert!(snapshot.selection().fits(palette.hues(), palette.tones()));
	}

	#[test]
	fn test_add_hue_appends_neutral_row() {
		let editor = GridEditor::default();
		let snapshot = grid(2, 3);
		let next = editor.add_hue(&snapshot).unwrap();

		assert_eq!(next.palette().hues(), 3);
		assert_eq!(next.palette().tones(), 3);
		assert_eq!(next.palette().hue_names()[2], "New hue");
		for (new, last) in next.palette().row(2).unwrap().iter().zip(snapshot.palette().row(1).unwrap()) {
			assert_eq!(new.c(), 0.0);
			assert_eq!(new.l(), last.l());
		}
		assert_rectangular(&next);
	}

	#[test]
	fn test_add_tone_uses_configured_name() {
		let editor = GridEditor::new(EditorConfig {
			new_tone_name: "900".into(),
			..EditorConfig::default()
		});
		let next = editor.add_tone(&grid(2, 3)).unwrap();
		assert_eq!(next.palette().tones(), 4);
		assert_eq!(next.palette().tone_names()[3], "900");
		assert_rectangular(&next);
	}

	#[test]
	fn test_remove_floor() {
		let editor = GridEditor::default();
		let mut snapshot = grid(1, 1);
		for _ in 0..3 {
			snapshot = editor.remove_hue(&snapshot, 0).unwrap();
			snapshot = editor.remove_tone(&snapshot, 0).unwrap();
		}
		assert_eq!(snapshot, grid(1, 1));

		// The floor wins over the index check.
		assert_eq!(editor.remove_hue(&snapshot, 7).unwrap(), snapshot);
	}

	#[test]
	fn test_remove_out_of_range() {
		let editor = GridEditor::default();
		let result = editor.remove_hue(&grid(2, 2), 2);
		assert!(matches!(
			result,
			Err(PaletteError::IndexOutOfRange { axis: Axis::Hue, index: 2, len: 2 })
		));
	}

	#[test]
	fn test_remove_remaps_selection() {
		let editor = GridEditor::default();
		let snapshot = editor.set_selection(&grid(3, 3), 2, 1).unwrap();

		let next = editor.remove_hue(&snapshot, 2).unwrap();
		assert_eq!(next.selection().position(), Some(Position::new(1, 1)));

		let next = editor.remove_hue(&snapshot, 0).unwrap();
		assert_eq!(next.selection().position(), Some(Position::new(1, 1)));
		assert_eq!(next.selected_color(), snapshot.selected_color());

		let next = editor.remove_tone(&snapshot, 1).unwrap();
		assert_eq!(next.selection().position(), Some(Position::new(2, 1)));
	}

	#[test]
	fn test_rename() {
		let editor = GridEditor::default();
		let snapshot = grid(2, 2);
		let next = editor.rename_hue(&snapshot, 1, "Teal").unwrap();
		assert_eq!(next.palette().hue_names(), ["hue 0", "Teal"]);

		let next = editor.rename_tone(&next, 0, "hue 0").unwrap();
		assert_eq!(next.palette().tone_names()[0], "hue 0");
		assert_eq!(next.palette().colors(), snapshot.palette().colors());

		assert!(matches!(
			editor.rename_tone(&snapshot, 2, "x"),
			Err(PaletteError::IndexOutOfRange { axis: Axis::Tone, .. })
		));
	}

	#[test]
	fn test_move_hue_tracks_selection() {
		let editor = GridEditor::default();
		let snapshot = editor.set_selection(&grid(3, 3), 2, 1).unwrap();
		let selected = snapshot.selected_color().cloned();

		let next = editor.move_hue(&snapshot, 2, 0).unwrap();
		assert_eq!(next.selection().position(), Some(Position::new(0, 1)));
		assert_eq!(next.selected_color().cloned(), selected);
		assert_eq!(next.palette().hue_names(), ["hue 2", "hue 0", "hue 1"]);
		assert!(editor.move_hue(&snapshot, 0, 3).is_err());
	}

	#[test]
	fn test_move_tone_tracks_selection() {
		let editor = GridEditor::default();
		let snapshot = editor.set_selection(&grid(2, 4), 1, 0).unwrap();
		let next = editor.move_tone(&snapshot, 0, 3).unwrap();
		assert_eq!(next.selection().position(), Some(Position::new(1, 3)));
		assert_eq!(next.palette().tone_names(), ["tone 1", "tone 2", "tone 3", "tone 0"]);
		assert_eq!(next.selected_color(), snapshot.selected_color());
	}

	#[test]
	fn test_duplicate_is_independent() {
		let editor = GridEditor::default();
		let snapshot = grid(2, 2);
		let next = editor.duplicate_tone(&snapshot, 0).unwrap();
		assert_eq!(next.palette().tone_names(), ["tone 0", "tone 0 copy", "tone 1"]);

		let edited = editor.nudge_lightness(&next, 0, 0, -20.0).unwrap();
		assert_ne!(edited.palette().color(0, 0).unwrap(), edited.palette().color(0, 1).unwrap());
		assert_eq!(edited.palette().color(0, 1).unwrap(), snapshot.palette().color(0, 0).unwrap());
	}

	#[test]
	fn test_duplicate_keeps_selection_on_source() {
		let editor = GridEditor::default();
		let snapshot = editor.set_selection(&grid(3, 3), 1, 1).unwrap();
		let next = editor.duplicate_hue(&snapshot, 1).unwrap();
		assert_eq!(next.selection().position(), Some(Position::new(1, 1)));
	}

	#[test]
	fn test_nudge_lightness_clamps() {
		let editor = GridEditor::default();
		let snapshot = grid(1, 1);
		let next = editor.nudge_lightness(&snapshot, 0, 0, 500.0).unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().l(), 100.0);
		let next = editor.nudge_lightness(&next, 0, 0, -500.0).unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().l(), 0.0);
	}

	#[test]
	fn test_nudge_chroma_clamps_at_zero() {
		let editor = GridEditor::default();
		let next = editor.nudge_chroma(&grid(1, 1), 0, 0, -100.0).unwrap();
		let color = next.palette().color(0, 0).unwrap();
		assert_eq!(color.c(), 0.0);
		let rgb = color.rgb();
		assert!(rgb.red == rgb.green && rgb.green == rgb.blue);
	}

	#[test]
	fn test_nudge_hue_wraps() {
		let editor = GridEditor::default();
		let snapshot = editor.set_color(&grid(1, 1), 0, 0, Lch::new(50.0, 30.0, 359.0)).unwrap();
		let next = editor.nudge_hue(&snapshot, 0, 0, 2.0).unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().h(), 1.0);
		let next = editor.nudge_hue(&next, 0, 0, -2.0).unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().h(), 359.0);
	}

	#[test]
	fn test_nudge_recomputes_hex() {
		let editor = GridEditor::default();
		let snapshot = grid(2, 2);
		let next = editor.nudge_lightness(&snapshot, 1, 1, 5.0).unwrap();
		let color = next.palette().color(1, 1).unwrap();
		assert_eq!(color.hex(), ColorSpace::CieLch.to_hex(color.lch()));
		assert_ne!(color.hex(), snapshot.palette().color(1, 1).unwrap().hex());
		assert_eq!(next.palette().color(0, 0).unwrap(), snapshot.palette().color(0, 0).unwrap());
	}

	#[test]
	fn test_nudge_rejects_bad_input() {
		let editor = GridEditor::default();
		let snapshot = grid(1, 1);
		assert!(matches!(
			editor.nudge_hue(&snapshot, 0, 0, f64::NAN),
			Err(PaletteError::InvalidColorFormat(_))
		));
		assert!(matches!(
			editor.nudge_chroma(&snapshot, 0, 1, 1.0),
			Err(PaletteError::IndexOutOfRange { .. })
		));
	}

	#[test]
	fn test_set_color_refuses_out_of_range() {
		let editor = GridEditor::default();
		let snapshot = grid(1, 1);
		assert!(matches!(
			editor.set_color(&snapshot, 0, 0, Lch::new(-40.0, -10.0, 0.0)),
			Err(PaletteError::InvalidColorFormat(_))
		));
		assert!(editor.set_color(&snapshot, 0, 0, Lch::new(150.0, 10.0, 0.0)).is_err());

		let next = editor.set_color(&snapshot, 0, 0, Lch::new(40.0, 10.0, 370.0)).unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().lch(), Lch::new(40.0, 10.0, 10.0));
	}

	#[test]
	fn test_paste_color_formats() {
		let editor = GridEditor::default();
		let snapshot = grid(1, 2);
		let next = editor.paste_color(&snapshot, 0, 0, "rgb(10, 20, 30)").unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().hex(), "#0A141E");

		let next = editor.paste_color(&next, 0, 1, "hsl(210 50% 40%)").unwrap();
		assert_eq!(next.palette().color(0, 1).unwrap().hex(), "#336699");

		let next = editor.paste_color(&next, 0, 1, "#3366cc").unwrap();
		assert_eq!(next.palette().color(0, 1).unwrap().hex(), "#3366CC");

		assert!(matches!(
			editor.paste_color(&next, 0, 0, "not a color"),
			Err(PaletteError::InvalidColorFormat(_))
		));
		assert!(matches!(
			editor.paste_color(&next, 0, 2, "rgb(1, 2, 3)"),
			Err(PaletteError::IndexOutOfRange { .. })
		));
	}

	#[test]
	fn test_set_color_hex() {
		let editor = GridEditor::default();
		let next = editor.set_color_hex(&grid(1, 1), 0, 0, "#3366cc").unwrap();
		assert_eq!(next.palette().color(0, 0).unwrap().hex(), "#3366CC");
		assert!(matches!(
			editor.set_color_hex(&next, 0, 0, "3366c"),
			Err(PaletteError::InvalidColorFormat(_))
		));
	}

	#[test]
	fn test_selection_commands() {
		let editor = GridEditor::default();
		let snapshot = grid(2, 2);
		assert!(editor.set_selection(&snapshot, 2, 0).is_err());

		let next = editor.move_selection(&snapshot, Direction::Right).unwrap();
		assert_eq!(next.selection(), Selection::at(0, 0));
		let next = editor.move_selection(&next, Direction::Right).unwrap();
		let next = editor.move_selection(&next, Direction::Down).unwrap();
		let next = editor.move_selection(&next, Direction::Down).unwrap();
		assert_eq!(next.selection(), Selection::at(1, 1));

		let cleared = editor.clear_selection(&next).unwrap();
		assert!(cleared.selection().is_none());
		assert_eq!(cleared.palette(), snapshot.palette());
	}

	#[test]
	fn test_set_color_space_keeps_hex() {
		let editor = GridEditor::default();
		let snapshot = grid(2, 3);
		let next = editor.set_color_space(&snapshot, ColorSpace::OkLch).unwrap();
		assert_eq!(next.palette().color_space(), ColorSpace::OkLch);
		for (a, b) in snapshot.palette().colors().iter().flatten().zip(next.palette().colors().iter().flatten()) {
			assert_eq!(a.hex(), b.hex());
		}
	}

	#[test]
	fn test_default_snapshot_uses_configured_space() {
		let editor = GridEditor::new(EditorConfig {
			color_space: ColorSpace::OkLch,
			..EditorConfig::default()
		});
		assert_eq!(editor.default_snapshot().palette().color_space(), ColorSpace::OkLch);
	}

	#[test]
	fn test_input_snapshot_is_untouched() {
		let editor = GridEditor::default();
		let snapshot = grid(3, 3);
		let before = snapshot.clone();
		let _ = editor.add_hue(&snapshot).unwrap();
		let _ = editor.remove_tone(&snapshot, 0).unwrap();
		let _ = editor.nudge_chroma(&snapshot, 1, 1, 10.0).unwrap();
		assert_eq!(snapshot, before);
	}
}

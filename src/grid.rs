use crate::{
	color::Color,
	color_space::{ColorSpace, Lch},
	error::{Axis, PaletteError, Result, check_index},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/**
The rectangular hue × tone matrix of colors that a palette is made of.

Rows are hues and columns are tones. There is always at least one of each, `hue_names` has one entry per row, `tone_names` one per column, and every row holds exactly one color per tone. Names are free-form and may repeat; the grid is addressed by index.

A `Palette` is a value. The editor never changes one in place; it builds a new palette for every edit, so older values stay valid for undo and for concurrent readers.

```rust
use palette_grid::{ColorSpace, Palette};

let palette = Palette::from_hex(
	ColorSpace::CieLch,
	vec!["Blue".into()],
	vec!["Light".into(), "Dark".into()],
	vec![vec!["#99BBFF", "#3366CC"]],
)?;

assert_eq!(palette.color(0, 1)?.hex(), "#3366CC");

let json = palette.to_json()?;
assert_eq!(Palette::from_json(&json)?, palette);
# Ok::<(), palette_grid::PaletteError>(())
```
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaletteFile", into = "PaletteFile")]
pub struct Palette {
	color_space: ColorSpace,
	hue_names: Vec<String>,
	tone_names: Vec<String>,
	colors: Vec<Vec<Color>>,
}

/**
The persisted shape of a palette: row-major LCH values plus labels.

```json
{
	"colorSpace": "cielch",
	"hueNames": ["Blue"],
	"toneNames": ["Light", "Dark"],
	"colors": [[{ "L": 75.0, "C": 30.0, "H": 270.0 }, { "L": 45.0, "C": 60.0, "H": 288.0 }]]
}
```

Hex values are not stored; they are derived again on load.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteFile {
	#[serde(default)]
	pub color_space: ColorSpace,
	pub hue_names: Vec<String>,
	pub tone_names: Vec<String>,
	pub colors: Vec<Vec<Lch>>,
}

impl TryFrom<PaletteFile> for Palette {
	type Error = PaletteError;

	/**
	Validates the persisted shape. Empty or non-rectangular grids are rejected as they are; nothing is padded or truncated.
	*/
	fn try_from(file: PaletteFile) -> Result<Self> {
		let malformed = |reason: String| {
			log::warn!("Rejected palette: {reason}");
			PaletteError::MalformedPalette(reason)
		};

		if file.hue_names.is_empty() || file.tone_names.is_empty() {
			return Err(malformed("palette needs at least one hue and one tone".into()));
		}

		if file.colors.len() != file.hue_names.len() {
			return Err(malformed(format!(
				"{} hue names but {} rows of colors",
				file.hue_names.len(),
				file.colors.len()
			)));
		}

		if let Some((hue, row)) = file
			.colors
			.iter()
			.enumerate()
			.find(|(_, row)| row.len() != file.tone_names.len())
		{
			return Err(malformed(format!(
				"row {hue} has {} colors, expected {}",
				row.len(),
				file.tone_names.len()
			)));
		}

		for (hue, row) in file.colors.iter().enumerate() {
			for (tone, lch) in row.iter().enumerate() {
				lch.validate().inspect_err(|err| log::warn!("Rejected palette cell ({hue}, {tone}): {err}"))?;
			}
		}

		let space = file.color_space;
		Ok(Self {
			color_space: space,
			hue_names: file.hue_names,
			tone_names: file.tone_names,
			colors: file
				.colors
				.into_iter()
				.map(|row| row.into_iter().map(|lch| Color::new(space, lch)).collect())
				.collect(),
		})
	}
}

impl From<Palette> for PaletteFile {
	fn from(palette: Palette) -> Self {
		Self {
			color_space: palette.color_space,
			colors: palette
				.colors
				.iter()
				.map(|row| row.iter().map(Color::lch).collect())
				.collect(),
			hue_names: palette.hue_names,
			tone_names: palette.tone_names,
		}
	}
}

impl Default for Palette {
	/**
	A small starter palette: three hues over five tones.
	*/
	fn default() -> Self {
		const HUES: [(&str, f64); 3] = [("Red", 30.0), ("Green", 140.0), ("Blue", 270.0)];
		const TONES: [(&str, f64); 5] = [("100", 90.0), ("200", 75.0), ("300", 60.0), ("400", 45.0), ("500", 30.0)];

		let space = ColorSpace::default();
		Self {
			color_space: space,
			hue_names: HUES.iter().map(|(name, _)| (*name).to_string()).collect(),
			tone_names: TONES.iter().map(|(name, _)| (*name).to_string()).collect(),
			colors: HUES
				.iter()
				.map(|&(_, h)| {
					TONES
						.iter()
						.map(|&(_, l)| Color::new(space, Lch::new(l, 30.0, h)))
						.collect()
				})
				.collect(),
		}
	}
}

impl Palette {
	/**
	Creates a palette from LCH rows, with the same validation as loading.
	*/
	pub fn new(
		color_space: ColorSpace,
		hue_names: Vec<String>,
		tone_names: Vec<String>,
		colors: Vec<Vec<Lch>>,
	) -> Result<Self> {
		Self::try_from(PaletteFile {
			color_space,
			hue_names,
			tone_names,
			colors,
		})
	}

	/**
	Creates a palette from rows of hex strings.
	*/
	pub fn from_hex<S: AsRef<str>>(
		color_space: ColorSpace,
		hue_names: Vec<String>,
		tone_names: Vec<String>,
		colors: Vec<Vec<S>>,
	) -> Result<Self> {
		let colors = colors
			.iter()
			.map(|row| {
				row.iter()
					.map(|hex| color_space.from_hex(hex.as_ref()))
					.collect::<Result<Vec<_>>>()
			})
			.collect::<Result<Vec<_>>>()?;
		Self::new(color_space, hue_names, tone_names, colors)
	}

	/**
	Reads a palette from its JSON form. See `PaletteFile` for the layout.
	*/
	pub fn from_json(json: &str) -> Result<Self> {
		let file: PaletteFile = serde_json::from_str(json)?;
		Self::try_from(file)
	}

	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/**
	Writes the palette to a JSON file.
	*/
	pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		fs::write(path, self.to_json()?)?;
		Ok(())
	}

	/**
	Reads a palette from a JSON file.
	*/
	pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		Self::from_json(&data)
	}

	pub fn color_space(&self) -> ColorSpace {
		self.color_space
	}

	pub fn hue_names(&self) -> &[String] {
		&self.hue_names
	}

	pub fn tone_names(&self) -> &[String] {
		&self.tone_names
	}

	/**
	Number of rows.
	*/
	pub fn hues(&self) -> usize {
		self.hue_names.len()
	}

	/**
	Number of columns.
	*/
	pub fn tones(&self) -> usize {
		self.tone_names.len()
	}

	pub fn colors(&self) -> &[Vec<Color>] {
		&self.colors
	}

	pub fn row(&self, hue: usize) -> Result<&[Color]> {
		check_index(Axis::Hue, hue, self.hues())?;
		Ok(&self.colors[hue])
	}

	pub fn column(&self, tone: usize) -> Result<Vec<&Color>> {
		check_index(Axis::Tone, tone, self.tones())?;
		Ok(self.colors.iter().map(|row| &row[tone]).collect())
	}

	pub fn color(&self, hue: usize, tone: usize) -> Result<&Color> {
		check_index(Axis::Tone, tone, self.tones())?;
		Ok(&self.row(hue)?[tone])
	}

	/**
	The same grid with every color reduced to a neutral gray of equal lightness, for checking a palette's lightness steps.
	*/
	#[must_use]
	pub fn grayscale(&self) -> Self {
		let space = self.color_space;
		Self {
			colors: self
				.colors
				.iter()
				.map(|row| row.iter().map(|color| color.grayscale(space)).collect())
				.collect(),
			..self.clone()
		}
	}

	pub fn to_file(&self) -> PaletteFile {
		self.clone().into()
	}

	/**
	Re-expresses every color in another profile, keeping its displayed hex.
	*/
	#[must_use]
	pub fn with_color_space(&self, space: ColorSpace) -> Self {
		if space == self.color_space {
			return self.clone();
		}
		Self {
			color_space: space,
			colors: self
				.colors
				.iter()
				.map(|row| {
					row.iter()
						.map(|color| Color::new(space, space.from_rgb(color.rgb())))
						.collect()
				})
				.collect(),
			..self.clone()
		}
	}

	// Structural primitives used by the editor. Each keeps the grid rectangular because it acts on
	// a whole row or column at once.

	pub(crate) fn insert_hue(&mut self, index: usize, name: String, row: Vec<Color>) {
		debug_assert_eq!(row.len(), self.tones());
		self.hue_names.insert(index, name);
		self.colors.insert(index, row);
	}

	pub(crate) fn insert_tone(&mut self, index: usize, name: String, column: Vec<Color>) {
		debug_assert_eq!(column.len(), self.hues());
		self.tone_names.insert(index, name);
		for (row, color) in self.colors.iter_mut().zip(column) {
			row.insert(index, color);
		}
	}

	pub(crate) fn remove_hue(&mut self, hue: usize) -> Result<()> {
		check_index(Axis::Hue, hue, self.hues())?;
		self.hue_names.remove(hue);
		self.colors.remove(hue);
		Ok(())
	}

	pub(crate) fn remove_tone(&mut self, tone: usize) -> Result<()> {
		check_index(Axis::Tone, tone, self.tones())?;
		self.tone_names.remove(tone);
		for row in &mut self.colors {
			row.remove(tone);
		}
		Ok(())
	}

	pub(crate) fn move_hue(&mut self, from: usize, to: usize) -> Result<()> {
		check_index(Axis::Hue, from, self.hues())?;
		check_index(Axis::Hue, to, self.hues())?;
		let name = self.hue_names.remove(from);
		let row = self.colors.remove(from);
		self.insert_hue(to, name, row);
		Ok(())
	}

	pub(crate) fn move_tone(&mut self, from: usize, to: usize) -> Result<()> {
		check_index(Axis::Tone, from, self.tones())?;
		check_index(Axis::Tone, to, self.tones())?;
		let name = self.tone_names.remove(from);
		let column = self.colors.iter_mut().map(|row| row.remove(from)).collect();
		self.insert_tone(to, name, column);
		Ok(())
	}

	pub(crate) fn rename(&mut self, axis: Axis, index: usize, name: String) -> Result<()> {
		let names = match axis {
			Axis::Hue => &mut self.hue_names,
			Axis::Tone => &mut self.tone_names,
		};
		check_index(axis, index, names.len())?;
		names[index] = name;
		Ok(())
	}

	/**
	Replaces one cell and derives its hex in this palette's profile. Out-of-range lightness or chroma is refused, not clamped; only the hue is wrapped.
	*/
	pub(crate) fn set_lch(&mut self, hue: usize, tone: usize, lch: Lch) -> Result<()> {
		lch.validate()?;
		check_index(Axis::Hue, hue, self.hues())?;
		check_index(Axis::Tone, tone, self.tones())?;
		self.colors[hue][tone] = Color::new(self.color_space, lch);
		Ok(())
	}
}

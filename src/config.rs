use crate::{color_space::ColorSpace, contrast::ContrastMode, error::Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/**
Editor defaults, usually read from a TOML file.

Every field is optional in the file; missing ones fall back to `EditorConfig::default()`.

```toml
new_hue_name = "Hue"
duplicate_suffix = " (2)"
color_space = "oklch"
contrast_mode = "APCA"
```
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Label given to rows created by `add_hue`.
	pub new_hue_name: String,
	/// Label given to columns created by `add_tone`.
	pub new_tone_name: String,
	/// Appended to the label of a duplicated row or column.
	pub duplicate_suffix: String,
	/// Profile for palettes created by the editor.
	pub color_space: ColorSpace,
	/// Scorer the annotation layer starts with.
	pub contrast_mode: ContrastMode,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			new_hue_name: "New hue".into(),
			new_tone_name: "New tone".into(),
			duplicate_suffix: " copy".into(),
			color_space: ColorSpace::default(),
			contrast_mode: ContrastMode::default(),
		}
	}
}

impl EditorConfig {
	pub fn from_toml_str(toml: &str) -> Result<Self> {
		Ok(toml::from_str(toml)?)
	}

	/**
	Reads the configuration from a TOML file.
	*/
	pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		Self::from_toml_str(&data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::PaletteError;

	#[test]
	fn test_partial_toml_keeps_defaults() {
		let config = EditorConfig::from_toml_str(
			r#"
			new_hue_name = "Hue"
			color_space = "oklch"
			contrast_mode = "DELTA_E"
			"#,
		)
		.unwrap();

		assert_eq!(config.new_hue_name, "Hue");
		assert_eq!(config.new_tone_name, "New tone");
		assert_eq!(config.duplicate_suffix, " copy");
		assert_eq!(config.color_space, ColorSpace::OkLch);
		assert_eq!(config.contrast_mode, ContrastMode::DeltaE);
	}

	#[test]
	fn test_empty_toml_is_default() {
		assert_eq!(EditorConfig::from_toml_str("").unwrap(), EditorConfig::default());
	}

	#[test]
	fn test_invalid_toml() {
		assert!(matches!(
			EditorConfig::from_toml_str("color_space = \"hsl\""),
			Err(PaletteError::Config(_))
		));
	}

	#[test]
	fn test_read_from_file() {
		let tmp_dir = tempfile::tempdir().unwrap();
		let file_path = tmp_dir.path().join("editor.toml");
		fs::write(&file_path, "duplicate_suffix = \" (2)\"\n").unwrap();

		let config = EditorConfig::read_from_file(&file_path).unwrap();
		assert_eq!(config.duplicate_suffix, " (2)");
	}
}

use crate::{
	color_space::{ColorSpace, Lch, Rgb},
	error::Result,
};

/**
A single palette cell.

LCH is the source of truth. The sRGB projection is derived from it by every constructor and every LCH change and cannot be set on its own, so `hex()` always equals `space.to_hex(lch())` for the space the color was built in.
*/
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
	lch: Lch,
	rgb: Rgb,
}

impl Color {
	/**
	Creates a color from LCH, normalizing it with `clamp_to_gamut` and deriving its sRGB projection.
	*/
	pub fn new(space: ColorSpace, lch: Lch) -> Self {
		let lch = space.clamp_to_gamut(lch);
		Self {
			lch,
			rgb: space.to_rgb(lch),
		}
	}

	/**
	Creates a color from a hex string, e.g. a pasted value.
	*/
	pub fn from_hex(space: ColorSpace, hex: &str) -> Result<Self> {
		Ok(Self::new(space, space.from_hex(hex)?))
	}

	pub fn lch(&self) -> Lch {
		self.lch
	}

	pub fn l(&self) -> f64 {
		self.lch.l
	}

	pub fn c(&self) -> f64 {
		self.lch.c
	}

	pub fn h(&self) -> f64 {
		self.lch.h
	}

	pub fn rgb(&self) -> Rgb {
		self.rgb
	}

	/**
	The `#RRGGBB` projection of this color.
	*/
	pub fn hex(&self) -> String {
		self.rgb.to_hex()
	}

	/**
	The neutral gray with the same lightness.
	*/
	#[must_use]
	pub fn grayscale(&self, space: ColorSpace) -> Self {
		Self::new(space, Lch::new(self.lch.l, 0.0, 0.0))
	}

	/**
	Whether the LCH value fits in sRGB, i.e. the projection did not need clipping.
	*/
	pub fn is_displayable(&self, space: ColorSpace) -> bool {
		space.is_displayable(self.lch)
	}
}

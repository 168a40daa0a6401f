#![allow(clippy::excessive_precision, clippy::unreadable_literal)]

use crate::error::{PaletteError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Chroma below this is treated as a neutral gray when reading colors back from sRGB.
const ACHROMATIC_CHROMA: f64 = 1e-4;

/// How far a linear channel may stray outside 0...1 and still count as displayable.
const GAMUT_EPSILON: f64 = 1e-5;

const MAX_CHROMA_STEPS: u32 = 24;

// D65 reference white
const D65_XN: f64 = 0.95047;
const D65_YN: f64 = 1.0;
const D65_ZN: f64 = 1.08883;

/**
A color in a polar perceptual space: lightness, chroma and hue.

Lightness runs from 0 to 100, chroma starts at 0 and is unbounded (practically below ~150) and hue is an angle in degrees within 0..360.

Serialized as `{ "L": .., "C": .., "H": .. }`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lch {
	#[serde(rename = "L")]
	pub l: f64,
	#[serde(rename = "C")]
	pub c: f64,
	#[serde(rename = "H")]
	pub h: f64,
}

impl Lch {
	pub const fn new(l: f64, c: f64, h: f64) -> Self {
		Self { l, c, h }
	}

	/**
	Creates an LCH value, rejecting NaN and infinite components, lightness outside 0...100 and negative chroma. Any finite hue is accepted; it is wrapped into 0..360 when the value is used.
	*/
	pub fn try_new(l: f64, c: f64, h: f64) -> Result<Self> {
		let lch = Self::new(l, c, h);
		lch.validate()?;
		Ok(lch)
	}

	pub(crate) fn validate(&self) -> Result<()> {
		if !(self.l.is_finite() && self.c.is_finite() && self.h.is_finite()) {
			return Err(PaletteError::InvalidColorFormat(format!(
				"non-finite LCH components ({}, {}, {})",
				self.l, self.c, self.h
			)));
		}
		if !(0.0..=100.0).contains(&self.l) {
			return Err(PaletteError::InvalidColorFormat(format!("lightness {} outside 0...100", self.l)));
		}
		if self.c < 0.0 {
			return Err(PaletteError::InvalidColorFormat(format!("negative chroma {}", self.c)));
		}
		Ok(())
	}
}

/**
CIELAB coordinates (D65).
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
	pub l: f64,
	pub a: f64,
	pub b: f64,
}

impl Lab {
	pub const fn new(l: f64, a: f64, b: f64) -> Self {
		Self { l, a, b }
	}
}

/**
An 8-bit sRGB color, the device-facing projection of a palette cell.

Its canonical text form is `#RRGGBB` in upper case.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
	pub red: u8,
	pub green: u8,
	pub blue: u8,
}

impl Rgb {
	pub const fn new(red: u8, green: u8, blue: u8) -> Self {
		Self { red, green, blue }
	}

	/**
	Parses a hex color.

	Supports the following formats, with an optional "#" prefix:
	- RGB: "#RGB" or "RGB"
	- RRGGBB: "#RRGGBB" or "RRGGBB"

	Anything else fails with `InvalidColorFormat`; there is no fallback color.
	*/
	pub fn from_hex_str(hex: &str) -> Result<Self> {
		let invalid = |reason: &str| PaletteError::InvalidColorFormat(format!("{reason}: {hex:?}"));

		let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());

		if digits.is_empty() {
			return Err(invalid("empty hex string"));
		}

		if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
			return Err(invalid("invalid hex characters"));
		}

		// All digits are ASCII at this point, so byte slicing is safe.
		let digit = |i: usize| {
			u8::from_str_radix(&digits[i..=i], 16)
				.map(|n| n << 4 | n)
				.map_err(|_| invalid("invalid hex value"))
		};
		let pair = |i: usize| {
			u8::from_str_radix(&digits[i..=i + 1], 16).map_err(|_| invalid("invalid hex value"))
		};

		match digits.len() {
			3 => Ok(Self::new(digit(0)?, digit(1)?, digit(2)?)),
			6 => Ok(Self::new(pair(0)?, pair(2)?, pair(4)?)),
			_ => Err(invalid("expected 3 or 6 hex digits")),
		}
	}

	pub fn to_hex(self) -> String {
		format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
	}

	/**
	Returns the gamma-encoded channels scaled to 0...1.
	*/
	pub fn components(self) -> [f64; 3] {
		[
			f64::from(self.red) / 255.0,
			f64::from(self.green) / 255.0,
			f64::from(self.blue) / 255.0,
		]
	}

	pub(crate) fn to_linear(self) -> [f64; 3] {
		self.components().map(srgb_to_linear)
	}

	fn from_linear(linear: [f64; 3]) -> Self {
		let [red, green, blue] = linear.map(|c| encode_channel(linear_to_srgb(c.clamp(0.0, 1.0))));
		Self::new(red, green, blue)
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl FromStr for Rgb {
	type Err = PaletteError;

	fn from_str(s: &str) -> Result<Self> {
		Self::from_hex_str(s)
	}
}

/**
The perceptual profile a palette is edited in.

Both profiles expose lightness on a 0...100 scale. `OkLch` scales Oklab lightness and chroma by 100, so its chroma tops out around 32 for sRGB colors where `CieLch` reaches about 134.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
	#[default]
	CieLch,
	OkLch,
}

impl ColorSpace {
	/**
	Converts LCH to an sRGB color.

	The input is first normalized with `clamp_to_gamut`. Linear channels outside 0...1 are clipped to the nearest representable value, so every input renders as some color. Encoded channels are rounded half away from zero to the nearest byte.
	*/
	pub fn to_rgb(self, lch: Lch) -> Rgb {
		Rgb::from_linear(self.lch_to_linear(self.clamp_to_gamut(lch)))
	}

	/**
	Converts LCH to a `#RRGGBB` hex string. See `to_rgb` for the clipping and rounding rules.
	*/
	pub fn to_hex(self, lch: Lch) -> String {
		self.to_rgb(lch).to_hex()
	}

	/**
	Converts an sRGB color to LCH at full precision.

	Near-zero chroma collapses to an exact neutral (`C = 0`, `H = 0`) and lightness is clamped to 0...100, so `to_rgb(from_rgb(x)) == x` for every 8-bit color.
	*/
	pub fn from_rgb(self, rgb: Rgb) -> Lch {
		let [l, a, b] = match self {
			Self::CieLch => {
				let lab = xyz_to_lab(linear_to_xyz(rgb.to_linear()));
				[lab.l, lab.a, lab.b]
			}
			Self::OkLch => linear_to_oklab(rgb.to_linear()).map(|v| v * 100.0),
		};

		let c = a.hypot(b);
		if c < ACHROMATIC_CHROMA {
			Lch::new(l.clamp(0.0, 100.0), 0.0, 0.0)
		} else {
			Lch::new(l.clamp(0.0, 100.0), c, wrap_hue(b.atan2(a).to_degrees()))
		}
	}

	/**
	Parses a hex color and converts it to LCH.
	*/
	pub fn from_hex(self, hex: &str) -> Result<Lch> {
		Ok(self.from_rgb(Rgb::from_hex_str(hex)?))
	}

	/**
	Normalizes LCH into its valid ranges.

	Lightness is clamped to 0...100, chroma to at least 0, and hue wraps modulo 360 because it is circular. The hue is kept when chroma reaches 0 so chroma can be raised again along the same hue, but it has no effect on the projected color while chroma is 0.
	*/
	pub fn clamp_to_gamut(self, lch: Lch) -> Lch {
		Lch::new(lch.l.clamp(0.0, 100.0), lch.c.max(0.0), wrap_hue(lch.h))
	}

	/**
	Whether the color fits in sRGB without clipping any channel.
	*/
	pub fn is_displayable(self, lch: Lch) -> bool {
		self.lch_to_linear(self.clamp_to_gamut(lch))
			.iter()
			.all(|c| (-GAMUT_EPSILON..=1.0 + GAMUT_EPSILON).contains(c))
	}

	/**
	The largest chroma that is still displayable at the given lightness and hue.

	Runs a fixed number of bisection steps, so the cost is bounded and the answer is within the last step's width below the true limit.
	*/
	pub fn max_chroma(self, l: f64, h: f64) -> f64 {
		let (mut lo, mut hi) = (0.0, self.chroma_ceiling());
		if self.is_displayable(Lch::new(l, hi, h)) {
			return hi;
		}
		for _ in 0..MAX_CHROMA_STEPS {
			let mid = (lo + hi) / 2.0;
			if self.is_displayable(Lch::new(l, mid, h)) {
				lo = mid;
			} else {
				hi = mid;
			}
		}
		lo
	}

	fn chroma_ceiling(self) -> f64 {
		match self {
			Self::CieLch => 150.0,
			Self::OkLch => 40.0,
		}
	}

	fn lch_to_linear(self, lch: Lch) -> [f64; 3] {
		// Neutrals go straight to equal channels so matrix rounding can't tint them.
		if lch.c == 0.0 {
			let y = match self {
				Self::CieLch => lab_f_inv((lch.l + 16.0) / 116.0) * D65_YN,
				Self::OkLch => (lch.l / 100.0).powi(3),
			};
			return [y; 3];
		}

		let (sin, cos) = lch.h.to_radians().sin_cos();
		let (a, b) = (lch.c * cos, lch.c * sin);

		match self {
			Self::CieLch => xyz_to_linear(lab_to_xyz(Lab::new(lch.l, a, b))),
			Self::OkLch => oklab_to_linear([lch.l / 100.0, a / 100.0, b / 100.0]),
		}
	}
}

/**
CIELAB coordinates of an sRGB color. Used by the delta-E scorer regardless of the palette's profile.
*/
pub fn to_lab(rgb: Rgb) -> Lab {
	xyz_to_lab(linear_to_xyz(rgb.to_linear()))
}

pub(crate) fn wrap_hue(h: f64) -> f64 {
	let wrapped = h.rem_euclid(360.0);
	// rem_euclid can round tiny negative inputs up to exactly 360
	if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[inline]
fn encode_channel(value: f64) -> u8 {
	// value is within 0...1, so the cast cannot saturate
	(value * 255.0).round() as u8
}

pub(crate) fn srgb_to_linear(srgb: f64) -> f64 {
	if srgb <= 0.04045 {
		srgb / 12.92
	} else {
		((srgb + 0.055) / 1.055).powf(2.4)
	}
}

fn linear_to_srgb(linear: f64) -> f64 {
	if linear <= 0.0031308 {
		linear * 12.92
	} else {
		linear.powf(1.0 / 2.4) * 1.055 - 0.055
	}
}

fn linear_to_xyz([r, g, b]: [f64; 3]) -> [f64; 3] {
	[
		r * 0.4124564 + g * 0.3575761 + b * 0.1804375,
		r * 0.2126729 + g * 0.7151522 + b * 0.0721750,
		r * 0.0193339 + g * 0.1191920 + b * 0.9503041,
	]
}

fn xyz_to_linear([x, y, z]: [f64; 3]) -> [f64; 3] {
	[
		x * 3.2404542 - y * 1.5371385 - z * 0.4985314,
		-x * 0.9692660 + y * 1.8760108 + z * 0.0415560,
		x * 0.0556434 - y * 0.2040259 + z * 1.0572252,
	]
}

fn xyz_to_lab([x, y, z]: [f64; 3]) -> Lab {
	let fx = lab_f(x / D65_XN);
	let fy = lab_f(y / D65_YN);
	let fz = lab_f(z / D65_ZN);

	Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

fn lab_to_xyz(lab: Lab) -> [f64; 3] {
	let fy = (lab.l + 16.0) / 116.0;
	let fx = fy + lab.a / 500.0;
	let fz = fy - lab.b / 200.0;

	[
		lab_f_inv(fx) * D65_XN,
		lab_f_inv(fy) * D65_YN,
		lab_f_inv(fz) * D65_ZN,
	]
}

const DELTA: f64 = 6.0 / 29.0;

fn lab_f(t: f64) -> f64 {
	if t > DELTA * DELTA * DELTA {
		t.cbrt()
	} else {
		t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
	}
}

fn lab_f_inv(t: f64) -> f64 {
	if t > DELTA {
		t * t * t
	} else {
		3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
	}
}

fn linear_to_oklab([r, g, b]: [f64; 3]) -> [f64; 3] {
	let l = (0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b).cbrt();
	let m = (0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b).cbrt();
	let s = (0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b).cbrt();

	[
		0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
		1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
		0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
	]
}

fn oklab_to_linear([l, a, b]: [f64; 3]) -> [f64; 3] {
	let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
	let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
	let s_ = l - 0.0894841775 * a - 1.2914855480 * b;

	let (l, m, s) = (l_ * l_ * l_, m_ * m_ * m_, s_ * s_ * s_);

	[
		4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
		-1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
		-0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
	]
}

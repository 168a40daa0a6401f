/*!
Contrast scoring between two sRGB colors.

Three independent scorers are provided, selected with `ContrastMode`:

- WCAG 2.1 luminance contrast ratio, 1...21, order-independent.
- APCA lightness contrast (Lc), pinned to the APCA-W3 0.0.98G-4g constants. Signed and order-dependent: positive for dark text on a light background, negative for light text on a dark background.
- CIEDE2000 color difference on CIELAB D65. Symmetric, 0 for identical colors.

All scorers return full precision. Rounding for display is left to `truncate_score`.
*/

#![allow(clippy::excessive_precision, clippy::unreadable_literal, clippy::many_single_char_names)]

use crate::{
	color_space::{Lab, Rgb, srgb_to_linear, to_lab},
	error::Result,
};
use serde::{Deserialize, Serialize};

/**
Which scorer annotates the palette. `None` turns annotation off and always scores as undefined.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContrastMode {
	#[default]
	Wcag,
	Apca,
	DeltaE,
	None,
}

impl ContrastMode {
	/**
	Scores `foreground` against `background`.

	Only APCA cares about the order. Returns `None` for `ContrastMode::None`.
	*/
	pub fn score(self, foreground: Rgb, background: Rgb) -> Option<f64> {
		match self {
			Self::Wcag => Some(wcag(foreground, background)),
			Self::Apca => Some(apca(foreground, background)),
			Self::DeltaE => Some(delta_e(foreground, background)),
			Self::None => None,
		}
	}
}

/**
Scores two hex colors with the given mode.

Malformed hex input fails with `InvalidColorFormat`, even when the mode is `None`.
*/
pub fn contrast_between(foreground: &str, background: &str, mode: ContrastMode) -> Result<Option<f64>> {
	let foreground = Rgb::from_hex_str(foreground)?;
	let background = Rgb::from_hex_str(background)?;
	Ok(mode.score(foreground, background))
}

/**
Truncates a score to one decimal place, rounding toward negative infinity, the way swatch annotations display it.
*/
#[must_use]
pub fn truncate_score(score: f64) -> f64 {
	(score * 10.0).floor() / 10.0
}

/**
Picks the candidate with the highest WCAG contrast against `color`, typically to choose a legible label color for a swatch. The first candidate wins ties.
*/
pub fn most_contrast(color: Rgb, candidates: &[Rgb]) -> Option<Rgb> {
	candidates
		.iter()
		.copied()
		.fold(None, |best: Option<(Rgb, f64)>, candidate| {
			let ratio = wcag(color, candidate);
			match best {
				Some((_, best_ratio)) if best_ratio >= ratio => best,
				_ => Some((candidate, ratio)),
			}
		})
		.map(|(candidate, _)| candidate)
}

// WCAG 2.1

/**
WCAG 2.1 relative luminance.
*/
pub fn relative_luminance(rgb: Rgb) -> f64 {
	let [r, g, b] = rgb.components().map(srgb_to_linear);
	0.2126 * r + 0.7152 * g + 0.0722 * b
}

/**
WCAG 2.1 contrast ratio, `(lighter + 0.05) / (darker + 0.05)`.
*/
pub fn wcag(a: Rgb, b: Rgb) -> f64 {
	let (la, lb) = (relative_luminance(a), relative_luminance(b));
	let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
	(lighter + 0.05) / (darker + 0.05)
}

// APCA-W3 0.0.98G-4g

const APCA_COEF_R: f64 = 0.2126729;
const APCA_COEF_G: f64 = 0.7151522;
const APCA_COEF_B: f64 = 0.0721750;
const APCA_GAMMA: f64 = 2.4;

const NORM_BG: f64 = 0.56;
const NORM_TXT: f64 = 0.57;
const REV_TXT: f64 = 0.62;
const REV_BG: f64 = 0.65;

const BLK_THRS: f64 = 0.022;
const BLK_CLMP: f64 = 1.414;
const SCALE: f64 = 1.14;
const OFFSET: f64 = 0.027;
const LOW_CLIP: f64 = 0.1;
const DELTA_Y_MIN: f64 = 0.0005;

/// Screen luminance as APCA estimates it, a plain 2.4 power curve without the sRGB linear toe.
fn apca_luminance(rgb: Rgb) -> f64 {
	let [r, g, b] = rgb.components().map(|c| c.powf(APCA_GAMMA));
	APCA_COEF_R * r + APCA_COEF_G * g + APCA_COEF_B * b
}

/**
APCA lightness contrast of `text` on `background`.

Black text on white scores about 106.0, white text on black about -107.9. Pairs too close to call score exactly 0.
*/
pub fn apca(text: Rgb, background: Rgb) -> f64 {
	apca_from_luminance(apca_luminance(text), apca_luminance(background))
}

fn apca_from_luminance(text_y: f64, background_y: f64) -> f64 {
	let in_range = |y: f64| y.is_finite() && (0.0..=1.1).contains(&y);
	if !in_range(text_y) || !in_range(background_y) {
		return 0.0;
	}

	let text_y = soft_clamp_black(text_y);
	let background_y = soft_clamp_black(background_y);

	if (background_y - text_y).abs() < DELTA_Y_MIN {
		return 0.0;
	}

	let output = if background_y > text_y {
		let sapc = (background_y.powf(NORM_BG) - text_y.powf(NORM_TXT)) * SCALE;
		if sapc < LOW_CLIP { 0.0 } else { sapc - OFFSET }
	} else {
		let sapc = (background_y.powf(REV_BG) - text_y.powf(REV_TXT)) * SCALE;
		if sapc > -LOW_CLIP { 0.0 } else { sapc + OFFSET }
	};

	output * 100.0
}

fn soft_clamp_black(y: f64) -> f64 {
	if y > BLK_THRS {
		y
	} else {
		y + (BLK_THRS - y).powf(BLK_CLMP)
	}
}

// CIEDE2000

/**
CIEDE2000 difference between two sRGB colors.

The operands are put in a fixed order before computing, so swapping them yields the bit-identical result.
*/
pub fn delta_e(a: Rgb, b: Rgb) -> f64 {
	let key = |rgb: Rgb| (rgb.red, rgb.green, rgb.blue);
	let (first, second) = if key(a) <= key(b) { (a, b) } else { (b, a) };
	delta_e_lab(to_lab(first), to_lab(second))
}

/**
CIEDE2000 (CIE 142-2001) difference between two CIELAB colors, with kL = kC = kH = 1.
*/
pub fn delta_e_lab(lab1: Lab, lab2: Lab) -> f64 {
	// 25^7
	const POW25_7: f64 = 6103515625.0;

	let c1 = lab1.a.hypot(lab1.b);
	let c2 = lab2.a.hypot(lab2.b);
	let c_mean_pow7 = ((c1 + c2) / 2.0).powi(7);
	let g = 0.5 * (1.0 - (c_mean_pow7 / (c_mean_pow7 + POW25_7)).sqrt());

	let a1 = lab1.a * (1.0 + g);
	let a2 = lab2.a * (1.0 + g);
	let c1 = a1.hypot(lab1.b);
	let c2 = a2.hypot(lab2.b);
	let h1 = hue_angle(a1, lab1.b);
	let h2 = hue_angle(a2, lab2.b);

	let delta_l = lab2.l - lab1.l;
	let delta_c = c2 - c1;
	let chroma_product = c1 * c2;

	let delta_h = if chroma_product == 0.0 {
		0.0
	} else {
		let diff = h2 - h1;
		if diff > 180.0 {
			diff - 360.0
		} else if diff < -180.0 {
			diff + 360.0
		} else {
			diff
		}
	};
	let delta_big_h = 2.0 * chroma_product.sqrt() * (delta_h.to_radians() / 2.0).sin();

	let l_mean = (lab1.l + lab2.l) / 2.0;
	let c_mean = (c1 + c2) / 2.0;
	let h_mean = if chroma_product == 0.0 {
		h1 + h2
	} else if (h1 - h2).abs() <= 180.0 {
		(h1 + h2) / 2.0
	} else if h1 + h2 < 360.0 {
		(h1 + h2 + 360.0) / 2.0
	} else {
		(h1 + h2 - 360.0) / 2.0
	};

	let t = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
		+ 0.24 * (2.0 * h_mean).to_radians().cos()
		+ 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
		- 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

	let l_offset_sq = (l_mean - 50.0).powi(2);
	let sl = 1.0 + 0.015 * l_offset_sq / (20.0 + l_offset_sq).sqrt();
	let sc = 1.0 + 0.045 * c_mean;
	let sh = 1.0 + 0.015 * c_mean * t;

	let delta_theta = 30.0 * (-((h_mean - 275.0) / 25.0).powi(2)).exp();
	let c_mean_pow7 = c_mean.powi(7);
	let rc = 2.0 * (c_mean_pow7 / (c_mean_pow7 + POW25_7)).sqrt();
	let rt = -rc * (2.0 * delta_theta).to_radians().sin();

	let l_term = delta_l / sl;
	let c_term = delta_c / sc;
	let h_term = delta_big_h / sh;

	(l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term)
		.max(0.0)
		.sqrt()
}

fn hue_angle(a: f64, b: f64) -> f64 {
	if a == 0.0 && b == 0.0 {
		0.0
	} else {
		b.atan2(a).to_degrees().rem_euclid(360.0)
	}
}

/*!
Parsing of pasted colors.

Accepts hex (`#RGB`, `#RRGGBB`, with or without the `#`) and the CSS functional notations `rgb()`, `rgba()`, `hsl()` and `hsla()`. Arguments may be separated by commas or spaces, with an optional `/ alpha`. Palettes are opaque, so alpha is checked and then discarded.
*/

use crate::{
	color_space::Rgb,
	error::{PaletteError, Result},
};

/**
Parses a pasted color into sRGB.

```rust
use palette_grid::{Rgb, parse::parse_color};

assert_eq!(parse_color("rgb(51, 102, 204)")?, Rgb::new(0x33, 0x66, 0xCC));
assert_eq!(parse_color("hsl(0 100% 50%)")?.to_hex(), "#FF0000");
assert!(parse_color("rebeccapurple").is_err());
# Ok::<(), palette_grid::PaletteError>(())
```
*/
pub fn parse_color(text: &str) -> Result<Rgb> {
	let text = text.trim();
	let invalid = || PaletteError::InvalidColorFormat(format!("unrecognized color {text:?}"));

	if text.is_empty() {
		return Err(invalid());
	}

	let lower = text.to_ascii_lowercase();
	let Some((name, args)) = lower.strip_suffix(')').and_then(|body| body.split_once('(')) else {
		return Rgb::from_hex_str(text);
	};

	let args = arguments(args);
	let rgb = match name.trim() {
		"rgb" | "rgba" => parse_rgb(&args),
		"hsl" | "hsla" => parse_hsl(&args),
		_ => None,
	};
	rgb.ok_or_else(invalid)
}

fn arguments(args: &str) -> Vec<&str> {
	args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
		.filter(|token| !token.is_empty())
		.collect()
}

fn parse_rgb(args: &[&str]) -> Option<Rgb> {
	let (channels, alpha) = split_alpha(args)?;
	alpha.map_or(Some(()), check_alpha)?;

	let byte = |token: &str| {
		let value = match token.strip_suffix('%') {
			Some(percent) => number(percent)? / 100.0 * 255.0,
			None => number(token)?,
		};
		(0.0..=255.0).contains(&value).then(|| value.round() as u8)
	};
	Some(Rgb::new(byte(channels[0])?, byte(channels[1])?, byte(channels[2])?))
}

fn parse_hsl(args: &[&str]) -> Option<Rgb> {
	let (channels, alpha) = split_alpha(args)?;
	alpha.map_or(Some(()), check_alpha)?;

	let hue = number(channels[0].strip_suffix("deg").unwrap_or(channels[0]))?;
	let fraction = |token: &str| {
		let value = number(token.strip_suffix('%').unwrap_or(token))?;
		(0.0..=100.0).contains(&value).then_some(value / 100.0)
	};
	Some(hsl_to_rgb(hue, fraction(channels[1])?, fraction(channels[2])?))
}

fn split_alpha<'a>(args: &'a [&'a str]) -> Option<(&'a [&'a str], Option<&'a str>)> {
	match args.len() {
		3 => Some((args, None)),
		4 => Some((&args[..3], Some(args[3]))),
		_ => None,
	}
}

fn check_alpha(token: &str) -> Option<()> {
	let alpha = match token.strip_suffix('%') {
		Some(percent) => number(percent)? / 100.0,
		None => number(token)?,
	};
	(0.0..=1.0).contains(&alpha).then_some(())
}

fn number(token: &str) -> Option<f64> {
	token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
	let hue = hue.rem_euclid(360.0);
	let amount = saturation * lightness.min(1.0 - lightness);
	let channel = |n: f64| {
		let k = (n + hue / 30.0) % 12.0;
		let value = lightness - amount * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
		(value.clamp(0.0, 1.0) * 255.0).round() as u8
	};
	Rgb::new(channel(0.0), channel(8.0), channel(4.0))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_hex() {
		assert_eq!(parse_color("#3366cc").unwrap(), Rgb::new(0x33, 0x66, 0xCC));
		assert_eq!(parse_color(" 36c ").unwrap(), Rgb::new(0x33, 0x66, 0xCC));
		assert!(parse_color("#3366CG").is_err());
	}

	#[test]
	fn test_parse_rgb() {
		assert_eq!(parse_color("rgb(10, 20, 30)").unwrap(), Rgb::new(10, 20, 30));
		assert_eq!(parse_color("RGB(10 20 30)").unwrap(), Rgb::new(10, 20, 30));
		assert_eq!(parse_color("rgb(100%, 0%, 50%)").unwrap(), Rgb::new(255, 0, 128));
		assert_eq!(parse_color("rgba(1, 2, 3, 0.5)").unwrap(), Rgb::new(1, 2, 3));
		assert_eq!(parse_color("rgb(1 2 3 / 40%)").unwrap(), Rgb::new(1, 2, 3));
	}

	#[test]
	fn test_parse_rgb_rejects_bad_arguments() {
		for text in [
			"rgb(256, 0, 0)",
			"rgb(-1, 0, 0)",
			"rgb(1, 2)",
			"rgb(1, 2, 3, 4, 5)",
			"rgb(a, b, c)",
			"rgba(1, 2, 3, 2)",
			"rgb(1, 2, 3",
			"cmyk(0, 0, 0, 0)",
		] {
			assert!(
				matches!(parse_color(text), Err(PaletteError::InvalidColorFormat(_))),
				"{text} should be rejected"
			);
		}
	}

	#[test]
	fn test_parse_hsl() {
		assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap().to_hex(), "#FF0000");
		assert_eq!(parse_color("hsl(120deg 100% 25%)").unwrap().to_hex(), "#008000");
		assert_eq!(parse_color("hsl(240, 100%, 50%)").unwrap().to_hex(), "#0000FF");
		assert_eq!(parse_color("hsla(-120, 100%, 50%, 1)").unwrap().to_hex(), "#0000FF");
		assert_eq!(parse_color("hsl(0, 0%, 100%)").unwrap().to_hex(), "#FFFFFF");
		assert!(parse_color("hsl(0, 120%, 50%)").is_err());
	}

	#[test]
	fn test_parse_rejects_empty() {
		assert!(parse_color("").is_err());
		assert!(parse_color("   ").is_err());
	}
}

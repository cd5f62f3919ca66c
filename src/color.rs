use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Number of entries in the voltage color scale
pub const SCALE_LEN: usize = 64;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
	#[error("expected 6 hex digits, got {0:?}")]
	Length(String),
	#[error("invalid hex digits in {0:?}")]
	Digits(String),
}

impl Color {
	pub const GREEN: Self = Self::rgb(0, 255, 0);
	pub const RED: Self = Self::rgb(255, 0, 0);
	pub const GRAY: Self = Self::rgb(128, 128, 128);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Lowercase `#rrggbb`
	pub fn to_hex(&self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Linear blend, `t` in [0, 1] going from `self` to `other`.
	pub fn mix(self, other: Self, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Self::rgb(
			lerp(self.r, other.r),
			lerp(self.g, other.g),
			lerp(self.b, other.b),
		)
	}
}

impl FromStr for Color {
	type Err = ColorError;

	/// Accepts `#rrggbb` or `rrggbb`, either case.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let hex = s.strip_prefix('#').unwrap_or(s);
		if hex.len() != 6 || !hex.is_ascii() {
			return Err(ColorError::Length(s.to_string()));
		}
		let channel = |i: usize| {
			u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError::Digits(s.to_string()))
		};
		Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
	}
}

impl Display for Color {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.to_hex())
	}
}

impl Serialize for Color {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_hex())
	}
}

impl From<Color> for tui::style::Color {
	fn from(c: Color) -> Self {
		tui::style::Color::Rgb(c.r, c.g, c.b)
	}
}

/// Colors used to draw voltages, and the scale derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct ColorScheme {
	pub positive: Color,
	pub negative: Color,
	pub neutral: Color,
	#[serde(skip)]
	scale: Vec<Color>,
}

impl Default for ColorScheme {
	fn default() -> Self {
		let mut s = Self {
			positive: Color::GREEN,
			negative: Color::RED,
			neutral: Color::GRAY,
			scale: Vec::new(),
		};
		s.rebuild_scale();
		s
	}
}

impl ColorScheme {
	/// Recompute the scale after changing any of the colors.
	///
	/// The first entry is fully negative, the last fully positive.
	pub fn rebuild_scale(&mut self) {
		self.scale = (0..SCALE_LEN)
			.map(|i| {
				let v = i as f64 * 2.0 / (SCALE_LEN - 1) as f64 - 1.0;
				if v < 0.0 {
					self.neutral.mix(self.negative, -v)
				} else {
					self.neutral.mix(self.positive, v)
				}
			})
			.collect();
		trace!("Rebuilt color scale {} .. {}", self.negative, self.positive);
	}

	pub fn scale(&self) -> &[Color] {
		&self.scale
	}

	/// Scale entry for `volts`, with `range` volts mapping to either end.
	pub fn voltage_color(&self, volts: f64, range: f64) -> Color {
		let last = SCALE_LEN - 1;
		let c = ((volts + range) * last as f64 / (range * 2.0)).clamp(0.0, last as f64);
		self.scale()[c as usize]
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn parses_hex() {
		assert_eq!("#00ff00".parse::<Color>(), Ok(Color::GREEN));
		assert_eq!("FF0000".parse::<Color>(), Ok(Color::RED));
		assert_eq!(" #808080 ".parse::<Color>(), Ok(Color::GRAY));
		assert_eq!(Color::rgb(1, 171, 255).to_hex(), "#01abff");
	}

	#[test]
	fn rejects_bad_hex() {
		assert!(matches!("#0f0".parse::<Color>(), Err(ColorError::Length(_))));
		assert!(matches!("#zz0000".parse::<Color>(), Err(ColorError::Digits(_))));
		assert!("".parse::<Color>().is_err());
	}

	#[test]
	fn scale_spans_colors() {
		let mut s = ColorScheme::default();
		s.positive = Color::rgb(0, 0, 255);
		s.rebuild_scale();
		assert_eq!(s.scale().len(), SCALE_LEN);
		assert_eq!(s.scale()[0], Color::RED);
		assert_eq!(s.scale()[SCALE_LEN - 1], Color::rgb(0, 0, 255));
		assert_eq!(s.voltage_color(100.0, 5.0), Color::rgb(0, 0, 255));
		assert_eq!(s.voltage_color(-100.0, 5.0), Color::RED);
	}
}

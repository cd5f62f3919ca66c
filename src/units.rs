//! SI-prefixed number entry, e.g. `5u` for 5e-6 or `2k2` for 2200.
use std::f64::consts::SQRT_2;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
	#[error("no number given")]
	Empty,
	#[error("not a number: {0:?}")]
	Invalid(String),
}

/// `2k2` -> `2.2k`
static SHORTHAND: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"([0-9]+)([pPnNuUmMkKgG])([0-9]+)").expect("valid regex"));

/// Upper magnitude limit, prefix and multiplier, smallest first
const PREFIXES: [(f64, &str, f64); 7] = [
	(1e-9, "p", 1e-12),
	(1e-6, "n", 1e-9),
	(1e-3, "u", 1e-6),
	(1.0, "m", 1e-3),
	(1e3, "", 1.0),
	(1e6, "k", 1e3),
	(1e9, "M", 1e6),
];

fn suffix_multiplier(c: char) -> Option<f64> {
	Some(match c {
		'p' | 'P' => 1e-12,
		'n' | 'N' => 1e-9,
		'u' | 'U' => 1e-6,
		'm' => 1e-3,
		'k' | 'K' => 1e3,
		'M' => 1e6,
		'g' | 'G' => 1e9,
		_ => return None,
	})
}

/// Up to three decimals, trailing zeros trimmed.
fn short(v: f64) -> String {
	let s = format!("{v:.3}");
	let s = s.trim_end_matches('0').trim_end_matches('.');
	if s == "-0" {
		"0".to_string()
	} else {
		s.to_string()
	}
}

pub fn format_units(v: f64) -> String {
	if v == 0.0 {
		return "0".to_string();
	}
	let va = v.abs();
	let (prefix, mult) = PREFIXES
		.iter()
		.find(|(limit, ..)| va < *limit)
		.map(|&(_, p, m)| (p, m))
		.unwrap_or(("G", 1e9));
	format!("{}{prefix}", short(v / mult))
}

pub fn parse_units(s: &str) -> Result<f64, UnitsError> {
	let mut s = s.trim();
	let mut rms = 1.0;
	if let Some(rest) = s.strip_suffix("rms") {
		s = rest.trim_end();
		rms = SQRT_2;
	}
	if s.is_empty() {
		return Err(UnitsError::Empty);
	}
	let s = SHORTHAND.replace(s, "$1.$3$2");

	// an exponent like 1e-5 ends in a digit, so it never reaches the prefix match
	let (number, mult) = match s.chars().last().and_then(suffix_multiplier) {
		Some(m) => (&s[..s.len() - 1], m),
		None => (&s[..], 1.0),
	};
	let number = number.trim();
	let v: f64 = number
		.parse()
		.map_err(|_| UnitsError::Invalid(s.to_string()))?;
	Ok(v * mult * rms)
}

#[cfg(test)]
mod test {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() <= b.abs() * 1e-12
	}

	#[test]
	fn formats_prefixes() {
		assert_eq!(format_units(5e-6), "5u");
		assert_eq!(format_units(1e-5), "10u");
		assert_eq!(format_units(50e-12), "50p");
		assert_eq!(format_units(5.0), "5");
		assert_eq!(format_units(2200.0), "2.2k");
		assert_eq!(format_units(-0.0015), "-1.5m");
		assert_eq!(format_units(3e9), "3G");
		assert_eq!(format_units(0.0), "0");
	}

	#[test]
	fn parses_prefixes() {
		assert!(close(parse_units("5u").unwrap(), 5e-6));
		assert!(close(parse_units(" 10 u ").unwrap(), 1e-5));
		assert!(close(parse_units("2k2").unwrap(), 2200.0));
		assert!(close(parse_units("1e-5").unwrap(), 1e-5));
		assert!(close(parse_units("3m").unwrap(), 3e-3));
		assert!(close(parse_units("3M").unwrap(), 3e6));
		assert!(close(parse_units("1G").unwrap(), 1e9));
		assert!(close(parse_units("10rms").unwrap(), 10.0 * SQRT_2));
	}

	#[test]
	fn formatted_values_parse_back() {
		for v in [5e-6, 50e-12, 5.0, 2200.0, 0.001] {
			assert!(close(parse_units(&format_units(v)).unwrap(), v));
		}
	}

	#[test]
	fn rejects_junk() {
		assert_eq!(parse_units("   "), Err(UnitsError::Empty));
		assert!(matches!(parse_units("abc"), Err(UnitsError::Invalid(_))));
		assert!(matches!(parse_units("k"), Err(UnitsError::Invalid(_))));
	}
}

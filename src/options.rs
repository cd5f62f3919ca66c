//! Simulator options, edited through the [`Editable`] protocol.
use enum_iterator::Sequence;
use serde::Serialize;

use crate::{
	color::{Color, ColorScheme},
	editable::{Checkbox, Choice, Control, EditInfo, Editable, Refresh},
	host::{Host, Storage},
	locale::Language,
};

pub const LANGUAGE_KEY: &str = "language";
pub const POSITIVE_COLOR_KEY: &str = "positiveColor";
pub const NEGATIVE_COLOR_KEY: &str = "negativeColor";

/// Label of the always-first language choice
pub const NO_CHANGE: &str = "(no change)";

/// Audio output's claim on the time step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AudioOutput {
	/// Whether audio output may change the time step without asking first
	pub ok_to_change_time_step: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimOptions {
	/// Seconds
	pub max_time_step: f64,
	/// Seconds, lower limit while auto-adjusting
	pub min_time_step: f64,
	pub adjust_time_step: bool,
	/// Volts mapped to either end of the color scale
	pub voltage_range: f64,
	pub colors: ColorScheme,
	pub audio: AudioOutput,
	/// Active interface language, as read at start-up
	pub language: Option<Language>,
}

impl Default for SimOptions {
	fn default() -> Self {
		Self {
			max_time_step: 5e-6,
			min_time_step: 50e-12,
			adjust_time_step: false,
			voltage_range: 5.0,
			colors: Default::default(),
			audio: Default::default(),
			language: None,
		}
	}
}

/// Properties in dialog order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Sequence)]
pub enum OptionField {
	TimeStep,
	VoltageRange,
	Language,
	PositiveColor,
	NegativeColor,
	AutoAdjust,
	/// Only while auto-adjusting
	MinTimeStep,
}

impl SimOptions {
	/// Defaults, overridden by whatever storage holds.
	pub fn load(storage: Option<&dyn Storage>) -> Self {
		let mut s = Self::default();
		let Some(stor) = storage else {
			info!("No storage, using default options");
			return s;
		};

		let read_color = |key: &str, default: Color| match stor.get(key) {
			None => default,
			Some(txt) => txt.parse::<Color>().unwrap_or_else(|e| {
				warn!("Ignoring stored {key}: {e}");
				default
			}),
		};
		s.colors.positive = read_color(POSITIVE_COLOR_KEY, s.colors.positive);
		s.colors.negative = read_color(NEGATIVE_COLOR_KEY, s.colors.negative);
		s.colors.rebuild_scale();

		s.language = stor.get(LANGUAGE_KEY).and_then(|tag| match tag.parse::<Language>() {
			Ok(l) => Some(l),
			Err(_) => {
				warn!("Unknown stored language {tag:?}");
				None
			}
		});
		if let Some(l) = s.language {
			info!("Language: {}", l.native_name());
		}
		s
	}

	/// Fields currently shown, in index order.
	pub fn visible_fields(&self) -> Vec<OptionField> {
		enum_iterator::all::<OptionField>()
			.filter(|f| *f != OptionField::MinTimeStep || self.adjust_time_step)
			.collect()
	}

	fn describe(&self, field: OptionField) -> EditInfo {
		use OptionField as F;
		match field {
			F::TimeStep => EditInfo::numeric("Time step size (s)", self.max_time_step),
			F::VoltageRange => EditInfo::numeric("Range for voltage color (V)", self.voltage_range),
			F::Language => EditInfo::choice(
				"Change Language",
				Choice::new(
					std::iter::once(NO_CHANGE)
						.chain(Language::all().map(|l| l.native_name())),
				),
			),
			F::PositiveColor => EditInfo::text("Positive Color", self.colors.positive.to_hex()),
			F::NegativeColor => EditInfo::text("Negative Color", self.colors.negative.to_hex()),
			F::AutoAdjust => EditInfo::checkbox(Checkbox::new(
				"Auto-Adjust Timestep",
				self.adjust_time_step,
			)),
			F::MinTimeStep => EditInfo::numeric("Minimum time step size (s)", self.min_time_step),
		}
	}

	/// Set `target` to a positive `value`, keeping the old value otherwise.
	fn set_positive(target: &mut f64, value: f64) -> bool {
		if value > 0.0 {
			*target = value;
			true
		} else {
			debug!("Ignoring non-positive value {value}");
			false
		}
	}

	fn set_language(&mut self, choice: &Choice, host: &mut dyn Host) {
		// first entry is "no change"
		let Some(lang) = choice
			.selected
			.checked_sub(1)
			.and_then(Language::nth)
		else {
			return;
		};
		let Some(stor) = host.storage() else {
			warn!("Can't store language {}", lang.tag());
			host.alert("Can't set language");
			return;
		};
		stor.set(LANGUAGE_KEY, lang.tag());
		info!("Language set to {}", lang.tag());
		if host.confirm("Must restart to set language.  Restart now?") {
			host.reload();
		}
	}

	/// Persist `txt` under `key` and parse it into `color`.
	fn set_color(key: &str, color: &mut Color, txt: &str, host: &mut dyn Host) {
		if let Some(stor) = host.storage() {
			stor.set(key, txt);
		}
		match txt.parse::<Color>() {
			Ok(c) => *color = c,
			Err(e) => debug!("Keeping {key} {color}: {e}"),
		}
	}
}

impl Editable for SimOptions {
	fn edit_info(&self, n: usize) -> Option<EditInfo> {
		self.visible_fields().get(n).map(|&f| self.describe(f))
	}

	fn set_edit_value(&mut self, n: usize, ei: &EditInfo, host: &mut dyn Host) -> Refresh {
		let Some(field) = self.visible_fields().get(n).copied() else {
			debug!("No option at index {n}");
			return Refresh::None;
		};

		use OptionField as F;
		match (field, &ei.control) {
			(F::TimeStep, &Control::Numeric { value, .. }) => {
				if Self::set_positive(&mut self.max_time_step, value) {
					// manual change, so audio output has to ask before changing it again
					self.audio.ok_to_change_time_step = false;
				}
			}
			(F::VoltageRange, &Control::Numeric { value, .. }) => {
				Self::set_positive(&mut self.voltage_range, value);
			}
			(F::MinTimeStep, &Control::Numeric { value, .. }) => {
				Self::set_positive(&mut self.min_time_step, value);
			}
			(F::Language, Control::Choice(choice)) => self.set_language(choice, host),
			(F::PositiveColor, Control::Text(txt)) => {
				Self::set_color(POSITIVE_COLOR_KEY, &mut self.colors.positive, txt, host);
				self.colors.rebuild_scale();
			}
			(F::NegativeColor, Control::Text(txt)) => {
				Self::set_color(NEGATIVE_COLOR_KEY, &mut self.colors.negative, txt, host);
				self.colors.rebuild_scale();
			}
			(F::AutoAdjust, Control::Checkbox(cb)) => {
				self.adjust_time_step = cb.checked;
				return Refresh::Dialog;
			}
			(field, control) => debug!("Mismatched edit for {field:?}: {control:?}"),
		}
		Refresh::None
	}
}

use enum_iterator::Sequence;
use serde::{Serialize, Serializer};
use strum::{EnumMessage, EnumString, IntoStaticStr};

/// Languages the interface can be restarted into, in menu order.
#[derive(
	Debug, Copy, Clone, PartialEq, Eq, Hash, Sequence, EnumString, IntoStaticStr, EnumMessage,
)]
pub enum Language {
	#[strum(serialize = "da", message = "Dansk")]
	Danish,
	#[strum(serialize = "de", message = "Deutsch")]
	German,
	#[strum(serialize = "en", message = "English")]
	English,
	#[strum(serialize = "es", message = "Español")]
	Spanish,
	#[strum(serialize = "fr", message = "Français")]
	French,
	#[strum(serialize = "it", message = "Italiano")]
	Italian,
	#[strum(serialize = "nb", message = "Norsk bokmål")]
	Norwegian,
	#[strum(serialize = "pl", message = "Polski")]
	Polish,
	#[strum(serialize = "pt", message = "Português")]
	Portuguese,
	#[strum(serialize = "ru", message = "Русский")]
	Russian,
}

impl Language {
	/// Two-letter tag, as persisted
	pub fn tag(&self) -> &'static str {
		self.into()
	}

	/// Name of the language in itself
	pub fn native_name(&self) -> &'static str {
		self.get_message().unwrap_or_else(|| self.tag())
	}

	pub fn all() -> impl Iterator<Item = Self> {
		enum_iterator::all::<Self>()
	}

	/// Language at a position of [`Language::all`].
	pub fn nth(n: usize) -> Option<Self> {
		Self::all().nth(n)
	}
}

impl Serialize for Language {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.tag())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn tags_round_trip() {
		for l in Language::all() {
			assert_eq!(l.tag().parse::<Language>(), Ok(l));
		}
		assert!("xx".parse::<Language>().is_err());
	}

	#[test]
	fn menu_order() {
		let tags: Vec<_> = Language::all().map(|l| l.tag()).collect();
		assert_eq!(
			tags,
			["da", "de", "en", "es", "fr", "it", "nb", "pl", "pt", "ru"]
		);
		assert_eq!(Language::nth(6).map(|l| l.native_name()), Some("Norsk bokmål"));
		assert_eq!(Language::nth(10), None);
	}
}

//! Capabilities an [`Editable`](crate::editable::Editable) may call back into while committing.

/// Durable string key/value storage.
///
/// Writes are best-effort: failures are logged by the implementation and never reported.
pub trait Storage {
	fn get(&self, key: &str) -> Option<String>;
	fn set(&mut self, key: &str, value: &str);
}

/// The environment hosting the dialog.
pub trait Host {
	/// Storage, if available right now. Checked before every read or write.
	fn storage(&mut self) -> Option<&mut dyn Storage>;

	/// Show a blocking notice.
	fn alert(&mut self, msg: &str);

	/// Ask a blocking yes/no question.
	fn confirm(&mut self, msg: &str) -> bool;

	/// Restart the application, discarding all in-memory state.
	fn reload(&mut self);
}

#[cfg(test)]
pub mod mock {
	use super::*;
	use crate::store::MemoryStore;

	/// Records every host call.
	#[derive(Debug, Default)]
	pub struct MockHost {
		pub store: Option<MemoryStore>,
		pub alerts: Vec<String>,
		pub confirms: Vec<String>,
		pub reloads: usize,
		/// Answer given to every confirm
		pub answer: bool,
	}

	impl MockHost {
		pub fn with_store() -> Self {
			Self {
				store: Some(MemoryStore::default()),
				..Default::default()
			}
		}

		pub fn without_store() -> Self {
			Self::default()
		}

		pub fn answering(mut self, answer: bool) -> Self {
			self.answer = answer;
			self
		}

		pub fn writes(&self) -> usize {
			self.store.as_ref().map(|s| s.writes).unwrap_or_default()
		}

		pub fn stored(&self, key: &str) -> Option<String> {
			self.store.as_ref().and_then(|s| s.get(key))
		}
	}

	impl Host for MockHost {
		fn storage(&mut self) -> Option<&mut dyn Storage> {
			self.store.as_mut().map(|s| s as &mut dyn Storage)
		}

		fn alert(&mut self, msg: &str) {
			self.alerts.push(msg.to_string());
		}

		fn confirm(&mut self, msg: &str) -> bool {
			self.confirms.push(msg.to_string());
			self.answer
		}

		fn reload(&mut self) {
			self.reloads += 1;
		}
	}
}

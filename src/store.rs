#[cfg(test)]
use std::collections::HashMap;
use std::{
	collections::BTreeMap,
	fs, io,
	path::{Path, PathBuf},
};

use thiserror::Error;

use crate::host::Storage;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("error accessing {path:?}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("malformed store {path:?}: {source}")]
	Json {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

/// String entries kept in a JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct JsonStore {
	path: PathBuf,
	entries: BTreeMap<String, String>,
}

impl JsonStore {
	/// Load the store at `path`. A missing file is an empty store.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
		let path = path.as_ref().to_path_buf();
		let entries: BTreeMap<String, String> = match fs::read_to_string(&path) {
			Ok(s) if s.trim().is_empty() => Default::default(),
			Ok(s) => serde_json::from_str(&s).map_err(|source| StoreError::Json {
				path: path.clone(),
				source,
			})?,
			Err(e) if e.kind() == io::ErrorKind::NotFound => Default::default(),
			Err(source) => return Err(StoreError::Io { path, source }),
		};
		debug!("Opened store {path:?} with {} entries", entries.len());
		Ok(Self { path, entries })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn write(&self) -> Result<(), StoreError> {
		let s = serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Json {
			path: self.path.clone(),
			source,
		})?;
		fs::write(&self.path, s).map_err(|source| StoreError::Io {
			path: self.path.clone(),
			source,
		})
	}
}

impl Storage for JsonStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) {
		self.entries.insert(key.to_string(), value.to_string());
		match self.write() {
			Ok(()) => debug!("Stored {key:?} = {value:?}"),
			Err(e) => warn!("Could not persist {key:?}: {e}"),
		}
	}
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
	entries: HashMap<String, String>,
	/// Number of `set` calls
	pub writes: usize,
}

#[cfg(test)]
impl Storage for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) {
		self.writes += 1;
		self.entries.insert(key.to_string(), value.to_string());
	}
}

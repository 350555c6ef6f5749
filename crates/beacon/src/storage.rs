// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-scoped key/value storage.
//!
//! [`SessionStorage`] stands in for the browser's per-tab storage: values
//! survive navigation within one browsing session and vanish with it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::StorageError;

/// Key/value storage scoped to a single browsing session.
pub trait SessionStorage: Send + Sync {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Type alias for shared session storage.
pub type SharedSessionStorage = Arc<dyn SessionStorage>;

/// In-memory storage, cleared when dropped.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
	entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}

	/// Drops every entry, as when the browsing session ends.
	pub fn clear(&self) {
		self.entries.lock().clear();
	}
}

impl SessionStorage for MemorySessionStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.entries.lock().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.entries.lock().insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.entries.lock().remove(key);
		Ok(())
	}
}

/// Storage that rejects every operation.
///
/// Models a page where storage is disabled; useful as an explicit choice for
/// server-side rendering where no per-visitor storage exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSessionStorage;

impl SessionStorage for UnavailableSessionStorage {
	fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
		Err(StorageError::Unavailable("storage disabled".to_string()))
	}

	fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
		Err(StorageError::Unavailable("storage disabled".to_string()))
	}

	fn remove(&self, _key: &str) -> Result<(), StorageError> {
		Err(StorageError::Unavailable("storage disabled".to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_storage_roundtrip() {
		let storage = MemorySessionStorage::new();
		assert_eq!(storage.get("k").unwrap(), None);

		storage.set("k", "v1").unwrap();
		storage.set("k", "v2").unwrap();
		assert_eq!(storage.get("k").unwrap().as_deref(), Some("v2"));
		assert_eq!(storage.len(), 1);

		storage.remove("k").unwrap();
		assert!(storage.is_empty());
	}

	#[test]
	fn clear_ends_the_session() {
		let storage = MemorySessionStorage::new();
		storage.set("a", "1").unwrap();
		storage.set("b", "2").unwrap();
		storage.clear();
		assert!(storage.is_empty());
	}

	#[test]
	fn unavailable_storage_always_fails() {
		let storage = UnavailableSessionStorage;
		assert!(storage.get("k").is_err());
		assert!(storage.set("k", "v").is_err());
		assert!(storage.remove("k").is_err());
	}
}

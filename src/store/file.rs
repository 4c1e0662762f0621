//! File-backed [`CredentialStore`] that keeps tokens across process restarts.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialKey, TokenSecret},
	obs,
	store::{CredentialStore, StoreError},
};

type Snapshot = BTreeMap<CredentialKey, TokenSecret>;

/// Persists credentials to a JSON file after each mutation.
///
/// Reads are served from memory. Write failures are reported through [`obs`] and leave the
/// in-memory value in place, so the current process keeps working with the latest token.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<Snapshot>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
		if !path.exists() {
			return Ok(Snapshot::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(Snapshot::new());
		}

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn persist_locked(&self, contents: &Snapshot) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize credential snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn mutate(&self, operation: &'static str, apply: impl FnOnce(&mut Snapshot) -> bool) {
		let mut guard = self.inner.write();

		if !apply(&mut *guard) {
			return;
		}
		if let Err(e) = self.persist_locked(&guard) {
			obs::record_store_failure(operation, &e);
		}
	}
}
impl CredentialStore for FileStore {
	fn get(&self, key: CredentialKey) -> Option<TokenSecret> {
		self.inner.read().get(&key).cloned()
	}

	fn set(&self, key: CredentialKey, value: TokenSecret) {
		self.mutate("set", |snapshot| {
			snapshot.insert(key, value);

			true
		});
	}

	fn remove(&self, key: CredentialKey) {
		self.mutate("remove", |snapshot| snapshot.remove(&key).is_some());
	}

	fn clear(&self) {
		self.mutate("clear", |snapshot| {
			let changed = !snapshot.is_empty();

			snapshot.clear();

			changed
		});
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// self
	use super::*;
	use crate::auth::CredentialPair;

	fn temp_path(tag: &str) -> PathBuf {
		let unique = format!(
			"stockdash_file_store_{tag}_{}_{}.json",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	#[test]
	fn credentials_survive_reopen() {
		let path = temp_path("reopen");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store.set_credentials(CredentialPair::new("access-file", "refresh-file"));
		drop(store);

		let reopened = FileStore::open(&path).expect("Failed to reopen file store.");

		assert_eq!(
			reopened.access_token().map(|s| s.expose().to_owned()),
			Some("access-file".to_owned())
		);
		assert_eq!(
			reopened.refresh_token().map(|s| s.expose().to_owned()),
			Some("refresh-file".to_owned())
		);

		let raw = fs::read_to_string(&path).expect("Snapshot file should be readable.");

		assert!(raw.contains("\"auth_token\""));
		assert!(raw.contains("\"refresh_token\""));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn clear_is_persisted_and_idempotent() {
		let path = temp_path("clear");
		let store = FileStore::open(&path).expect("Failed to open file store.");

		store.set_credentials(CredentialPair::new("a", "r"));
		store.clear();
		store.clear();

		let reopened = FileStore::open(&path).expect("Failed to reopen file store.");

		assert!(reopened.access_token().is_none());
		assert!(reopened.refresh_token().is_none());

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary file store snapshot {}: {e}", path.display())
		});
	}

	#[test]
	fn corrupt_snapshot_is_reported_on_open() {
		let path = temp_path("corrupt");

		fs::write(&path, b"{not json").expect("Failed to write corrupt fixture.");

		let err = FileStore::open(&path).expect_err("Corrupt snapshots should fail to open.");

		assert!(matches!(err, StoreError::Serialization { .. }));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove corrupt fixture {}: {e}", path.display())
		});
	}
}

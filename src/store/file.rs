//! Flat-file [`WhitelistStore`] keeping one `address,name` line per record.

// std
use std::{
	fs::{self, OpenOptions},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::WalletAddress,
	store::{self, StoreError, StoreFuture, WhitelistRecord, WhitelistStore},
};

/// Appends records to a CSV file and scans it on every lookup.
///
/// The file is re-read per call, so edits made by an operator show up immediately. A missing
/// file is an empty whitelist. Appends from this process are serialized so two concurrent
/// submissions never interleave partial lines; other processes writing the same file are
/// not coordinated with.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	append_guard: Arc<AsyncMutex<()>>,
}
impl FileStore {
	/// Opens a store at `path`, creating parent directories. The file itself is created by
	/// the first append.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		Ok(Self { path, append_guard: Arc::new(AsyncMutex::new(())) })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn read_bytes(&self) -> Result<Option<Vec<u8>>, StoreError> {
		match fs::read(&self.path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to read {}: {e}", self.path.display()),
			}),
		}
	}

	// Invalid UTF-8 is replaced rather than rejected so one bad row cannot hide the others.
	fn read_contents(&self) -> Result<Option<String>, StoreError> {
		Ok(self.read_bytes()?.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
	}
}
impl WhitelistStore for FileStore {
	fn find<'a>(&'a self, address: &'a WalletAddress) -> StoreFuture<'a, Option<WhitelistRecord>> {
		Box::pin(async move {
			let contents = self.read_contents()?;

			Ok(contents.and_then(|contents| store::scan_for(&contents, address)))
		})
	}

	fn append(&self, record: WhitelistRecord) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let _guard = self.append_guard.lock().await;
			let mut file =
				OpenOptions::new().create(true).append(true).open(&self.path).map_err(|e| {
					StoreError::Backend {
						message: format!("Failed to open {}: {e}", self.path.display()),
					}
				})?;

			file.write_all(record.to_line().as_bytes()).map_err(|e| StoreError::Backend {
				message: format!("Failed to append to {}: {e}", self.path.display()),
			})
		})
	}

	fn export_csv(&self) -> StoreFuture<'_, Option<Vec<u8>>> {
		Box::pin(async move { Ok(self.read_bytes()?.filter(|bytes| !bytes.is_empty())) })
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, process};
	// crates.io
	use tokio::runtime::Runtime;
	// self
	use super::*;
	use crate::auth::ScreenName;

	fn temp_path(label: &str) -> PathBuf {
		let unique = format!(
			"whitelist_broker_file_store_{label}_{}_{}.csv",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		);

		env::temp_dir().join(unique)
	}

	fn record(address: &str, name: &str) -> WhitelistRecord {
		WhitelistRecord::new(
			WalletAddress::new(address).expect("Wallet fixture should be valid."),
			ScreenName::new(name).expect("Handle fixture should be valid."),
		)
	}

	#[test]
	fn append_then_find_round_trips_name() {
		let path = temp_path("round_trip");
		let store = FileStore::open(&path).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let lookup = WalletAddress::new("0xabcdef").expect("Wallet fixture should be valid.");

		assert_eq!(rt.block_on(store.find(&lookup)).expect("Lookup should succeed."), None);
		assert_eq!(rt.block_on(store.export_csv()).expect("Export should succeed."), None);

		rt.block_on(store.append(record("0xAbCdEf", "Alice_01")))
			.expect("Failed to append fixture record.");

		let found = rt
			.block_on(store.find(&lookup))
			.expect("Lookup should succeed.")
			.expect("Appended record should be found regardless of case.");

		assert_eq!(found.name, "Alice_01");
		assert_eq!(
			fs::read_to_string(&path).expect("Store file should exist after append."),
			"0xAbCdEf,Alice_01\n"
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store file {}: {e}", path.display())
		});
	}

	#[test]
	fn existing_files_with_crlf_and_junk_are_scanned() {
		let path = temp_path("crlf");

		fs::write(&path, "0x01,first\r\n\r\nnot-a-record\r\n0x02,second\r\n")
			.expect("Failed to seed store file.");

		let store = FileStore::open(&path).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let lookup = WalletAddress::new("0x02").expect("Wallet fixture should be valid.");
		let found = rt
			.block_on(store.find(&lookup))
			.expect("Lookup should succeed.")
			.expect("Seeded record should be found.");

		assert_eq!(found.name, "second");

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store file {}: {e}", path.display())
		});
	}

	#[test]
	fn invalid_utf8_rows_do_not_hide_valid_ones() {
		let path = temp_path("lossy");

		fs::write(&path, b"0x01,alice\n0x02,caf\xE9\n0x03,carol\n")
			.expect("Failed to seed store file.");

		let store = FileStore::open(&path).expect("Failed to open file store.");
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");
		let first = WalletAddress::new("0x01").expect("Wallet fixture should be valid.");
		let last = WalletAddress::new("0x03").expect("Wallet fixture should be valid.");
		let damaged = WalletAddress::new("0x02").expect("Wallet fixture should be valid.");

		assert_eq!(
			rt.block_on(store.find(&first)).expect("Lookup should succeed.").map(|r| r.name),
			Some("alice".into())
		);
		assert_eq!(
			rt.block_on(store.find(&last)).expect("Lookup should succeed.").map(|r| r.name),
			Some("carol".into())
		);
		assert_eq!(
			rt.block_on(store.find(&damaged)).expect("Lookup should succeed.").map(|r| r.name),
			Some("caf\u{FFFD}".into())
		);

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store file {}: {e}", path.display())
		});
	}

	#[test]
	fn concurrent_appends_keep_whole_lines() {
		let path = temp_path("concurrent");
		let store = Arc::new(FileStore::open(&path).expect("Failed to open file store."));
		let rt = Runtime::new().expect("Failed to build Tokio runtime for file store test.");

		rt.block_on(async {
			let tasks = (0..16)
				.map(|i| {
					let store = store.clone();

					tokio::spawn(async move {
						store
							.append(record(&format!("0x{i:040x}"), &format!("user{i}")))
							.await
							.expect("Concurrent append should succeed.");
					})
				})
				.collect::<Vec<_>>();

			for task in tasks {
				task.await.expect("Append task should not panic.");
			}
		});

		let contents = fs::read_to_string(&path).expect("Store file should exist.");

		assert_eq!(contents.lines().count(), 16);
		assert!(contents.lines().all(|line| WhitelistRecord::parse_line(line).is_some()));

		fs::remove_file(&path).unwrap_or_else(|e| {
			panic!("Failed to remove temporary store file {}: {e}", path.display())
		});
	}
}

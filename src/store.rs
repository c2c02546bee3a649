//! Storage contract and built-in implementations for the campaign whitelist.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{FIELD_DELIMITER, ScreenName, WalletAddress},
};

/// Boxed future returned by [`WhitelistStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract implemented by whitelist stores.
///
/// Records are append-only and uniqueness is not enforced: the same address may be appended
/// more than once, and lookups return the first record whose address matches ignoring case.
pub trait WhitelistStore
where
	Self: Send + Sync,
{
	/// Returns the first record whose address matches `address` ignoring letter case.
	fn find<'a>(&'a self, address: &'a WalletAddress) -> StoreFuture<'a, Option<WhitelistRecord>>;

	/// Appends `record` unconditionally.
	fn append(&self, record: WhitelistRecord) -> StoreFuture<'_, ()>;

	/// Whole whitelist as `address,name` CSV lines, or `None` when nothing has been stored.
	fn export_csv(&self) -> StoreFuture<'_, Option<Vec<u8>>>;
}

/// Error type produced by [`WhitelistStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Records could not be encoded or decoded.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// One whitelisted wallet and the handle that verified it.
///
/// Fields hold the row exactly as stored. Rows written through [`WhitelistRecord::new`] are
/// validated; rows already present in a flat file are taken as they are.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WhitelistRecord {
	/// Wallet address as submitted (original casing preserved).
	pub address: String,
	/// Social handle that passed the follow check.
	pub name: String,
}
impl WhitelistRecord {
	/// Pairs a validated address with a validated handle.
	pub fn new(address: WalletAddress, name: ScreenName) -> Self {
		Self { address: address.into(), name: name.into() }
	}

	/// Flat-file line, newline included.
	pub fn to_line(&self) -> String {
		format!("{}{FIELD_DELIMITER}{}\n", self.address, self.name)
	}

	/// Parses one flat-file line.
	///
	/// A trailing `\r` is tolerated. Lines that are blank or do not split into exactly two
	/// fields yield `None`; field contents are not validated.
	pub fn parse_line(line: &str) -> Option<Self> {
		let line = line.trim_end_matches('\r');

		if line.is_empty() {
			return None;
		}

		let mut fields = line.split(FIELD_DELIMITER);

		match (fields.next(), fields.next(), fields.next()) {
			(Some(address), Some(name), None) =>
				Some(Self { address: address.to_owned(), name: name.to_owned() }),
			_ => None,
		}
	}

	/// Whether this row belongs to `address`, ignoring letter case.
	pub fn is_for(&self, address: &WalletAddress) -> bool {
		address.matches(&self.address)
	}
}

/// Scans flat-file `contents` for the first record matching `address`.
pub fn scan_for(contents: &str, address: &WalletAddress) -> Option<WhitelistRecord> {
	contents
		.split('\n')
		.filter_map(WhitelistRecord::parse_line)
		.find(|record| record.is_for(address))
}

/// Renders `records` in the flat-file format.
pub fn render_csv<'a>(records: impl IntoIterator<Item = &'a WhitelistRecord>) -> Vec<u8> {
	records.into_iter().map(WhitelistRecord::to_line).collect::<String>().into_bytes()
}

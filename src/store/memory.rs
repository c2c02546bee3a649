//! Thread-safe in-memory [`WhitelistStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::WalletAddress,
	store::{self, StoreFuture, WhitelistRecord, WhitelistStore},
};

type RecordList = Arc<RwLock<Vec<WhitelistRecord>>>;

/// Storage backend that keeps records in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(RecordList);
impl MemoryStore {
	/// Snapshot of every record in append order.
	pub fn records(&self) -> Vec<WhitelistRecord> {
		self.0.read().clone()
	}

	fn find_now(list: RecordList, address: &WalletAddress) -> Option<WhitelistRecord> {
		list.read().iter().find(|record| record.is_for(address)).cloned()
	}
}
impl WhitelistStore for MemoryStore {
	fn find<'a>(&'a self, address: &'a WalletAddress) -> StoreFuture<'a, Option<WhitelistRecord>> {
		let list = self.0.clone();

		Box::pin(async move { Ok(Self::find_now(list, address)) })
	}

	fn append(&self, record: WhitelistRecord) -> StoreFuture<'_, ()> {
		let list = self.0.clone();

		Box::pin(async move {
			list.write().push(record);

			Ok(())
		})
	}

	fn export_csv(&self) -> StoreFuture<'_, Option<Vec<u8>>> {
		let guard = self.0.read();
		let rendered = if guard.is_empty() { None } else { Some(store::render_csv(guard.iter())) };

		drop(guard);

		Box::pin(async move { Ok(rendered) })
	}
}

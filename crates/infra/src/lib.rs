//! Infrastructure layer: inventory storage, configuration services, and
//! host-form glue.

pub mod copier;
pub mod form_defaults;
pub mod resolver;
pub mod store;
pub mod sync;

pub use copier::{CopyError, SourceItemCopier};
pub use resolver::{ResolveError, SettingResolver};
pub use store::{InMemoryInventoryStore, InventoryStore, JournalEntry, StoreError, WriteOp};
pub use sync::{ConfigurationSync, SyncError};

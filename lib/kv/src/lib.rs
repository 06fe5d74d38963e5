pub mod error;
pub mod memory;
pub mod overlay;
pub mod push_id;
pub mod redb;
pub mod traits;

pub use error::KvError;
pub use memory::MemStore;
pub use overlay::OverlayKv;
pub use push_id::PushIdGen;
pub use redb::RedbStore;
pub use traits::KvStore;

//! Change-notification layer over a [`barhop_kv::KvStore`].
//!
//! `LiveStore` is the write path and the subscription fan-out in one
//! place: every successful `set`, `push`, or effective `delete`
//! synchronously notifies the subscriptions whose prefix matches the
//! written path. Handlers re-read through the store — after a local
//! write returns, any snapshot recomputed from the store already
//! reflects it (read-your-own-write).

pub mod event;
pub mod store;

pub use event::{Change, ChangeEvent, SubscriptionId};
pub use store::LiveStore;

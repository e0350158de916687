//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! Two adapters live here: `localStorage` preferences and `setInterval` timers. On non-wasm
//! targets both degrade to inert behavior so the workspace still builds and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Host-strategy selection and the service bundle factory used by the site entry point.
pub mod adapters;
pub mod storage;
pub mod timer;

pub use adapters::{build_host_services, prefs_store, selected_host_strategy, timer_service};
pub use storage::local_prefs::WebPrefsStore;
pub use timer::WebTimerService;

//! Typed host-domain contracts shared by the desktop runtime, its apps, and browser adapters.
//!
//! The runtime and app crates only ever talk to the host through the traits re-exported here.
//! Concrete `localStorage`/`setInterval` adapters live in `platform_host_web`; the in-memory and
//! manual implementations in this crate back unit tests and non-browser builds.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod fs;
pub mod host;
pub mod storage;
pub mod time;
pub mod timer;

pub use fs::path::{join_virtual_path, normalize_virtual_path, parent_virtual_path};
pub use host::{HostServices, HostStrategy};
pub use storage::prefs::{
    load_pref_lenient, load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore,
    PrefLoad, PrefsStore, PrefsStoreFuture,
};
pub use time::{unix_time_ms_now, LocalClockTime};
pub use timer::{ManualTimerService, NoopTimerService, TimerError, TimerHandle, TimerService};

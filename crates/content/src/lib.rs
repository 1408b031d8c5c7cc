//! PixelPunk Content - the editable-content facade.
//!
//! Single source of truth for the admin-editable site content, reconciling
//! three possible backends with graceful degradation:
//!
//! 1. the built-in default dataset (always available),
//! 2. a local persisted JSON cache (fast path, works offline),
//! 3. a hosted document store reached over HTTP (authoritative when up).
//!
//! The [`ContentService`] holds the in-memory snapshot, applies every
//! mutation optimistically, and persists best-effort: a failed remote write
//! is logged and the optimistic value is kept. Reads never block on the
//! network.
//!
//! The remote backend sits behind the narrow [`ContentRepository`] trait so
//! it can be swapped for the in-memory [`MemoryRepository`] in tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod error;
pub mod memory;
pub mod remote;
pub mod repository;
pub mod service;

pub use cache::LocalCache;
pub use error::ContentError;
pub use memory::MemoryRepository;
pub use remote::{RemoteStore, RemoteStoreConfig};
pub use repository::{ContentRepository, SettingsDoc, SettingsPatch};
pub use service::ContentService;

//! # Hearth
//!
//! A small-business website server with an embedded CMS and appointment
//! booking workflow, usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! hearth = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use hearth::server::{AppState, create_router};
//! use hearth::store::{SqliteStore, Store, seed};
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/hearth.db")).unwrap();
//! store.initialize().unwrap();
//! seed::run(&store).unwrap();
//!
//! let state = Arc::new(AppState { store: Arc::new(store) });
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI and the blocking API client used by
//!   the admin panel. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod client;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;

// Library target exists solely for the integration tests in tests/.
// The binary entry point is main.rs; this file re-declares the module tree so
// that test code can import types via `stavr::session::*` / `stavr::store::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod dataset;
pub mod session;
pub mod store;

// Private: not part of the test API, declared so the whole tree stays checked
mod app;
mod audio;
mod config;
mod event;
mod ui;

rust_i18n::i18n!("locales", fallback = "en");

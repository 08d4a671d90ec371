//! Report renderers for the imported component inventory.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//!
//! JSON output is rendered directly in `main` via `serde_json`.

pub mod terminal;

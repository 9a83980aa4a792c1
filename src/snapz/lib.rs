//! # Snapz Architecture
//!
//! Snapz is a **UI-agnostic screenshot-tagging library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Layered Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs, bin only)                    │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (input-id shorthands → full ids)       │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions (backup being the one exception)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog (catalog.rs) + Storage (store/)                    │
//! │  - Documents plus both derived indexes, search evaluation,  │
//! │    modification application                                 │
//! │  - Abstract MetaStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two languages (search queries and modification lines) live in
//! [`lang`] as hand-written recursive-descent parsers over a shared
//! scanner. Parsing is pure; evaluation and application happen in the
//! catalog.
//!
//! ## The Index Contract
//!
//! The primary (tag name → ids) and secondary ("name:value" → ids)
//! indexes are recomputed wholesale at initialization and by the
//! explicit rebuild command. Document mutations do not update them in
//! between, so index-backed reads serve the state as of the last
//! rebuild. See [`catalog`] for the details and for the evaluation
//! rules layered on top of that.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, catalog, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`catalog`]: Documents, both indexes, search evaluation, modification
//! - [`lang`]: The search and modification languages
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Document`, `IndexEntry`, `Metadata`)
//! - [`pictures`]: Screenshot discovery and file-name normalization
//! - [`timestamp`]: Timestamps, ids, and input-id shorthands
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod lang;
pub mod model;
pub mod pictures;
pub mod store;
pub mod timestamp;

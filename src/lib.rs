//! # Market Map
//!
//! A read-only catalog API exposing a taxonomy of crypto market sectors,
//! the companies inside them, and per-company research notes.
//!
//! Requests are resolved against a remote relational datastore (Supabase
//! PostgREST) when `SUPABASE_URL` / `SUPABASE_KEY` are set, and against a
//! built-in static dataset otherwise. A remote failure on any request
//! falls back to the static dataset for that request; a remote query that
//! succeeds but matches nothing stays a 404.
//!
//! ```text
//!            ┌──────────────┐
//!  request ──▶ CatalogService│──▶ remote (PostgREST) ── Err ─┐
//!            └──────┬───────┘                               │
//!                   └────────────▶ static fallback ◀────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML server/CORS configuration, datastore env detection |
//! | [`models`] | Response data models |
//! | [`fallback`] | Static in-process dataset |
//! | [`remote`] | PostgREST datastore client |
//! | [`service`] | Try-remote / fall-back-local resolution |
//! | [`server`] | Axum HTTP surface |

pub mod config;
pub mod fallback;
pub mod models;
pub mod remote;
pub mod server;
pub mod service;

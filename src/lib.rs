//! Persistence core of the AuthenTcare regulatory management suite.
//!
//! Owns the SQLite schema and its forward-only migration ledger, the project → device →
//! version → license hierarchy, hierarchical version numbering (`v<N>`, `R-v<B>-<S>`) and
//! guarded bulk deletion of versions. Callers obtain an [`AppContext`](context::AppContext)
//! from [`startup::initialize`] and reach every operation through it.

pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod model;
pub mod seed;
pub mod service;
pub mod startup;
pub mod util;

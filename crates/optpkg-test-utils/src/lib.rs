//! Shared test utilities for the optpkg workspace.
//!
//! This crate builds throw-away jar archives so that archive access,
//! resolution and CLI tests can run against real files. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`jar`]: [`TestJar`] builder and the [`JarDir`] fixture directory

pub mod jar;

pub use jar::{JarDir, TestJar};

//! PixelPunk Core - Shared domain types.
//!
//! This crate provides the common types used across all PixelPunk components:
//! - `content` - Content access facade (two-tier document store)
//! - `storefront` - Public-facing archive site with admin editor
//! - `cli` - Command-line tools for seeding and inspecting the content store
//!
//! # Architecture
//!
//! The core crate contains only types and the built-in default dataset - no
//! I/O, no HTTP clients, no storage access. This keeps it lightweight and
//! allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Domain types for products, archive entries, and site content
//! - [`defaults`] - The built-in default dataset the site ships with

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod defaults;
pub mod types;

pub use types::*;

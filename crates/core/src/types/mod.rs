//! Core types for PixelPunk Archive.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod archive;
pub mod content;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use archive::ArchiveItem;
pub use content::{HeroContent, SiteContent};
pub use id::*;
pub use price::{DisplayPrice, PriceError};
pub use product::Product;
pub use status::ItemStatus;

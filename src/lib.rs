//! stringkit - multibyte-safe string utilities
//!
//! This library provides:
//! - A text facade that measures strings in code points or bytes
//! - Safe and hard truncation by characters and by words
//! - Glob-style `*` pattern matching
//! - URL-safe slug generation
//! - Unique, random and UUID token generation
//! - Small escaping and formatting helpers

pub mod config;
pub mod error;
pub mod logging;
pub mod mbstring;
pub mod pattern;
pub mod slug;
pub mod token;
pub mod truncate;
pub mod utils;

// Re-export main types for convenience
pub use crate::config::AppConfig;
pub use crate::error::{StringKitError, StringKitResult};
pub use crate::mbstring::{Multibyte, TextMode};
pub use crate::pattern::{like, like_with, WildcardPattern};
pub use crate::slug::{slug, slug_with, SlugOptions};
pub use crate::truncate::{limit_chars, limit_words, truncate_safe, Truncator};
pub use crate::utils::StringUtils;

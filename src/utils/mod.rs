/// Utility functions and helpers
pub mod string_utils;

pub use string_utils::StringUtils;

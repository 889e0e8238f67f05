//! Output formatters for Markdown, JSON and HTML.

pub mod html;
mod json;
mod markdown;

pub use self::json::*;
pub use markdown::*;

//! # Content Kinds
//!
//! Content constructs that own their syntax delimiters.
//!
//! - **`Tag`**: `@MAPKEY_NAME`, `@MAPKEY_LABEL`, `@SYSTEM` metadata tags
//! - **`NestedCall`**: `%name;` references to other records
//!
//! The tokenizer reads these constants; it never hardcodes `@` or `%`.

pub mod nested_call;
pub mod tag;

pub use nested_call::NestedCall;
pub use tag::Tag;

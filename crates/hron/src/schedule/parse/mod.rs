//! Expression parsing.
//!
//! ## Usage
//!
//! ```rust
//! use hron::schedule::parse::parse;
//!
//! let schedule = parse("every weekday at 09:00 in Europe/London").unwrap();
//! assert_eq!(schedule.timezone.as_deref(), Some("Europe/London"));
//! ```
//!
//! ## Features
//!
//! - Case-insensitive keywords with short and plural aliases
//! - Byte-offset spans on every error
//! - Keyword suggestions for near-miss spellings

mod lexer;
mod parser;
mod token;

pub use lexer::tokenize;
pub use parser::parse;
pub use token::{KEYWORDS, Token, TokenKind, ordinal_suffix};

//! Token alias store for the rcurl application.
//!
//! Tokens live in a plain UTF-8 text file, one `alias:token` pair per line,
//! interleaved with comments and blank lines:
//!
//! ```text
//! # alias:token
//! # example
//! # localhost:eyJhbGciOi...
//!
//! work:abc123
//! personal:def456
//! ```
//!
//! # Overview
//!
//! - [`line`]: a single tagged line (comment, blank, or alias/token pair)
//! - [`store`]: the ordered line sequence, its edits, and file I/O
//! - [`error`]: error types for token operations
//!
//! Edits are comment-preserving: every line that is not touched by an edit is
//! written back byte for byte, in its original position.
//!
//! # The `default` sentinel
//!
//! The alias [`DEFAULT_ALIAS`] never names a stored token directly. Lookups
//! and removals resolve it to the configured default alias first, before the
//! store is searched.
//!
//! # Examples
//!
//! ```
//! use rcurl_tokens::TokenFile;
//!
//! let mut file: TokenFile = "# my tokens\nwork:abc123\n".parse().unwrap();
//! file.set("personal", "def456").unwrap();
//!
//! assert_eq!(file.resolve("work", None).unwrap(), "abc123");
//! assert_eq!(file.resolve("default", Some("personal")).unwrap(), "def456");
//! assert_eq!(file.to_string(), "# my tokens\nwork:abc123\npersonal:def456\n");
//! ```

pub mod error;
pub mod line;
pub mod store;

pub use error::{ErrorKind, Result, TokenError};
pub use line::{Entry, TokenLine};
pub use store::{
    DEFAULT_ALIAS, SetOutcome, TOKEN_FILE_TEMPLATE, TokenFile, parse, remove_alias, remove_all,
    resolve, set_alias, validate_alias, write_template,
};

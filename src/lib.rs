//! A compiled, segment-based URL router.
//!
//! Routes are registered with a set of HTTP methods and a path made of
//! literal segments and `{name}` placeholders. Once every route is
//! registered the tree is compiled, which rejects routes that cannot be
//! told apart and freezes the tree into a read-only matcher.
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pathtrie::{Method, Tree};
//!
//! let mut tree = Tree::new();
//! tree.insert(Method::Get, "/home", "Welcome!")?;
//! tree.insert(Method::Get | Method::Head, "/users/{id}", "A User")?;
//!
//! let matcher = tree.compile()?;
//!
//! let matched = matcher.at(Method::Get, "/users/978").unwrap();
//! assert_eq!(matched.get("id"), Some("978"));
//! assert_eq!(*matched.value, "A User");
//!
//! // registered, but not for this method
//! assert!(matcher.at(Method::Post, "/users/978").is_none());
//! # Ok(())
//! # }
//! ```
//!
//! A compiled [`Matcher`] is immutable. Each lookup keeps its captured
//! values in its own [`MatchEntry`], so the matcher can be shared between
//! threads without locking.
#![deny(clippy::all)]
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod entry;
mod error;
mod matcher;
mod method;
mod pattern;
mod router;
mod tree;
mod vars;

pub use entry::{Match, MatchEntry};
pub use error::{CompileError, Error, InsertError};
pub use matcher::Matcher;
pub use method::{Method, Methods};
pub use router::Router;
pub use tree::{Route, Tree};
pub use vars::{Vars, VarsIter};

//! `Router` owns a route tree through its whole lifecycle: routes are
//! registered, the tree is compiled once, and the compiled tree is then
//! matched against incoming requests until the router is torn down.
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pathtrie::{Method, Router};
//!
//! let mut router = Router::new();
//! router.get("/", "hello world")?;
//! router.get("/foo/bar", "foo/bar")?;
//! router.get("/path/{id}", "path")?;
//! router.get("/path/{id}/{arg2}", "path with args")?;
//!
//! // must be compiled before use
//! router.compile()?;
//!
//! let matched = router.at(Method::Get, "/path/42/99")?.unwrap();
//! assert_eq!(*matched.value, "path with args");
//! assert_eq!(matched.vars.to_vec(), ["42", "99"]);
//!
//! assert!(router.at(Method::Post, "/path/42/99")?.is_none());
//! # Ok(())
//! # }
//! ```
//!
//! Placeholders match exactly one non-empty segment, and literal segments
//! are preferred over placeholders:
//! ```ignore
//!  Route: /foo/bar         /foo/bar   match
//!  Route: /foo/{id}        /foo/baz   match: ["baz"]
//!                          /foo/      no match
//!                          /foo/a/b   no match
//! ```
//!
//! Requests for a path that exists only under other methods are not found,
//! like any other miss. [`Router::allowed`] tells the two cases apart for
//! callers that want to answer with `405 Method Not Allowed`.

use crate::entry::Match;
use crate::matcher::Matcher;
use crate::tree::Tree;
use crate::{CompileError, Error, InsertError, Method, Methods};

use std::mem;

#[derive(Debug)]
enum State<T> {
    Building(Tree<T>),
    Compiled(Matcher<T>),
    Released,
}

/// A route tree with a build, compile and match lifecycle.
#[derive(Debug)]
pub struct Router<T> {
    state: State<T>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a router with room for `capacity` routes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: State::Building(Tree::with_capacity(capacity)),
        }
    }

    /// Registers a route for the given method(s).
    ///
    /// Routes that conflict with each other are accepted here and reported
    /// by [`compile`](Router::compile). Registering after `compile` fails.
    pub fn register(
        &mut self,
        methods: impl Into<Methods>,
        route: impl Into<String>,
        value: T,
    ) -> Result<(), Error> {
        match &mut self.state {
            State::Building(tree) => Ok(tree.insert(methods, route, value)?),
            State::Compiled(_) => Err(InsertError::NotCompilable.into()),
            State::Released => Err(Error::Released),
        }
    }

    /// Registers a route for every recognized method.
    pub fn register_path(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Methods::ANY, route, value)
    }

    /// Register a handler for GET requests
    pub fn get(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Get, route, value)
    }

    /// Register a handler for POST requests
    pub fn post(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Post, route, value)
    }

    /// Register a handler for PUT requests
    pub fn put(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Put, route, value)
    }

    /// Register a handler for DELETE requests
    pub fn delete(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Delete, route, value)
    }

    /// Register a handler for PATCH requests
    pub fn patch(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Patch, route, value)
    }

    /// Register a handler for HEAD requests
    pub fn head(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Head, route, value)
    }

    /// Register a handler for OPTIONS requests
    pub fn options(&mut self, route: impl Into<String>, value: T) -> Result<(), Error> {
        self.register(Method::Options, route, value)
    }

    /// Compiles the registered routes. Must be called exactly once, before
    /// the first match.
    ///
    /// On a conflict the router stays in its registration state.
    pub fn compile(&mut self) -> Result<(), Error> {
        let matcher = match &mut self.state {
            State::Building(tree) => tree.compile()?,
            State::Compiled(_) => return Err(CompileError::NotCompilable.into()),
            State::Released => return Err(Error::Released),
        };

        self.state = State::Compiled(matcher);
        Ok(())
    }

    /// Returns `true` once the router has been compiled.
    pub fn is_compiled(&self) -> bool {
        matches!(self.state, State::Compiled(_))
    }

    /// Matches a method and path against the compiled routes.
    ///
    /// `Ok(None)` means no route matched. Matching before `compile` or after
    /// `teardown` is an error.
    pub fn at<'m, 'p>(
        &'m self,
        method: impl Into<Method>,
        path: &'p str,
    ) -> Result<Option<Match<'m, 'p, T>>, Error> {
        self.matcher().map(|matcher| matcher.at(method, path))
    }

    /// Returns the methods registered for routes matching the path.
    pub fn allowed(&self, path: &str) -> Result<Methods, Error> {
        self.matcher().map(|matcher| matcher.allowed(path))
    }

    /// Returns the compiled matcher.
    pub fn matcher(&self) -> Result<&Matcher<T>, Error> {
        match &self.state {
            State::Compiled(matcher) => Ok(matcher),
            State::Building(_) => Err(Error::NotCompiled),
            State::Released => Err(Error::Released),
        }
    }

    /// Releases every route and node. Calling it again does nothing.
    ///
    /// Dropping the router releases them as well.
    pub fn teardown(&mut self) {
        match mem::replace(&mut self.state, State::Released) {
            State::Released => {}
            State::Building(tree) => debug!("tearing down router with {} uncompiled routes", tree.len()),
            State::Compiled(matcher) => debug!("tearing down router with {} routes", matcher.len()),
        }
    }

    /// Returns `true` once the router has been torn down.
    pub fn is_released(&self) -> bool {
        matches!(self.state, State::Released)
    }
}

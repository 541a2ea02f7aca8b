use crate::Methods;

/// Represents errors that can occur when inserting a new route.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum InsertError {
    /// The tree has already been compiled and can no longer be modified.
    #[error("routes cannot be inserted into a compiled tree")]
    NotCompilable,
    /// Routes must begin with '/'.
    #[error("route `{0}` must begin with '/'")]
    MissingLeadingSlash(String),
    /// Placeholders must be registered with a name.
    #[error("placeholders in route `{0}` must be registered with a name")]
    UnnamedParam(String),
    /// A segment must be a literal or exactly one `{name}` placeholder.
    #[error("route `{route}` has an invalid segment `{segment}`")]
    InvalidSegment { route: String, segment: String },
    /// The route was registered without any recognized method.
    #[error("route `{0}` has no recognized methods")]
    NoMethods(String),
}

/// Represents errors that can occur when compiling a tree.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// Two routes cannot be told apart for the given methods.
    #[error("route `{route}` conflicts with `{with}` for {methods}")]
    Conflict {
        /// The route that was registered later.
        route: String,
        /// The previously registered route it collides with.
        with: String,
        /// The methods both routes respond to.
        methods: Methods,
    },
    /// The tree has already been compiled.
    #[error("tree has already been compiled")]
    NotCompilable,
}

/// Errors returned by the [`Router`](crate::Router) lifecycle.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Insert(#[from] InsertError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    /// Matching was attempted before `compile`.
    #[error("router must be compiled before matching")]
    NotCompiled,
    /// The router has been torn down.
    #[error("router has been torn down")]
    Released,
}

impl Error {
    /// Returns `true` for misuse of the build/compile lifecycle.
    pub fn is_not_compilable(&self) -> bool {
        matches!(
            self,
            Error::Insert(InsertError::NotCompilable)
                | Error::Compile(CompileError::NotCompilable)
                | Error::NotCompiled
                | Error::Released
        )
    }
}

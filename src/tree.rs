use crate::matcher::Matcher;
use crate::pattern::{self, Segment};
use crate::{CompileError, InsertError, Methods};

use std::collections::BTreeMap;
use std::mem;

/// A registered route: the methods it responds to, the route it was
/// registered under, and its value.
#[derive(Clone, Debug)]
pub struct Route<T> {
    pub(crate) methods: Methods,
    pub(crate) pattern: Box<str>,
    pub(crate) params: Box<[Box<str>]>,
    pub(crate) value: T,
}

impl<T> Route<T> {
    /// The methods this route responds to.
    pub fn methods(&self) -> Methods {
        self.methods
    }

    /// The route as it was registered, e.g. `/users/{id}`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Placeholder names, in the order they appear in the route.
    pub fn param_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.params.iter().map(|name| &**name)
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

// A node in the uncompiled trie. Each edge consumes exactly one segment.
#[derive(Debug, Default)]
pub(crate) struct Node {
    pub(crate) statics: BTreeMap<Box<str>, Node>,
    pub(crate) param: Option<Box<Node>>,
    // indices into `Tree::routes` of the routes ending here
    pub(crate) routes: Vec<usize>,
}

impl Node {
    fn insert(&mut self, segments: &[Segment<'_>], route: usize) {
        let mut current = self;
        for segment in segments {
            current = match *segment {
                Segment::Static(s) => current.statics.entry(s.into()).or_default(),
                Segment::Param(_) => &mut **current.param.get_or_insert_with(Box::default),
            };
        }
        current.routes.push(route);
    }
}

/// The pattern store: a mutable trie of routes that is compiled into a
/// [`Matcher`] before it can be queried.
///
/// Literal segments shared between routes share trie nodes. Insertion never
/// fails because of another route; conflicts are detected by
/// [`compile`](Tree::compile), so the order routes are inserted in is
/// irrelevant.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use pathtrie::{Method, Tree};
///
/// let mut tree = Tree::new();
/// tree.insert(Method::Get, "/foo/bar", "literal")?;
/// tree.insert(Method::Get, "/foo/{id}", "placeholder")?;
/// let matcher = tree.compile()?;
///
/// assert_eq!(matcher.at(Method::Get, "/foo/bar").map(|m| *m.value), Some("literal"));
/// assert_eq!(matcher.at(Method::Get, "/foo/baz").map(|m| *m.value), Some("placeholder"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Tree<T> {
    root: Node,
    routes: Vec<Route<T>>,
    compiled: bool,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a tree with room for `capacity` routes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            root: Node::default(),
            routes: Vec::with_capacity(capacity),
            compiled: false,
        }
    }

    /// Inserts a route for the given method(s).
    ///
    /// Segments of the form `{name}` are placeholders that match exactly one
    /// non-empty path segment. Every other segment is matched literally.
    pub fn insert(
        &mut self,
        methods: impl Into<Methods>,
        route: impl Into<String>,
        value: T,
    ) -> Result<(), InsertError> {
        let route = route.into();

        if self.compiled {
            return Err(InsertError::NotCompilable);
        }

        let methods = methods.into();
        if methods.is_empty() {
            return Err(InsertError::NoMethods(route));
        }

        let params = {
            let segments = pattern::parse(&route)?;
            self.root.insert(&segments, self.routes.len());

            segments
                .iter()
                .filter_map(|segment| match segment {
                    Segment::Param(name) => Some(Box::from(*name)),
                    Segment::Static(_) => None,
                })
                .collect()
        };

        self.routes.push(Route {
            methods,
            pattern: route.into_boxed_str(),
            params,
            value,
        });

        Ok(())
    }

    /// Inserts a route that responds to every recognized method.
    pub fn insert_path(&mut self, route: impl Into<String>, value: T) -> Result<(), InsertError> {
        self.insert(Methods::ANY, route, value)
    }

    /// Moves every route of `other` into this tree.
    ///
    /// Conflicts between the two trees are reported by `compile`.
    pub fn merge(&mut self, other: Tree<T>) -> Result<(), InsertError> {
        if self.compiled || other.compiled {
            return Err(InsertError::NotCompilable);
        }

        for route in other.routes {
            // already validated when it was inserted into `other`
            {
                let segments = pattern::parse(&route.pattern)?;
                self.root.insert(&segments, self.routes.len());
            }
            self.routes.push(route);
        }

        Ok(())
    }

    /// Returns the number of routes in the tree.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns `true` once the tree has been compiled.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Compiles the tree into a [`Matcher`].
    ///
    /// Fails if two routes cannot be told apart, that is, they are equal once
    /// placeholder names are erased and they share a method. A failed compile
    /// leaves the tree as it was. A successful one moves the routes into the
    /// matcher, and the tree rejects any further insertion or compile.
    pub fn compile(&mut self) -> Result<Matcher<T>, CompileError> {
        if self.compiled {
            return Err(CompileError::NotCompilable);
        }

        if let Err(err) = check_conflicts(&self.root, &self.routes) {
            warn!("rejecting route tree: {}", err);
            return Err(err);
        }

        self.compiled = true;
        let root = mem::take(&mut self.root);
        let routes = mem::take(&mut self.routes);

        let matcher = Matcher::new(&root, routes);
        debug!(
            "compiled {} routes into {} nodes",
            matcher.len(),
            matcher.node_count()
        );

        Ok(matcher)
    }
}

// Routes ending at the same node are only distinguishable by their methods.
fn check_conflicts<T>(node: &Node, routes: &[Route<T>]) -> Result<(), CompileError> {
    for (i, &a) in node.routes.iter().enumerate() {
        for &b in &node.routes[..i] {
            let (later, earlier) = (&routes[a], &routes[b]);
            let overlap = later.methods.intersection(earlier.methods);
            if !overlap.is_empty() {
                return Err(CompileError::Conflict {
                    route: later.pattern.to_string(),
                    with: earlier.pattern.to_string(),
                    methods: overlap,
                });
            }
        }
    }

    for child in node.statics.values() {
        check_conflicts(child, routes)?;
    }

    match &node.param {
        Some(child) => check_conflicts(child, routes),
        None => Ok(()),
    }
}

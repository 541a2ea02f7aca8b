use crate::entry::{Match, MatchEntry};
use crate::pattern;
use crate::tree::{Node, Route};
use crate::{Method, Methods, Vars};

use std::fmt;
use std::str::Split;

const ROOT: usize = 0;

/// A compiled, immutable route tree.
///
/// Created by [`Tree::compile`](crate::Tree::compile). Lookups take
/// `&self` and keep their state in a caller-owned [`MatchEntry`], so a
/// matcher can be shared between threads and queried concurrently.
#[derive(Debug)]
pub struct Matcher<T> {
    nodes: Box<[CompiledNode]>,
    routes: Box<[Route<T>]>,
}

#[derive(Debug, Default)]
struct CompiledNode {
    // sorted by the first segment of each label
    statics: Box<[Edge]>,
    param: Option<usize>,
    // indices into `Matcher::routes`
    endpoints: Box<[usize]>,
}

// A run of one or more static segments leading to a child node.
#[derive(Debug)]
struct Edge {
    label: Box<[Box<str>]>,
    child: usize,
}

impl Edge {
    fn first(&self) -> &str {
        &self.label[0]
    }
}

impl<T> Matcher<T> {
    pub(crate) fn new(root: &Node, routes: Vec<Route<T>>) -> Self {
        let mut nodes = Vec::new();
        build(&mut nodes, root);

        Self {
            nodes: nodes.into_boxed_slice(),
            routes: routes.into_boxed_slice(),
        }
    }

    /// Matches the entry's method and path, storing the captured values in the
    /// entry. Any values captured by a previous match are discarded first.
    ///
    /// ```rust
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use pathtrie::{MatchEntry, Method, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Method::Get, "/users/{id}", "user")?;
    /// let matcher = tree.compile()?;
    ///
    /// let mut entry = MatchEntry::new(Method::Get, "/users/7");
    /// let route = matcher.match_route(&mut entry).unwrap();
    /// assert_eq!(route.pattern(), "/users/{id}");
    /// assert_eq!(entry.vars().get(0), Some("7"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn match_route<'p>(&self, entry: &mut MatchEntry<'p>) -> Option<&Route<T>> {
        entry.vars.clear();

        let method = entry.method();
        if method == Method::Unrecognized {
            trace!("unrecognized method for '{}'", entry.path());
            return None;
        }

        let found = pattern::segments(entry.path())
            .and_then(|segments| self.find(ROOT, segments, method, &mut entry.vars));

        match found {
            Some(route) => Some(&self.routes[route]),
            None => {
                trace!("no route for {} '{}'", method, entry.path());
                None
            }
        }
    }

    /// Matches a method and path, returning the route, its value and the
    /// captured values.
    pub fn at<'m, 'p>(&'m self, method: impl Into<Method>, path: &'p str) -> Option<Match<'m, 'p, T>> {
        let mut entry = MatchEntry::new(method, path);
        let route = self.match_route(&mut entry)?;

        Some(Match {
            route,
            value: &route.value,
            vars: entry.into_vars(),
        })
    }

    /// Returns the methods of every route whose pattern matches the path.
    pub fn allowed(&self, path: &str) -> Methods {
        let mut allowed = Methods::EMPTY;
        if let Some(segments) = pattern::segments(path) {
            self.collect_allowed(ROOT, segments, &mut allowed);
        }
        allowed
    }

    /// Returns an iterator over the compiled routes, in insertion order.
    pub fn routes(&self) -> impl ExactSizeIterator<Item = &Route<T>> {
        self.routes.iter()
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the number of nodes in the compiled tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // Static edges are tried before the placeholder edge. If the static
    // branch fails deeper down, the placeholder branch is tried instead.
    fn find<'p>(
        &self,
        node: usize,
        mut segments: Split<'p, char>,
        method: Method,
        vars: &mut Vars<'p>,
    ) -> Option<usize> {
        let current = &self.nodes[node];

        let segment = match segments.next() {
            Some(segment) => segment,
            None => {
                return current
                    .endpoints
                    .iter()
                    .copied()
                    .find(|&route| self.routes[route].methods.contains(method))
            }
        };

        if let Some(edge) = current.static_edge(segment) {
            let mut rest = segments.clone();
            if edge.label[1..].iter().all(|label| rest.next() == Some(&**label)) {
                if let Some(route) = self.find(edge.child, rest, method, vars) {
                    return Some(route);
                }
            }
        }

        // placeholders never match an empty segment
        if let (Some(child), false) = (current.param, segment.is_empty()) {
            let len = vars.len();
            vars.push(segment);

            if let Some(route) = self.find(child, segments, method, vars) {
                return Some(route);
            }

            vars.truncate(len);
        }

        None
    }

    fn collect_allowed(&self, node: usize, mut segments: Split<'_, char>, allowed: &mut Methods) {
        let current = &self.nodes[node];

        let segment = match segments.next() {
            Some(segment) => segment,
            None => {
                for &route in current.endpoints.iter() {
                    *allowed |= self.routes[route].methods;
                }
                return;
            }
        };

        if let Some(edge) = current.static_edge(segment) {
            let mut rest = segments.clone();
            if edge.label[1..].iter().all(|label| rest.next() == Some(&**label)) {
                self.collect_allowed(edge.child, rest, allowed);
            }
        }

        if let (Some(child), false) = (current.param, segment.is_empty()) {
            self.collect_allowed(child, segments, allowed);
        }
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, node: usize, depth: usize) -> fmt::Result {
        let current = &self.nodes[node];

        for edge in current.statics.iter() {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
            for segment in edge.label.iter() {
                write!(f, "/{}", segment)?;
            }
            self.dump_endpoints(f, edge.child)?;
            self.dump(f, edge.child, depth + 1)?;
        }

        if let Some(child) = current.param {
            write!(f, "{:indent$}/{{}}", "", indent = depth * 2)?;
            self.dump_endpoints(f, child)?;
            self.dump(f, child, depth + 1)?;
        }

        Ok(())
    }

    fn dump_endpoints(&self, f: &mut fmt::Formatter<'_>, node: usize) -> fmt::Result {
        for &route in self.nodes[node].endpoints.iter() {
            let route = &self.routes[route];
            write!(f, " [{} {}]", route.methods, route.pattern)?;
        }
        writeln!(f)
    }
}

impl CompiledNode {
    fn static_edge(&self, segment: &str) -> Option<&Edge> {
        self.statics
            .binary_search_by(|edge| edge.first().cmp(segment))
            .ok()
            .map(|i| &self.statics[i])
    }
}

/// Renders the compiled tree, one edge per line.
impl<T> fmt::Display for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<root>")?;
        self.dump_endpoints(f, ROOT)?;
        self.dump(f, ROOT, 1)
    }
}

// Flattens the trie into `nodes`, returning the index of `node`. Chains of
// nodes that hold no routes and have a single static child are merged into
// one multi-segment edge.
fn build(nodes: &mut Vec<CompiledNode>, node: &Node) -> usize {
    let index = nodes.len();
    nodes.push(CompiledNode::default());

    // `BTreeMap` iterates in key order, which keeps the edges sorted
    let mut statics = Vec::with_capacity(node.statics.len());
    for (segment, mut child) in &node.statics {
        let mut label = vec![segment.clone()];
        while let Some((segment, next)) = passthrough(child) {
            label.push(segment.into());
            child = next;
        }

        statics.push(Edge {
            label: label.into_boxed_slice(),
            child: build(nodes, child),
        });
    }

    let param = node.param.as_deref().map(|child| build(nodes, child));

    nodes[index] = CompiledNode {
        statics: statics.into_boxed_slice(),
        param,
        endpoints: node.routes.clone().into_boxed_slice(),
    };

    index
}

fn passthrough(node: &Node) -> Option<(&str, &Node)> {
    if !node.routes.is_empty() || node.param.is_some() || node.statics.len() != 1 {
        return None;
    }

    node.statics
        .iter()
        .next()
        .map(|(segment, child)| (&**segment, child))
}

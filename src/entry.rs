use crate::tree::Route;
use crate::{Method, Vars};

/// The input and output of a single match: the request method and path,
/// and the values captured by placeholders once matched.
///
/// An entry belongs to one request. Captured values borrow from the path,
/// and [`Matcher::match_route`](crate::Matcher::match_route) resets them
/// before matching, so a reused entry never carries values from a
/// previous request.
#[derive(Clone, Debug)]
pub struct MatchEntry<'p> {
    path: &'p str,
    method: Method,
    pub(crate) vars: Vars<'p>,
}

impl<'p> MatchEntry<'p> {
    pub fn new(method: impl Into<Method>, path: &'p str) -> Self {
        Self {
            path,
            method: method.into(),
            vars: Vars::new(),
        }
    }

    pub fn path(&self) -> &'p str {
        self.path
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: impl Into<Method>) {
        self.method = method.into();
    }

    /// The values captured by the last match, in route order.
    pub fn vars(&self) -> &Vars<'p> {
        &self.vars
    }

    pub fn into_vars(self) -> Vars<'p> {
        self.vars
    }
}

/// A successful match: the route, its value and the captured values.
#[derive(Debug)]
pub struct Match<'m, 'p, T> {
    /// The matched route.
    pub route: &'m Route<T>,
    /// The value stored under the matched route.
    pub value: &'m T,
    /// The captured values, in route order.
    pub vars: Vars<'p>,
}

impl<'m, 'p, T> Match<'m, 'p, T> {
    /// Returns the value captured by the placeholder with the given name.
    ///
    /// ```rust
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use pathtrie::{Method, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Method::Get, "/blog/{category}/{post}", ())?;
    /// let matcher = tree.compile()?;
    ///
    /// let matched = matcher.at(Method::Get, "/blog/rust/routers").unwrap();
    /// assert_eq!(matched.get("post"), Some("routers"));
    /// assert_eq!(matched.get("author"), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, name: impl AsRef<str>) -> Option<&'p str> {
        let name = name.as_ref();
        self.route
            .param_names()
            .position(|param| param == name)
            .and_then(|i| self.vars.get(i))
    }

    /// Returns the placeholder names paired with their captured values.
    pub fn params(&self) -> impl Iterator<Item = (&'m str, &'p str)> + '_ {
        self.route.param_names().zip(self.vars.iter())
    }
}

impl<T> Clone for Match<'_, '_, T> {
    fn clone(&self) -> Self {
        Self {
            route: self.route,
            value: self.value,
            vars: self.vars.clone(),
        }
    }
}

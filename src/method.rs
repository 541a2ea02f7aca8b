use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// An HTTP request method understood by the router.
///
/// Verbs outside the table parse to [`Method::Unrecognized`], which is
/// contained by no [`Methods`] set and therefore never matches a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Unrecognized,
}

impl Method {
    /// Every recognized method, in bit order.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Patch,
        Method::Head,
        Method::Options,
    ];

    /// The bit this method occupies in a [`Methods`] set.
    pub const fn bit(self) -> u8 {
        match self {
            Method::Get => 1 << 1,
            Method::Post => 1 << 2,
            Method::Put => 1 << 3,
            Method::Delete => 1 << 4,
            Method::Patch => 1 << 5,
            Method::Head => 1 << 6,
            Method::Options => 1 << 7,
            Method::Unrecognized => 0,
        }
    }

    /// Parses a method name. Matching is exact, as HTTP methods are case-sensitive.
    pub fn parse(name: &str) -> Method {
        match name {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            _ => Method::Unrecognized,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl From<&str> for Method {
    fn from(name: &str) -> Self {
        Method::parse(name)
    }
}

impl From<&http::Method> for Method {
    fn from(method: &http::Method) -> Self {
        Method::parse(method.as_str())
    }
}

impl From<http::Method> for Method {
    fn from(method: http::Method) -> Self {
        Method::from(&method)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of methods a route responds to.
///
/// ```rust
/// use pathtrie::{Method, Methods};
///
/// let methods = Method::Get | Method::Post;
/// assert!(methods.contains(Method::Post));
/// assert!(!methods.contains(Method::Put));
/// assert!(!Methods::ANY.contains(Method::Unrecognized));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Methods(u8);

impl Methods {
    pub const EMPTY: Methods = Methods(0);

    /// Every recognized method.
    pub const ANY: Methods = Methods(0b1111_1110);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, method: Method) -> bool {
        self.0 & method.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn intersection(self, other: Methods) -> Methods {
        Methods(self.0 & other.0)
    }

    pub const fn intersects(self, other: Methods) -> bool {
        self.0 & other.0 != 0
    }

    /// Iterates over the methods in the set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = Method> {
        Method::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl From<Method> for Methods {
    fn from(method: Method) -> Self {
        Methods(method.bit())
    }
}

impl BitOr for Methods {
    type Output = Methods;

    fn bitor(self, rhs: Methods) -> Methods {
        Methods(self.0 | rhs.0)
    }
}

impl BitOr<Method> for Methods {
    type Output = Methods;

    fn bitor(self, rhs: Method) -> Methods {
        Methods(self.0 | rhs.bit())
    }
}

impl BitOr for Method {
    type Output = Methods;

    fn bitor(self, rhs: Method) -> Methods {
        Methods(self.bit() | rhs.bit())
    }
}

impl BitOrAssign for Methods {
    fn bitor_assign(&mut self, rhs: Methods) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Method> for Methods {
    fn from_iter<I: IntoIterator<Item = Method>>(iter: I) -> Self {
        iter.into_iter().fold(Methods::EMPTY, |set, m| set | m)
    }
}

impl fmt::Display for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for (i, method) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(method.as_str())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Methods({})", self)
    }
}

use std::{fmt, iter, mem, slice};

/// The values captured by placeholders during a match, in the order the
/// placeholders appear in the route.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use pathtrie::{Method, Tree};
///
/// let mut tree = Tree::new();
/// tree.insert(Method::Get, "/path/{id}/{arg2}", "path")?;
/// let matcher = tree.compile()?;
///
/// let matched = matcher.at(Method::Get, "/path/42/99").unwrap();
/// assert_eq!(matched.vars.iter().collect::<Vec<_>>(), ["42", "99"]);
/// assert_eq!(&matched.vars[1], "99");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Vars<'p> {
    kind: VarsKind<'p>,
}

// Most routes have a small number of placeholders, so we can avoid
// heap allocations in the common case.
const SMALL: usize = 3;

#[derive(Clone)]
enum VarsKind<'p> {
    Small([&'p str; SMALL], usize),
    Large(Vec<&'p str>),
}

impl<'p> Vars<'p> {
    pub(crate) fn new() -> Self {
        Self {
            kind: VarsKind::Small([""; SMALL], 0),
        }
    }

    /// Returns the number of captured values.
    pub fn len(&self) -> usize {
        match self.kind {
            VarsKind::Small(_, len) => len,
            VarsKind::Large(ref vec) => vec.len(),
        }
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value captured at the given position.
    pub fn get(&self, i: usize) -> Option<&'p str> {
        match &self.kind {
            VarsKind::Small(arr, len) => arr[..*len].get(i).copied(),
            VarsKind::Large(vec) => vec.get(i).copied(),
        }
    }

    /// Returns an iterator over the captured values.
    pub fn iter(&self) -> VarsIter<'_, 'p> {
        VarsIter::new(self)
    }

    /// Copies the captured values into owned strings.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }

    pub(crate) fn push(&mut self, value: &'p str) {
        #[cold]
        fn drain_to_vec<'v>(len: usize, elem: &'v str, arr: &mut [&'v str; SMALL]) -> Vec<&'v str> {
            let mut vec = Vec::with_capacity(len + 1);
            vec.extend(arr.iter_mut().map(mem::take));
            vec.push(elem);
            vec
        }

        match &mut self.kind {
            VarsKind::Small(arr, len) => {
                if *len == SMALL {
                    self.kind = VarsKind::Large(drain_to_vec(*len, value, arr));
                    return;
                }

                arr[*len] = value;
                *len += 1;
            }
            VarsKind::Large(vec) => vec.push(value),
        }
    }

    // Drops values captured by a branch that failed to match.
    pub(crate) fn truncate(&mut self, n: usize) {
        match &mut self.kind {
            VarsKind::Small(_, len) => *len = (*len).min(n),
            VarsKind::Large(vec) => vec.truncate(n),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.truncate(0);
    }
}

impl Default for Vars<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for Vars<'_> {
    type Output = str;

    fn index(&self, i: usize) -> &Self::Output {
        match &self.kind {
            VarsKind::Small(arr, len) => arr[..*len][i],
            VarsKind::Large(vec) => vec[i],
        }
    }
}

impl fmt::Debug for Vars<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// Only the captured values count, not stale slots past `len` or whether
// the values spilled to the heap.
impl PartialEq for Vars<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for Vars<'_> {}

impl<'p> PartialEq<[&'p str]> for Vars<'p> {
    fn eq(&self, other: &[&'p str]) -> bool {
        self.iter().eq(other.iter().copied())
    }
}

/// An iterator over the captured [values](crate::Vars).
pub struct VarsIter<'a, 'p> {
    kind: VarsIterKind<'a, 'p>,
}

impl<'a, 'p> VarsIter<'a, 'p> {
    fn new(vars: &'a Vars<'p>) -> Self {
        let kind = match &vars.kind {
            VarsKind::Small(arr, len) => VarsIterKind::Small(arr.iter().take(*len)),
            VarsKind::Large(vec) => VarsIterKind::Large(vec.iter()),
        };
        Self { kind }
    }
}

enum VarsIterKind<'a, 'p> {
    Small(iter::Take<slice::Iter<'a, &'p str>>),
    Large(slice::Iter<'a, &'p str>),
}

impl<'p> Iterator for VarsIter<'_, 'p> {
    type Item = &'p str;

    fn next(&mut self) -> Option<Self::Item> {
        match self.kind {
            VarsIterKind::Small(ref mut iter) => iter.next().copied(),
            VarsIterKind::Large(ref mut iter) => iter.next().copied(),
        }
    }
}

impl ExactSizeIterator for VarsIter<'_, '_> {
    fn len(&self) -> usize {
        match self.kind {
            VarsIterKind::Small(ref iter) => iter.len(),
            VarsIterKind::Large(ref iter) => iter.len(),
        }
    }
}

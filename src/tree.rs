//! The nested lookup tree read by the accessor.
//!
//! Each emitted variable name is split on `-` and its value stored at the
//! resulting path. Groups keep insertion order so the generated module is
//! stable from build to build.

/// A node of the lookup tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A normalized token value
    Leaf(String),
    /// Named children in insertion order
    Group(Vec<(String, Node)>),
}

impl Node {
    /// Child by name, when this node is a group
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Group(children) => children.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(s) => Some(s),
            Node::Group(_) => None,
        }
    }

    fn position(children: &[(String, Node)], key: &str) -> Option<usize> {
        children.iter().position(|(k, _)| k == key)
    }
}

/// Why an insertion was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// A leaf already sits where a group is needed, or at the target itself
    Occupied { at: String },
    /// The target holds a group, so a leaf cannot be placed there
    GroupInTheWay { at: String },
    /// The path has no segments
    Empty,
}

impl std::fmt::Display for InsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertError::Occupied { at } => write!(f, "'{}' already holds a value", at),
            InsertError::GroupInTheWay { at } => write!(f, "'{}' is a group", at),
            InsertError::Empty => write!(f, "empty path"),
        }
    }
}

impl std::error::Error for InsertError {}

/// Nested token values keyed by path segments.
///
/// ```
/// use tokensmith::tree::LookupTree;
///
/// let mut tree = LookupTree::new();
/// tree.insert(&["spacing", "mode", "1", "space", "l"], "16px".to_string()).unwrap();
/// assert_eq!(tree.lookup("spacing.mode.1.space.l"), Some("16px"));
/// assert!(tree.insert(&["spacing", "mode"], "oops".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTree {
    root: Node,
}

impl Default for LookupTree {
    fn default() -> Self {
        LookupTree {
            root: Node::Group(Vec::new()),
        }
    }
}

impl LookupTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: Node) -> Self {
        LookupTree { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        matches!(&self.root, Node::Group(children) if children.is_empty())
    }

    /// Place `value` at `segments`, creating groups along the way. Nothing
    /// already in the tree is ever replaced.
    pub fn insert<S: AsRef<str>>(&mut self, segments: &[S], value: String) -> Result<(), InsertError> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(InsertError::Empty);
        };

        let mut current = &mut self.root;
        let mut walked = Vec::new();
        for segment in parents {
            let segment = segment.as_ref();
            walked.push(segment);
            let Node::Group(children) = current else {
                return Err(InsertError::Occupied { at: walked.join(".") });
            };
            let index = match Node::position(children, segment) {
                Some(i) => i,
                None => {
                    children.push((segment.to_string(), Node::Group(Vec::new())));
                    children.len() - 1
                }
            };
            current = &mut children[index].1;
        }

        let last = last.as_ref();
        walked.push(last);
        let Node::Group(children) = current else {
            return Err(InsertError::Occupied { at: walked.join(".") });
        };
        if let Some(i) = Node::position(children, last) {
            let at = walked.join(".");
            return Err(match children[i].1 {
                Node::Leaf(_) => InsertError::Occupied { at },
                Node::Group(_) => InsertError::GroupInTheWay { at },
            });
        }
        children.push((last.to_string(), Node::Leaf(value)));
        Ok(())
    }

    /// Walk a dotted path and return the node there
    pub fn node(&self, path: &str) -> Option<&Node> {
        path.split('.').try_fold(&self.root, |node, key| node.get(key))
    }

    /// Walk a dotted path and return the leaf value there
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.node(path).and_then(Node::as_leaf)
    }

    /// Walk already-split segments and return the leaf value there
    pub fn lookup_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<&str> {
        segments
            .iter()
            .try_fold(&self.root, |node, key| node.get(key.as_ref()))
            .and_then(Node::as_leaf)
    }
}

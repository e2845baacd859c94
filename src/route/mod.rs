//! View-state routing.
//!
//! A static tree of named view-states maps locations (path plus query
//! string) onto screens. Query parameter names declared on a node are
//! visible to all of its descendants; resolution walks the ancestor chain
//! and collects every declared name present in the location. Unmatched
//! locations resolve to the default state instead of erroring.

mod table;

use std::collections::BTreeMap;
use std::fmt;

pub use table::DEFAULT_STATE;

/// Which screen a state instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Cluster,
    User,
    App,
    Task,
}

/// One node of the view-state tree. Defined once at startup, immutable.
#[derive(Debug, Clone, Copy)]
pub struct StateNode {
    pub id: &'static str,
    pub parent: Option<&'static str>,
    /// Path this node matches; abstract nodes have none.
    pub path: Option<&'static str>,
    /// Query parameter names declared at this level only. Ancestors'
    /// declarations are found by walking the chain.
    pub query_params: &'static [&'static str],
    pub view: Option<ViewKind>,
}

/// A parsed location: path plus query pairs in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parses `/app?cluster=dev&user=alice`. Pairs without `=` keep an
    /// empty value; empty names are dropped.
    pub fn parse(raw: &str) -> Self {
        let (path, query_str) = match raw.split_once('?') {
            Some((p, q)) => (p, q),
            None => (raw, ""),
        };

        let query = query_str
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (name, value) = match pair.split_once('=') {
                    Some((n, v)) => (n, v),
                    None => (pair, ""),
                };
                if name.is_empty() {
                    None
                } else {
                    Some((name.to_string(), value.to_string()))
                }
            })
            .collect();

        Self {
            path: path.to_string(),
            query,
        }
    }

    /// First value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (name, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

/// Result of resolving a location: the matched state and the merged
/// parameter set. Passed by value into controller activation; nothing else
/// holds "the current params".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    pub state: &'static str,
    pub view: ViewKind,
    /// Every declared name on the ancestor chain whose value is present in
    /// the location. Ancestor values are never overwritten.
    pub params: BTreeMap<String, String>,
    /// True when the location matched nothing and fell back to the default.
    pub redirected: bool,
}

impl ResolvedState {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// The immutable view-state tree.
pub struct RouteTable {
    nodes: &'static [StateNode],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    pub fn new() -> Self {
        let routes = Self {
            nodes: table::NODES,
        };
        debug_assert!(routes.check_invariants());
        routes
    }

    /// Resolves a location to a state and its merged parameters.
    ///
    /// No match redirects to [`DEFAULT_STATE`]; a matched node with missing
    /// required params still resolves (controllers decide not to fetch).
    pub fn resolve(&self, location: &Location) -> ResolvedState {
        let matched = self
            .nodes
            .iter()
            .find(|node| node.view.is_some() && node.path == Some(location.path.as_str()));
        let redirected = matched.is_none();
        let node = matched.unwrap_or_else(|| self.default_node());

        let mut params = BTreeMap::new();
        for ancestor in self.chain(node) {
            for &name in ancestor.query_params {
                if let Some(value) = location.get(name) {
                    params
                        .entry(name.to_string())
                        .or_insert_with(|| value.to_string());
                }
            }
        }

        ResolvedState {
            state: node.id,
            view: node.view.expect("matchable nodes carry a view"),
            params,
            redirected,
        }
    }

    pub fn node(&self, id: &str) -> Option<&StateNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nearest ancestor of `id` that has a path of its own.
    pub fn parent_of(&self, id: &str) -> Option<&StateNode> {
        let mut current = self.node(id)?;
        while let Some(parent_id) = current.parent {
            current = self.node(parent_id)?;
            if current.path.is_some() {
                return Some(current);
            }
        }
        None
    }

    /// All query parameter names visible at `id`, root-most first.
    pub fn declared_params(&self, id: &str) -> Vec<&'static str> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        self.chain(node)
            .into_iter()
            .flat_map(|n| n.query_params.iter().copied())
            .collect()
    }

    fn default_node(&self) -> &StateNode {
        self.node(DEFAULT_STATE)
            .expect("route table contains the default state")
    }

    /// Ancestor chain of `node`, root first, `node` last.
    fn chain<'a>(&'a self, node: &'a StateNode) -> Vec<&'a StateNode> {
        let mut chain = vec![node];
        let mut current = node;
        while let Some(parent_id) = current.parent {
            match self.node(parent_id) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        chain.reverse();
        chain
    }

    fn check_invariants(&self) -> bool {
        // one default node, parents resolvable, param names unique per chain
        if self.node(DEFAULT_STATE).and_then(|n| n.view).is_none() {
            return false;
        }
        for node in self.nodes {
            if let Some(parent) = node.parent {
                if self.node(parent).is_none() {
                    return false;
                }
            }
            let names = self.declared_params(node.id);
            let mut unique = names.clone();
            unique.sort_unstable();
            unique.dedup();
            if unique.len() != names.len() {
                return false;
            }
        }
        true
    }
}

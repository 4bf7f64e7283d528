//! Role graph and its shared snapshot

use crate::core::types::RoleName;
use crate::storage::GrantStore;
use crate::utils::error::Result;
use arc_swap::ArcSwapOption;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Directed edge: holders of `child` implicitly hold every capability of `parent`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleEdge {
    pub parent: RoleName,
    pub child: RoleName,
}

impl RoleEdge {
    pub fn new(parent: impl Into<RoleName>, child: impl Into<RoleName>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

/// Immutable adjacency view of the role edges, indexed child -> parents
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    parents: HashMap<RoleName, Vec<RoleName>>,
    edge_count: usize,
}

impl RoleGraph {
    /// Build the graph, ignoring duplicate edges
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = RoleEdge>,
    {
        let mut seen = HashSet::new();
        let mut parents: HashMap<RoleName, Vec<RoleName>> = HashMap::new();

        for edge in edges {
            if !seen.insert(edge.clone()) {
                continue;
            }
            parents.entry(edge.child).or_default().push(edge.parent);
        }

        Self {
            parents,
            edge_count: seen.len(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Parents reachable through a single edge
    pub fn direct_parents(&self, role: &RoleName) -> &[RoleName] {
        self.parents.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every role reachable from `role` by following parent edges.
    ///
    /// Each ancestor appears once. `role` itself is never part of the result,
    /// even when a cycle leads back to it. Terminates after visiting each edge
    /// at most once.
    pub fn ancestors_of(&self, role: &RoleName) -> HashSet<RoleName> {
        let mut visited: HashSet<&RoleName> = HashSet::from([role]);
        let mut ancestors = HashSet::new();
        let mut queue: VecDeque<&RoleName> = self.direct_parents(role).iter().collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            ancestors.insert(current.clone());

            for parent in self.direct_parents(current) {
                if !visited.contains(parent) {
                    queue.push_back(parent);
                }
            }
        }

        ancestors
    }

    /// `roles` plus all of their ancestors
    pub fn expand<'a, I>(&self, roles: I) -> HashSet<RoleName>
    where
        I: IntoIterator<Item = &'a RoleName>,
    {
        let mut expanded = HashSet::new();
        for role in roles {
            if expanded.insert(role.clone()) {
                expanded.extend(self.ancestors_of(role));
            }
        }
        expanded
    }

    /// Whether the edge set is free of cycles (Kahn's algorithm)
    pub fn is_acyclic(&self) -> bool {
        let mut in_degree: HashMap<&RoleName, usize> = HashMap::new();
        let mut children: HashMap<&RoleName, Vec<&RoleName>> = HashMap::new();

        for (child, parents) in &self.parents {
            in_degree.entry(child).or_insert(0);
            for parent in parents {
                in_degree.entry(parent).or_insert(0);
                *in_degree.entry(child).or_insert(0) += 1;
                children.entry(parent).or_default().push(child);
            }
        }

        let mut ready: Vec<&RoleName> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(role, _)| *role)
            .collect();
        let mut resolved = 0;

        while let Some(role) = ready.pop() {
            resolved += 1;
            for child in children.get(role).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(child) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(*child);
                    }
                }
            }
        }

        resolved == in_degree.len()
    }
}

/// Shared, lock-free snapshot of the role graph.
///
/// Readers load an `Arc` of the current graph; [`reload`](Self::reload)
/// swaps in a new one atomically. The graph is loaded from the grant store on
/// first use.
#[derive(Debug, Default)]
pub struct RoleHierarchy {
    graph: ArcSwapOption<RoleGraph>,
}

impl RoleHierarchy {
    /// An empty hierarchy that loads its graph on first use
    pub fn new() -> Self {
        Self {
            graph: ArcSwapOption::empty(),
        }
    }

    /// A hierarchy pinned to `graph` until the next reload
    pub fn with_graph(graph: RoleGraph) -> Self {
        Self {
            graph: ArcSwapOption::from_pointee(graph),
        }
    }

    /// Current graph, loading it from `store` if none is cached
    pub async fn snapshot(&self, store: &dyn GrantStore) -> Result<Arc<RoleGraph>> {
        if let Some(graph) = self.graph.load_full() {
            return Ok(graph);
        }
        self.reload(store).await
    }

    /// Re-read the role edges from `store` and publish the new graph
    pub async fn reload(&self, store: &dyn GrantStore) -> Result<Arc<RoleGraph>> {
        let edges = store.role_edges().await?;
        let graph = Arc::new(RoleGraph::from_edges(edges));

        if !graph.is_acyclic() {
            warn!(
                "Role hierarchy contains a cycle ({} edges); ancestry is still bounded",
                graph.edge_count()
            );
        }

        self.graph.store(Some(Arc::clone(&graph)));
        info!("Loaded role hierarchy with {} edges", graph.edge_count());
        Ok(graph)
    }

    /// Drop the cached graph so the next check reloads it
    pub fn invalidate(&self) {
        debug!("Role hierarchy snapshot invalidated");
        self.graph.store(None);
    }

    pub fn is_loaded(&self) -> bool {
        self.graph.load().is_some()
    }
}

//! Ordered tree walk with explicit continuation.
//!
//! The walk visits a node's children in order and hands each one to the
//! visitor together with the shared [`WalkState`]. Crucially, the walk does
//! *not* descend by itself: the visitor calls [`descend`] when (and only
//! when) it wants the subtree, which makes pruning and post-order work (write
//! the node, then its children) fall out naturally.
//!
//! The state tracks the current node, its parent, and the ancestor chain, and
//! carries a caller-defined scope value for accumulating output.

/// Read-only access to a node's ordered children.
pub trait ChildNodes: Sized {
    fn child_nodes(&self) -> &[Self];
}

/// Shared traversal state, threaded through every visit.
#[derive(Debug)]
pub struct WalkState<'t, T, S> {
    /// The node currently being visited.
    pub current: Option<&'t T>,
    /// Parent of the current node (`None` at the top level).
    pub parent: Option<&'t T>,
    /// Chain from the walk root down to `parent`, in order.
    pub ancestors: Vec<&'t T>,
    /// Caller-defined scope, e.g. an output accumulator.
    pub scope: S,
}

impl<'t, T, S> WalkState<'t, T, S> {
    pub fn new(scope: S) -> Self {
        WalkState { current: None, parent: None, ancestors: Vec::new(), scope }
    }
}

/// A tree visitor. Implementations call [`descend`] to continue into the
/// current node's children; not calling it prunes the subtree.
pub trait Visit<'t, T: ChildNodes, S>: Sized {
    fn visit(&mut self, node: &'t T, index: usize, siblings: &'t [T], state: &mut WalkState<'t, T, S>);
}

/// Walk the children of `root` in order. `root` itself is treated as a
/// container and is not visited.
pub fn walk<'t, T, S, V>(root: &'t T, visitor: &mut V, state: &mut WalkState<'t, T, S>)
where
    T: ChildNodes,
    V: Visit<'t, T, S>,
{
    debug_assert!(
        state.current.is_none() && state.ancestors.is_empty(),
        "walk requires a fresh WalkState"
    );
    visit_children(root, visitor, state);
}

/// Continue the walk into `node`'s children. Called by visitors as the
/// explicit continuation.
pub fn descend<'t, T, S, V>(node: &'t T, visitor: &mut V, state: &mut WalkState<'t, T, S>)
where
    T: ChildNodes,
    V: Visit<'t, T, S>,
{
    state.ancestors.push(node);
    visit_children(node, visitor, state);
    state.ancestors.pop();
}

fn visit_children<'t, T, S, V>(node: &'t T, visitor: &mut V, state: &mut WalkState<'t, T, S>)
where
    T: ChildNodes,
    V: Visit<'t, T, S>,
{
    let children = node.child_nodes();
    let saved_parent = state.parent;
    let saved_current = state.current;
    for (index, child) in children.iter().enumerate() {
        state.parent = state.ancestors.last().copied();
        state.current = Some(child);
        visitor.visit(child, index, children, state);
    }
    state.parent = saved_parent;
    state.current = saved_current;
}

use std::fmt::Debug;

use log::{debug, trace};
use serde::Serialize;

use crate::error::SearchError;
use crate::frontier::{Discipline, Frontier};

/// Supertrait that collects all the requirements on the NodeReference values
/// Must be copy, comparable and not references (hence 'static)
pub trait NodeReference: Copy + Eq + Debug + 'static {}

pub trait MapTrait {
    /// The type that can be used to reference nodes in the map
    type Reference: NodeReference;

    /// The move that leads from one node to a neighbor
    type Action: Copy + Debug + 'static;

    /// The type that the map uses for storage
    type Storage<T: Default + Copy + 'static>: MapStorage<T, Reference = Self::Reference>;

    fn start(&self) -> Self::Reference;

    fn goal(&self) -> Self::Reference;

    /// Return an iterator over the reachable neighbors of the provided node and the action
    /// required to go there. The order must be stable between calls.
    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)>;

    /// Create a storage for values of type T
    fn create_storage<T: Default + Copy + 'static>(&self) -> Self::Storage<T>;
}

pub trait MapStorage<T> {
    type Reference: NodeReference;

    fn get(&self, node: Self::Reference) -> T;
    fn get_mut(&mut self, node: Self::Reference) -> &mut T;
}

/// Index of an expanded node in the search tree
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NodeId(usize);

/// A state together with how it was reached. The root has neither parent nor action.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Node<R, A> {
    pub state: R,
    pub parent: Option<NodeId>,
    pub action: Option<A>,
}

/// Actions and the cells they lead to, ordered from start to goal.
/// The start cell itself is not part of `cells`.
#[derive(Debug, PartialEq, Clone, Eq, Serialize)]
pub struct Solution<A, R> {
    pub actions: Vec<A>,
    pub cells: Vec<R>,
}

impl<A, R> Solution<A, R> {
    /// Number of moves
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState<A, R> {
    Running,
    Succeeded(Solution<A, R>),
    NoPath,
}

impl<A, R> SearchState<A, R> {
    pub fn is_done(&self) -> bool {
        !matches!(self, SearchState::Running)
    }

    pub fn solution(&self) -> Option<&Solution<A, R>> {
        match self {
            SearchState::Succeeded(solution) => Some(solution),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExploreStats<S> {
    /// Nodes removed from the frontier, including the goal
    pub num_explored: usize,
    /// Every state that was expanded
    pub explored: S,
}

pub type Outcome<M> = (
    SearchState<<M as MapTrait>::Action, <M as MapTrait>::Reference>,
    ExploreStats<<M as MapTrait>::Storage<bool>>,
);

/// Uninformed search from the map's start to its goal.
///
/// Whether this is depth- or breadth-first is decided by the [`Discipline`]
/// of the frontier. All search state lives here; the map is only read.
pub struct PathFinder<'m, M: MapTrait> {
    map: &'m M,
    goal: M::Reference,
    frontier: Frontier<M::Reference, M::Action>,
    explored: M::Storage<bool>,
    tree: Vec<Node<M::Reference, M::Action>>,
    num_explored: usize,
    state: SearchState<M::Action, M::Reference>,
}

impl<'m, M: MapTrait> PathFinder<'m, M> {
    pub fn new(map: &'m M, discipline: Discipline) -> Self {
        let start = map.start();
        let goal = map.goal();
        debug!("searching {:?} -> {:?} ({:?})", start, goal, discipline);

        let mut frontier = Frontier::new(discipline);
        frontier.add(Node {
            state: start,
            parent: None,
            action: None,
        });

        Self {
            map,
            goal,
            frontier,
            explored: map.create_storage(),
            tree: Vec::new(),
            num_explored: 0,
            state: SearchState::Running,
        }
    }

    /// Run until the goal is found or the frontier runs dry
    pub fn finish(mut self) -> Result<Outcome<M>, SearchError> {
        while !self.step()?.is_done() {}
        Ok(self.into_outcome())
    }

    /// Like [`PathFinder::finish`] but gives up after `max_explored` nodes,
    /// leaving the state as [`SearchState::Running`].
    pub fn finish_within(mut self, max_explored: usize) -> Result<Outcome<M>, SearchError> {
        while self.num_explored < max_explored && !self.step()?.is_done() {}
        if !self.state.is_done() {
            debug!("search stopped after {} nodes", self.num_explored);
        }
        Ok(self.into_outcome())
    }

    /// Remove and process a single node. Once the search has terminated this
    /// keeps returning the final state.
    pub fn step(&mut self) -> Result<&SearchState<M::Action, M::Reference>, SearchError> {
        if self.state.is_done() {
            return Ok(&self.state);
        }

        if self.frontier.is_empty() {
            debug!("no path after exploring {} nodes", self.num_explored);
            self.state = SearchState::NoPath;
            return Ok(&self.state);
        }

        let node = self.frontier.remove()?;
        self.num_explored += 1;
        trace!("exploring {:?}", node.state);

        if node.state == self.goal {
            let solution = self.backtrack(node);
            debug!(
                "found goal: {} moves, {} nodes explored",
                solution.len(),
                self.num_explored
            );
            self.state = SearchState::Succeeded(solution);
            return Ok(&self.state);
        }

        *self.explored.get_mut(node.state) = true;
        let id = NodeId(self.tree.len());
        self.tree.push(node);

        let map = self.map;
        for (action, state) in map.neighbors_of(node.state) {
            if !self.frontier.contains_state(&state) && !self.explored.get(state) {
                self.frontier.add(Node {
                    state,
                    parent: Some(id),
                    action: Some(action),
                });
            }
        }

        Ok(&self.state)
    }

    /// Follow parent links from `node` back to the root
    fn backtrack(&self, node: Node<M::Reference, M::Action>) -> Solution<M::Action, M::Reference> {
        let mut actions = Vec::new();
        let mut cells = Vec::new();

        let mut node = node;
        while let (Some(parent), Some(action)) = (node.parent, node.action) {
            actions.push(action);
            cells.push(node.state);
            node = self.tree[parent.0];
        }

        actions.reverse();
        cells.reverse();

        Solution { actions, cells }
    }

    fn into_outcome(self) -> Outcome<M> {
        (
            self.state,
            ExploreStats {
                num_explored: self.num_explored,
                explored: self.explored,
            },
        )
    }

    pub fn state(&self) -> &SearchState<M::Action, M::Reference> {
        &self.state
    }

    pub fn num_explored(&self) -> usize {
        self.num_explored
    }

    pub fn get_explored(&self) -> &M::Storage<bool> {
        &self.explored
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn goal(&self) -> M::Reference {
        self.goal
    }
}

/// Search `map` to completion with the given discipline
pub fn solve<M: MapTrait>(map: &M, discipline: Discipline) -> Result<Outcome<M>, SearchError> {
    PathFinder::new(map, discipline).finish()
}

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::SearchError;
use crate::find::Node;

/// Which end of the frontier nodes are removed from
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Last in, first out: depth-first exploration
    Stack,
    /// First in, first out: breadth-first exploration
    #[default]
    Queue,
}

/// Discovered but not yet expanded nodes.
///
/// The removal discipline is fixed when the frontier is created.
#[derive(Debug)]
pub struct Frontier<R, A> {
    discipline: Discipline,
    nodes: VecDeque<Node<R, A>>,
}

impl<R: Eq, A> Frontier<R, A> {
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            nodes: VecDeque::new(),
        }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn add(&mut self, node: Node<R, A>) {
        self.nodes.push_back(node);
    }

    pub fn contains_state(&self, state: &R) -> bool {
        self.nodes.iter().any(|n| n.state == *state)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn remove(&mut self) -> Result<Node<R, A>, SearchError> {
        match self.discipline {
            Discipline::Stack => self.nodes.pop_back(),
            Discipline::Queue => self.nodes.pop_front(),
        }
        .ok_or(SearchError::FrontierEmpty)
    }
}

//! The hierarchical subgoal timer.
//!
//! `SplitTree` bundles the session fields, the arena of split nodes and the
//! active cursor. Every mutation goes through a method on the owned value and
//! reports whether anything changed, so the caller can decide between a full
//! and a partial redraw. Invalid transitions are silent no-ops.

use crate::core::clock::Clock;
use crate::models::{Interval, Session, SplitId, SplitNode};
use tracing::{debug, info};

/// Result of a tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tree changed structurally.
    Changed,
    /// The request was not applicable in the current state.
    Ignored,
}

impl Outcome {
    pub fn is_changed(self) -> bool {
        matches!(self, Outcome::Changed)
    }
}

/// Where a new split is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Child of the active split, or top level when nothing is active.
    Contextual,
    /// Child of the active split; refused when nothing is active.
    Nested,
}

#[derive(Debug)]
pub struct SplitTree<C: Clock> {
    clock: C,
    session: Session,
    nodes: Vec<SplitNode>,
    active: Option<SplitId>,
    capacity: usize,
}

impl<C: Clock> SplitTree<C> {
    pub fn new(clock: C, capacity: usize) -> Self {
        Self {
            clock,
            session: Session::default(),
            nodes: Vec::with_capacity(capacity.min(1024)),
            active: None,
            capacity,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ---------------------------
    // Session transitions
    // ---------------------------

    /// Start a fresh session. Always destructive: the previous tree and
    /// elapsed time are discarded.
    pub fn start_session(&mut self, goal: &str) -> Outcome {
        self.nodes.clear();
        self.active = None;
        self.session = Session {
            goal: goal.to_string(),
            elapsed_before: 0.0,
            run_start: Some(self.clock.now()),
            log_start: Some(self.clock.wall_clock_now()),
        };
        info!(goal = %self.session.goal, "session started");
        Outcome::Changed
    }

    pub fn stop_session(&mut self) -> Outcome {
        let Some(start) = self.session.run_start.take() else {
            debug!("stop ignored: session not running");
            return Outcome::Ignored;
        };
        self.session.elapsed_before += (self.clock.now() - start).max(0.0);
        info!(
            goal = %self.session.goal,
            elapsed = self.session.elapsed_before,
            "session stopped"
        );
        Outcome::Changed
    }

    /// Discard everything: time, goal, splits and cursor.
    pub fn reset_session(&mut self) -> Outcome {
        self.session = Session::default();
        self.nodes.clear();
        self.active = None;
        info!("session reset");
        Outcome::Changed
    }

    pub fn current_elapsed(&self) -> f64 {
        self.session.elapsed_at(self.clock.now())
    }

    // ---------------------------
    // Split transitions
    // ---------------------------

    pub fn open_split(&mut self, name: &str, placement: Placement) -> Outcome {
        if !self.session.is_running() {
            debug!(name, "open ignored: session not running");
            return Outcome::Ignored;
        }
        if placement == Placement::Nested && self.active.is_none() {
            debug!(name, "nested open ignored: no active split");
            return Outcome::Ignored;
        }
        if self.is_full() {
            debug!(name, capacity = self.capacity, "open ignored: capacity reached");
            return Outcome::Ignored;
        }

        let parent = self.active;
        let level = parent.map_or(0, |p| self.nodes[p.0].level + 1);
        let id = SplitId(self.nodes.len());
        let start = self.current_elapsed();
        self.nodes.push(SplitNode {
            name: name.to_string(),
            start,
            interval: Interval::Open,
            parent,
            level,
        });
        self.active = Some(id);
        info!(%id, name, level, "split opened");
        Outcome::Changed
    }

    /// Whether `open_split` with this placement would succeed right now.
    pub fn can_open(&self, placement: Placement) -> bool {
        self.session.is_running()
            && !(placement == Placement::Nested && self.active.is_none())
            && !self.is_full()
    }

    pub fn open_subgoal(&mut self, name: &str) -> Outcome {
        self.open_split(name, Placement::Contextual)
    }

    pub fn open_nested(&mut self, name: &str) -> Outcome {
        self.open_split(name, Placement::Nested)
    }

    /// Close the active split and move the cursor to its parent.
    pub fn close_active(&mut self) -> Outcome {
        let Some(id) = self.active else {
            debug!("close ignored: no active split");
            return Outcome::Ignored;
        };
        let end = self.current_elapsed();
        let node = &mut self.nodes[id.0];
        node.interval = Interval::Closed { end };
        self.active = node.parent;
        info!(%id, name = %node.name, end, "split closed");
        Outcome::Changed
    }

    /// Move the cursor to the parent without closing the split left behind.
    /// That split stays open for good and is never exported.
    pub fn ascend(&mut self) -> Outcome {
        let Some(id) = self.active else {
            debug!("ascend ignored: no active split");
            return Outcome::Ignored;
        };
        self.active = self.nodes[id.0].parent;
        info!(%id, "ascended, split left open");
        Outcome::Changed
    }

    // ---------------------------
    // Queries
    // ---------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn goal(&self) -> &str {
        &self.session.goal
    }

    /// All splits in creation order.
    pub fn nodes(&self) -> &[SplitNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (SplitId, &SplitNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (SplitId(i), n))
    }

    pub fn node(&self, id: SplitId) -> Option<&SplitNode> {
        self.nodes.get(id.0)
    }

    pub fn active(&self) -> Option<SplitId> {
        self.active
    }

    pub fn active_node(&self) -> Option<&SplitNode> {
        self.active.and_then(|id| self.node(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.nodes.len() >= self.capacity
    }

    /// Closed splits report their final duration, the active split its live
    /// duration. Splits abandoned by `ascend` have none.
    pub fn node_duration(&self, id: SplitId) -> Option<f64> {
        let node = self.node(id)?;
        match node.interval {
            Interval::Closed { .. } => node.duration(),
            Interval::Open if self.active == Some(id) => {
                Some((self.current_elapsed() - node.start).max(0.0))
            }
            Interval::Open => None,
        }
    }

    /// Parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: SplitId) -> Vec<SplitId> {
        let mut out = Vec::new();
        let mut cur = self.node(id).and_then(|n| n.parent);
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p.0].parent;
        }
        out
    }
}

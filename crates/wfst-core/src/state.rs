use crate::arc::FstArc;
use crate::error::{FstError, Result};
use crate::weight::{weight_equals, weight_hash_key, Finality, NON_FINAL};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

/// Identity of a state inside its [`MutableFst`](crate::fst::MutableFst).
///
/// Handles are issued once per inserted state and never reused by the same
/// container, so they stay valid as map keys while ids get renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateRef(u32);

impl StateRef {
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        StateRef(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A mutable FST state: final weight plus outgoing arcs.
///
/// Also records which states hold an arc into this one. That set is keyed by
/// [`StateRef`], never by the structural equality implemented below, so
/// editing a state never disturbs the sets it is a member of.
///
/// Arcs and back-references are only added by the owning container; see
/// [`MutableFst::add_arc`](crate::fst::MutableFst::add_arc).
#[derive(Debug, Clone)]
pub struct State {
    id: i32,
    final_weight: f64,
    arcs: Vec<FstArc>,
    incoming: FxHashSet<StateRef>,
    self_ref: Option<StateRef>,
    // only a sizing hint, ignored by eq/hash
    initial_arc_capacity: Option<usize>,
}

impl State {
    /// Id of a state that no container has numbered yet.
    pub const NO_ID: i32 = -1;

    /// An empty, non-final state.
    pub fn new() -> Self {
        Self::build(NON_FINAL, Vec::new(), None)
    }

    pub fn with_final_weight(final_weight: f64) -> Self {
        Self::build(final_weight, Vec::new(), None)
    }

    /// A non-final state with room for `num_arcs` arcs.
    pub fn with_capacity(num_arcs: usize) -> Self {
        Self::build(NON_FINAL, Vec::with_capacity(num_arcs), Some(num_arcs))
    }

    fn build(final_weight: f64, arcs: Vec<FstArc>, initial_arc_capacity: Option<usize>) -> Self {
        State {
            id: Self::NO_ID,
            final_weight,
            arcs,
            incoming: FxHashSet::default(),
            self_ref: None,
            initial_arc_capacity,
        }
    }

    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Handle assigned by the owning container, if any.
    #[inline]
    pub fn handle(&self) -> Option<StateRef> {
        self.self_ref
    }

    /// The final weight, or NaN for a non-final state.
    #[inline]
    pub fn final_weight(&self) -> f64 {
        self.final_weight
    }

    pub fn set_final_weight(&mut self, final_weight: f64) {
        self.final_weight = final_weight;
    }

    #[inline]
    pub fn finality(&self) -> Finality {
        Finality::of(self.final_weight)
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.finality().is_final()
    }

    #[inline]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn arc(&self, index: usize) -> Result<&FstArc> {
        self.arcs.get(index).ok_or_else(|| FstError::ArcIndexOutOfRange {
            index,
            count: self.arcs.len(),
        })
    }

    #[inline]
    pub fn arcs(&self) -> &[FstArc] {
        &self.arcs
    }

    pub fn has_arc_to(&self, target: StateRef) -> bool {
        self.arcs.iter().any(|a| a.next_state == target)
    }

    /// Sorts the outgoing arcs in place. The sort is stable, so arcs that
    /// compare equal keep their insertion order.
    pub fn arc_sort<F>(&mut self, cmp: F)
    where
        F: FnMut(&FstArc, &FstArc) -> Ordering,
    {
        self.arcs.sort_by(cmp);
    }

    /// States with at least one arc into this state, in no particular order.
    pub fn incoming_states(&self) -> impl Iterator<Item = StateRef> + '_ {
        self.incoming.iter().copied()
    }

    #[inline]
    pub fn incoming_count(&self) -> usize {
        self.incoming.len()
    }

    #[inline]
    pub fn has_incoming(&self, from: StateRef) -> bool {
        self.incoming.contains(&from)
    }

    pub fn initial_arc_capacity(&self) -> Option<usize> {
        self.initial_arc_capacity
    }

    // Container-only mutation. `MutableFst` keeps arcs and back-references
    // paired; nothing else in the crate calls these.

    pub(crate) fn set_id(&mut self, id: i32) {
        debug_assert!(id >= Self::NO_ID);
        self.id = id;
    }

    pub(crate) fn bind(&mut self, handle: StateRef) {
        self.self_ref = Some(handle);
    }

    /// Drops arcs and back-references before the state joins a container.
    pub(crate) fn detach(&mut self) {
        self.arcs.clear();
        self.incoming.clear();
        self.self_ref = None;
        self.id = Self::NO_ID;
    }

    pub(crate) fn add_arc(&mut self, arc: FstArc) {
        self.arcs.push(arc);
    }

    pub(crate) fn remove_arc(&mut self, index: usize) -> Result<FstArc> {
        if index >= self.arcs.len() {
            return Err(FstError::ArcIndexOutOfRange {
                index,
                count: self.arcs.len(),
            });
        }
        Ok(self.arcs.remove(index))
    }

    pub(crate) fn retain_arcs<F>(&mut self, keep: F)
    where
        F: FnMut(&FstArc) -> bool,
    {
        self.arcs.retain(keep);
    }

    /// Self-loops are never recorded.
    pub(crate) fn add_incoming_state(&mut self, from: StateRef) {
        if self.self_ref == Some(from) {
            return;
        }
        self.incoming.insert(from);
    }

    pub(crate) fn remove_incoming_state(&mut self, from: StateRef) {
        self.incoming.remove(&from);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural comparison: id, final weight and the arcs in order.
///
/// Handle, back-references and the capacity hint do not take part. Arc
/// destinations are compared by handle, which only lines up within one
/// container; use [`MutableFst::state_equals_in`](crate::fst::MutableFst::state_equals_in)
/// to compare states across containers by destination id.
pub fn state_equals(a: &State, b: &State) -> bool {
    a.id == b.id
        && weight_equals(a.final_weight, b.final_weight)
        && a.arcs.len() == b.arcs.len()
        && a.arcs.iter().zip(&b.arcs).all(|(x, y)| x == y)
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        state_equals(self, other)
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        weight_hash_key(self.final_weight).hash(state);
        self.arcs.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.id, self.final_weight)
    }
}

/// Mutable access to a state owned by a container.
///
/// Only the public write contract is reachable through it, so arcs and
/// back-references cannot drift apart.
pub struct StateMut<'a> {
    inner: &'a mut State,
}

impl<'a> StateMut<'a> {
    pub(crate) fn new(inner: &'a mut State) -> Self {
        StateMut { inner }
    }

    pub fn set_final_weight(&mut self, final_weight: f64) {
        self.inner.set_final_weight(final_weight);
    }

    pub fn arc_sort<F>(&mut self, cmp: F)
    where
        F: FnMut(&FstArc, &FstArc) -> Ordering,
    {
        self.inner.arc_sort(cmp);
    }
}

impl Deref for StateMut<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        &*self.inner
    }
}

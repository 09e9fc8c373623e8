use crate::arc::FstArc;
use crate::error::{FstError, Result};
use crate::logging;
use crate::state::{State, StateMut, StateRef};
use crate::weight::weight_equals;
use std::cmp::Ordering;
use std::ops::Index;

/// Mutable FST: an arena of [`State`]s addressed by [`StateRef`].
///
/// This is the only code that adds arcs or back-references to a state, so
/// every arc `p -> q` (with `p != q`) is mirrored by `p` in `q`'s incoming
/// set. Not synchronized; callers sharing one across threads must lock it.
#[derive(Debug, Clone, Default)]
pub struct MutableFst {
    // one slot per handle ever issued; None after deletion
    slots: Vec<Option<State>>,
    // id -> handle
    order: Vec<StateRef>,
    start: Option<StateRef>,
}

impl MutableFst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty FST with room for `num_states` states.
    pub fn with_capacity(num_states: usize) -> Self {
        MutableFst {
            slots: Vec::with_capacity(num_states),
            order: Vec::with_capacity(num_states),
            start: None,
        }
    }

    /// Insert `state`, numbering it after the existing states.
    ///
    /// The state enters without arcs or back-references; use
    /// [`add_arc`](Self::add_arc) to connect it.
    ///
    /// Fails with [`FstError::TooManyStates`] once the handle or id space is
    /// used up.
    pub fn add_state(&mut self, mut state: State) -> Result<StateRef> {
        let (handle, id) = next_handle_and_id(self.slots.len(), self.order.len())?;
        state.detach();
        state.bind(handle);
        state.set_id(id);
        self.slots.push(Some(state));
        self.order.push(handle);
        logging::log_state_added(handle, id);
        Ok(handle)
    }

    /// Insert an empty, non-final state.
    pub fn new_state(&mut self) -> Result<StateRef> {
        self.add_state(State::new())
    }

    #[inline]
    pub fn num_states(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn num_arcs(&self) -> usize {
        self.states().map(State::arc_count).sum()
    }

    pub fn contains(&self, handle: StateRef) -> bool {
        matches!(self.slots.get(handle.index()), Some(Some(_)))
    }

    pub fn state(&self, handle: StateRef) -> Option<&State> {
        self.slots.get(handle.index())?.as_ref()
    }

    /// Write access limited to the final weight and arc order.
    pub fn state_mut(&mut self, handle: StateRef) -> Option<StateMut<'_>> {
        self.slots
            .get_mut(handle.index())?
            .as_mut()
            .map(StateMut::new)
    }

    pub fn handle_of(&self, id: i32) -> Option<StateRef> {
        usize::try_from(id).ok().and_then(|i| self.order.get(i).copied())
    }

    pub fn state_by_id(&self, id: i32) -> Option<&State> {
        self.handle_of(id).and_then(|h| self.state(h))
    }

    /// States in id order.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.order.iter().filter_map(move |&h| self.state(h))
    }

    /// Handles in id order.
    pub fn handles(&self) -> impl Iterator<Item = StateRef> + '_ {
        self.order.iter().copied()
    }

    pub fn start(&self) -> Option<StateRef> {
        self.start
    }

    pub fn set_start(&mut self, handle: StateRef) -> Result<()> {
        self.get(handle)?;
        self.start = Some(handle);
        Ok(())
    }

    /// Append `arc` to `from` and record `from` as a predecessor of the
    /// arc's destination.
    pub fn add_arc(&mut self, from: StateRef, arc: FstArc) -> Result<()> {
        let to = arc.next_state;
        self.get(to)?;
        self.get_mut(from)?.add_arc(arc);
        self.get_mut(to)?.add_incoming_state(from);
        logging::log_arc_added(from, to, arc.ilabel, arc.olabel);
        Ok(())
    }

    /// Remove the arc at `index` from `from`.
    ///
    /// `from` stays in the destination's incoming set while any parallel arc
    /// still links the two.
    pub fn remove_arc(&mut self, from: StateRef, index: usize) -> Result<FstArc> {
        let source = self.get_mut(from)?;
        let arc = source.remove_arc(index)?;
        let to = arc.next_state;
        let still_linked = source.has_arc_to(to);
        if !still_linked {
            if let Ok(dest) = self.get_mut(to) {
                dest.remove_incoming_state(from);
            }
        }
        logging::log_arc_removed(from, to, still_linked);
        Ok(arc)
    }

    /// Delete a state with every arc into or out of it, then renumber the
    /// remaining states densely in their previous order.
    ///
    /// Returns the removed state as it was just before removal.
    pub fn delete_state(&mut self, handle: StateRef) -> Result<State> {
        let removed = self
            .slots
            .get_mut(handle.index())
            .and_then(Option::take)
            .ok_or(FstError::UnknownState(handle))?;

        // Arcs into the removed state
        let mut severed = 0;
        for pred in removed.incoming_states() {
            if let Ok(p) = self.get_mut(pred) {
                let before = p.arc_count();
                p.retain_arcs(|a| a.next_state != handle);
                severed += before - p.arc_count();
            }
        }

        // Back-references it held on its successors
        for arc in removed.arcs() {
            if let Ok(succ) = self.get_mut(arc.next_state) {
                succ.remove_incoming_state(handle);
            }
        }
        severed += removed.arc_count();

        if self.start == Some(handle) {
            self.start = None;
        }
        logging::log_state_deleted(handle, removed.id(), severed);

        self.order.retain(|&h| h != handle);
        self.renumber();
        Ok(removed)
    }

    /// Sort the arcs of every state with `cmp`.
    pub fn arc_sort<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&FstArc, &FstArc) -> Ordering,
    {
        for state in self.slots.iter_mut().flatten() {
            state.arc_sort(&mut cmp);
        }
    }

    fn renumber(&mut self) {
        // ids only shrink here, so they stay within what add_state checked
        for (&h, id) in self.order.iter().zip(0i32..) {
            if let Some(Some(state)) = self.slots.get_mut(h.index()) {
                state.set_id(id);
            }
        }
        logging::log_renumbered(self.order.len());
    }

    /// Id of the state `handle` names, or `State::NO_ID` for a dangling one.
    pub fn id_of(&self, handle: StateRef) -> i32 {
        self.state(handle).map_or(State::NO_ID, State::id)
    }

    /// Compare state `a` of `self` with state `b` of `other` by content.
    ///
    /// Like [`state_equals`](crate::state::state_equals), except that arc
    /// destinations are compared by their ids in the respective FSTs, so
    /// containers with different deletion histories can still match.
    pub fn state_equals_in(&self, a: StateRef, other: &MutableFst, b: StateRef) -> bool {
        match (self.state(a), other.state(b)) {
            (Some(x), Some(y)) => {
                x.id() == y.id()
                    && weight_equals(x.final_weight(), y.final_weight())
                    && x.arc_count() == y.arc_count()
                    && x
                        .arcs()
                        .iter()
                        .zip(y.arcs())
                        .all(|(p, q)| self.arc_equals_in(p, other, q))
            }
            _ => false,
        }
    }

    fn arc_equals_in(&self, a: &FstArc, other: &MutableFst, b: &FstArc) -> bool {
        a.ilabel == b.ilabel
            && a.olabel == b.olabel
            && weight_equals(a.weight, b.weight)
            && self.id_of(a.next_state) == other.id_of(b.next_state)
    }

    fn get(&self, handle: StateRef) -> Result<&State> {
        self.state(handle).ok_or(FstError::UnknownState(handle))
    }

    fn get_mut(&mut self, handle: StateRef) -> Result<&mut State> {
        self.slots
            .get_mut(handle.index())
            .and_then(Option::as_mut)
            .ok_or(FstError::UnknownState(handle))
    }
}

impl Index<StateRef> for MutableFst {
    type Output = State;

    /// Panics if `handle` does not name a live state.
    fn index(&self, handle: StateRef) -> &State {
        match self.state(handle) {
            Some(state) => state,
            None => panic!("no state for {:?}", handle),
        }
    }
}

fn next_handle_and_id(num_slots: usize, num_states: usize) -> Result<(StateRef, i32)> {
    let raw = u32::try_from(num_slots).map_err(|_| FstError::TooManyStates)?;
    let id = i32::try_from(num_states).map_err(|_| FstError::TooManyStates)?;
    Ok((StateRef::from_raw(raw), id))
}

/// Same start id and pairwise-equal states in id order, with arc
/// destinations compared by id.
impl PartialEq for MutableFst {
    fn eq(&self, other: &Self) -> bool {
        let start_id = |f: &MutableFst| f.start.map(|h| f.id_of(h));
        start_id(self) == start_id(other)
            && self.num_states() == other.num_states()
            && self
                .handles()
                .zip(other.handles())
                .all(|(a, b)| self.state_equals_in(a, other, b))
    }
}

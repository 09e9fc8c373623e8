//! Structured logging for container mutations.
//!
//! Events are emitted through `tracing` when the `tracing` feature is on;
//! otherwise every helper is a no-op.

use crate::state::StateRef;

pub fn log_state_added(handle: StateRef, id: i32) {
    #[cfg(feature = "tracing")]
    tracing::trace!(handle = handle.index(), id, "state added");

    #[cfg(not(feature = "tracing"))]
    let _ = (handle, id);
}

pub fn log_state_deleted(handle: StateRef, id: i32, severed_arcs: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(handle = handle.index(), id, severed_arcs, "state deleted");

    #[cfg(not(feature = "tracing"))]
    let _ = (handle, id, severed_arcs);
}

pub fn log_arc_added(from: StateRef, to: StateRef, ilabel: i32, olabel: i32) {
    #[cfg(feature = "tracing")]
    tracing::trace!(from = from.index(), to = to.index(), ilabel, olabel, "arc added");

    #[cfg(not(feature = "tracing"))]
    let _ = (from, to, ilabel, olabel);
}

pub fn log_arc_removed(from: StateRef, to: StateRef, still_linked: bool) {
    #[cfg(feature = "tracing")]
    tracing::trace!(from = from.index(), to = to.index(), still_linked, "arc removed");

    #[cfg(not(feature = "tracing"))]
    let _ = (from, to, still_linked);
}

pub fn log_renumbered(num_states: usize) {
    #[cfg(feature = "tracing")]
    tracing::debug!(num_states, "state ids renumbered");

    #[cfg(not(feature = "tracing"))]
    let _ = num_states;
}

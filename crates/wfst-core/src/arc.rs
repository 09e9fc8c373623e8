use crate::state::StateRef;
use crate::weight::{weight_equals, weight_hash_key};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Label reserved for the empty string on either tape.
pub const EPSILON: i32 = 0;

/// A labeled, weighted transition to `next_state`.
///
/// Equality compares the destination handle; see
/// [`MutableFst::state_equals_in`](crate::fst::MutableFst::state_equals_in)
/// for id-based comparison across containers.
#[derive(Debug, Clone, Copy)]
pub struct FstArc {
    pub ilabel: i32,
    pub olabel: i32,
    pub weight: f64,
    pub next_state: StateRef,
}

impl FstArc {
    pub fn new(ilabel: i32, olabel: i32, weight: f64, next_state: StateRef) -> Self {
        FstArc {
            ilabel,
            olabel,
            weight,
            next_state,
        }
    }
}

impl PartialEq for FstArc {
    fn eq(&self, other: &Self) -> bool {
        self.ilabel == other.ilabel
            && self.olabel == other.olabel
            && self.next_state == other.next_state
            && weight_equals(self.weight, other.weight)
    }
}

impl Eq for FstArc {}

impl Hash for FstArc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ilabel.hash(state);
        self.olabel.hash(state);
        self.next_state.hash(state);
        weight_hash_key(self.weight).hash(state);
    }
}

/// Orders arcs by input label, then output label.
pub fn ilabel_compare(a: &FstArc, b: &FstArc) -> Ordering {
    a.ilabel.cmp(&b.ilabel).then(a.olabel.cmp(&b.olabel))
}

/// Orders arcs by output label, then input label.
pub fn olabel_compare(a: &FstArc, b: &FstArc) -> Ordering {
    a.olabel.cmp(&b.olabel).then(a.ilabel.cmp(&b.ilabel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weight::NON_FINAL;
    use rustc_hash::FxHashSet;

    fn arc(i: i32, o: i32, w: f64, dest: u32) -> FstArc {
        FstArc::new(i, o, w, StateRef::from_raw(dest))
    }

    #[test]
    fn test_arc_equality() {
        assert_eq!(arc(1, 2, 0.5, 3), arc(1, 2, 0.5, 3));
        assert_ne!(arc(1, 2, 0.5, 3), arc(9, 2, 0.5, 3));
        assert_ne!(arc(1, 2, 0.5, 3), arc(1, 9, 0.5, 3));
        assert_ne!(arc(1, 2, 0.5, 3), arc(1, 2, 0.75, 3));
        assert_ne!(arc(1, 2, 0.5, 3), arc(1, 2, 0.5, 4));
    }

    #[test]
    fn test_arc_hash_follows_equality() {
        let mut set: FxHashSet<FstArc> = FxHashSet::default();
        set.insert(arc(1, 1, 0.0, 0));
        set.insert(arc(1, 1, -0.0, 0));
        set.insert(arc(1, 1, NON_FINAL, 0));
        set.insert(arc(1, 1, f64::from_bits(0x7ff0_0000_0000_0001), 0));
        // signed zeros collapse, NaN payloads collapse
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_label_comparators() {
        let a = arc(1, 5, 0.0, 0);
        let b = arc(2, 3, 0.0, 0);
        let c = arc(1, 4, 0.0, 0);
        assert_eq!(ilabel_compare(&a, &b), Ordering::Less);
        assert_eq!(ilabel_compare(&a, &c), Ordering::Greater);
        assert_eq!(olabel_compare(&a, &b), Ordering::Greater);
        assert_eq!(olabel_compare(&b, &c), Ordering::Less);
    }
}

pub mod arc;
pub mod error;
pub mod fst;
mod logging;
pub mod state;
pub mod weight;

pub use arc::{ilabel_compare, olabel_compare, FstArc, EPSILON};
pub use error::{FstError, Result};
pub use fst::MutableFst;
pub use state::{state_equals, State, StateMut, StateRef};
pub use weight::{Finality, NON_FINAL};

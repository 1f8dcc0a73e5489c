//! Modernization planning.
//!
//! Turns a finished analysis into an architecture proposal: current stack,
//! target stack, phased plan, effort bucket and migration narrative. Also
//! produces starter skeletons for proposals that have one.

#![warn(missing_docs)]

pub mod current_stack;
pub mod ecosystem;
pub mod effort;
pub mod phases;
pub mod proposal;
pub mod scaffold;
pub mod stack;

pub use ecosystem::{classify_stack, StackKeywords};
pub use proposal::ProposalGenerator;
pub use scaffold::{Scaffold, ScaffoldError};
pub use stack::propose;

//! Quick fixes for "type must implement the inherited abstract members" problems.
//!
//! The pipeline is: [`target::resolve`] finds the structural target of a diagnostic,
//! [`gap::gap`] computes the abstract members still to implement, [`order::order`] sorts them in
//! reading order, [`stub::synthesize`] turns each into a method stub, and [`assemble`] packages
//! everything into a [`CompositeFix`]. The alternative fix marks the type `abstract`.
//!
//! Fixes are structural. [`materialize`] turns them into text edits, [`preview`] renders a diff,
//! and [`lsp`] converts proposals into LSP code actions.

pub mod assemble;
pub mod diagnostic;
pub mod fix;
pub mod gap;
pub mod imports;
pub mod lsp;
pub mod materialize;
pub mod order;
pub mod preview;
pub mod proposals;
pub mod stub;
pub mod target;

pub use assemble::{
    compute_add_missing_members_fix, compute_make_abstract_fix, create_clean_up, CleanUpMode,
    FixContext,
};
pub use diagnostic::{Diagnostic, ProblemKind};
pub use fix::{BodyRef, CompositeFix, EditOperation, FixOperation};
pub use gap::Gap;
pub use imports::ImportContext;
pub use lsp::{code_action, code_actions};
pub use materialize::{apply_fix, materialize, LinkedRange, MaterializeError, MaterializedFix};
pub use preview::{preview, FixPreview};
pub use proposals::{quick_fix_proposals, ProposalKind, QuickFixProposal};
pub use stub::{MethodStub, StubParam};
pub use target::{StructuralTarget, TargetNode};

use jfix_core::TextRange;
use jfix_syntax::SyntaxKind;

/// Structural anomalies. Unresolvable targets and bindings are not errors; they yield no fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuickFixError {
    #[error("unknown target node {kind:?} at {range:?}")]
    UnknownTargetNode { kind: SyntaxKind, range: TextRange },
}

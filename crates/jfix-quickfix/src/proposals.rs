//! Ranked quick-fix proposals for a selection.

use std::collections::HashSet;

use jfix_core::TextRange;

use crate::assemble::{compute_add_missing_members_fix, compute_make_abstract_fix, FixContext};
use crate::diagnostic::Diagnostic;
use crate::fix::CompositeFix;
use crate::target::TargetNode;
use crate::QuickFixError;

const ADD_UNIMPLEMENTED_RELEVANCE: u32 = 10;
const MAKE_ABSTRACT_RELEVANCE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalKind {
    AddUnimplementedMethods,
    MakeTypeAbstract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickFixProposal {
    pub kind: ProposalKind,
    pub relevance: u32,
    pub diagnostic: Diagnostic,
    pub fix: CompositeFix,
}

impl QuickFixProposal {
    pub fn label(&self) -> &str {
        &self.fix.label
    }

    pub fn is_preferred(&self) -> bool {
        self.kind == ProposalKind::AddUnimplementedMethods
    }
}

/// Every fix offered for the diagnostics touching `selection`, most relevant first.
///
/// A target reported by several diagnostics gets each kind of proposal once.
pub fn quick_fix_proposals(
    ctx: &FixContext<'_>,
    diagnostics: &[Diagnostic],
    selection: TextRange,
) -> Result<Vec<QuickFixProposal>, QuickFixError> {
    let mut seen: HashSet<(ProposalKind, TargetNode)> = HashSet::new();
    let mut proposals = Vec::new();

    for diagnostic in diagnostics {
        if !diagnostic.kind.is_missing_implementation() || !diagnostic.intersects(selection) {
            continue;
        }
        let candidates = [
            (
                ProposalKind::AddUnimplementedMethods,
                ADD_UNIMPLEMENTED_RELEVANCE,
                compute_add_missing_members_fix(ctx, diagnostic)?,
            ),
            (
                ProposalKind::MakeTypeAbstract,
                MAKE_ABSTRACT_RELEVANCE,
                compute_make_abstract_fix(ctx, diagnostic)?,
            ),
        ];
        for (kind, relevance, fix) in candidates {
            let Some(fix) = fix else {
                continue;
            };
            if !fix.targets().all(|target| seen.insert((kind, target))) {
                continue;
            }
            proposals.push(QuickFixProposal {
                kind,
                relevance,
                diagnostic: *diagnostic,
                fix,
            });
        }
    }

    proposals.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    Ok(proposals)
}

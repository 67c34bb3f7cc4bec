//! Structural fix description. Fixes reference tree nodes and never hold text offsets.

use jfix_syntax::NodeId;

use crate::stub::MethodStub;
use crate::target::TargetNode;

/// Where an inserted member goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRef {
    Existing(NodeId),
    /// The body created by a preceding [`EditOperation::MaterializeAnonymousBody`].
    Materialized { constant: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOperation {
    /// Give a body-less enum constant an empty class body.
    MaterializeAnonymousBody { constant: NodeId },
    /// Insert `stub` as the last member of `body`.
    InsertMember { body: BodyRef, stub: MethodStub },
    AddModifier {
        declaration: NodeId,
        modifier: &'static str,
        /// Linked-position group the inserted modifier belongs to.
        linked: Option<String>,
    },
    AddImport { qualified_name: String },
}

/// The edits of one target, grouped under an edit-group label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOperation {
    pub label: String,
    pub target: TargetNode,
    pub additional_info: Option<String>,
    pub edits: Vec<EditOperation>,
}

impl FixOperation {
    pub fn inserted_members(&self) -> impl Iterator<Item = &MethodStub> {
        self.edits.iter().filter_map(|edit| match edit {
            EditOperation::InsertMember { stub, .. } => Some(stub),
            _ => None,
        })
    }
}

/// An immutable, all-or-nothing fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeFix {
    pub label: String,
    /// HTML description shown next to the proposal.
    pub additional_info: Option<String>,
    pub operations: Vec<FixOperation>,
}

impl CompositeFix {
    /// Every edit, in application order.
    pub fn edits(&self) -> impl Iterator<Item = &EditOperation> {
        self.operations.iter().flat_map(|op| op.edits.iter())
    }

    /// Names of the linked-position groups, in first-use order.
    pub fn linked_groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for edit in self.edits() {
            if let EditOperation::AddModifier {
                linked: Some(group),
                ..
            } = edit
            {
                if !groups.contains(&group.as_str()) {
                    groups.push(group);
                }
            }
        }
        groups
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetNode> + '_ {
        self.operations.iter().map(|op| op.target)
    }
}

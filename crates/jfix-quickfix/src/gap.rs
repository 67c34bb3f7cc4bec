//! Members a target still has to implement.

use jfix_types::MemberSignature;

use crate::target::{StructuralTarget, TargetNode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gap {
    pub members: Vec<MemberSignature>,
    /// The members include the abstract methods the declaring enum declares itself.
    pub implement_abstracts_of_input: bool,
}

impl Gap {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Unresolved targets have an empty gap.
pub fn gap(target: &StructuralTarget<'_>) -> Gap {
    let Some(descriptor) = &target.descriptor else {
        return Gap::default();
    };
    match target.node {
        // Without a body the constant resolves to its enum, whose own abstract methods are the
        // ones to implement.
        TargetNode::EnumConstant { body: None, .. } => Gap {
            members: descriptor.abstract_members_of_input().to_vec(),
            implement_abstracts_of_input: true,
        },
        _ => Gap {
            members: descriptor.abstract_members().to_vec(),
            implement_abstracts_of_input: false,
        },
    }
}

//! Deterministic ordering of the members to implement.

use std::cmp::Ordering;

use jfix_types::{MemberSignature, TypeDescriptor};

/// Sort `members` in reading order of `descriptor`'s hierarchy.
///
/// Members of types on the hierarchy come first, by the rank of their declaring type. Other
/// declaring types follow by source position (unknown last), then qualified name. Within one
/// declaring type members keep their declaration order; name and erased parameter types break
/// any remaining tie.
pub fn order(descriptor: &TypeDescriptor, members: &[MemberSignature]) -> Vec<MemberSignature> {
    let mut ordered = members.to_vec();
    ordered.sort_by(|a, b| compare(descriptor, a, b));
    ordered
}

fn compare(descriptor: &TypeDescriptor, a: &MemberSignature, b: &MemberSignature) -> Ordering {
    let rank = |m: &MemberSignature| {
        descriptor
            .hierarchy_rank(&m.declaring_type.qualified_name)
            .unwrap_or(usize::MAX)
    };
    rank(a)
        .cmp(&rank(b))
        .then_with(|| {
            let (pa, pb) = (&a.declaring_type.position, &b.declaring_type.position);
            match (pa, pb) {
                (Some(pa), Some(pb)) => pa.cmp(pb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
        .then_with(|| {
            a.declaring_type
                .qualified_name
                .cmp(&b.declaring_type.qualified_name)
        })
        .then_with(|| a.index.cmp(&b.index))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.erased_param_keys().cmp(&b.erased_param_keys()))
}

use jfix_core::TextRange;

/// Problem kinds reported by the compiler; only the missing-implementation kinds are fixable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    /// "The type X must implement the inherited abstract method Y".
    AbstractMethodMustBeImplemented,
    /// "The enum X must implement the abstract method Y".
    EnumAbstractMethodMustBeImplemented,
    /// "The enum constant X must implement the abstract method Y".
    EnumConstantMustImplementAbstractMethod,
    Other,
}

impl ProblemKind {
    pub fn is_missing_implementation(self) -> bool {
        !matches!(self, ProblemKind::Other)
    }
}

/// A problem location: the span the compiler reported plus its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub range: TextRange,
    pub kind: ProblemKind,
}

impl Diagnostic {
    pub fn new(range: TextRange, kind: ProblemKind) -> Self {
        Self { range, kind }
    }

    /// Whether the diagnostic touches `selection`. An empty selection is a caret.
    pub fn intersects(&self, selection: TextRange) -> bool {
        let a = self.range;
        let b = selection;
        if a.is_empty() {
            return b.start() <= a.start() && a.start() <= b.end();
        }
        if b.is_empty() {
            // A caret right after the reported token still counts.
            return a.start() <= b.start() && b.start() <= a.end();
        }
        a.start() < b.end() && b.start() < a.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfix_core::text_range;

    #[test]
    fn caret_selections_touch_their_token() {
        let diag = Diagnostic::new(text_range(6, 12), ProblemKind::AbstractMethodMustBeImplemented);
        assert!(diag.intersects(text_range(6, 6)));
        assert!(diag.intersects(text_range(12, 12)));
        assert!(!diag.intersects(text_range(13, 13)));
        assert!(diag.intersects(text_range(0, 7)));
        assert!(!diag.intersects(text_range(0, 6)));
    }

    #[test]
    fn only_missing_implementation_kinds_are_fixable() {
        assert!(ProblemKind::EnumConstantMustImplementAbstractMethod.is_missing_implementation());
        assert!(!ProblemKind::Other.is_missing_implementation());
    }
}

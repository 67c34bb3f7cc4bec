use jfix_config::CodeGenerationSettings;
use jfix_core::{TextRange, TextSize};
use jfix_quickfix::{
    apply_fix, compute_add_missing_members_fix, compute_make_abstract_fix, create_clean_up,
    CleanUpMode, CompositeFix, Diagnostic, FixContext, ProblemKind,
};
use jfix_syntax::{parse_java, SourceTree};
use jfix_test_utils::extract_ranges;
use jfix_types::{SourceResolver, TypeStore};

/// A parsed unit with its marked problem spans, resolved against the JDK stubs.
pub struct Fixture {
    pub store: TypeStore,
    pub tree: SourceTree,
    pub spans: Vec<TextRange>,
    pub settings: CodeGenerationSettings,
}

impl Fixture {
    pub fn new(fixture: &str) -> Self {
        let (text, spans) = extract_ranges(fixture);
        Self {
            store: TypeStore::with_jdk_stubs(),
            tree: parse_java(&text),
            spans,
            settings: CodeGenerationSettings::default(),
        }
    }

    pub fn with_library(mut self, unit: &str, text: &str) -> Self {
        self.store.add_source(unit, text);
        self
    }

    pub fn with_settings(mut self, settings: CodeGenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn text(&self) -> &str {
        self.tree.text()
    }

    /// Missing-implementation diagnostic on the `index`-th marked span.
    pub fn diagnostic(&self, index: usize) -> Diagnostic {
        Diagnostic::new(self.spans[index], ProblemKind::AbstractMethodMustBeImplemented)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        (0..self.spans.len()).map(|i| self.diagnostic(i)).collect()
    }

    pub fn with_context<T>(&self, f: impl FnOnce(&FixContext<'_>) -> T) -> T {
        let resolver =
            SourceResolver::new(&self.store).with_null_annotations(self.settings.null_annotations.clone());
        let ctx = FixContext::new(&self.tree, &resolver, &self.settings);
        f(&ctx)
    }

    pub fn add_fix(&self, diagnostic: &Diagnostic) -> Option<CompositeFix> {
        self.with_context(|ctx| compute_add_missing_members_fix(ctx, diagnostic).unwrap())
    }

    pub fn abstract_fix(&self, diagnostic: &Diagnostic) -> Option<CompositeFix> {
        self.with_context(|ctx| compute_make_abstract_fix(ctx, diagnostic).unwrap())
    }

    pub fn clean_up(&self, mode: CleanUpMode) -> Option<CompositeFix> {
        let diagnostics = self.diagnostics();
        self.with_context(|ctx| create_clean_up(ctx, mode, &diagnostics).unwrap())
    }

    pub fn apply(&self, fix: &CompositeFix) -> String {
        apply_fix(&self.tree, fix, &self.settings).unwrap()
    }

    /// Apply the add-members fix of the first marked span.
    pub fn apply_add_fix(&self) -> String {
        let fix = self
            .add_fix(&self.diagnostic(0))
            .expect("expected an add-unimplemented-methods fix");
        self.apply(&fix)
    }
}

/// Range of `name` where it directly follows `prefix` in `text`.
pub fn span_of(text: &str, prefix: &str, name: &str) -> TextRange {
    let needle = format!("{prefix}{name}");
    let start = text
        .find(&needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{text}"))
        + prefix.len();
    TextRange::at(TextSize::from(start as u32), TextSize::of(name))
}

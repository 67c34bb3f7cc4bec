use rowan::Language;

/// Unified syntax kind for both tokens and tree nodes.
///
/// Statement and expression structure is not modelled: method bodies, initializers and arguments
/// are kept as token runs, with class-instance creations (and their anonymous bodies) and local
/// type declarations lifted out as nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // --- Trivia ---
    Whitespace,
    LineComment,
    BlockComment,

    // --- Identifiers & literals ---
    Identifier,
    NumberLiteral,
    CharLiteral,
    StringLiteral,
    TextBlock,

    // --- Keywords (reserved) ---
    AbstractKw,
    BooleanKw,
    ByteKw,
    CharKw,
    ClassKw,
    DefaultKw,
    DoubleKw,
    EnumKw,
    ExtendsKw,
    FinalKw,
    FloatKw,
    ImplementsKw,
    ImportKw,
    IntKw,
    InterfaceKw,
    LongKw,
    NativeKw,
    NewKw,
    PackageKw,
    PrivateKw,
    ProtectedKw,
    PublicKw,
    ShortKw,
    StaticKw,
    StrictfpKw,
    SuperKw,
    SynchronizedKw,
    ThrowsKw,
    TransientKw,
    VoidKw,
    VolatileKw,
    /// Any other reserved word (`return`, `if`, `this`, ...). Only meaningful inside opaque runs.
    OtherKw,

    // --- Contextual keywords ---
    RecordKw,
    SealedKw,
    NonSealedKw,
    PermitsKw,

    // --- Punctuation ---
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Ellipsis,
    At,
    Less,
    Greater,
    Question,
    Amp,
    Eq,
    /// Operators and punctuation the declaration grammar never looks at.
    Punct,

    Error,
    Eof,

    // --- Nodes ---
    CompilationUnit,
    PackageDeclaration,
    ImportDeclaration,
    Name,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    RecordDeclaration,
    AnnotationTypeDeclaration,
    Modifiers,
    Annotation,
    AnnotationArguments,
    SimpleName,
    TypeParameters,
    TypeParameter,
    TypeRef,
    TypeArguments,
    WildcardType,
    ExtendsClause,
    ImplementsClause,
    PermitsClause,
    ClassBody,
    AnonymousClassBody,
    EnumConstant,
    Arguments,
    RecordComponents,
    MethodDeclaration,
    ConstructorDeclaration,
    ParameterList,
    Parameter,
    Dims,
    ThrowsClause,
    DefaultValue,
    Block,
    FieldDeclaration,
    VariableDeclarator,
    Initializer,
    Expression,
    ClassInstanceCreation,
    EmptyDeclaration,
    ErrorNode,

    #[doc(hidden)]
    __Last,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment
        )
    }

    pub fn is_contextual_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::RecordKw
                | SyntaxKind::SealedKw
                | SyntaxKind::NonSealedKw
                | SyntaxKind::PermitsKw
        )
    }

    pub fn is_identifier_like(self) -> bool {
        self == SyntaxKind::Identifier || self.is_contextual_keyword()
    }

    /// Tokens are leaves; everything from [`SyntaxKind::CompilationUnit`] on is a node.
    pub fn is_token(self) -> bool {
        self < SyntaxKind::CompilationUnit
    }

    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::RecordDeclaration
                | SyntaxKind::AnnotationTypeDeclaration
        )
    }

    pub fn is_body(self) -> bool {
        matches!(self, SyntaxKind::ClassBody | SyntaxKind::AnonymousClassBody)
    }

    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BooleanKw
                | SyntaxKind::ByteKw
                | SyntaxKind::CharKw
                | SyntaxKind::DoubleKw
                | SyntaxKind::FloatKw
                | SyntaxKind::IntKw
                | SyntaxKind::LongKw
                | SyntaxKind::ShortKw
        )
    }

    pub fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::PublicKw
                | SyntaxKind::PrivateKw
                | SyntaxKind::ProtectedKw
                | SyntaxKind::StaticKw
                | SyntaxKind::AbstractKw
                | SyntaxKind::FinalKw
                | SyntaxKind::NativeKw
                | SyntaxKind::SynchronizedKw
                | SyntaxKind::TransientKw
                | SyntaxKind::VolatileKw
                | SyntaxKind::StrictfpKw
                | SyntaxKind::DefaultKw
                | SyntaxKind::SealedKw
                | SyntaxKind::NonSealedKw
        )
    }

    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        Some(match text {
            "abstract" => SyntaxKind::AbstractKw,
            "boolean" => SyntaxKind::BooleanKw,
            "byte" => SyntaxKind::ByteKw,
            "char" => SyntaxKind::CharKw,
            "class" => SyntaxKind::ClassKw,
            "default" => SyntaxKind::DefaultKw,
            "double" => SyntaxKind::DoubleKw,
            "enum" => SyntaxKind::EnumKw,
            "extends" => SyntaxKind::ExtendsKw,
            "final" => SyntaxKind::FinalKw,
            "float" => SyntaxKind::FloatKw,
            "implements" => SyntaxKind::ImplementsKw,
            "import" => SyntaxKind::ImportKw,
            "int" => SyntaxKind::IntKw,
            "interface" => SyntaxKind::InterfaceKw,
            "long" => SyntaxKind::LongKw,
            "native" => SyntaxKind::NativeKw,
            "new" => SyntaxKind::NewKw,
            "package" => SyntaxKind::PackageKw,
            "private" => SyntaxKind::PrivateKw,
            "protected" => SyntaxKind::ProtectedKw,
            "public" => SyntaxKind::PublicKw,
            "short" => SyntaxKind::ShortKw,
            "static" => SyntaxKind::StaticKw,
            "strictfp" => SyntaxKind::StrictfpKw,
            "super" => SyntaxKind::SuperKw,
            "synchronized" => SyntaxKind::SynchronizedKw,
            "throws" => SyntaxKind::ThrowsKw,
            "transient" => SyntaxKind::TransientKw,
            "void" => SyntaxKind::VoidKw,
            "volatile" => SyntaxKind::VolatileKw,
            "assert" | "break" | "case" | "catch" | "const" | "continue" | "do" | "else"
            | "finally" | "for" | "goto" | "if" | "instanceof" | "return" | "switch" | "this"
            | "throw" | "try" | "while" | "true" | "false" | "null" => SyntaxKind::OtherKw,
            // Contextual keywords.
            "record" => SyntaxKind::RecordKw,
            "sealed" => SyntaxKind::SealedKw,
            "non-sealed" => SyntaxKind::NonSealedKw,
            "permits" => SyntaxKind::PermitsKw,
            _ => return None,
        })
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(value: SyntaxKind) -> Self {
        rowan::SyntaxKind(value as u16)
    }
}

/// Rowan language marker for Java.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaLanguage {}

impl Language for JavaLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        if raw.0 < SyntaxKind::__Last as u16 {
            // SAFETY: `SyntaxKind` is `repr(u16)` with contiguous discriminants below `__Last`.
            unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
        } else {
            SyntaxKind::ErrorNode
        }
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<JavaLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JavaLanguage>;

use std::collections::VecDeque;

use rowan::{Checkpoint, GreenNodeBuilder};
use text_size::TextRange;

use crate::lexer::{lex, Token};
use crate::syntax_kind::SyntaxKind;
use crate::tree::SourceTree;
use crate::ParseError;

/// Parse a Java compilation unit down to declarations.
///
/// Never fails: malformed input produces a tree (with `ErrorNode`s) plus [`ParseError`]s,
/// available through [`SourceTree::errors`].
pub fn parse_java(input: &str) -> SourceTree {
    Parser::new(input).parse()
}

struct Parser<'a> {
    input: &'a str,
    tokens: VecDeque<Token>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: VecDeque::from(lex(input)),
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> SourceTree {
        self.builder.start_node(SyntaxKind::CompilationUnit.into());
        self.eat_trivia();

        if self.at(SyntaxKind::PackageKw) {
            self.parse_package_decl();
        }

        while self.at(SyntaxKind::ImportKw) {
            self.parse_import_decl();
        }

        while !self.at(SyntaxKind::Eof) {
            if self.at(SyntaxKind::Semicolon) {
                self.builder.start_node(SyntaxKind::EmptyDeclaration.into());
                self.bump();
                self.builder.finish_node();
            } else if self.at(SyntaxKind::ImportKw) {
                self.error_here("import declarations must precede type declarations");
                self.parse_import_decl();
            } else if self.at_type_decl_start() {
                self.parse_type_declaration();
            } else {
                self.recover_top_level();
            }
        }

        self.eat_trivia();
        self.builder.finish_node();
        SourceTree::new(self.input, self.builder.finish(), self.errors)
    }

    fn parse_package_decl(&mut self) {
        self.builder.start_node(SyntaxKind::PackageDeclaration.into());
        self.expect(SyntaxKind::PackageKw, "expected `package`");
        self.parse_name();
        self.expect(SyntaxKind::Semicolon, "expected `;` after package declaration");
        self.builder.finish_node();
    }

    fn parse_import_decl(&mut self) {
        self.builder.start_node(SyntaxKind::ImportDeclaration.into());
        self.expect(SyntaxKind::ImportKw, "expected `import`");
        if self.at(SyntaxKind::StaticKw) {
            self.bump();
        }
        self.parse_name();
        if self.at(SyntaxKind::Dot) && self.nth_is_punct(1, "*") {
            self.bump(); // .
            self.bump(); // *
        }
        self.expect(SyntaxKind::Semicolon, "expected `;` after import declaration");
        self.builder.finish_node();
    }

    fn parse_type_declaration(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_modifiers();
        self.parse_type_declaration_inner(checkpoint);
    }

    fn parse_type_declaration_inner(&mut self, checkpoint: Checkpoint) {
        match self.current() {
            SyntaxKind::At if self.nth(1) == SyntaxKind::InterfaceKw => {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::AnnotationTypeDeclaration.into());
                self.bump(); // @
                self.bump(); // interface
                self.parse_simple_name("expected annotation type name");
                self.parse_class_body(SyntaxKind::ClassBody);
                self.builder.finish_node();
            }
            SyntaxKind::ClassKw => {
                self.parse_class_decl(checkpoint, SyntaxKind::ClassDeclaration)
            }
            SyntaxKind::InterfaceKw => {
                self.parse_class_decl(checkpoint, SyntaxKind::InterfaceDeclaration)
            }
            SyntaxKind::EnumKw => self.parse_enum_decl(checkpoint),
            SyntaxKind::RecordKw => self.parse_record_decl(checkpoint),
            _ => {
                self.builder.start_node_at(checkpoint, SyntaxKind::ErrorNode.into());
                self.error_here("expected type declaration");
                self.recover_to(&[
                    SyntaxKind::ClassKw,
                    SyntaxKind::InterfaceKw,
                    SyntaxKind::EnumKw,
                    SyntaxKind::RBrace,
                    SyntaxKind::Eof,
                ]);
                self.builder.finish_node();
            }
        }
    }

    fn parse_class_decl(&mut self, checkpoint: Checkpoint, decl_kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, decl_kind.into());
        // `class`/`interface` keyword already in current()
        self.bump();
        self.parse_simple_name("expected name");
        if self.at(SyntaxKind::Less) {
            self.parse_type_parameters();
        }
        if self.at(SyntaxKind::ExtendsKw) {
            self.parse_type_list_clause(SyntaxKind::ExtendsClause);
        }
        if self.at(SyntaxKind::ImplementsKw) {
            self.parse_type_list_clause(SyntaxKind::ImplementsClause);
        }
        if self.at(SyntaxKind::PermitsKw) {
            self.parse_type_list_clause(SyntaxKind::PermitsClause);
        }
        self.parse_class_body(SyntaxKind::ClassBody);
        self.builder.finish_node();
    }

    fn parse_enum_decl(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::EnumDeclaration.into());
        self.expect(SyntaxKind::EnumKw, "expected `enum`");
        self.parse_simple_name("expected enum name");
        if self.at(SyntaxKind::ImplementsKw) {
            self.parse_type_list_clause(SyntaxKind::ImplementsClause);
        }

        self.builder.start_node(SyntaxKind::ClassBody.into());
        self.expect(SyntaxKind::LBrace, "expected `{` for enum body");
        while self.at(SyntaxKind::At) || self.at_ident_like() {
            self.parse_enum_constant();
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
            // Class body declarations after constants.
            while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
                self.parse_class_member();
            }
        }
        self.expect(SyntaxKind::RBrace, "expected `}` to close enum body");
        self.builder.finish_node(); // ClassBody
        self.builder.finish_node(); // EnumDeclaration
    }

    fn parse_enum_constant(&mut self) {
        self.builder.start_node(SyntaxKind::EnumConstant.into());
        self.parse_modifiers();
        self.parse_simple_name("expected enum constant name");
        if self.at(SyntaxKind::LParen) {
            self.parse_arguments();
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_class_body(SyntaxKind::AnonymousClassBody);
        }
        self.builder.finish_node();
    }

    fn parse_record_decl(&mut self, checkpoint: Checkpoint) {
        self.builder
            .start_node_at(checkpoint, SyntaxKind::RecordDeclaration.into());
        self.expect(SyntaxKind::RecordKw, "expected `record`");
        self.parse_simple_name("expected record name");
        if self.at(SyntaxKind::Less) {
            self.parse_type_parameters();
        }
        if self.at(SyntaxKind::LParen) {
            self.builder.start_node(SyntaxKind::RecordComponents.into());
            self.parse_parenthesized_parameters();
            self.builder.finish_node();
        } else {
            self.error_here("expected record header");
        }
        if self.at(SyntaxKind::ImplementsKw) {
            self.parse_type_list_clause(SyntaxKind::ImplementsClause);
        }
        self.parse_class_body(SyntaxKind::ClassBody);
        self.builder.finish_node();
    }

    fn parse_type_list_clause(&mut self, clause: SyntaxKind) {
        self.builder.start_node(clause.into());
        self.bump(); // extends / implements / permits
        self.parse_type();
        while self.at(SyntaxKind::Comma) {
            self.bump();
            self.parse_type();
        }
        self.builder.finish_node();
    }

    fn parse_class_body(&mut self, body_kind: SyntaxKind) {
        self.builder.start_node(body_kind.into());
        self.expect(SyntaxKind::LBrace, "expected `{`");
        while !self.at(SyntaxKind::RBrace) && !self.at(SyntaxKind::Eof) {
            self.parse_class_member();
        }
        self.expect(SyntaxKind::RBrace, "expected `}`");
        self.builder.finish_node();
    }

    fn parse_class_member(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_modifiers();

        // Initializer blocks.
        if self.at(SyntaxKind::LBrace) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::Initializer.into());
            self.parse_block();
            self.builder.finish_node();
            return;
        }

        // Empty declaration.
        if self.at(SyntaxKind::Semicolon) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::EmptyDeclaration.into());
            self.bump();
            self.builder.finish_node();
            return;
        }

        // Nested types.
        if self.at_nested_type_keyword() {
            self.parse_type_declaration_inner(checkpoint);
            return;
        }

        // Generic methods and constructors.
        if self.at(SyntaxKind::Less) {
            self.parse_type_parameters();
        }

        // Constructor: Ident '('
        if self.at_ident_like() && self.nth(1) == SyntaxKind::LParen {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::ConstructorDeclaration.into());
            self.parse_simple_name("expected constructor name");
            self.parse_parameter_list();
            self.parse_throws_opt();
            self.parse_method_body_opt();
            self.builder.finish_node();
            return;
        }

        // Compact canonical record constructor: Ident '{'
        if self.at_ident_like() && self.nth(1) == SyntaxKind::LBrace {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::ConstructorDeclaration.into());
            self.parse_simple_name("expected constructor name");
            self.parse_block();
            self.builder.finish_node();
            return;
        }

        if self.at_type_start() {
            self.parse_type();
            if !self.at_ident_like() {
                self.builder.start_node_at(checkpoint, SyntaxKind::ErrorNode.into());
                self.error_here("expected member name");
                self.recover_to_class_member_boundary();
                self.builder.finish_node();
                return;
            }

            // After type + identifier: method if '(' follows, else field.
            if self.nth(1) == SyntaxKind::LParen {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::MethodDeclaration.into());
                self.parse_simple_name("expected method name");
                self.parse_parameter_list();
                self.parse_dims_opt();
                self.parse_throws_opt();
                if self.at(SyntaxKind::DefaultKw) {
                    self.builder.start_node(SyntaxKind::DefaultValue.into());
                    self.bump();
                    self.scan_opaque(&[SyntaxKind::Semicolon]);
                    self.builder.finish_node();
                }
                self.parse_method_body_opt();
                self.builder.finish_node();
            } else {
                self.builder
                    .start_node_at(checkpoint, SyntaxKind::FieldDeclaration.into());
                self.parse_variable_declarators();
                self.expect(SyntaxKind::Semicolon, "expected `;` after field declaration");
                self.builder.finish_node();
            }
            return;
        }

        // Give up: recover.
        self.builder.start_node_at(checkpoint, SyntaxKind::ErrorNode.into());
        self.error_here("unexpected token in class body");
        self.recover_to_class_member_boundary();
        self.builder.finish_node();
    }

    fn parse_method_body_opt(&mut self) {
        if self.at(SyntaxKind::LBrace) {
            self.parse_block();
        } else {
            self.expect(SyntaxKind::Semicolon, "expected `;` or method body");
        }
    }

    fn parse_throws_opt(&mut self) {
        if !self.at(SyntaxKind::ThrowsKw) {
            return;
        }
        self.parse_type_list_clause(SyntaxKind::ThrowsClause);
    }

    fn parse_modifiers(&mut self) {
        self.builder.start_node(SyntaxKind::Modifiers.into());
        loop {
            if self.at(SyntaxKind::At) {
                // `@interface` is an annotation *type* declaration, not an annotation modifier.
                if self.nth(1) == SyntaxKind::InterfaceKw {
                    break;
                }
                self.parse_annotation();
                continue;
            }
            let kind = self.current();
            // `sealed`/`non-sealed` are only modifiers when something declaration-like follows.
            let contextual = matches!(kind, SyntaxKind::SealedKw | SyntaxKind::NonSealedKw);
            if kind.is_modifier_keyword() && !(contextual && self.nth(1) == SyntaxKind::Identifier)
            {
                self.bump();
                continue;
            }
            break;
        }
        self.builder.finish_node();
    }

    fn parse_annotation(&mut self) {
        self.builder.start_node(SyntaxKind::Annotation.into());
        self.expect(SyntaxKind::At, "expected `@`");
        self.parse_name();
        if self.at(SyntaxKind::LParen) {
            self.builder.start_node(SyntaxKind::AnnotationArguments.into());
            self.bump();
            self.scan_opaque(&[]);
            self.expect(SyntaxKind::RParen, "expected `)`");
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    fn parse_name(&mut self) {
        self.builder.start_node(SyntaxKind::Name.into());
        self.expect_ident_like("expected name");
        while self.at(SyntaxKind::Dot) && self.nth(1).is_identifier_like() {
            self.bump(); // .
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_simple_name(&mut self, message: &str) {
        if self.at_ident_like() {
            self.builder.start_node(SyntaxKind::SimpleName.into());
            self.bump();
            self.builder.finish_node();
        } else {
            self.error_here(message);
        }
    }

    fn parse_type_parameters(&mut self) {
        self.builder.start_node(SyntaxKind::TypeParameters.into());
        self.expect(SyntaxKind::Less, "expected `<`");
        while !self.at(SyntaxKind::Greater) && !self.at(SyntaxKind::Eof) {
            self.builder.start_node(SyntaxKind::TypeParameter.into());
            while self.at(SyntaxKind::At) {
                self.parse_annotation();
            }
            self.parse_simple_name("expected type parameter name");
            if self.at(SyntaxKind::ExtendsKw) {
                self.bump();
                self.parse_type();
                while self.at(SyntaxKind::Amp) {
                    self.bump();
                    self.parse_type();
                }
            }
            self.builder.finish_node();
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.expect(SyntaxKind::Greater, "expected `>`");
        self.builder.finish_node();
    }

    fn parse_parameter_list(&mut self) {
        self.builder.start_node(SyntaxKind::ParameterList.into());
        self.parse_parenthesized_parameters();
        self.builder.finish_node();
    }

    fn parse_parenthesized_parameters(&mut self) {
        self.expect(SyntaxKind::LParen, "expected `(`");
        while !self.at(SyntaxKind::RParen) && !self.at(SyntaxKind::Eof) {
            self.builder.start_node(SyntaxKind::Parameter.into());
            self.parse_modifiers();
            if self.at_type_start() {
                self.parse_type();
            } else {
                self.error_here("expected parameter type");
            }
            if self.at(SyntaxKind::Ellipsis) {
                self.bump();
            }
            if self.at_text(SyntaxKind::OtherKw, "this") {
                // Receiver parameter.
                self.bump();
            } else {
                self.parse_simple_name("expected parameter name");
            }
            self.parse_dims_opt();
            self.builder.finish_node();

            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            if !self.at(SyntaxKind::RParen) {
                self.error_here("expected `,` or `)`");
                self.recover_to(&[SyntaxKind::RParen, SyntaxKind::LBrace, SyntaxKind::Semicolon]);
            }
            break;
        }
        self.expect(SyntaxKind::RParen, "expected `)`");
    }

    fn parse_dims_opt(&mut self) {
        if !(self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket) {
            return;
        }
        self.builder.start_node(SyntaxKind::Dims.into());
        while self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket {
            self.bump();
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_variable_declarators(&mut self) {
        loop {
            self.builder.start_node(SyntaxKind::VariableDeclarator.into());
            self.parse_simple_name("expected variable name");
            self.parse_dims_opt();
            if self.at(SyntaxKind::Eq) {
                self.bump();
                self.builder.start_node(SyntaxKind::Expression.into());
                self.scan_opaque(&[SyntaxKind::Comma, SyntaxKind::Semicolon]);
                self.builder.finish_node();
            }
            self.builder.finish_node();
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
    }

    fn parse_type(&mut self) {
        self.builder.start_node(SyntaxKind::TypeRef.into());
        while self.at(SyntaxKind::At) {
            self.parse_annotation();
        }
        if self.current().is_primitive_type() || self.at(SyntaxKind::VoidKw) {
            self.bump();
        } else if self.at_ident_like() {
            loop {
                self.bump();
                if self.at(SyntaxKind::Less) {
                    self.parse_type_arguments();
                }
                if self.at(SyntaxKind::Dot) && self.nth(1).is_identifier_like() {
                    self.bump(); // .
                    continue;
                }
                break;
            }
        } else {
            self.error_here("expected type");
        }
        while self.at(SyntaxKind::LBracket) && self.nth(1) == SyntaxKind::RBracket {
            self.bump();
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_type_arguments(&mut self) {
        self.builder.start_node(SyntaxKind::TypeArguments.into());
        self.expect(SyntaxKind::Less, "expected `<`");
        while !self.at(SyntaxKind::Greater) && !self.at(SyntaxKind::Eof) {
            if self.at(SyntaxKind::Question) {
                self.builder.start_node(SyntaxKind::WildcardType.into());
                self.bump();
                if self.at(SyntaxKind::ExtendsKw) || self.at(SyntaxKind::SuperKw) {
                    self.bump();
                    self.parse_type();
                }
                self.builder.finish_node();
            } else if self.at_type_start() {
                self.parse_type();
            } else {
                self.error_here("expected type argument");
                break;
            }
            if self.at(SyntaxKind::Comma) {
                self.bump();
                continue;
            }
            break;
        }
        self.expect(SyntaxKind::Greater, "expected `>`");
        self.builder.finish_node();
    }

    fn parse_arguments(&mut self) {
        self.builder.start_node(SyntaxKind::Arguments.into());
        self.expect(SyntaxKind::LParen, "expected `(`");
        self.scan_opaque(&[]);
        self.expect(SyntaxKind::RParen, "expected `)`");
        self.builder.finish_node();
    }

    fn parse_block(&mut self) {
        self.builder.start_node(SyntaxKind::Block.into());
        self.expect(SyntaxKind::LBrace, "expected `{`");
        self.scan_opaque(&[]);
        self.expect(SyntaxKind::RBrace, "expected `}`");
        self.builder.finish_node();
    }

    /// Consume a balanced token run without modelling statements or expressions.
    ///
    /// Stops before an unbalanced closer or, at nesting depth zero, before any `stop` token.
    /// Class-instance creations and local type declarations inside the run become nodes.
    fn scan_opaque(&mut self, stop: &[SyntaxKind]) {
        let mut depth = 0usize;
        let mut prev = SyntaxKind::Eof;
        loop {
            let kind = self.current();
            if kind == SyntaxKind::Eof || (depth == 0 && stop.contains(&kind)) {
                break;
            }
            match kind {
                SyntaxKind::LParen | SyntaxKind::LBrace | SyntaxKind::LBracket => {
                    depth += 1;
                    self.bump();
                }
                SyntaxKind::RParen | SyntaxKind::RBrace | SyntaxKind::RBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                SyntaxKind::NewKw => {
                    self.parse_class_instance_creation();
                }
                _ if prev != SyntaxKind::Dot && self.at_local_type_decl_start() => {
                    self.parse_type_declaration();
                }
                _ => self.bump(),
            }
            prev = kind;
        }
    }

    fn parse_class_instance_creation(&mut self) {
        self.builder.start_node(SyntaxKind::ClassInstanceCreation.into());
        self.expect(SyntaxKind::NewKw, "expected `new`");
        if self.at(SyntaxKind::Less) {
            self.parse_type_arguments();
        }
        if self.at_type_start() {
            self.parse_type();
        } else {
            self.error_here("expected type after `new`");
        }
        // Array creations leave `[n]` / `{...}` to the enclosing run.
        if self.at(SyntaxKind::LParen) {
            self.parse_arguments();
            if self.at(SyntaxKind::LBrace) {
                self.parse_class_body(SyntaxKind::AnonymousClassBody);
            }
        }
        self.builder.finish_node();
    }

    fn recover_top_level(&mut self) {
        self.builder.start_node(SyntaxKind::ErrorNode.into());
        self.error_here("unexpected token at top level");
        self.bump();
        self.recover_to(&[
            SyntaxKind::ClassKw,
            SyntaxKind::InterfaceKw,
            SyntaxKind::EnumKw,
            SyntaxKind::PublicKw,
            SyntaxKind::AbstractKw,
            SyntaxKind::FinalKw,
            SyntaxKind::At,
            SyntaxKind::Eof,
        ]);
        self.builder.finish_node();
    }

    fn recover_to_class_member_boundary(&mut self) {
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
            return;
        }
        if !self.at(SyntaxKind::RBrace) {
            self.bump();
        }
        self.recover_to(&[
            SyntaxKind::Semicolon,
            SyntaxKind::RBrace,
            SyntaxKind::ClassKw,
            SyntaxKind::InterfaceKw,
            SyntaxKind::EnumKw,
            SyntaxKind::PublicKw,
            SyntaxKind::PrivateKw,
            SyntaxKind::ProtectedKw,
            SyntaxKind::StaticKw,
            SyntaxKind::FinalKw,
            SyntaxKind::AbstractKw,
            SyntaxKind::At,
            SyntaxKind::Eof,
        ]);
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
    }

    fn recover_to(&mut self, recovery: &[SyntaxKind]) {
        while !self.at(SyntaxKind::Eof) {
            if recovery.contains(&self.current()) {
                break;
            }
            self.bump();
        }
    }

    fn at_type_decl_start(&mut self) -> bool {
        match self.current() {
            SyntaxKind::ClassKw | SyntaxKind::InterfaceKw | SyntaxKind::EnumKw | SyntaxKind::At => {
                true
            }
            SyntaxKind::RecordKw => self.nth(1).is_identifier_like(),
            kind => kind.is_modifier_keyword(),
        }
    }

    fn at_nested_type_keyword(&mut self) -> bool {
        match self.current() {
            SyntaxKind::ClassKw | SyntaxKind::InterfaceKw | SyntaxKind::EnumKw => true,
            SyntaxKind::At => self.nth(1) == SyntaxKind::InterfaceKw,
            SyntaxKind::RecordKw => {
                self.nth(1).is_identifier_like()
                    && matches!(self.nth(2), SyntaxKind::LParen | SyntaxKind::Less)
            }
            _ => false,
        }
    }

    fn at_local_type_decl_start(&mut self) -> bool {
        let mut n = 0;
        loop {
            let kind = self.nth(n);
            if kind.is_modifier_keyword() && kind != SyntaxKind::DefaultKw {
                n += 1;
                continue;
            }
            return match kind {
                SyntaxKind::ClassKw | SyntaxKind::InterfaceKw | SyntaxKind::EnumKw => true,
                SyntaxKind::RecordKw => {
                    self.nth(n + 1).is_identifier_like()
                        && matches!(self.nth(n + 2), SyntaxKind::LParen | SyntaxKind::Less)
                }
                _ => false,
            };
        }
    }

    fn at_type_start(&mut self) -> bool {
        let kind = self.current();
        kind.is_primitive_type()
            || kind.is_identifier_like()
            || kind == SyntaxKind::VoidKw
            || kind == SyntaxKind::At
    }

    fn current(&mut self) -> SyntaxKind {
        self.eat_trivia();
        self.tokens.front().map_or(SyntaxKind::Eof, |t| t.kind)
    }

    /// Kind of the `n`-th significant token ahead; [`SyntaxKind::Eof`] past the end.
    fn nth(&mut self, n: usize) -> SyntaxKind {
        self.nth_token(n).map_or(SyntaxKind::Eof, |t| t.kind)
    }

    fn nth_token(&self, n: usize) -> Option<Token> {
        self.tokens
            .iter()
            .filter(|tok| !tok.kind.is_trivia())
            .nth(n)
            .copied()
    }

    fn nth_is_punct(&self, n: usize, text: &str) -> bool {
        self.nth_token(n)
            .map_or(false, |t| t.kind == SyntaxKind::Punct && t.text(self.input) == text)
    }

    fn at(&mut self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_text(&mut self, kind: SyntaxKind, text: &str) -> bool {
        self.at(kind) && self.nth_token(0).map_or(false, |t| t.text(self.input) == text)
    }

    fn at_ident_like(&mut self) -> bool {
        self.current().is_identifier_like()
    }

    fn eat_trivia(&mut self) {
        while self.tokens.front().map_or(false, |t| t.kind.is_trivia()) {
            self.bump_any();
        }
    }

    fn bump(&mut self) {
        self.eat_trivia();
        self.bump_any();
    }

    fn bump_any(&mut self) {
        let Some(tok) = self.tokens.front().copied() else {
            return;
        };
        if tok.kind == SyntaxKind::Eof {
            return;
        }
        self.tokens.pop_front();
        self.builder.token(tok.kind.into(), tok.text(self.input));
    }

    fn expect(&mut self, kind: SyntaxKind, message: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error_here(message);
            false
        }
    }

    fn expect_ident_like(&mut self, message: &str) {
        if self.at_ident_like() {
            self.bump();
        } else {
            self.error_here(message);
        }
    }

    fn error_here(&mut self, message: &str) {
        let range = self.current_range();
        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }

    fn current_range(&mut self) -> TextRange {
        self.eat_trivia();
        self.tokens
            .front()
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(text_size::TextSize::of(self.input)))
    }
}

use text_size::{TextRange, TextSize};

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.range]
    }
}

/// Tokenize `input`, including trivia. The last token is always [`SyntaxKind::Eof`].
pub fn lex(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == SyntaxKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.pos;
        let kind = match self.peek_char() {
            None => SyntaxKind::Eof,
            Some(c) => self.scan(c),
        };
        Token {
            kind,
            range: TextRange::new(TextSize::from(start as u32), TextSize::from(self.pos as u32)),
        }
    }

    fn scan(&mut self, c: char) -> SyntaxKind {
        if c.is_whitespace() {
            self.eat_while(char::is_whitespace);
            return SyntaxKind::Whitespace;
        }
        if self.rest().starts_with("//") {
            self.eat_while(|c| c != '\n' && c != '\r');
            return SyntaxKind::LineComment;
        }
        if self.rest().starts_with("/*") {
            self.pos += 2;
            match self.rest().find("*/") {
                Some(end) => self.pos += end + 2,
                None => self.pos = self.input.len(),
            }
            return SyntaxKind::BlockComment;
        }
        if is_ident_start(c) {
            return self.ident_or_keyword();
        }
        if c.is_ascii_digit()
            || (c == '.' && self.rest()[1..].starts_with(|c: char| c.is_ascii_digit()))
        {
            return self.number();
        }
        if self.rest().starts_with("\"\"\"") {
            return self.text_block();
        }
        match c {
            '"' => return self.quoted('"', SyntaxKind::StringLiteral),
            '\'' => return self.quoted('\'', SyntaxKind::CharLiteral),
            _ => {}
        }
        if self.rest().starts_with("...") {
            self.pos += 3;
            return SyntaxKind::Ellipsis;
        }

        self.pos += c.len_utf8();
        match c {
            '(' => SyntaxKind::LParen,
            ')' => SyntaxKind::RParen,
            '{' => SyntaxKind::LBrace,
            '}' => SyntaxKind::RBrace,
            '[' => SyntaxKind::LBracket,
            ']' => SyntaxKind::RBracket,
            ';' => SyntaxKind::Semicolon,
            ',' => SyntaxKind::Comma,
            '.' => SyntaxKind::Dot,
            '@' => SyntaxKind::At,
            '<' => SyntaxKind::Less,
            // `>>` and `>>>` are never fused; generic closers stay unambiguous.
            '>' => SyntaxKind::Greater,
            '?' => SyntaxKind::Question,
            '&' => SyntaxKind::Amp,
            '=' => SyntaxKind::Eq,
            c if c.is_ascii_punctuation() => SyntaxKind::Punct,
            _ => SyntaxKind::Error,
        }
    }

    fn ident_or_keyword(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.eat_while(is_ident_continue);
        let text = &self.input[start..self.pos];

        if text == "non" && self.rest().starts_with("-sealed") {
            let after = self.pos + "-sealed".len();
            let boundary = self.input[after..]
                .chars()
                .next()
                .map_or(true, |c| !is_ident_continue(c));
            if boundary {
                self.pos = after;
                return SyntaxKind::NonSealedKw;
            }
        }

        SyntaxKind::from_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn number(&mut self) -> SyntaxKind {
        let mut prev = '\0';
        while let Some(c) = self.peek_char() {
            let take = c.is_ascii_alphanumeric()
                || c == '_'
                || (c == '.' && !self.rest().starts_with(".."))
                || (matches!(c, '+' | '-') && matches!(prev, 'e' | 'E' | 'p' | 'P'));
            if !take {
                break;
            }
            prev = c;
            self.pos += c.len_utf8();
        }
        SyntaxKind::NumberLiteral
    }

    fn quoted(&mut self, quote: char, kind: SyntaxKind) -> SyntaxKind {
        self.pos += quote.len_utf8();
        while let Some(c) = self.peek_char() {
            match c {
                '\\' => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek_char() {
                        self.pos += escaped.len_utf8();
                    }
                }
                '\n' | '\r' => break,
                c if c == quote => {
                    self.pos += c.len_utf8();
                    break;
                }
                c => self.pos += c.len_utf8(),
            }
        }
        kind
    }

    fn text_block(&mut self) -> SyntaxKind {
        self.pos += 3;
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("\\") {
                self.pos += 1;
                if let Some(escaped) = self.peek_char() {
                    self.pos += escaped.len_utf8();
                }
                continue;
            }
            if rest.starts_with("\"\"\"") {
                self.pos += 3;
                break;
            }
            if let Some(c) = self.peek_char() {
                self.pos += c.len_utf8();
            }
        }
        SyntaxKind::TextBlock
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        lex(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn lexes_generic_closers_individually() {
        assert_eq!(
            kinds("Map<K, List<V>>"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::Less,
                SyntaxKind::Identifier,
                SyntaxKind::Comma,
                SyntaxKind::Identifier,
                SyntaxKind::Less,
                SyntaxKind::Identifier,
                SyntaxKind::Greater,
                SyntaxKind::Greater,
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_contextual_keywords_and_varargs() {
        assert_eq!(
            kinds("non-sealed record R(int... xs)"),
            vec![
                SyntaxKind::NonSealedKw,
                SyntaxKind::RecordKw,
                SyntaxKind::Identifier,
                SyntaxKind::LParen,
                SyntaxKind::IntKw,
                SyntaxKind::Ellipsis,
                SyntaxKind::Identifier,
                SyntaxKind::RParen,
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_literals_do_not_leak_braces() {
        let input = "/* { */ \"}\" '{' // }\n\"\"\"\n  }\n\"\"\" 1.5e-3";
        assert_eq!(
            kinds(input),
            vec![
                SyntaxKind::StringLiteral,
                SyntaxKind::CharLiteral,
                SyntaxKind::TextBlock,
                SyntaxKind::NumberLiteral,
                SyntaxKind::Eof,
            ]
        );
    }

    #[test]
    fn token_ranges_cover_the_input() {
        let input = "class Ä { }";
        let tokens = lex(input);
        let joined: String = tokens.iter().map(|t| t.text(input)).collect();
        assert_eq!(joined, input);
    }
}

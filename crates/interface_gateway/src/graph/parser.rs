//! Query document parser
//!
//! Accepts the subset of the GraphQL query language the gateway executes:
//! one anonymous or named `query`/`mutation` operation, variable
//! definitions (types are read and ignored), aliases, arguments with every
//! literal kind, `$variables` and nested selection sets. Commas are
//! whitespace and `#` starts a comment. Fragments, directives and
//! subscriptions are rejected.

use crate::error::ParseError;
use crate::graph::document::{Document, Field, InputValue, OperationKind, VariableDefinition};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Name(String),
    Int(i64),
    Float(f64),
    Str(String),
    Punct(char),
    Spread,
    End,
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    line: usize,
    column: usize,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.line, self.column)
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_ignored();
            let (line, column) = (self.line, self.column);
            let token = match self.chars.peek().copied() {
                None => {
                    tokens.push(Spanned { token: Token::End, line, column });
                    return Ok(tokens);
                }
                Some(c) if c == '_' || c.is_ascii_alphabetic() => self.name(),
                Some(c) if c == '-' || c.is_ascii_digit() => self.number()?,
                Some('"') => self.string()?,
                Some('.') => self.spread()?,
                Some(c) if "{}()[]:$!=@".contains(c) => {
                    self.bump();
                    Token::Punct(c)
                }
                Some(c) => return Err(self.error(format!("Unexpected character {c:?}"))),
            };
            tokens.push(Spanned { token, line, column });
        }
    }

    fn skip_ignored(&mut self) {
        while let Some(&c) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\n' | '\r' | ',' | '\u{feff}' => {
                    self.bump();
                }
                '#' => {
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn name(&mut self) -> Token {
        let mut name = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '_' || c.is_ascii_alphanumeric() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Token::Name(name)
    }

    fn digits(&mut self, into: &mut String) {
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                into.push(c);
                self.bump();
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> Result<Token, ParseError> {
        let mut text = String::new();
        if self.chars.peek() == Some(&'-') {
            text.push('-');
            self.bump();
        }
        let before = text.len();
        self.digits(&mut text);
        if text.len() == before {
            return Err(self.error("Expected digit after '-'"));
        }

        let mut is_float = false;
        if self.chars.peek() == Some(&'.') {
            is_float = true;
            text.push('.');
            self.bump();
            let before = text.len();
            self.digits(&mut text);
            if text.len() == before {
                return Err(self.error("Expected digit after '.'"));
            }
        }
        if matches!(self.chars.peek(), Some('e') | Some('E')) {
            is_float = true;
            text.push('e');
            self.bump();
            if let Some(&sign) = self.chars.peek() {
                if sign == '+' || sign == '-' {
                    text.push(sign);
                    self.bump();
                }
            }
            let before = text.len();
            self.digits(&mut text);
            if text.len() == before {
                return Err(self.error("Expected exponent digits"));
            }
        }

        if is_float {
            text.parse()
                .map(Token::Float)
                .map_err(|_| self.error(format!("Invalid float {text}")))
        } else {
            text.parse()
                .map(Token::Int)
                .map_err(|_| self.error(format!("Integer out of range {text}")))
        }
    }

    fn string(&mut self) -> Result<Token, ParseError> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("Unterminated string")),
                Some('"') => return Ok(Token::Str(value)),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some('/') => '/',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('t') => '\t',
                        Some('u') => self.unicode_escape()?,
                        other => return Err(self.error(format!("Invalid escape {other:?}"))),
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, ParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("Invalid unicode escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("Invalid unicode escape"))
    }

    fn spread(&mut self) -> Result<Token, ParseError> {
        for _ in 0..3 {
            if self.bump() != Some('.') {
                return Err(self.error("Unexpected '.'"));
            }
        }
        Ok(Token::Spread)
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens
            .get(self.position)
            .map(|spanned| &spanned.token)
            .unwrap_or(&Token::End)
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let (line, column) = self
            .tokens
            .get(self.position)
            .map(|spanned| (spanned.line, spanned.column))
            .unwrap_or((0, 0));
        ParseError::new(message, line, column)
    }

    fn is_punct(&self, c: char) -> bool {
        *self.peek() == Token::Punct(c)
    }

    fn expect_punct(&mut self, c: char) -> Result<(), ParseError> {
        if self.is_punct(c) {
            self.next();
            Ok(())
        } else {
            Err(self.error(format!("Expected '{c}', found {}", describe(self.peek()))))
        }
    }

    fn expect_name(&mut self) -> Result<String, ParseError> {
        match self.peek().clone() {
            Token::Name(name) => {
                self.next();
                Ok(name)
            }
            other => Err(self.error(format!("Expected name, found {}", describe(&other)))),
        }
    }

    fn document(&mut self) -> Result<Document, ParseError> {
        let document = if self.is_punct('{') {
            Document {
                kind: OperationKind::Query,
                name: None,
                variables: Vec::new(),
                selection: self.selection_set()?,
            }
        } else {
            let kind = match self.expect_name()?.as_str() {
                "query" => OperationKind::Query,
                "mutation" => OperationKind::Mutation,
                "subscription" => return Err(self.error("Subscriptions are not supported")),
                "fragment" => return Err(self.error("Fragments are not supported")),
                other => return Err(self.error(format!("Unknown operation type {other:?}"))),
            };
            let name = match self.peek() {
                Token::Name(_) => Some(self.expect_name()?),
                _ => None,
            };
            let variables = if self.is_punct('(') {
                self.variable_definitions()?
            } else {
                Vec::new()
            };
            Document {
                kind,
                name,
                variables,
                selection: self.selection_set()?,
            }
        };

        match self.peek() {
            Token::End => Ok(document),
            _ => Err(self.error("Only one operation per document is supported")),
        }
    }

    fn variable_definitions(&mut self) -> Result<Vec<VariableDefinition>, ParseError> {
        self.expect_punct('(')?;
        let mut definitions = Vec::new();
        while !self.is_punct(')') {
            self.expect_punct('$')?;
            let name = self.expect_name()?;
            self.expect_punct(':')?;
            self.type_reference()?;
            let default = if self.is_punct('=') {
                self.next();
                Some(self.value(true)?)
            } else {
                None
            };
            definitions.push(VariableDefinition { name, default });
        }
        self.next();
        Ok(definitions)
    }

    fn type_reference(&mut self) -> Result<(), ParseError> {
        if self.is_punct('[') {
            self.next();
            self.type_reference()?;
            self.expect_punct(']')?;
        } else {
            self.expect_name()?;
        }
        if self.is_punct('!') {
            self.next();
        }
        Ok(())
    }

    fn selection_set(&mut self) -> Result<Vec<Field>, ParseError> {
        self.expect_punct('{')?;
        let mut fields = Vec::new();
        while !self.is_punct('}') {
            match self.peek() {
                Token::Spread => return Err(self.error("Fragments are not supported")),
                Token::Punct('@') => return Err(self.error("Directives are not supported")),
                Token::End => return Err(self.error("Unterminated selection set")),
                _ => fields.push(self.field()?),
            }
        }
        self.next();
        if fields.is_empty() {
            return Err(self.error("Selection set must not be empty"));
        }
        Ok(fields)
    }

    fn field(&mut self) -> Result<Field, ParseError> {
        let first = self.expect_name()?;
        let (alias, name) = if self.is_punct(':') {
            self.next();
            (Some(first), self.expect_name()?)
        } else {
            (None, first)
        };

        let mut arguments = Vec::new();
        if self.is_punct('(') {
            self.next();
            while !self.is_punct(')') {
                let argument = self.expect_name()?;
                self.expect_punct(':')?;
                arguments.push((argument, self.value(false)?));
            }
            self.next();
        }

        if self.is_punct('@') {
            return Err(self.error("Directives are not supported"));
        }

        let selection = if self.is_punct('{') {
            self.selection_set()?
        } else {
            Vec::new()
        };

        Ok(Field {
            alias,
            name,
            arguments,
            selection,
        })
    }

    fn value(&mut self, constant: bool) -> Result<InputValue, ParseError> {
        match self.next() {
            Token::Punct('$') if !constant => Ok(InputValue::Variable(self.expect_name()?)),
            Token::Int(i) => Ok(InputValue::Int(i)),
            Token::Float(f) => Ok(InputValue::Float(f)),
            Token::Str(s) => Ok(InputValue::String(s)),
            Token::Name(name) => Ok(match name.as_str() {
                "true" => InputValue::Bool(true),
                "false" => InputValue::Bool(false),
                "null" => InputValue::Null,
                _ => InputValue::Enum(name),
            }),
            Token::Punct('[') => {
                let mut items = Vec::new();
                while !self.is_punct(']') {
                    if *self.peek() == Token::End {
                        return Err(self.error("Unterminated list"));
                    }
                    items.push(self.value(constant)?);
                }
                self.next();
                Ok(InputValue::List(items))
            }
            Token::Punct('{') => {
                let mut fields = Vec::new();
                while !self.is_punct('}') {
                    let name = self.expect_name()?;
                    self.expect_punct(':')?;
                    fields.push((name, self.value(constant)?));
                }
                self.next();
                Ok(InputValue::Object(fields))
            }
            other => {
                self.position = self.position.saturating_sub(1);
                Err(self.error(format!("Expected value, found {}", describe(&other))))
            }
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Name(name) => format!("name {name:?}"),
        Token::Int(i) => format!("integer {i}"),
        Token::Float(f) => format!("float {f}"),
        Token::Str(s) => format!("string {s:?}"),
        Token::Punct(c) => format!("'{c}'"),
        Token::Spread => "'...'".to_string(),
        Token::End => "end of document".to_string(),
    }
}

/// Parses a query document
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser { tokens, position: 0 }.document()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(fields: &'a [Field], key: &str) -> &'a Field {
        fields.iter().find(|f| f.response_key() == key).unwrap()
    }

    #[test]
    fn test_anonymous_query() {
        let document = parse("{ accounts { id name orders { id } } }").unwrap();

        assert_eq!(document.kind, OperationKind::Query);
        let accounts = field(&document.selection, "accounts");
        assert_eq!(accounts.selection.len(), 3);
        assert_eq!(field(&accounts.selection, "orders").selection[0].name, "id");
    }

    #[test]
    fn test_named_mutation_with_variables() {
        let document = parse(
            r#"mutation Place($account: String!, $lines: [OrderProductInput!]! = []) {
                createOrder(order: { accountId: $account, products: $lines }) { id totalPrice }
            }"#,
        )
        .unwrap();

        assert_eq!(document.kind, OperationKind::Mutation);
        assert_eq!(document.name.as_deref(), Some("Place"));
        assert_eq!(document.variables.len(), 2);
        assert_eq!(document.variables[1].default, Some(InputValue::List(vec![])));

        let create = &document.selection[0];
        assert_eq!(
            create.arguments[0].1,
            InputValue::Object(vec![
                ("accountId".into(), InputValue::Variable("account".into())),
                ("products".into(), InputValue::Variable("lines".into())),
            ])
        );
    }

    #[test]
    fn test_aliases_and_literals() {
        let document = parse(
            r#"query {
                cheap: products(pagination: {skip: 0, take: 2}, query: "wid\"get!") { id }
                one: products(id: "p1", flag: true, ratio: -1.5e2, none: null, kind: NEW) { price }
            }"#,
        )
        .unwrap();

        let cheap = field(&document.selection, "cheap");
        assert_eq!(cheap.name, "products");
        assert_eq!(cheap.arguments[1].1, InputValue::String("wid\"get!".into()));

        let one = field(&document.selection, "one");
        assert_eq!(one.arguments[1].1, InputValue::Bool(true));
        assert_eq!(one.arguments[2].1, InputValue::Float(-150.0));
        assert_eq!(one.arguments[3].1, InputValue::Null);
        assert_eq!(one.arguments[4].1, InputValue::Enum("NEW".into()));
    }

    #[test]
    fn test_comments_and_commas_are_ignored() {
        let document = parse("# all accounts\n{ accounts, { id, name } }").unwrap();
        assert_eq!(document.selection[0].selection.len(), 2);
    }

    #[test]
    fn test_unterminated_selection_reports_position() {
        let err = parse("{\n  accounts {\n    id\n").unwrap_err();

        assert_eq!(err.line, 4);
        assert!(err.message.contains("Unterminated"));
    }

    #[test]
    fn test_fragments_rejected() {
        assert!(parse("{ accounts { ...Parts } }").unwrap_err().message.contains("Fragments"));
        assert!(parse("fragment Parts on Account { id }").is_err());
    }

    #[test]
    fn test_empty_selection_rejected() {
        assert!(parse("{ accounts { } }").is_err());
    }

    #[test]
    fn test_variables_not_allowed_in_defaults() {
        assert!(parse("query ($a: Int = $b) { accounts { id } }").is_err());
    }

    #[test]
    fn test_two_operations_rejected() {
        assert!(parse("{ accounts { id } } { products { id } }").is_err());
    }
}

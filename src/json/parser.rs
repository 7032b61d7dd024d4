//! Recursive-descent parser building a [`JsonTree`] from the token stream.
//!
//! Accepts the JSONC dialect used by template bundles: comments and trailing
//! commas are tolerated. Any other syntax error fails the whole parse; rules
//! downstream treat an unparsable document as absent.

use super::lexer::{Lexer, Token, TokenKind};
use super::tree::{JsonTree, Node, NodeId, NodeKind};
use thiserror::Error;

/// Syntax error raised while lexing or parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("syntax error at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset of the offending input.
    pub offset: usize,
    /// Short description of the failure.
    pub message: &'static str,
}

impl ParseError {
    pub(crate) fn new(offset: usize, message: &'static str) -> Self {
        Self { offset, message }
    }
}

/// Parse a JSONC document into a tree.
pub fn parse(text: &str) -> Result<JsonTree, ParseError> {
    let tokens = Lexer::new(text).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        nodes: Vec::new(),
        source_len: text.len(),
    };
    let root = parser.parse_value()?;
    if parser.pos != parser.tokens.len() {
        let tok = &parser.tokens[parser.pos];
        return Err(ParseError::new(tok.offset, "trailing content after value"));
    }
    Ok(JsonTree::new(parser.nodes, root))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    nodes: Vec<Node>,
    source_len: usize,
}

impl Parser {
    fn parse_value(&mut self) -> Result<NodeId, ParseError> {
        let token = self.advance("expected a value")?;
        let (offset, len) = (token.offset, token.len);
        match token.kind {
            TokenKind::LeftBrace => self.parse_object(offset),
            TokenKind::LeftBracket => self.parse_array(offset),
            TokenKind::Str(value) => Ok(self.push(NodeKind::String { value }, offset, len)),
            TokenKind::Number(value) => Ok(self.push(NodeKind::Number { value }, offset, len)),
            TokenKind::True => Ok(self.push(NodeKind::Bool { value: true }, offset, len)),
            TokenKind::False => Ok(self.push(NodeKind::Bool { value: false }, offset, len)),
            TokenKind::Null => Ok(self.push(NodeKind::Null, offset, len)),
            _ => Err(ParseError::new(offset, "expected a value")),
        }
    }

    fn parse_object(&mut self, open_offset: usize) -> Result<NodeId, ParseError> {
        let mut properties = Vec::new();
        loop {
            if self.peek_is(&TokenKind::RightBrace) {
                break;
            }
            properties.push(self.parse_property()?);
            if self.peek_is(&TokenKind::Comma) {
                self.pos += 1;
                // Trailing comma before the closing brace is JSONC-legal.
                continue;
            }
            break;
        }
        let close = self.expect(&TokenKind::RightBrace, "expected '}'")?;
        let end = close.offset + close.len;
        let object = self.push(
            NodeKind::Object {
                properties: properties.clone(),
            },
            open_offset,
            end - open_offset,
        );
        for prop in properties {
            self.set_parent(prop, object);
        }
        Ok(object)
    }

    fn parse_property(&mut self) -> Result<NodeId, ParseError> {
        let token = self.advance("expected a property name")?;
        let (offset, len) = (token.offset, token.len);
        let key_value = match token.kind {
            TokenKind::Str(value) => value,
            _ => return Err(ParseError::new(offset, "expected a property name")),
        };
        let key = self.push(NodeKind::String { value: key_value }, offset, len);
        self.expect(&TokenKind::Colon, "expected ':'")?;
        let value = self.parse_value()?;
        let end = self.nodes[value.index()].end();
        let property = self.push(
            NodeKind::Property {
                key,
                value: Some(value),
            },
            offset,
            end - offset,
        );
        self.set_parent(key, property);
        self.set_parent(value, property);
        Ok(property)
    }

    fn parse_array(&mut self, open_offset: usize) -> Result<NodeId, ParseError> {
        let mut elements = Vec::new();
        loop {
            if self.peek_is(&TokenKind::RightBracket) {
                break;
            }
            elements.push(self.parse_value()?);
            if self.peek_is(&TokenKind::Comma) {
                self.pos += 1;
                continue;
            }
            break;
        }
        let close = self.expect(&TokenKind::RightBracket, "expected ']'")?;
        let end = close.offset + close.len;
        let array = self.push(
            NodeKind::Array {
                elements: elements.clone(),
            },
            open_offset,
            end - open_offset,
        );
        for elem in elements {
            self.set_parent(elem, array);
        }
        Ok(array)
    }

    fn push(&mut self, kind: NodeKind, offset: usize, len: usize) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            kind,
            offset,
            len,
            parent: None,
        });
        id
    }

    fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
    }

    fn advance(&mut self, expectation: &'static str) -> Result<Token, ParseError> {
        if self.pos >= self.tokens.len() {
            return Err(ParseError::new(self.source_len, expectation));
        }
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: &TokenKind, expectation: &'static str) -> Result<Token, ParseError> {
        let token = self.advance(expectation)?;
        if std::mem::discriminant(&token.kind) != std::mem::discriminant(kind) {
            return Err(ParseError::new(token.offset, expectation));
        }
        Ok(token)
    }

    fn peek_is(&self, kind: &TokenKind) -> bool {
        self.tokens
            .get(self.pos)
            .is_some_and(|t| std::mem::discriminant(&t.kind) == std::mem::discriminant(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_structure() {
        let tree = parse(r#"{"a": {"b": [1, null, false]}}"#).unwrap();
        let root = tree.root();
        let a = tree.object_get(root, "a").unwrap();
        let b = tree.object_get(a, "b").unwrap();
        assert_eq!(tree.elements(b).len(), 3);
        assert_eq!(tree.number_value(tree.elements(b)[0]), Some(1.0));
    }

    #[test]
    fn accepts_comments_and_trailing_commas() {
        let src = r#"
        {
            // name of the template
            "name": "Sales", /* inline */
            "tags": ["a", "b",],
        }
        "#;
        let tree = parse(src).unwrap();
        let root = tree.root();
        assert_eq!(
            tree.string_value(tree.object_get(root, "name").unwrap()),
            Some("Sales")
        );
        assert_eq!(
            tree.elements(tree.object_get(root, "tags").unwrap()).len(),
            2
        );
    }

    #[test]
    fn rejects_missing_colon() {
        assert!(parse(r#"{"a" 1}"#).is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(parse("{} extra").is_err());
    }

    #[test]
    fn rejects_bare_key() {
        assert!(parse("{a: 1}").is_err());
    }

    #[test]
    fn parses_scalar_roots() {
        assert!(parse("42").is_ok());
        assert!(parse("\"s\"").is_ok());
        assert!(parse("null").is_ok());
    }

    #[test]
    fn property_span_covers_key_and_value() {
        let src = r#"{"key": 123}"#;
        let tree = parse(src).unwrap();
        let prop = tree.properties(tree.root())[0];
        let node = tree.node(prop);
        assert_eq!(&src[node.offset..node.end()], r#""key": 123"#);
    }

    #[test]
    fn error_carries_offset() {
        let err = parse("{,}").unwrap_err();
        assert_eq!(err.offset, 1);
    }
}

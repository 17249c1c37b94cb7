//! Parser for netlist text.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{MnaError, Result};

/// Options controlling how a netlist is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Treat the first line as the circuit title (SPICE convention).
    pub title_line: bool,
}

impl ParseOptions {
    /// Options with the title line enabled.
    pub fn with_title() -> Self {
        Self { title_line: true }
    }
}

/// Parser for netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    title: Option<String>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer and options.
    pub fn with_options(mut lexer: Lexer<'a>, options: ParseOptions) -> Self {
        let title = if options.title_line {
            Some(lexer.rest_of_line())
        } else {
            None
        };
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            title,
        }
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();
        ast.title = self.title.take();

        while let Some(line) = self.next_line()? {
            ast.lines.push(line);
        }

        Ok(ast)
    }

    /// Parse the next element or comment line, skipping blank lines.
    /// Returns `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<NetlistLine>> {
        loop {
            match self.current.kind {
                TokenKind::Eof => return Ok(None),
                TokenKind::Newline => self.advance(),
                TokenKind::Comment => {
                    let line = NetlistLine::Comment {
                        text: self.current.text.clone(),
                        line: self.current.line,
                    };
                    self.advance();
                    return Ok(Some(line));
                }
                TokenKind::Word => {
                    let element = self.parse_element()?;
                    return Ok(Some(NetlistLine::Element(element)));
                }
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Collect the remaining words on the current line.
    fn rest_of_line_words(&mut self) -> Vec<Token> {
        let mut words = Vec::new();
        while self.current.kind == TokenKind::Word {
            words.push(self.current.clone());
            self.advance();
        }
        words
    }

    fn parse_element(&mut self) -> Result<ElementDef> {
        let name = canonical_name(&self.current.text);
        let line = self.current.line;
        self.advance();

        let first_char = name.chars().next().unwrap_or('?');
        let kind = ElementKind::from_prefix(first_char).ok_or_else(|| {
            MnaError::UnknownElementType {
                element_type: first_char.to_string(),
                line,
            }
        })?;

        let fields = self.rest_of_line_words();
        let expected_nodes = kind.expected_node_count();
        let expected_fields = expected_nodes + usize::from(kind.has_value());

        if fields.len() < expected_fields {
            return Err(MnaError::parse(
                line,
                format!(
                    "{} '{}' expects {} fields after the name, got {}",
                    kind,
                    name,
                    expected_fields,
                    fields.len()
                ),
            ));
        }
        if fields.len() > expected_fields {
            log::warn!(
                "line {}: ignoring {} extra field(s) after '{}'",
                line,
                fields.len() - expected_fields,
                name
            );
        }

        let nodes: Vec<String> = fields[..expected_nodes]
            .iter()
            .map(|tok| tok.text.clone())
            .collect();

        let value = if kind.has_value() {
            let tok = &fields[expected_nodes];
            let value = parse_value(&tok.text).ok_or_else(|| {
                MnaError::parse(
                    line,
                    format!("invalid number '{}' at column {}", tok.text, tok.column),
                )
            })?;
            Some(value)
        } else {
            None
        };

        Ok(ElementDef {
            kind,
            name,
            nodes,
            value,
            line,
        })
    }
}

/// Upper-case the type letter of an element name; the rest keeps its spelling.
fn canonical_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<NetlistAst> {
        super::super::parse(input)
    }

    #[test]
    fn test_parse_resistor() {
        let ast = parse("R1 in out 10k").unwrap();
        let elements: Vec<_> = ast.elements().collect();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].kind, ElementKind::Resistor);
        assert_eq!(elements[0].name, "R1");
        assert_eq!(elements[0].nodes, vec!["in", "out"]);
        assert_eq!(elements[0].value, Some(10_000.0));
        assert_eq!(elements[0].line, 1);
    }

    #[test]
    fn test_parse_four_terminal_and_opamp() {
        let ast = parse("E1 3 0 1 2 100\nO1 4 0 2 3\n").unwrap();
        let elements: Vec<_> = ast.elements().collect();
        assert_eq!(elements[0].kind, ElementKind::Vcvs);
        assert_eq!(elements[0].nodes, vec!["3", "0", "1", "2"]);
        assert_eq!(elements[0].value, Some(100.0));
        assert_eq!(elements[1].kind, ElementKind::OpAmp);
        assert_eq!(elements[1].value, None);
        assert_eq!(elements[1].line, 2);
    }

    #[test]
    fn test_parse_with_comments_and_blank_lines() {
        let ast = parse("* divider\n\nV1 1 0 10\n   \nR1 1 0 1k\n").unwrap();
        assert_eq!(ast.lines.len(), 3);
        assert!(matches!(ast.lines[0], NetlistLine::Comment { line: 1, .. }));
        assert_eq!(ast.elements().count(), 2);
    }

    #[test]
    fn test_parse_title_line() {
        let input = "Voltage divider test\nV1 1 0 10\nR1 1 0 1k";
        let mut parser = Parser::with_options(Lexer::new(input), ParseOptions::with_title());
        let ast = parser.parse().unwrap();
        assert_eq!(ast.title.as_deref(), Some("Voltage divider test"));
        assert_eq!(ast.elements().count(), 2);
        assert_eq!(ast.elements().next().unwrap().line, 2);
    }

    #[test]
    fn test_lowercase_type_letter() {
        let ast = parse("r1 a b 1k\nvIn a 0 1").unwrap();
        let elements: Vec<_> = ast.elements().collect();
        assert_eq!(elements[0].kind, ElementKind::Resistor);
        assert_eq!(elements[0].name, "R1");
        assert_eq!(elements[1].name, "VIn");
    }

    #[test]
    fn test_unknown_element_type() {
        let err = parse("R1 1 0 1k\nC1 1 0 1u").unwrap_err();
        match err {
            MnaError::UnknownElementType { element_type, line } => {
                assert_eq!(element_type, "C");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_and_bad_value() {
        assert!(matches!(parse("G1 1 0 2 1"), Err(MnaError::Parse { line: 1, .. })));
        assert!(matches!(parse("R1 1 0 ten"), Err(MnaError::Parse { line: 1, .. })));
    }
}

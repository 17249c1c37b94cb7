//! Lexer (tokenizer) for netlist text.
//!
//! Netlists are line oriented: every token is a whitespace-free word, and
//! line ends are significant. A `*` in the first column starts a comment
//! that runs to the end of the line.

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in a netlist.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A whitespace-free field (element name, node name, value)
    Word,
    /// A whole comment line, text without the leading `*`
    Comment,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing netlist input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line: self.line,
                    column: self.column,
                };
            }
        };

        let start_column = self.column;
        let start_line = self.line;

        match ch {
            '\n' => {
                self.advance();
                Token {
                    kind: TokenKind::Newline,
                    text: "\n".to_string(),
                    line: start_line,
                    column: start_column,
                }
            }
            '*' if start_column == 1 => {
                self.advance();
                let text = self.rest_of_line();
                Token {
                    kind: TokenKind::Comment,
                    text,
                    line: start_line,
                    column: start_column,
                }
            }
            _ => {
                let text = self.read_word();
                Token {
                    kind: TokenKind::Word,
                    text,
                    line: start_line,
                    column: start_column,
                }
            }
        }
    }

    /// Consume everything up to (not including) the next newline and return
    /// it with surrounding whitespace trimmed. Used for title and comment
    /// lines, whose spacing is preserved.
    pub fn rest_of_line(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text.trim().to_string()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            text.push(ch);
            self.advance();
        }
        text
    }
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = if let Some(last) = text.chars().last() {
        let mult = match last {
            'p' => 1e-12,
            'n' => 1e-9,
            'u' | 'µ' => 1e-6,
            'm' => 1e-3,
            'k' | 'K' => 1e3,
            'M' => 1e6,
            'G' => 1e9,
            _ => 1.0,
        };
        if mult != 1.0 {
            (&text[..text.len() - last.len_utf8()], mult)
        } else {
            (text, 1.0)
        }
    } else {
        (text, 1.0)
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6);
        assert_relative_eq!(parse_value("1M").unwrap(), 1_000_000.0);
        assert_relative_eq!(parse_value("2.2").unwrap(), 2.2);
        assert_relative_eq!(parse_value("1e-3").unwrap(), 1e-3);
        assert_relative_eq!(parse_value("-5").unwrap(), -5.0);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("k"), None);
    }

    #[test]
    fn test_lexer_words_and_newlines() {
        let mut lexer = Lexer::new("R1 in out 10k\nV1 in 0 5");

        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Word);
        assert_eq!(tok.text, "R1");
        assert_eq!((tok.line, tok.column), (1, 1));

        let tok = lexer.next_token();
        assert_eq!(tok.text, "in");
        assert_eq!(tok.column, 4);

        lexer.next_token();
        lexer.next_token();
        assert_eq!(lexer.next_token().kind, TokenKind::Newline);

        let tok = lexer.next_token();
        assert_eq!(tok.text, "V1");
        assert_eq!(tok.line, 2);
    }

    #[test]
    fn test_lexer_comment_only_in_first_column() {
        let mut lexer = Lexer::new("* a  comment here\nR*1 a b 1");

        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Comment);
        assert_eq!(tok.text, "a  comment here");

        assert_eq!(lexer.next_token().kind, TokenKind::Newline);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Word);
        assert_eq!(tok.text, "R*1");
    }
}

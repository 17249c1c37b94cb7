//! Netlist reader.
//!
//! Netlists are SPICE-like and line oriented: one element per line, fields
//! separated by whitespace, the element type given by the first letter of
//! its name.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist   = [ title ] { line }
//! line      = comment | element | empty
//! comment   = '*' { any_char }          (first column only)
//! element   = name node node [ node node ] [ value ]
//!
//! name      = type { non_space }
//! type      = 'R' | 'I' | 'V' | 'G' | 'E' | 'F' | 'H' | 'O'
//! node      = non_space { non_space }   ("0" is the reference node)
//! value     = number [ unit_suffix ]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! # Element Types
//!
//! | Type | Description | Syntax |
//! |------|-------------|--------|
//! | R | Resistor | `R<name> <a> <b> <ohms>` |
//! | I | Current source | `I<name> <a> <b> <amps>` |
//! | V | Voltage source | `V<name> <a> <b> <volts>` |
//! | G | Voltage-controlled current source | `G<name> <a> <b> <c> <d> <siemens>` |
//! | E | Voltage-controlled voltage source | `E<name> <a> <b> <c> <d> <gain>` |
//! | F | Current-controlled current source | `F<name> <a> <b> <c> <d> <gain>` |
//! | H | Current-controlled voltage source | `H<name> <a> <b> <c> <d> <ohms>` |
//! | O | Ideal op-amp | `O<name> <out_a> <out_b> <in_c> <in_d>` |
//!
//! F and H sense the current of a short circuit between `c` and `d`. The
//! op-amp output is floating between `a` and `b` and forces `V(c) = V(d)`.
//!
//! # Example
//!
//! ```text
//! Inverting amplifier
//! V1 in 0 1
//! R1 in minus 1k
//! R2 minus out 10k
//! O1 out 0 0 minus
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::{ParseOptions, Parser};

use crate::error::Result;

/// Parse netlist text without a title line.
pub fn parse(input: &str) -> Result<NetlistAst> {
    parse_with(input, ParseOptions::default())
}

/// Parse netlist text with the given options.
pub fn parse_with(input: &str, options: ParseOptions) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::with_options(lexer, options);
    parser.parse()
}

/// Parse a netlist file.
pub fn parse_file(path: &std::path::Path, options: ParseOptions) -> Result<NetlistAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::MnaError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_with(&content, options)
}

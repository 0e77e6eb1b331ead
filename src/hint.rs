// vim: set ai et ts=4 sw=4 sts=4:
//! Parsing of run-length hints.
//!
//! A hint text has one line per grid line; each line holds whitespace-separated
//! tokens that are either a non-negative run length or the unspecified marker
//! (`?`, or `-1` as older puzzle files spell it).
use std::fmt;
use log::trace;

use crate::error::Error;
use crate::row::Signature;

pub const UNSPECIFIED_MARKER: &str = "?";
const UNSPECIFIED_NUMERIC: &str = "-1";

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Token {
    Known(u32),
    Unspecified,
}
impl Token {
    pub fn parse(s: &str) -> Option<Token> {
        match s {
            UNSPECIFIED_MARKER | UNSPECIFIED_NUMERIC => Some(Token::Unspecified),
            _ => s.parse::<u32>().ok().map(Token::Known),
        }
    }
}
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Known(k)    => write!(f, "{}", k),
            Token::Unspecified => write!(f, "{}", UNSPECIFIED_MARKER),
        }
    }
}

/// What a hint resolves to when looking up its candidates.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum HintKey {
    /// The single-`Unspecified` hint: every line content matches.
    Unconstrained,
    Signature(Signature),
}

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Hint {
    tokens: Vec<Token>,
}
impl Hint {
    pub fn new(tokens: Vec<Token>) -> Self {
        Hint { tokens }
    }
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
    pub fn is_unconstrained(&self) -> bool {
        self.tokens == [Token::Unspecified]
    }

    /// Resolves this hint into an index lookup key.
    ///
    /// Returns `None` for hints that mix `Unspecified` into anything other than
    /// the single-token form, since those have no matching rule.
    pub fn key(&self) -> Option<HintKey> {
        if self.is_unconstrained() {
            return Some(HintKey::Unconstrained);
        }
        let lengths = self.tokens.iter()
                                 .map(|t| match t {
                                     Token::Known(k)    => Some(*k),
                                     Token::Unspecified => None,
                                 })
                                 .collect::<Option<Vec<u32>>>()?;
        // "0", or any run of zeros, is the all-empty line
        if lengths.iter().all(|&k| k == 0) {
            return Some(HintKey::Signature(Signature::empty()));
        }
        Some(HintKey::Signature(Signature::new(lengths)))
    }
}
impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts = self.tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        write!(f, "{}", parts.join(" "))
    }
}

/// Parses a single hint line. Tokens that are neither numbers nor the marker are dropped.
pub fn parse_hint(line: &str) -> Option<Hint> {
    let tokens = line.split_whitespace()
                     .filter_map(|s| {
                         let token = Token::parse(s);
                         if token.is_none() {
                             trace!("dropping unrecognized hint token {:?}", s);
                         }
                         token
                     })
                     .collect::<Vec<_>>();
    match tokens.is_empty() {
        true  => None,
        false => Some(Hint::new(tokens)),
    }
}

/// Parses a block of hint text, one hint per line.
///
/// Blank input yields an empty sequence. Leading and trailing blank lines are
/// ignored, but a line in between that has no usable token is an error.
pub fn parse_hints(text: &str) -> Result<Vec<Hint>, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    // line numbers are reported relative to the original text
    let skipped = text[..text.len() - text.trim_start().len()].matches('\n').count();

    trimmed.lines()
           .enumerate()
           .map(|(i, line)| parse_hint(line).ok_or_else(|| Error::InvalidInput(
               format!("hint line {} has no run lengths: {:?}", i + skipped + 1, line.trim()))))
           .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Token::*;

    #[test]
    fn parses_numbers_and_markers() {
        let hints = parse_hints("1 2\n?\n-1\n0\n").unwrap();
        assert_eq!(hints.len(), 4);
        assert_eq!(hints[0].tokens(), &[Known(1), Known(2)]);
        assert_eq!(hints[1].tokens(), &[Unspecified]);
        assert_eq!(hints[2].tokens(), &[Unspecified]);
        assert_eq!(hints[3].tokens(), &[Known(0)]);
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(parse_hints("").unwrap().is_empty());
        assert!(parse_hints("  \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn junk_tokens_are_dropped() {
        let hints = parse_hints("3 x 1\n2, 4 -7").unwrap();
        assert_eq!(hints[0].tokens(), &[Known(3), Known(1)]);
        assert_eq!(hints[1].tokens(), &[Known(4)]);
    }

    #[test]
    fn interior_line_without_tokens_is_invalid() {
        match parse_hints("\n1\n\n2\n") {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("line 3"), "{}", msg),
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert!(parse_hints("1\nfoo\n").is_err());
    }

    #[test]
    fn keys() {
        let key = |s: &str| parse_hint(s).unwrap().key();
        assert_eq!(key("?"), Some(HintKey::Unconstrained));
        assert_eq!(key("0"), Some(HintKey::Signature(Signature::empty())));
        assert_eq!(key("0 0"), Some(HintKey::Signature(Signature::empty())));
        assert_eq!(key("0 2"), Some(HintKey::Signature(Signature::new(vec![0, 2]))));
        assert_eq!(key("2 3"), Some(HintKey::Signature(Signature::new(vec![2, 3]))));
        assert_eq!(key("1 ?"), None);
        assert_eq!(key("? ?"), None);
    }

    #[test]
    fn displays_like_its_input() {
        assert_eq!(parse_hint("1  ?   3").unwrap().to_string(), "1 ? 3");
    }
}

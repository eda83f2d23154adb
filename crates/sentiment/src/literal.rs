//! Strict parser for a list literal of quoted strings, e.g.
//! `["Positive", 'Neutral', "Negative",]`.
//!
//! Both quote styles are accepted, along with the usual backslash escapes
//! and one trailing comma. Anything else (numbers, nested lists, bare words,
//! text after the closing bracket) is rejected.

use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },
}

/// Parse `src` as a list of string literals
pub fn parse_string_list(src: &str) -> Result<Vec<String>, LiteralError> {
    let mut parser = Parser {
        chars: src.char_indices().peekable(),
    };
    let items = parser.list()?;
    parser.skip_whitespace();
    match parser.chars.next() {
        Some((offset, found)) => Err(LiteralError::UnexpectedChar { found, offset }),
        None => Ok(items),
    }
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((offset, found)) => Err(LiteralError::UnexpectedChar { found, offset }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn list(&mut self) -> Result<Vec<String>, LiteralError> {
        self.skip_whitespace();
        self.expect('[')?;

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek().copied() {
                Some((_, ']')) => {
                    self.chars.next();
                    return Ok(items);
                }
                Some((_, '"' | '\'')) => {
                    items.push(self.string()?);
                    self.skip_whitespace();
                    match self.chars.next() {
                        Some((_, ',')) => continue,
                        Some((_, ']')) => return Ok(items),
                        Some((offset, found)) => {
                            return Err(LiteralError::UnexpectedChar { found, offset });
                        }
                        None => return Err(LiteralError::UnexpectedEnd),
                    }
                }
                Some((offset, found)) => {
                    return Err(LiteralError::UnexpectedChar { found, offset });
                }
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let (offset, quote) = self.chars.next().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();

        while let Some((_, c)) = self.chars.next() {
            match c {
                c if c == quote => return Ok(out),
                // single line literals only
                '\n' => break,
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, 'r')) => out.push('\r'),
                    Some((_, '0')) => out.push('\0'),
                    Some((_, escaped @ ('\\' | '\'' | '"'))) => out.push(escaped),
                    Some((_, other)) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => break,
                },
                c => out.push(c),
            }
        }

        Err(LiteralError::UnterminatedString { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_double_and_single_quoted_items() {
        assert_eq!(
            parse_string_list(r#"["Positive", 'Negative',"Neutral"]"#),
            Ok(strings(&["Positive", "Negative", "Neutral"]))
        );
    }

    #[test]
    fn allows_whitespace_newlines_and_trailing_comma() {
        let src = "[\n  \"Positive\",\n  \"Neutral\",\n]\n";
        assert_eq!(
            parse_string_list(src),
            Ok(strings(&["Positive", "Neutral"]))
        );
    }

    #[test]
    fn parses_empty_list() {
        assert_eq!(parse_string_list("[]"), Ok(vec![]));
        assert_eq!(parse_string_list("[ \n ]"), Ok(vec![]));
    }

    #[test]
    fn handles_escapes() {
        assert_eq!(
            parse_string_list(r#"["a\"b", 'it\'s', "x\\y", "\q"]"#),
            Ok(strings(&["a\"b", "it's", "x\\y", "\\q"]))
        );
    }

    #[test]
    fn rejects_bare_words_and_numbers() {
        assert_eq!(
            parse_string_list("[Positive]"),
            Err(LiteralError::UnexpectedChar {
                found: 'P',
                offset: 1
            })
        );
        assert!(parse_string_list("[1, 2]").is_err());
        assert!(parse_string_list(r#"[["Positive"]]"#).is_err());
    }

    #[test]
    fn rejects_missing_separators_and_stray_commas() {
        assert!(parse_string_list(r#"["a" "b"]"#).is_err());
        assert!(parse_string_list(r#"[,"a"]"#).is_err());
        assert!(parse_string_list(r#"["a",,"b"]"#).is_err());
    }

    #[test]
    fn rejects_unterminated_input() {
        assert_eq!(
            parse_string_list(r#"["Positive"#),
            Err(LiteralError::UnterminatedString { offset: 1 })
        );
        assert_eq!(
            parse_string_list(r#"["Positive","#),
            Err(LiteralError::UnexpectedEnd)
        );
        assert_eq!(
            parse_string_list("[\"Posi\ntive\"]"),
            Err(LiteralError::UnterminatedString { offset: 1 })
        );
    }

    #[test]
    fn rejects_trailing_content() {
        assert_eq!(
            parse_string_list(r#"["a"] x"#),
            Err(LiteralError::UnexpectedChar {
                found: 'x',
                offset: 6
            })
        );
    }
}

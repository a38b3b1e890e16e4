//! Signature list text format.
//!
//! The format is line-oriented and whitespace-separated: a bare word
//! opens a named entry, two-hex-digit tokens are literal bytes, `??`
//! is a wildcard, `and`/`AND` drops a checkpoint and `end`/`END`
//! closes one signature. An entry may stack several signatures. A
//! malformed file is rejected whole; the caller's current list stays
//! untouched.

use crate::sig::{NamedSignature, Token};
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

/// Upper bound on tokens in one signature.
pub const MAX_SIGSIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read signature file: {0}")]
    Io(#[from] io::Error),

    #[error("bad token {token:?} on line {line}")]
    BadToken { line: usize, token: String },

    #[error("signature data on line {line} appears before any name")]
    MissingName { line: usize },

    #[error("signature ending on line {line} exceeds {max} tokens")]
    TooLong { line: usize, max: usize },
}

fn is_hex_pair(tok: &str) -> bool {
    tok.len() == 2 && tok.chars().all(|c| c.is_ascii_hexdigit())
}

/// Parse a whole signature list from text.
pub fn parse_signatures(text: &str) -> Result<Vec<NamedSignature>, ParseError> {
    let mut entries: Vec<NamedSignature> = Vec::new();
    let mut pending: Vec<Token> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;

        for tok in line.split_whitespace() {
            let token = match tok {
                "??" => Some(Token::Any),
                "and" | "AND" => Some(Token::And),
                "end" | "END" => Some(Token::End),
                t if is_hex_pair(t) => {
                    // the pair is pre-checked, so this cannot fail
                    Some(Token::Byte(u8::from_str_radix(t, 16).unwrap_or(0)))
                }
                t if t.len() == 2 => {
                    return Err(ParseError::BadToken {
                        line: line_no,
                        token: t.to_string(),
                    });
                }
                t => {
                    // a name opens a new entry, but only between
                    // signatures
                    if !pending.is_empty() {
                        return Err(ParseError::BadToken {
                            line: line_no,
                            token: t.to_string(),
                        });
                    }

                    entries.push(NamedSignature {
                        name: t.to_string(),
                        signatures: Vec::new(),
                    });

                    None
                }
            };

            let token = match token {
                Some(tk) => tk,
                None => continue,
            };

            if entries.is_empty() {
                return Err(ParseError::MissingName { line: line_no });
            }

            pending.push(token);

            if pending.len() > MAX_SIGSIZE {
                return Err(ParseError::TooLong {
                    line: line_no,
                    max: MAX_SIGSIZE,
                });
            }

            if token == Token::End {
                let sig = std::mem::take(&mut pending);
                if let Some(entry) = entries.last_mut() {
                    entry.signatures.push(sig);
                }
            }
        }
    }

    // a trailing signature without END closes implicitly
    if !pending.is_empty() {
        pending.push(Token::End);
        if let Some(entry) = entries.last_mut() {
            entry.signatures.push(pending);
        }
    }

    Ok(entries)
}

/// Load and parse a signature file from disk.
pub fn load_signature_file<P: AsRef<Path>>(path: P) -> Result<Vec<NamedSignature>, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_signatures(&text)
}

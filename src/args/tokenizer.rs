//! Tokenizer — raw argument string → ordered tokens.
//!
//! A token is either a double-quoted span (quotes stripped, inner whitespace
//! kept) or a run of characters that are neither whitespace nor `"`.
//! Embedded quotes cannot be escaped.

use thiserror::Error;

/// Errors produced while splitting a raw argument string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated quote starting at byte {offset}")]
    UnterminatedQuote { offset: usize },
}

/// Split `raw` into tokens, left to right.
///
/// Empty or all-whitespace input yields an empty vector; substituting a
/// default token is the caller's decision.
pub fn tokenize(raw: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut chars = raw.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' {
            chars.next();
            let mut quoted = String::new();
            let mut closed = false;
            for (_, qc) in chars.by_ref() {
                if qc == '"' {
                    closed = true;
                    break;
                }
                quoted.push(qc);
            }
            if !closed {
                return Err(TokenizeError::UnterminatedQuote { offset: start });
            }
            tokens.push(quoted);
            continue;
        }

        let mut bare = String::new();
        while let Some(&(_, bc)) = chars.peek() {
            if bc.is_whitespace() || bc == '"' {
                break;
            }
            bare.push(bc);
            chars.next();
        }
        tokens.push(bare);
    }

    Ok(tokens)
}

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use crate::FormatError;

/// A non-empty line of a source, split on whitespace.
#[derive(Debug)]
pub(crate) struct Line {
    pub(crate) number: usize,
    pub(crate) tokens: Vec<String>,
}

impl Line {
    /// Parse every token of the line as an unsigned integer.
    pub(crate) fn integers(&self) -> Result<Vec<u32>, FormatError> {
        self.tokens
            .iter()
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|_| FormatError::InvalidInteger {
                        line: self.number,
                        token: token.clone(),
                    })
            })
            .collect()
    }
}

/// Reads all the non-empty lines of the source. Line numbers are 1-based and count the empty
/// lines which are skipped.
pub(crate) fn non_empty_lines(source: impl Read) -> Result<Vec<Line>, FormatError> {
    let mut reader = BufReader::new(source);
    let mut buffer = String::new();
    let mut lines = Vec::new();
    let mut number = 0;

    loop {
        buffer.clear();
        let read_bytes = reader.read_line(&mut buffer)?;
        if read_bytes == 0 {
            break;
        }
        number += 1;

        let tokens = buffer
            .split_whitespace()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if !tokens.is_empty() {
            lines.push(Line { number, tokens });
        }
    }

    Ok(lines)
}

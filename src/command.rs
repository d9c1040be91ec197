//! Parses the text protocol read by the driver.
//!
//! Indices on the wire are 0-based; they are kept that way here and
//! translated to slot numbers by the driver.

use std::str::FromStr;

use crate::error::DriverError;
use crate::store::Amount;

/// First line of the input: `serverCount capacity commandCount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub server_count: usize,
    pub capacity: Amount,
    pub command_count: usize,
}

impl Header {
    pub fn parse(line: &str) -> Result<Self, DriverError> {
        let words = line.split_whitespace().collect::<Vec<_>>();
        if words.len() != 3 {
            return Err(DriverError::Header(format!(
                "expected `serverCount capacity commandCount`, got {:?}",
                line.trim()
            )));
        }

        let header_err = |word: &str| DriverError::Header(format!("not a number: {:?}", word));
        Ok(Header {
            server_count: words[0].parse().map_err(|_| header_err(words[0]))?,
            capacity: words[1].parse().map_err(|_| header_err(words[1]))?,
            command_count: words[2].parse().map_err(|_| header_err(words[2]))?,
        })
    }
}

/// Parses the line of initial slot values.
pub fn parse_values(line: &str, expected: usize) -> Result<Vec<Amount>, DriverError> {
    let values = line
        .split_whitespace()
        .map(|word| {
            word.parse::<Amount>()
                .map_err(|_| DriverError::Header(format!("not a slot value: {:?}", word)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != expected {
        return Err(DriverError::Header(format!(
            "expected {} slot values, got {}",
            expected,
            values.len()
        )));
    }
    Ok(values)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `F size slot`
    Fill { size: Amount, slot: usize },
    /// `D size threshold`
    Delete { size: Amount, threshold: Amount },
    /// `Q left right`, both inclusive.
    Query { left: usize, right: usize },
}

impl Command {
    /// Parses one command line. `line_no` is only used for error messages.
    pub fn parse(line: &str, line_no: usize) -> Result<Self, DriverError> {
        let words = line.split_whitespace().collect::<Vec<_>>();
        if words.len() != 3 {
            return Err(DriverError::Parse {
                line: line_no,
                message: format!("expected `COMMAND x y`, got {:?}", line.trim()),
            });
        }

        let (x, y) = (words[1], words[2]);
        match words[0] {
            "F" => Ok(Command::Fill {
                size: number(x, line_no)?,
                slot: number(y, line_no)?,
            }),
            "D" => Ok(Command::Delete {
                size: number(x, line_no)?,
                threshold: number(y, line_no)?,
            }),
            "Q" => Ok(Command::Query {
                left: number(x, line_no)?,
                right: number(y, line_no)?,
            }),
            other => Err(DriverError::UnknownCommand(other.to_owned())),
        }
    }
}

fn number<N: FromStr>(word: &str, line_no: usize) -> Result<N, DriverError> {
    word.parse().map_err(|_| DriverError::Parse {
        line: line_no,
        message: format!("not a valid number: {:?}", word),
    })
}

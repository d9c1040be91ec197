use std::io;
use thiserror::Error;

use crate::store::Amount;

/// Failure of an operation on the slot store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Tried to get sum from 1 to {index}, which is higher than the max ({len})")]
    OutOfBounds { index: usize, len: usize },

    #[error("Range must start at 1 or above")]
    InvalidRange,

    #[error("Capacity must not be negative: {0}")]
    InvalidCapacity(Amount),

    #[error("{len} slots of capacity {capacity} could hold more than the largest amount")]
    CapacityOverflow { capacity: Amount, len: usize },

    #[error("Slot {index} holds {value}, outside of capacity 0..={capacity}")]
    SlotOverCapacity {
        index: usize,
        value: Amount,
        capacity: Amount,
    },

    #[error("Store window must cover at least one slot")]
    InvalidWindow,

    /// No prefix of the slots reaches the threshold.
    #[error("No slot reaches threshold {threshold} (total stored: {total})")]
    ThresholdUnreachable { threshold: Amount, total: Amount },
}

/// Failure of the command driver. All of these end the run.
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid header: {0}")]
    Header(String),

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Command not recognized: {0}")]
    UnknownCommand(String),

    #[error("Input ended after {read} of {expected} commands")]
    UnexpectedEof { read: usize, expected: usize },

    #[error("Line {line}: {discarded} left over after filling the store window")]
    Discarded { line: usize, discarded: Amount },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

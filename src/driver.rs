//! Runs a command script against a slot store.

use std::io::{BufRead, Write};

use log::Level;

use crate::command::{parse_values, Command, Header};
use crate::config::Config;
use crate::error::DriverError;
use crate::store::IndexedCapacityStore;
use crate::trace::{LogTracer, NoTrace, Tracer};

/// Reads the header, the initial slot values and the commands from `input`,
/// writing query answers to `output`.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    output: &mut W,
) -> Result<(), DriverError> {
    let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));

    let header = match lines.next() {
        Some((_, line)) => Header::parse(&line?)?,
        None => return Err(DriverError::Header("input is empty".to_owned())),
    };
    info!(
        "{} servers of capacity {}, {} commands",
        header.server_count, header.capacity, header.command_count
    );

    // The values line may legitimately be empty when there are no servers.
    let values = match lines.next() {
        Some((_, line)) => parse_values(&line?, header.server_count)?,
        None if header.server_count == 0 => Vec::new(),
        None => return Err(DriverError::Header("missing slot values".to_owned())),
    };

    let tracer: Box<dyn Tracer> = if log_enabled!(Level::Trace) {
        Box::new(LogTracer)
    } else {
        Box::new(NoTrace)
    };
    let mut store = IndexedCapacityStore::with_tracer(values, header.capacity, tracer)?
        .with_window(config.window)?;
    debug!("initial values {:?}", store.values());
    if store.is_empty() {
        warn!("no servers: fills are discarded and deletes fail");
    }

    let mut read = 0;
    while read < header.command_count {
        let (line_no, line) = match lines.next() {
            Some((line_no, line)) => (line_no, line?),
            None => {
                return Err(DriverError::UnexpectedEof {
                    read,
                    expected: header.command_count,
                })
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        read += 1;

        let command = Command::parse(&line, line_no)?;
        debug!("line {}: {:?}", line_no, command);
        execute(config, &mut store, command, line_no, output)?;
    }

    if config.dump {
        writeln!(output, "{}", store)?;
    }
    Ok(())
}

fn execute<T: Tracer, W: Write>(
    config: &Config,
    store: &mut IndexedCapacityStore<T>,
    command: Command,
    line_no: usize,
    output: &mut W,
) -> Result<(), DriverError> {
    match command {
        Command::Fill { size, slot } => {
            let outcome = store.store(size, slot.saturating_add(1));
            if outcome.discarded > 0 {
                warn!(
                    "line {}: stored {} of {}, {} did not fit in {} slots of capacity {}",
                    line_no,
                    outcome.stored,
                    size,
                    outcome.discarded,
                    store.window(),
                    store.capacity()
                );
                if config.strict {
                    return Err(DriverError::Discarded {
                        line: line_no,
                        discarded: outcome.discarded,
                    });
                }
            }
            trace!("total after fill: {}", store.total());
        }
        Command::Delete { size, threshold } => {
            let outcome = store.delete_amount(size, threshold)?;
            debug!(
                "line {}: deleted {} from slot {}, {:?} left",
                line_no,
                outcome.deleted,
                outcome.index,
                store.value(outcome.index)
            );
        }
        Command::Query { left, right } => {
            let sum = store.range_sum(left.saturating_add(1), right.saturating_add(1))?;
            writeln!(output, "({},{}): {}", left, right, sum)?;
        }
    }
    Ok(())
}

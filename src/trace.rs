//! Optional tracing of tree mutations.

use std::fmt;

/// One step of a tree mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// Initial value folded into its own cell during construction.
    Build { index: usize, cell: i64 },
    /// A built cell added into its parent during construction.
    Propagate { from: usize, to: usize, cell: i64 },
    /// Start of an update chain.
    Update { index: usize, delta: i64 },
    /// A cell on the update chain after the delta was applied.
    Ascend { index: usize, cell: i64 },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TraceEvent::Build { index, cell } => write!(f, "t[{}] = {}", index, cell),
            TraceEvent::Propagate { from, to, cell } => {
                write!(f, "t[{}] += t[{}] -> {}", to, from, cell)
            }
            TraceEvent::Update { index, delta } => {
                write!(f, "updating index {} with delta {}", index, delta)
            }
            TraceEvent::Ascend { index, cell } => write!(f, "t[{}] -> {}", index, cell),
        }
    }
}

pub trait Tracer {
    fn event(&self, event: &TraceEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl Tracer for NoTrace {
    fn event(&self, _: &TraceEvent) {}
}

/// Forwards events to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn event(&self, event: &TraceEvent) {
        trace!("{}", event);
    }
}

impl<'a, T: Tracer + ?Sized> Tracer for &'a T {
    fn event(&self, event: &TraceEvent) {
        (**self).event(event)
    }
}

impl<T: Tracer + ?Sized> Tracer for Box<T> {
    fn event(&self, event: &TraceEvent) {
        (**self).event(event)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records events for inspection.
    #[derive(Default)]
    pub struct Recorder {
        pub events: RefCell<Vec<TraceEvent>>,
    }

    impl Tracer for Recorder {
        fn event(&self, event: &TraceEvent) {
            self.events.borrow_mut().push(*event);
        }
    }

    #[test]
    fn test_display() {
        let event = TraceEvent::Propagate {
            from: 1,
            to: 2,
            cell: 10,
        };
        assert_eq!(event.to_string(), "t[2] += t[1] -> 10");
    }

    #[test]
    fn test_forwarding() {
        let recorder = Recorder::default();
        {
            let boxed: Box<dyn Tracer + '_> = Box::new(&recorder);
            boxed.event(&TraceEvent::Update { index: 3, delta: -2 });
        }
        assert_eq!(
            *recorder.events.borrow(),
            vec![TraceEvent::Update { index: 3, delta: -2 }]
        );
    }
}

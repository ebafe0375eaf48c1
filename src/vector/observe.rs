//! Per-iteration tracing of the Nelder-Mead driver.
//!
//! Observers only look: whatever they do, the search takes the same steps.

use std::fmt;

use log::debug;

use super::simplex::Simplex;

/// The simplex update chosen in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// The worst vertex was replaced by the expanded point.
    Expand,
    /// The worst vertex was replaced by the reflected point.
    Reflect,
    /// The worst vertex was replaced by the contraction outside the simplex.
    ContractOutside,
    /// The worst vertex was replaced by the contraction inside the simplex.
    ContractInside,
    /// Every vertex but the best moved toward the best.
    Shrink,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Operation::Expand => "expand",
            Operation::Reflect => "reflect",
            Operation::ContractOutside => "contract outside",
            Operation::ContractInside => "contract inside",
            Operation::Shrink => "shrink",
        };
        f.pad(name)
    }
}

/// Emitted after every completed iteration, once the simplex is sorted again.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Number of completed iterations, starting at 1.
    pub iteration: usize,
    pub operation: Operation,
    pub best_cost: f64,
    pub simplex: &'a Simplex,
}

/// Receives solver events.
pub trait Observer<E> {
    fn observe(&mut self, event: &E);
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn observe(&mut self, event: &E) {
        self(event)
    }
}

/// Ignores every event.
impl<E> Observer<E> for () {
    fn observe(&mut self, _event: &E) {}
}

/// Writes one `debug` log record per iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<'a> Observer<Event<'a>> for LogObserver {
    fn observe(&mut self, event: &Event<'a>) {
        debug!(
            "iteration {}: {}, best cost {}",
            event.iteration, event.operation, event.best_cost
        );
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::prelude::*;

    #[test]
    fn operation_names() {
        assert_eq!(Operation::ContractOutside.to_string(), "contract outside");
        assert_eq!(Operation::Shrink.to_string(), "shrink");
    }

    #[test]
    fn closures_observe() {
        let simplex = Simplex::from_array(array![[0.0], [1.0]].view()).unwrap();
        let event = Event {
            iteration: 1,
            operation: Operation::Reflect,
            best_cost: 0.5,
            simplex: &simplex,
        };

        let mut seen = Vec::new();
        {
            let mut observer = |e: &Event<'_>| seen.push((e.iteration, e.operation));
            observer.observe(&event);
            observer.observe(&event);
        }
        assert_eq!(seen, vec![(1, Operation::Reflect), (1, Operation::Reflect)]);

        ().observe(&event);
        LogObserver.observe(&event);
    }
}

//! Error Reporting
//!
//! Failed exchanges never surface as `Err` from the engine; they go to an
//! [`ErrorReporter`] together with the element that started them.

use std::cell::RefCell;
use std::rc::Rc;

use hx_dom::NodeId;

use crate::ExchangeError;

pub trait ErrorReporter {
    fn report(&mut self, element: NodeId, error: &ExchangeError);
}

/// Logs failures at `warn`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&mut self, element: NodeId, error: &ExchangeError) {
        tracing::warn!("Exchange from {} failed: {}", element, error);
    }
}

/// Keeps every report. Clones share the same list.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    reports: Rc<RefCell<Vec<(NodeId, ExchangeError)>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(NodeId, ExchangeError)> {
        self.reports.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&mut self, element: NodeId, error: &ExchangeError) {
        self.reports.borrow_mut().push((element, error.clone()));
    }
}

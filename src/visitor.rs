//! Progress-reporting sink for [`crate::driver::CgcDriver::optimize`].
//!
//! This is the crate's entire observability surface — there is no separate
//! metrics/logging layer. A visitor is passed into `optimize` for the
//! duration of one call; it is never stored.

/// Severity passed to [`Visitor::print_log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Observes one run of [`crate::driver::CgcDriver::optimize`].
///
/// `D` is the driver type being observed — generic so the trait can be
/// implemented without a circular reference back to a concrete driver type.
/// `visit`'s returned `bool` is a reserved cancellation extension point: the
/// core does not presently consult it.
pub trait Visitor<D> {
    fn begin(&mut self, _driver: &D) {}
    fn end(&mut self, _driver: &D) {}
    fn visit(&mut self, _driver: &D) -> bool {
        true
    }
    fn print_log(&mut self, _level: LogLevel, _message: &str) {}
    fn clear_log_names(&mut self) {}
    fn add_log_names(&mut self, _names: &[String]) {}
    fn set_log_value(&mut self, _index: usize, _value: f64) {}
}

/// A visitor that does nothing — the default when no progress reporting is
/// wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisitor;

impl<D> Visitor<D> for NullVisitor {}

/// A visitor that keeps an in-memory log and the latest named values,
/// useful for tests and as a demonstrable concrete visitor without an outer
/// scripting/bindings layer.
#[derive(Debug, Default, Clone)]
pub struct CollectingVisitor {
    pub log: Vec<(LogLevel, String)>,
    pub log_names: Vec<String>,
    pub log_values: Vec<f64>,
    pub visit_count: usize,
    pub began: bool,
    pub ended: bool,
}

impl<D> Visitor<D> for CollectingVisitor {
    fn begin(&mut self, _driver: &D) {
        self.began = true;
    }

    fn end(&mut self, _driver: &D) {
        self.ended = true;
    }

    fn visit(&mut self, _driver: &D) -> bool {
        self.visit_count += 1;
        true
    }

    fn print_log(&mut self, level: LogLevel, message: &str) {
        self.log.push((level, message.to_string()));
    }

    fn clear_log_names(&mut self) {
        self.log_names.clear();
        self.log_values.clear();
    }

    fn add_log_names(&mut self, names: &[String]) {
        self.log_names.extend_from_slice(names);
        self.log_values.resize(self.log_names.len(), 0.0);
    }

    fn set_log_value(&mut self, index: usize, value: f64) {
        if index >= self.log_values.len() {
            self.log_values.resize(index + 1, 0.0);
        }
        self.log_values[index] = value;
    }
}

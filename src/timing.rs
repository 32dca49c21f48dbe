use std::fmt;
use std::time::Instant;

/// Wall-clock bracket around one kernel execution.
pub struct Timing {
    label: String,
    start: Instant,
    end: Option<Instant>,
}

impl Timing {
    pub fn start(label: &str) -> Timing {
        Timing {
            label: label.to_string(),
            start: Instant::now(),
            end: None,
        }
    }

    pub fn end(self) -> Timing {
        Timing {
            end: Some(Instant::now()),
            ..self
        }
    }

    /// Elapsed milliseconds between `start` and `end`; zero while the bracket
    /// is still open.
    pub fn elapsed_ms(&self) -> f64 {
        match self.end {
            Some(end) => end.duration_since(self.start).as_secs_f64() * 1000.0,
            None => 0.0,
        }
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} time: {:.6} ms", self.label, self.elapsed_ms())
    }
}

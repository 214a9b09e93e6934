//! Where readings go once a poll succeeds.

use std::io::{self, Write};

use crate::reading::Reading;

/// Output boundary of the poller. Readings arrive in poll order.
pub trait ReadingSink {
    fn emit(&mut self, reading: &Reading) -> io::Result<()>;
}

impl<F> ReadingSink for F
where
    F: FnMut(&Reading) -> io::Result<()>,
{
    fn emit(&mut self, reading: &Reading) -> io::Result<()> {
        self(reading)
    }
}

/// Writes one integer per line and flushes after each, so a pipe reader sees
/// every reading as soon as it is taken.
pub struct LineSink<W: Write> {
    out: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReadingSink for LineSink<W> {
    fn emit(&mut self, reading: &Reading) -> io::Result<()> {
        writeln!(self.out, "{}", reading.value)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_sink_writes_one_value_per_line() {
        let mut sink = LineSink::new(Vec::new());
        for (seq, value) in [(1, 10), (2, -5), (3, 0)] {
            sink.emit(&Reading { seq, value }).unwrap();
        }
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "10\n-5\n0\n");
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        let mut sink = |r: &Reading| -> io::Result<()> {
            seen.push(r.seq);
            Ok(())
        };
        sink.emit(&Reading { seq: 4, value: 1 }).unwrap();
        assert_eq!(seen, vec![4]);
    }
}

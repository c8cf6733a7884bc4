//! Report writers — pluggable consumers of [`crate::event::Event`], the
//! same shape as the teacher's `EventSerializer` trait in
//! `serialization.rs`: the matching core never formats output itself, it
//! just hands events to whatever sink the caller chose.

use crate::event::Event;

/// Consumes events as the engine produces them.
pub trait ReportSink {
    fn report(&mut self, event: &Event);

    /// Convenience for a whole command's worth of events at once.
    fn report_all(&mut self, events: &[Event]) {
        for event in events {
            self.report(event);
        }
    }
}

/// Renders each event as its spec §6 line, one per `Vec` entry.
#[derive(Debug, Default)]
pub struct LineReportSink {
    lines: Vec<String>,
}

impl LineReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReportSink for LineReportSink {
    fn report(&mut self, event: &Event) {
        self.lines.push(event.to_string());
    }
}

/// Serializes each event to a JSON document and writes it to the given
/// [`std::io::Write`], newline-delimited — the structured alternative to
/// [`LineReportSink`]'s spec-literal text, grounded in the teacher's
/// `serialization.rs` JSON serializer.
pub struct JsonReportSink<W: std::io::Write> {
    writer: W,
}

impl<W: std::io::Write> JsonReportSink<W> {
    pub fn new(writer: W) -> Self {
        JsonReportSink { writer }
    }
}

impl<W: std::io::Write> ReportSink for JsonReportSink<W> {
    fn report(&mut self, event: &Event) {
        match serde_json::to_writer(&mut self.writer, event) {
            Ok(()) => {
                let _ = self.writer.write_all(b"\n");
            }
            Err(err) => {
                tracing::error!(%err, "failed to serialize event to JSON");
            }
        }
    }
}

/// Collects events in memory, for tests and embedders that want the
/// structured values rather than rendered text.
#[derive(Debug, Default)]
pub struct VecReportSink {
    events: Vec<Event>,
}

impl VecReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl ReportSink for VecReportSink {
    fn report(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderId;

    #[test]
    fn line_sink_renders_spec_lines() {
        let mut sink = LineReportSink::new();
        sink.report(&Event::Accept { id: OrderId(1) });
        sink.report(&Event::CancelAccept { id: OrderId(2) });
        assert_eq!(sink.lines(), &["1 - Accept".to_string(), "2 - CancelAccept".to_string()]);
    }

    #[test]
    fn vec_sink_collects_structured_events() {
        let mut sink = VecReportSink::new();
        sink.report(&Event::Accept { id: OrderId(1) });
        assert_eq!(sink.events(), &[Event::Accept { id: OrderId(1) }]);
    }

    #[test]
    fn json_sink_writes_newline_delimited_json() {
        let mut buf = Vec::new();
        {
            let mut sink = JsonReportSink::new(&mut buf);
            sink.report(&Event::Accept { id: OrderId(1) });
            sink.report(&Event::CancelAccept { id: OrderId(2) });
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"Accept\""));
    }
}

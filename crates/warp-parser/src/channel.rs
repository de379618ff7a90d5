use std::sync::mpsc::{self, Receiver, SyncSender};

use warp_core::ParseOutcome;

// ── Types ──

/// Producer half of an outcome stream.
#[derive(Debug)]
pub struct OutcomeSink {
    tx: SyncSender<ParseOutcome>,
}

/// Consumer half of an outcome stream. Yields outcomes in the order they
/// were sent and ends once the sink has been dropped.
#[derive(Debug)]
pub struct OutcomeStream {
    rx: Receiver<ParseOutcome>,
}

// ── Public API ──

/// Create a zero-capacity channel: every `send` waits until the consumer
/// has taken the element, so the producer never runs ahead.
pub fn outcome_channel() -> (OutcomeSink, OutcomeStream) {
    let (tx, rx) = mpsc::sync_channel(0);
    (OutcomeSink { tx }, OutcomeStream { rx })
}

impl OutcomeSink {
    /// Hand `outcome` to the consumer. Returns `false` if the consumer is gone.
    pub fn send(&self, outcome: ParseOutcome) -> bool {
        self.tx.send(outcome).is_ok()
    }
}

impl Iterator for OutcomeStream {
    type Item = ParseOutcome;

    fn next(&mut self) -> Option<ParseOutcome> {
        self.rx.recv().ok()
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use warp_core::{ConfigRecord, ParseError};

    #[test]
    fn test_outcomes_arrive_in_send_order() {
        let (sink, stream) = outcome_channel();
        let producer = thread::spawn(move || {
            for i in 0..5 {
                assert!(sink.send(Ok(ConfigRecord::new(format!("n{i}"), "/p"))));
            }
        });

        let names: Vec<String> = stream
            .map(|o| o.unwrap().name().to_string())
            .collect();
        producer.join().unwrap();
        assert_eq!(names, vec!["n0", "n1", "n2", "n3", "n4"]);
    }

    #[test]
    fn test_stream_ends_when_sink_dropped() {
        let (sink, mut stream) = outcome_channel();
        drop(sink);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_send_reports_missing_consumer() {
        let (sink, stream) = outcome_channel();
        drop(stream);
        assert!(!sink.send(Err(ParseError::Cancelled)));
    }
}

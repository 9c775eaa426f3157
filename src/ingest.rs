//! Ingestion worker - radio poll loop feeding the sensor log
//!
//! Background task for the lifetime of the process: poll the radio link,
//! append each decoded payload to the durable log, wait out the poll
//! interval, repeat. Payloads go into the log verbatim (trimmed, no field
//! validation) - a garbled transmission is still preserved, and the read
//! path rejects it later. No error inside one iteration ever stops the loop.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::radio::{RadioError, RadioLink};
use crate::store::LogWriter;

/// Run the ingestion loop until the process exits. The worker owns the only
/// append handle to the log; the poll interval comes from configuration.
pub async fn run(mut radio: impl RadioLink + 'static, mut writer: LogWriter, poll_interval: Duration) {
    info!("Listening for radio messages...");

    loop {
        if radio.has_message() {
            match radio.receive() {
                Ok(payload) => ingest_payload(&payload, &mut writer),
                // Message drained between poll and receive; next pass catches up
                Err(RadioError::Empty) => {}
                Err(e) => warn!("Radio receive failed: {}", e),
            }
        }

        tokio::time::sleep(poll_interval).await;
    }
}

/// Decode one payload and append it as a single record line.
fn ingest_payload(payload: &[u8], writer: &mut LogWriter) {
    let text = match std::str::from_utf8(payload) {
        Ok(text) => text.trim(),
        Err(e) => {
            warn!("Dropping undecodable payload: {}", e);
            return;
        }
    };

    if text.is_empty() {
        return;
    }

    match writer.append(text) {
        Ok(()) => debug!("Received and written: {}", text),
        Err(e) => warn!("Failed to append record: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SensorLog;
    use std::collections::VecDeque;
    use tempfile::tempdir;

    /// Scripted radio: hands out queued payloads, then goes quiet.
    struct ScriptedRadio {
        queue: VecDeque<Vec<u8>>,
    }

    impl ScriptedRadio {
        fn new(payloads: &[&[u8]]) -> Self {
            Self {
                queue: payloads.iter().map(|p| p.to_vec()).collect(),
            }
        }
    }

    impl RadioLink for ScriptedRadio {
        fn has_message(&mut self) -> bool {
            !self.queue.is_empty()
        }

        fn receive(&mut self) -> Result<Vec<u8>, RadioError> {
            self.queue.pop_front().ok_or(RadioError::Empty)
        }
    }

    #[tokio::test]
    async fn payloads_are_trimmed_and_appended() {
        let dir = tempdir().unwrap();
        let log = SensorLog::new(dir.path().join("sensor_data.txt"));
        let mut writer = log.open_writer().unwrap();

        ingest_payload(b"  1.0,2.0,3.0,4.0\n", &mut writer);

        assert_eq!(
            log.read_latest().await.unwrap().as_deref(),
            Some("1.0,2.0,3.0,4.0")
        );
    }

    #[tokio::test]
    async fn malformed_records_are_still_appended() {
        let dir = tempdir().unwrap();
        let log = SensorLog::new(dir.path().join("sensor_data.txt"));
        let mut writer = log.open_writer().unwrap();

        // Accepted on ingest, rejected on read - never lose a raw transmission
        ingest_payload(b"1.0,2.0,abc", &mut writer);

        assert_eq!(
            log.read_latest().await.unwrap().as_deref(),
            Some("1.0,2.0,abc")
        );
    }

    #[tokio::test]
    async fn blank_payloads_are_skipped() {
        let dir = tempdir().unwrap();
        let log = SensorLog::new(dir.path().join("sensor_data.txt"));
        let mut writer = log.open_writer().unwrap();

        ingest_payload(b"   \n", &mut writer);

        assert_eq!(log.read_latest().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn one_bad_payload_does_not_stop_the_loop() {
        let dir = tempdir().unwrap();
        let log = SensorLog::new(dir.path().join("sensor_data.txt"));
        let writer = log.open_writer().unwrap();

        let radio = ScriptedRadio::new(&[
            &[0xff, 0xfe, 0xfd], // not UTF-8, dropped with a warning
            b"5.0,6.0,7.0,8.0",
        ]);

        let worker = tokio::spawn(run(radio, writer, Duration::from_secs(1)));

        // Let the loop work through both queued payloads
        for _ in 0..4 {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
        worker.abort();

        assert_eq!(
            log.read_latest().await.unwrap().as_deref(),
            Some("5.0,6.0,7.0,8.0")
        );
    }
}

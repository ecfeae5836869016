use crate::error::Result;
use nomads_data::LiveEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends simulation events to `<dir>/live.jsonl`, one JSON object per line.
pub struct HistoryLogger {
    live_file: Option<BufWriter<File>>,
    path: PathBuf,
}

impl HistoryLogger {
    pub fn new() -> Result<Self> {
        Self::new_at("logs")
    }

    pub fn new_at<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        let path = dir.join("live.jsonl");
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            live_file: Some(BufWriter::new(file)),
            path,
        })
    }

    /// A logger that discards everything.
    pub fn new_dummy() -> Self {
        Self {
            live_file: None,
            path: PathBuf::new(),
        }
    }

    pub fn log_event(&mut self, event: &LiveEvent) -> Result<()> {
        if let Some(ref mut file) = self.live_file {
            let json = serde_json::to_string(event)?;
            writeln!(file, "{}", json)?;
        }
        Ok(())
    }

    pub fn log_all<'a, I: IntoIterator<Item = &'a LiveEvent>>(&mut self, events: I) -> Result<()> {
        for event in events {
            self.log_event(event)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.live_file {
            file.flush()?;
        }
        Ok(())
    }

    /// Reads back everything this logger has written so far.
    pub fn read_events(&self) -> Result<Vec<LiveEvent>> {
        read_events(&self.path)
    }
}

/// Reads every well-formed event from a JSON-lines log. Unparseable lines are
/// skipped and a missing file reads as empty.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<LiveEvent>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return Ok(vec![]),
    };
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for l in reader.lines().map_while(std::result::Result::ok) {
        if let Ok(event) = serde_json::from_str::<LiveEvent>(&l) {
            events.push(event);
        }
    }
    Ok(events)
}

impl Drop for HistoryLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Failed to flush event log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomads_core::nomad::fixed_id;
    use nomads_data::DeathCause;

    #[test]
    fn test_events_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = HistoryLogger::new_at(dir.path()).unwrap();
        logger
            .log_event(&LiveEvent::Death {
                id: fixed_id(0),
                age: 33,
                tick: 120,
                timestamp: LiveEvent::now(),
                cause: DeathCause::Hunger,
            })
            .unwrap();
        logger
            .log_event(&LiveEvent::Extinction {
                tick: 121,
                timestamp: LiveEvent::now(),
            })
            .unwrap();
        logger.flush().unwrap();

        let events = logger.read_events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].tick(), 121);
        assert!(dir.path().join("live.jsonl").exists());
    }

    #[test]
    fn test_dummy_logger_writes_nothing() {
        let mut logger = HistoryLogger::new_dummy();
        logger
            .log_event(&LiveEvent::Extinction {
                tick: 1,
                timestamp: LiveEvent::now(),
            })
            .unwrap();
        assert!(logger.read_events().unwrap().is_empty());
    }
}

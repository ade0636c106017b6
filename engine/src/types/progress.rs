use std::time::Duration;

/// One point in a transfer's progress sequence. Snapshots are emitted in
/// chunk-arrival order and `bytes_received` never decreases within a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub bytes_received: u64,
    /// Known total, or `None` when neither the response nor the request
    /// carried a size.
    pub total_bytes: Option<u64>,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Percent complete, clamped to 100; `None` while the total is unknown.
    pub fn percent(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if self.bytes_received >= total {
                100.0
            } else {
                self.bytes_received as f64 * 100.0 / total as f64
            }
        })
    }

    /// Bytes per second. Elapsed time under one second counts as one so a
    /// rate is displayable from the first chunk on.
    pub fn rate(&self) -> f64 {
        self.bytes_received as f64 / self.elapsed.as_secs_f64().max(1.0)
    }

    pub fn is_indeterminate(&self) -> bool {
        self.total_bytes.is_none()
    }

    /// Display-ready record; pure, no state.
    pub fn report(&self) -> ProgressReport {
        let percent_text = match self.percent() {
            Some(percent) => format!("{percent:.0}%"),
            None => "--".to_string(),
        };
        let status_text = match self.total_bytes {
            Some(total) => format!(
                "{} of {} ({})",
                format_bytes(self.bytes_received),
                format_bytes(total),
                format_rate(self.rate())
            ),
            None => format!(
                "{} ({})",
                format_bytes(self.bytes_received),
                format_rate(self.rate())
            ),
        };
        ProgressReport {
            percent_text,
            status_text,
            is_indeterminate: self.is_indeterminate(),
        }
    }
}

/// What a UI shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressReport {
    pub percent_text: String,
    pub status_text: String,
    pub is_indeterminate: bool,
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.2} GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.2} MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.2} KB", bytes as f64 / 1_000.0)
    } else {
        format!("{bytes} B")
    }
}

pub fn format_rate(bytes_per_sec: f64) -> String {
    if bytes_per_sec >= 1_000_000.0 {
        format!("{:.2} MB/s", bytes_per_sec / 1_000_000.0)
    } else if bytes_per_sec >= 1_000.0 {
        format!("{:.2} KB/s", bytes_per_sec / 1_000.0)
    } else {
        format!("{bytes_per_sec:.0} B/s")
    }
}

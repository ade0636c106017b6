use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{Error, Result};
use crate::types::{Format, FormatKind};

/// Per-source selection state and the single-transfer guard.
///
/// A fresh session is created (or [`Session::reset`]) each time metadata
/// resolution restarts. The format slots change only through
/// [`Session::select`]; the guard changes only through
/// [`Session::try_begin_transfer`] and [`Session::end_transfer`].
#[derive(Debug)]
pub struct Session {
    original_input: String,
    current_title: String,
    video: Option<Format>,
    audio: Option<Format>,
    transfer_in_flight: AtomicBool,
}

impl Session {
    pub fn new(original_input: impl Into<String>, current_title: impl Into<String>) -> Self {
        Self {
            original_input: original_input.into(),
            current_title: current_title.into(),
            video: None,
            audio: None,
            transfer_in_flight: AtomicBool::new(false),
        }
    }

    /// Raw source URL the user submitted; passed through to proxy and
    /// combine request bodies.
    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    /// Resolved title, the default artifact base name.
    pub fn title(&self) -> &str {
        &self.current_title
    }

    pub fn video(&self) -> Option<&Format> {
        self.video.as_ref()
    }

    pub fn audio(&self) -> Option<&Format> {
        self.audio.as_ref()
    }

    /// Stores `format` under `slot` only if its derived kind matches; the
    /// state is unchanged on failure.
    pub fn select(&mut self, slot: FormatKind, format: Format) -> Result<()> {
        let actual = format.kind();
        if actual != slot {
            return Err(Error::InvalidSelection {
                expected: slot,
                actual,
            });
        }
        match slot {
            FormatKind::Video => self.video = Some(format),
            FormatKind::Audio => self.audio = Some(format),
        }
        Ok(())
    }

    pub fn can_combine(&self) -> bool {
        self.video.is_some() && self.audio.is_some()
    }

    /// Check-and-set guard: at most one transfer (single or combine) may be
    /// active. Repeated starts fail fast instead of queueing.
    pub fn try_begin_transfer(&self) -> Result<()> {
        self.transfer_in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| Error::TransferInProgress)?;
        Ok(())
    }

    /// Unconditionally clears the guard; invoked on every transfer exit
    /// path, whatever the outcome.
    pub fn end_transfer(&self) {
        self.transfer_in_flight.store(false, Ordering::SeqCst);
    }

    pub fn transfer_in_flight(&self) -> bool {
        self.transfer_in_flight.load(Ordering::SeqCst)
    }

    /// Restores the all-absent state for a new resolution of `original_input`.
    pub fn reset(&mut self, original_input: impl Into<String>, current_title: impl Into<String>) {
        self.original_input = original_input.into();
        self.current_title = current_title.into();
        self.video = None;
        self.audio = None;
        self.transfer_in_flight.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_format() -> Format {
        Format {
            url: "https://cdn.example/v".to_string(),
            descriptor: "137 - 1920x1080 (1080p)".to_string(),
            codec: Some("avc1.640028".to_string()),
            extension: "mp4".to_string(),
            filesize: Some(2_000_000),
            bitrate: None,
            sample_rate: None,
            resolution: Some("1920x1080".to_string()),
        }
    }

    fn audio_format() -> Format {
        Format {
            url: "https://cdn.example/a".to_string(),
            descriptor: "140 - audio only (medium)".to_string(),
            codec: Some("mp4a.40.2".to_string()),
            extension: "m4a".to_string(),
            filesize: Some(500_000),
            bitrate: Some(128.0),
            sample_rate: Some(44_100.0),
            resolution: None,
        }
    }

    fn session() -> Session {
        Session::new("https://example.com/watch?v=1", "My Video")
    }

    #[test]
    fn select_rejects_a_kind_mismatch_and_leaves_state_unchanged() {
        let mut session = session();
        let err = session.select(FormatKind::Audio, video_format()).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSelection {
                expected: FormatKind::Audio,
                actual: FormatKind::Video,
            }
        );
        assert!(session.audio().is_none());
        assert!(!session.can_combine());
    }

    #[test]
    fn can_combine_requires_both_slots() {
        let mut session = session();
        assert!(!session.can_combine());

        session.select(FormatKind::Video, video_format()).unwrap();
        assert!(!session.can_combine());

        session.select(FormatKind::Audio, audio_format()).unwrap();
        assert!(session.can_combine());
    }

    #[test]
    fn guard_rejects_a_second_begin_until_ended() {
        let session = session();
        session.try_begin_transfer().unwrap();
        assert_eq!(session.try_begin_transfer().unwrap_err(), Error::TransferInProgress);

        session.end_transfer();
        session.try_begin_transfer().unwrap();
        assert!(session.transfer_in_flight());
    }

    #[test]
    fn reset_clears_slots_and_guard() {
        let mut session = session();
        session.select(FormatKind::Video, video_format()).unwrap();
        session.try_begin_transfer().unwrap();

        session.reset("https://example.com/watch?v=2", "Other");
        assert!(session.video().is_none());
        assert!(!session.transfer_in_flight());
        assert_eq!(session.title(), "Other");
    }
}

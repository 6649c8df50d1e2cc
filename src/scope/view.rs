//! View state and the navigation state machine.
//!
//! The visible period is never stored directly. It is derived from a note
//! index on the 12-tone equal-tempered scale (index 0 is A above middle C,
//! 440 Hz), so stepping the zoom back and forth cannot accumulate drift.
//! Amplitude is kept in integer tenths for the same reason.

use std::fmt;

/// Lowest accepted note index (longest period).
pub const MIN_NOTE: i32 = -240;
/// Highest accepted note index (shortest period).
pub const MAX_NOTE: i32 = 124;
/// Frequency of note index 0, in Hz.
pub const REFERENCE_FREQUENCY: f64 = 440.0;

const MIN_AMPLITUDE_TENTHS: u16 = 1;
const MAX_AMPLITUDE_TENTHS: u16 = 200;
const DEFAULT_AMPLITUDE_TENTHS: u16 = 10;

/// Fraction of the visible period moved by one pan step.
const PAN_DIVISOR: f64 = 10.0;

const NOTE_NAMES: [&str; 12] = [
    "A ", "A#", "B ", "C ", "C#", "D ", "D#", "E ", "F ", "F#", "G ", "G#",
];

/// Smallest amplitude zoom factor.
pub const MIN_AMPLITUDE: f64 = MIN_AMPLITUDE_TENTHS as f64 / 10.0;
/// Largest amplitude zoom factor.
pub const MAX_AMPLITUDE: f64 = MAX_AMPLITUDE_TENTHS as f64 / 10.0;

/// Frequency of a note index, in Hz.
pub fn note_frequency(note_index: i32) -> f64 {
    REFERENCE_FREQUENCY * 2f64.powf(f64::from(note_index) / 12.0)
}

/// Width of the visible window for a note index, in seconds.
pub fn period_seconds(note_index: i32) -> f64 {
    1.0 / note_frequency(note_index)
}

/// A discrete interaction that changes the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    /// Move the window earlier by a tenth of the period
    PanLeft,
    /// Move the window later by a tenth of the period
    PanRight,
    /// Raise the note index by one half step
    ZoomOut,
    /// Lower the note index by one half step
    ZoomIn,
    /// Increase amplitude zoom by 0.1
    AmplitudeUp,
    /// Decrease amplitude zoom by 0.1
    AmplitudeDown,
}

/// The visible time window and vertical gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    offset_seconds: f64,
    note_index: i32,
    amplitude_tenths: u16,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            offset_seconds: 0.0,
            note_index: 0,
            amplitude_tenths: DEFAULT_AMPLITUDE_TENTHS,
        }
    }
}

impl ViewState {
    /// Returns a view starting `offset_seconds` into the source.
    ///
    /// Negative offsets are taken by magnitude; the result is clamped to `[0, duration]`.
    pub fn with_offset(mut self, offset_seconds: f64, duration: f64) -> Self {
        let offset = if offset_seconds.is_finite() {
            offset_seconds.abs()
        } else {
            0.0
        };
        self.offset_seconds = offset.min(duration.max(0.0));
        self
    }

    /// Returns a view at `note_index`, clamped to `[MIN_NOTE, MAX_NOTE]`.
    pub fn with_note(mut self, note_index: i32) -> Self {
        self.note_index = note_index.clamp(MIN_NOTE, MAX_NOTE);
        self
    }

    /// Returns a view with the given amplitude zoom, rounded to a tenth and clamped.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        let tenths = if amplitude.is_finite() {
            (amplitude * 10.0).round()
        } else {
            f64::from(DEFAULT_AMPLITUDE_TENTHS)
        };
        self.amplitude_tenths = tenths.clamp(
            f64::from(MIN_AMPLITUDE_TENTHS),
            f64::from(MAX_AMPLITUDE_TENTHS),
        ) as u16;
        self
    }

    pub fn offset_seconds(&self) -> f64 {
        self.offset_seconds
    }

    pub fn note_index(&self) -> i32 {
        self.note_index
    }

    pub fn period_seconds(&self) -> f64 {
        period_seconds(self.note_index)
    }

    pub fn frequency(&self) -> f64 {
        note_frequency(self.note_index)
    }

    pub fn amplitude_zoom(&self) -> f64 {
        f64::from(self.amplitude_tenths) / 10.0
    }

    /// Letter name of the current note, padded to two characters.
    pub fn note_name(&self) -> &'static str {
        NOTE_NAMES[self.note_index.rem_euclid(12) as usize]
    }

    /// Applies one navigation event to a copy of this view.
    ///
    /// An event whose parameter already sits on its bound leaves the view
    /// unchanged; otherwise the new value is clamped to the bound.
    pub fn apply(&self, event: NavigationEvent, duration: f64) -> ViewState {
        let mut next = *self;
        let step = self.period_seconds() / PAN_DIVISOR;

        match event {
            NavigationEvent::PanLeft => {
                if self.offset_seconds > 0.0 {
                    next.offset_seconds = (self.offset_seconds - step).max(0.0);
                }
            }
            NavigationEvent::PanRight => {
                if self.offset_seconds < duration {
                    next.offset_seconds = (self.offset_seconds + step).min(duration);
                }
            }
            NavigationEvent::ZoomOut => {
                if self.note_index < MAX_NOTE {
                    next.note_index += 1;
                }
            }
            NavigationEvent::ZoomIn => {
                if self.note_index > MIN_NOTE {
                    next.note_index -= 1;
                }
            }
            NavigationEvent::AmplitudeUp => {
                if self.amplitude_tenths < MAX_AMPLITUDE_TENTHS {
                    next.amplitude_tenths += 1;
                }
            }
            NavigationEvent::AmplitudeDown => {
                if self.amplitude_tenths > MIN_AMPLITUDE_TENTHS {
                    next.amplitude_tenths -= 1;
                }
            }
        }

        if next != *self {
            tracing::trace!(
                "{:?}: offset={:.6}s note={} amplitude={:.1}",
                event,
                next.offset_seconds,
                next.note_index,
                next.amplitude_zoom()
            );
        }
        next
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {:.6}s ({}, note {}, {:.2} Hz), amplitude {:.1}, offset {:.6}s",
            self.period_seconds(),
            self.note_name().trim_end(),
            self.note_index(),
            self.frequency(),
            self.amplitude_zoom(),
            self.offset_seconds
        )
    }
}

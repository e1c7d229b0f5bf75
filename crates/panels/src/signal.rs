//! Traffic signals: timing plans, phase cycle, operational status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gridwatch_core::{DomainError, DomainResult, GeoPoint, Lifecycle, RecordId};

use crate::provider::PanelRecord;

/// Operational status of a signal installation.
///
/// Signals move freely between operational states; none is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalStatus {
    Active,
    Maintenance,
    Offline,
}

impl core::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            SignalStatus::Active => "active",
            SignalStatus::Maintenance => "maintenance",
            SignalStatus::Offline => "offline",
        };
        f.write_str(name)
    }
}

impl Lifecycle for SignalStatus {
    fn transitions(self) -> &'static [Self] {
        match self {
            SignalStatus::Active => &[SignalStatus::Maintenance, SignalStatus::Offline],
            SignalStatus::Maintenance => &[SignalStatus::Active, SignalStatus::Offline],
            SignalStatus::Offline => &[SignalStatus::Active, SignalStatus::Maintenance],
        }
    }
}

/// Current light phase. Advances in a fixed cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalPhase {
    Red,
    Yellow,
    Green,
}

impl SignalPhase {
    /// Fixed cycle: green -> yellow -> red -> green.
    pub fn advance(self) -> Self {
        match self {
            SignalPhase::Green => SignalPhase::Yellow,
            SignalPhase::Yellow => SignalPhase::Red,
            SignalPhase::Red => SignalPhase::Green,
        }
    }
}

/// Per-phase durations in seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTiming {
    pub red: u32,
    pub yellow: u32,
    pub green: u32,
}

impl SignalTiming {
    const MIN_PHASE_SECS: u32 = 1;
    const MAX_PHASE_SECS: u32 = 300;

    pub fn new(red: u32, yellow: u32, green: u32) -> DomainResult<Self> {
        let timing = Self { red, yellow, green };
        timing.validate()?;
        Ok(timing)
    }

    pub fn validate(&self) -> DomainResult<()> {
        for (field, secs) in [
            ("timing.red", self.red),
            ("timing.yellow", self.yellow),
            ("timing.green", self.green),
        ] {
            if !(Self::MIN_PHASE_SECS..=Self::MAX_PHASE_SECS).contains(&secs) {
                return Err(DomainError::validation(
                    field,
                    format!(
                        "phase must last {}..={} seconds, got {secs}",
                        Self::MIN_PHASE_SECS,
                        Self::MAX_PHASE_SECS
                    ),
                ));
            }
        }
        Ok(())
    }

    pub fn cycle_secs(&self) -> u32 {
        self.red + self.yellow + self.green
    }

    /// Deterministic rebalanced plan used by the optimize operation: yellow
    /// is kept, the remaining cycle re-split 55/45 between red and green,
    /// with both phases clamped into the valid range. A rebalanced valid
    /// timing is therefore always valid itself.
    pub fn rebalanced(&self) -> Self {
        let remainder = self.cycle_secs() - self.yellow;
        let mut red = ((f64::from(remainder) * 0.55).round() as u32)
            .clamp(Self::MIN_PHASE_SECS, Self::MAX_PHASE_SECS)
            .min(remainder - Self::MIN_PHASE_SECS);
        let mut green = remainder - red;
        if green > Self::MAX_PHASE_SECS {
            green = Self::MAX_PHASE_SECS;
            red = remainder - green;
        }
        Self {
            red,
            yellow: self.yellow,
            green,
        }
    }
}

/// Creation input for a signal installation.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalInput {
    pub intersection: String,
    pub timing: SignalTiming,
    pub location: GeoPoint,
}

/// A traffic signal installation at one intersection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSignal {
    pub id: RecordId,
    pub intersection: String,
    pub status: SignalStatus,
    pub current_phase: SignalPhase,
    pub timing: SignalTiming,
    pub location: GeoPoint,
    pub installed_at: DateTime<Utc>,
}

impl TrafficSignal {
    /// Replace the timing plan after validating it.
    pub fn configure_timing(&mut self, timing: SignalTiming) -> DomainResult<()> {
        timing.validate()?;
        self.timing = timing;
        Ok(())
    }

    pub fn advance_phase(&mut self) {
        self.current_phase = self.current_phase.advance();
    }
}

impl PanelRecord for TrafficSignal {
    type Input = SignalInput;
    type Status = SignalStatus;

    fn record_kind() -> &'static str {
        "signal"
    }

    fn build(id: RecordId, input: SignalInput, now: DateTime<Utc>) -> DomainResult<Self> {
        if input.intersection.trim().is_empty() {
            return Err(DomainError::validation("intersection", "must not be empty"));
        }
        input.timing.validate()?;

        Ok(Self {
            id,
            intersection: input.intersection,
            status: SignalStatus::Active,
            current_phase: SignalPhase::Red,
            timing: input.timing,
            location: input.location,
            installed_at: now,
        })
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn status(&self) -> SignalStatus {
        self.status
    }

    fn set_status(&mut self, status: SignalStatus) {
        self.status = status;
    }
}

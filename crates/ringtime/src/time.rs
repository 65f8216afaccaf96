use derive_more::{Deref, Display, Into};
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use thiserror::Error;

/// One half-hour increment on the dial.
pub type Step = i32;

pub const MIN_VAL: Step = 0;
pub const MAX_VAL: Step = 48;
pub const STEP_MINUTES: i32 = 30;

/// Number of steps around the full dial.
pub const fn step_count() -> Step {
    MAX_VAL - MIN_VAL
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("Expected HH:MM, got '{0}'")]
    Malformed(String),
    #[error("Hour out of range in '{0}'")]
    Hour(String),
    #[error("Minutes must be 00 or 30 in '{0}'")]
    Minutes(String),
}

/// A wall-clock time on the half-hour grid, stored as its step index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Deref, Into,
    DeserializeFromStr, SerializeDisplay,
)]
#[display("{}", step_to_time(*_0))]
pub struct ClockTime(Step);

impl ClockTime {
    /// A full hour, clamped to `0..=24`.
    pub const fn from_hour(hour: Step) -> Self {
        let hour = if hour < 0 {
            0
        } else if hour > 24 {
            24
        } else {
            hour
        };
        Self(hour * 2)
    }

    pub fn step(&self) -> Step {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| TimeError::Malformed(s.to_string()))?;

        let hour: Step = hour
            .parse()
            .map_err(|_| TimeError::Malformed(s.to_string()))?;
        let half = match minutes {
            "00" => false,
            "30" => true,
            _ => return Err(TimeError::Minutes(s.to_string())),
        };

        // 24:00 closes the day; 24:30 does not exist
        if !(0..=24).contains(&hour) || (hour == 24 && half) {
            return Err(TimeError::Hour(s.to_string()));
        }

        Ok(Self(hour * 2 + Step::from(half)))
    }
}

pub fn time_to_step(time: &str) -> Result<Step, TimeError> {
    time.parse::<ClockTime>().map(|t| t.step())
}

/// Formats a step as `H:MM`. Display only; hours are not zero-padded.
pub fn step_to_time(step: Step) -> String {
    let minutes = if step.rem_euclid(2) == 1 { "30" } else { "00" };
    format!("{}:{}", step.div_euclid(2), minutes)
}

/// The open/close bounds of the editable part of the dial, in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OpenCloseWindow {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl OpenCloseWindow {
    pub fn new(open: ClockTime, close: ClockTime) -> Self {
        Self { open, close }
    }

    pub fn parse(open: &str, close: &str) -> Result<Self, TimeError> {
        Ok(Self::new(open.parse()?, close.parse()?))
    }

    pub fn open_val(&self) -> Step {
        self.open.step()
    }

    pub fn close_val(&self) -> Step {
        self.close.step()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Expected START-END, got '{0}'")]
    Malformed(String),
    #[error("Interval start {0} must be before end {1}")]
    Empty(Step, Step),
}

/// A blocked sub-range of the dial, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{start}-{end}")]
pub struct Interval {
    start: Step,
    end: Step,
}

impl Interval {
    pub fn new(start: Step, end: Step) -> Result<Self, IntervalError> {
        if start >= end {
            return Err(IntervalError::Empty(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Step {
        self.start
    }

    pub fn end(&self) -> Step {
        self.end
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IntervalError::Malformed(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(malformed)?;
        let start = start.trim().parse().map_err(|_| malformed())?;
        let end = end.trim().parse().map_err(|_| malformed())?;
        Self::new(start, end)
    }
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (start, end) = <(Step, Step)>::deserialize(deserializer)?;
        Self::new(start, end).map_err(serde::de::Error::custom)
    }
}

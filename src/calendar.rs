//! Fixed calendar domains for timed tariffs: the seven weekdays and the
//! half-hour grid of a day.
//!
//! Both are explicit enumerations, so no date library or locale is involved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(input: &str) -> Result<Weekday, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(input))
            .ok_or_else(|| Error::UnknownWeekday {
                value: input.to_string(),
            })
    }
}

/// Number of half-hour boundaries in a day (00:00 through 23:30).
pub const BOUNDARIES_PER_DAY: u8 = 48;

/// A half-hour-aligned time of day.
///
/// Ordered chronologically. Displayed as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    /// Position on the grid, 0..48.
    index: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { index: 0 };

    /// Fails unless `hour < 24` and `minute` is 0 or 30.
    pub fn new(hour: u8, minute: u8) -> Result<Self, Error> {
        if hour >= 24 || (minute != 0 && minute != 30) {
            return Err(Error::InvalidTime {
                value: format!("{:02}:{:02}", hour, minute),
            });
        }
        Ok(Self {
            index: hour * 2 + minute / 30,
        })
    }

    /// Grid position without validation; callers keep `index < 48`.
    pub(crate) const fn from_index(index: u8) -> Self {
        Self { index }
    }

    pub fn hour(self) -> u8 {
        self.index / 2
    }

    pub fn minute(self) -> u8 {
        (self.index % 2) * 30
    }

    /// Grid position, 0 for 00:00 up to 47 for 23:30.
    pub fn index(self) -> u8 {
        self.index
    }

    /// All 48 boundaries in chronological order.
    pub fn grid() -> impl Iterator<Item = TimeOfDay> {
        (0..BOUNDARIES_PER_DAY).map(|index| TimeOfDay { index })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:00", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = Error;

    /// Accepts `HH:MM` or `HH:MM:SS` with zero seconds.
    fn from_str(input: &str) -> Result<TimeOfDay, Self::Err> {
        let invalid = || Error::InvalidTime {
            value: input.to_string(),
        };

        let parts: Vec<&str> = input.trim().split(':').collect();
        let (hour, minute) = match parts.as_slice() {
            [h, m] => (*h, *m),
            [h, m, s] => {
                let seconds: u8 = s.parse().map_err(|_| invalid())?;
                if seconds != 0 {
                    return Err(invalid());
                }
                (*h, *m)
            }
            _ => return Err(invalid()),
        };

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One half-hour slot between two consecutive grid boundaries.
///
/// The last boundary (23:30) starts no slot, so a day holds 47 slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    start: TimeOfDay,
}

impl TimeSlot {
    pub fn starting_at(start: TimeOfDay) -> Result<Self, Error> {
        if start.index + 1 >= BOUNDARIES_PER_DAY {
            return Err(Error::SlotOutOfGrid {
                start: start.to_string(),
            });
        }
        Ok(Self { start })
    }

    pub fn start(self) -> TimeOfDay {
        self.start
    }

    pub fn end(self) -> TimeOfDay {
        TimeOfDay {
            index: self.start.index + 1,
        }
    }

    /// All 47 slots in chronological order.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..BOUNDARIES_PER_DAY - 1).map(|index| TimeSlot {
            start: TimeOfDay { index },
        })
    }
}

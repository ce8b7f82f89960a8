use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref SLOT_PATTERN: Regex = Regex::new(r"^([01]?[0-9]|2[0-3]):(00|30)$").unwrap();
}

/// A bookable time on a half hour boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    hour: u8,
    minute: u8,
}

impl Slot {
    pub(crate) fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let captures = SLOT_PATTERN
            .captures(value)
            .ok_or_else(|| format!("'{value}' is not a half hour time (HH:00 or HH:30)"))?;
        let hour = captures[1].parse().map_err(|_| format!("invalid hour in '{value}'"))?;
        let minute = captures[2]
            .parse()
            .map_err(|_| format!("invalid minute in '{value}'"))?;
        Ok(Self { hour, minute })
    }
}

impl TryFrom<String> for Slot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: Slot,
    pub guests: u32,
    pub occasion: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn booked_slot(&self) -> BookedSlot {
        BookedSlot {
            date: self.date,
            time: self.time,
        }
    }
}

/// Raw booking form as submitted by a guest.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(length(min = 1, message = "date is required"))]
    #[serde(default)]
    pub date: String,
    #[validate(length(min = 1, message = "time is required"))]
    #[serde(default)]
    pub time: String,
    #[validate(range(min = 1, max = 10, message = "between 1 and 10 guests"))]
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[validate(length(max = 64, message = "occasion is too long"))]
    #[serde(default)]
    pub occasion: Option<String>,
}

fn default_guests() -> u32 {
    1
}

/// Occupied slot without any guest details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub date: NaiveDate,
    pub time: Slot,
}

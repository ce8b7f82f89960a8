use crate::types::Slot;
use chrono::{Datelike, NaiveDate};

const MODULUS: u64 = (1 << 35) - 31;
const MULTIPLIER: u64 = 185_852;

pub const OPENING_HOUR: u8 = 17;
pub const LAST_SEATING_HOUR: u8 = 23;

/// Linear congruential sequence of values in `[0, 1)`.
///
/// The state never exceeds `MODULUS`, so `state * MULTIPLIER` fits in a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }
}

impl Iterator for SeededRandom {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.state = self.state * MULTIPLIER % MODULUS;
        Some(self.state as f64 / MODULUS as f64)
    }
}

/// Candidate slots for `date`, in ascending order.
///
/// Only the day of the month seeds the sequence, so the 15th of every month
/// offers the same slots.
pub fn generate(date: NaiveDate) -> Vec<Slot> {
    let mut random = SeededRandom::new(u64::from(date.day()));
    let mut slots = Vec::new();

    for hour in OPENING_HOUR..=LAST_SEATING_HOUR {
        for minute in [0, 30] {
            if random.next().unwrap_or(1.0) < 0.5 {
                slots.push(Slot::new(hour, minute));
            }
        }
    }
    slots
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn render(slots: &[Slot]) -> Vec<String> {
        slots.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_seeded_random_stays_in_unit_interval() {
        for seed in 1..=31 {
            for value in SeededRandom::new(seed).take(100) {
                assert!((0.0..1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_seeded_random_first_draw() {
        let mut random = SeededRandom::new(1);
        let expected = MULTIPLIER as f64 / MODULUS as f64;
        assert_eq!(random.next(), Some(expected));
    }

    #[test_case("2025-01-15", &["17:00", "17:30", "20:30", "22:30"])]
    #[test_case("2025-03-01", &["17:00", "17:30", "18:00", "20:00", "21:00", "23:30"])]
    #[test_case("2025-12-25", &["17:00", "17:30", "18:30", "19:00", "20:00", "22:00", "22:30"])]
    #[test_case("2025-12-31", &["17:00", "17:30", "18:00", "18:30", "21:00", "21:30", "22:00", "23:00"])]
    fn test_generate_known_days(day: &str, expected: &[&str]) {
        assert_eq!(render(&generate(date(day))), expected);
    }

    #[test]
    fn test_generate_is_repeatable() {
        let day = date("2025-06-15");
        assert_eq!(generate(day), generate(day));
    }

    #[test_case("2025-01-15", "2030-08-15")]
    #[test_case("2024-02-29", "2025-11-29")]
    #[test_case("2025-01-01", "1999-12-01")]
    fn test_same_day_of_month_same_slots(first: &str, second: &str) {
        assert_eq!(generate(date(first)), generate(date(second)));
    }

    #[test]
    fn test_slots_are_sorted_and_inside_opening_hours() {
        let mut day = date("2025-01-01");
        for _ in 0..366 {
            let slots = generate(day);
            assert!(slots.windows(2).all(|pair| pair[0] < pair[1]));
            for slot in slots {
                assert!((OPENING_HOUR..=LAST_SEATING_HOUR).contains(&slot.hour()));
                assert!(slot.minute() == 0 || slot.minute() == 30);
            }
            day = day.succ_opt().unwrap();
        }
    }
}

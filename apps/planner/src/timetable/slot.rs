//! Slot tokens — one weekday + one period on the weekly grid.
//!
//! Tokens come from the catalog provider (an LLM in production), so parsing is
//! lenient about format and never fails loudly: anything that cannot be read as
//! a weekday plus a period in 1..=9 is simply not a slot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of weekday columns on the grid.
pub const DAYS: usize = 5;
/// Number of period rows on the grid.
pub const PERIODS: usize = 9;

/// Tokens meaning "no fixed weekly time" (online, asynchronous, to be announced).
const UNSCHEDULED_SENTINELS: &[&str] = &[
    "online",
    "unscheduled",
    "tba",
    "none",
    "-",
    "온라인",
    "미정",
    "사이버",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Weekday {
    pub const ALL: [Weekday; DAYS] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Grid column, Mon = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
        }
    }

    /// Reads a day name: `mon`, `monday`, `월`, `월요일`. Case-insensitive.
    pub fn from_name(name: &str) -> Option<Weekday> {
        let lower = name.trim().to_lowercase();
        let day = match lower.as_str() {
            "mon" | "monday" | "월" | "월요일" => Weekday::Mon,
            "tue" | "tues" | "tuesday" | "화" | "화요일" => Weekday::Tue,
            "wed" | "wednesday" | "수" | "수요일" => Weekday::Wed,
            "thu" | "thur" | "thurs" | "thursday" | "목" | "목요일" => Weekday::Thu,
            "fri" | "friday" | "금" | "금요일" => Weekday::Fri,
            _ => return None,
        };
        Some(day)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// A single (day, period) cell of the weekly grid.
///
/// Only built through `Slot::new` or `Slot::parse`, so the period is always in
/// 1..=9. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct Slot {
    day: Weekday,
    period: u8,
}

#[derive(Deserialize)]
struct RawSlot {
    day: Weekday,
    period: u8,
}

impl TryFrom<RawSlot> for Slot {
    type Error = String;

    fn try_from(raw: RawSlot) -> Result<Self, Self::Error> {
        Slot::new(raw.day, raw.period)
            .ok_or_else(|| format!("period {} is outside 1..={PERIODS}", raw.period))
    }
}

impl Slot {
    /// Returns `None` when `period` is outside 1..=9.
    pub fn new(day: Weekday, period: u8) -> Option<Slot> {
        (1..=PERIODS as u8)
            .contains(&period)
            .then_some(Slot { day, period })
    }

    /// Parses an untrusted slot token such as `Mon3`, `mon-3`, `Monday 3` or `월3`.
    ///
    /// Returns `None` for anything malformed, including sentinel tokens.
    pub fn parse(token: &str) -> Option<Slot> {
        let token = token.trim();
        let digits_at = token.find(|c: char| c.is_ascii_digit())?;
        let (day_part, period_part) = token.split_at(digits_at);

        let day_part = day_part.trim_end_matches(|c: char| {
            c.is_whitespace() || matches!(c, '-' | '_' | ':' | '/' | '.')
        });
        let day = Weekday::from_name(day_part)?;

        if !period_part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let period: u8 = period_part.parse().ok()?;
        Slot::new(day, period)
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    /// 1-based, 1..=9.
    pub fn period(&self) -> u8 {
        self.period
    }

    /// Zero-based (row, column) position on the grid.
    pub fn grid_position(&self) -> (usize, usize) {
        (usize::from(self.period) - 1, self.day.index())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.day, self.period)
    }
}

/// True for tokens that explicitly mark an offering as online/unscheduled.
pub fn is_unscheduled_sentinel(token: &str) -> bool {
    let lower = token.trim().to_lowercase();
    UNSCHEDULED_SENTINELS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_english() {
        assert_eq!(Slot::parse("Mon3"), Slot::new(Weekday::Mon, 3));
        assert_eq!(Slot::parse("fri9"), Slot::new(Weekday::Fri, 9));
    }

    #[test]
    fn test_parse_with_separators_and_long_names() {
        assert_eq!(Slot::parse("mon-3"), Slot::new(Weekday::Mon, 3));
        assert_eq!(Slot::parse(" Wednesday 4 "), Slot::new(Weekday::Wed, 4));
        assert_eq!(Slot::parse("THU_1"), Slot::new(Weekday::Thu, 1));
        assert_eq!(Slot::parse("Tue:2"), Slot::new(Weekday::Tue, 2));
    }

    #[test]
    fn test_parse_korean_day_names() {
        assert_eq!(Slot::parse("월3"), Slot::new(Weekday::Mon, 3));
        assert_eq!(Slot::parse("화 5"), Slot::new(Weekday::Tue, 5));
        assert_eq!(Slot::parse("금요일 9"), Slot::new(Weekday::Fri, 9));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "", "Mon", "3", "Mon0", "Mon10", "Sat2", "Sun1", "xyz", "Mon3a", "Mon 3 4", "토3",
            "online",
        ] {
            assert_eq!(Slot::parse(bad), None, "token {bad:?} should not parse");
        }
    }

    #[test]
    fn test_canonical_token_round_trips() {
        let slot = Slot::parse("wednesday-4").unwrap();
        assert_eq!(slot.to_string(), "Wed4");
        assert_eq!(Slot::parse(&slot.to_string()), Some(slot));
    }

    #[test]
    fn test_grid_position() {
        let slot = Slot::new(Weekday::Wed, 4).unwrap();
        assert_eq!(slot.grid_position(), (3, 2));
    }

    #[test]
    fn test_deserialize_checks_period() {
        let slot: Slot = serde_json::from_str(r#"{"day":"Tue","period":9}"#).unwrap();
        assert_eq!(Some(slot), Slot::new(Weekday::Tue, 9));
        assert!(serde_json::from_str::<Slot>(r#"{"day":"Mon","period":0}"#).is_err());
        assert!(serde_json::from_str::<Slot>(r#"{"day":"Mon","period":10}"#).is_err());
    }

    #[test]
    fn test_sentinels() {
        assert!(is_unscheduled_sentinel("online"));
        assert!(is_unscheduled_sentinel(" ONLINE "));
        assert!(is_unscheduled_sentinel("온라인"));
        assert!(is_unscheduled_sentinel("TBA"));
        assert!(!is_unscheduled_sentinel("Mon3"));
        assert!(!is_unscheduled_sentinel(""));
    }
}

//! Day-of-week and time-of-day histograms

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};
use somnia_journal::DreamRecord;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Named hour ranges a dream's capture time falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    /// 21:00-04:59, crosses midnight
    Night,
    EarlyMorning,
    Morning,
    Midday,
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::Night,
        TimeSlot::EarlyMorning,
        TimeSlot::Morning,
        TimeSlot::Midday,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TimeSlot::Night => "Night",
            TimeSlot::EarlyMorning => "Early Morning",
            TimeSlot::Morning => "Morning",
            TimeSlot::Midday => "Midday",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }

    /// Inclusive (start, end) hours
    pub fn hours(self) -> (u32, u32) {
        match self {
            TimeSlot::Night => (21, 4),
            TimeSlot::EarlyMorning => (5, 7),
            TimeSlot::Morning => (8, 11),
            TimeSlot::Midday => (12, 13),
            TimeSlot::Afternoon => (14, 17),
            TimeSlot::Evening => (18, 20),
        }
    }

    pub fn contains(self, hour: u32) -> bool {
        let (start, end) = self.hours();
        if start <= end {
            hour >= start && hour <= end
        } else {
            hour >= start || hour <= end
        }
    }

    pub fn for_hour(hour: u32) -> TimeSlot {
        Self::ALL
            .into_iter()
            .find(|slot| slot.contains(hour))
            .unwrap_or(TimeSlot::Night)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub name: String,
    pub count: usize,
}

/// Fixed, ordered set of named counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    fn zeroed<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            buckets: names
                .into_iter()
                .map(|name| Bucket {
                    name: name.to_string(),
                    count: 0,
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> usize {
        self.buckets
            .iter()
            .find(|b| b.name == name)
            .map_or(0, |b| b.count)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Busiest bucket; earliest wins ties, `None` when everything is zero
    pub fn peak(&self) -> Option<&Bucket> {
        self.buckets
            .iter()
            .filter(|b| b.count > 0)
            .fold(None, |best: Option<&Bucket>, b| match best {
                Some(top) if top.count >= b.count => Some(top),
                _ => Some(b),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePatterns {
    pub day_of_week: Histogram,
    pub time_of_day: Histogram,
}

/// Bucket records by weekday and time-of-day slot, in each record's own offset
pub fn compute_time_patterns(records: &[DreamRecord]) -> TimePatterns {
    let mut day_of_week = Histogram::zeroed(WEEKDAYS);
    let mut time_of_day = Histogram::zeroed(TimeSlot::ALL.iter().map(|s| s.name()));

    for record in records {
        let day = record.captured_at.weekday().num_days_from_monday() as usize;
        day_of_week.buckets[day].count += 1;

        let slot = TimeSlot::for_hour(record.captured_at.hour());
        if let Some(bucket) = time_of_day.buckets.iter_mut().find(|b| b.name == slot.name()) {
            bucket.count += 1;
        }
    }

    TimePatterns {
        day_of_week,
        time_of_day,
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("invalid pattern: at least one on/off entry is required")]
    EmptyPattern,
    #[error("invalid pattern entry #{}: {reason}", .index + 1)]
    InvalidPattern { index: usize, reason: &'static str },
    #[error("pattern index {index} out of range (pattern has {len} entries)")]
    PatternIndexOutOfRange { index: usize, len: usize },
    #[error("date overflow while advancing the schedule")]
    DateOverflow,
    #[error("year {year} outside the calendar export range 0..=9999")]
    YearOutOfRange { year: i32 },
}

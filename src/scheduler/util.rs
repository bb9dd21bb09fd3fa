use super::ScheduleError;
use chrono::{Days, NaiveDate};

/// Avance de `days` jours calendaires (bascule de mois/année gérée par chrono).
pub(crate) fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, ScheduleError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or(ScheduleError::DateOverflow)
}

/// Années représentables sur 4 chiffres dans `YYYYMMDD`.
pub(crate) fn check_year(year: i32) -> Result<(), ScheduleError> {
    if (0..=9999).contains(&year) {
        Ok(())
    } else {
        Err(ScheduleError::YearOutOfRange { year })
    }
}

pub(super) fn sequence_label(index: usize, on: u32, off: u32) -> String {
    format!("Sequence {}: {on} on, {off} off", index + 1)
}

use super::{util, ScheduleError};
use crate::model::{Pattern, ScheduleRequest, WorkInterval};
use chrono::{Datelike, NaiveDate};

pub(super) fn generate(
    start_date: NaiveDate,
    end_year: i32,
    pattern: &Pattern,
    pattern_index: usize,
) -> Result<Vec<WorkInterval>, ScheduleError> {
    util::check_year(start_date.year())?;
    if pattern_index >= pattern.len() {
        return Err(ScheduleError::PatternIndexOutOfRange {
            index: pattern_index,
            len: pattern.len(),
        });
    }

    let mut out = Vec::new();
    let mut cursor = start_date;
    let mut index = pattern_index;

    while cursor.year() <= end_year {
        let entry = pattern.entries()[index];

        let start = cursor;
        let end = util::add_days(start, entry.on)?;
        util::check_year(end.year())?;
        cursor = end;

        out.push(WorkInterval {
            start,
            end,
            sequence: util::sequence_label(index, entry.on, entry.off),
        });

        // le repos ne décale le curseur que si l'on reste dans l'année limite
        if cursor.year() <= end_year {
            cursor = util::add_days(cursor, entry.off)?;
        }

        index = (index + 1) % pattern.len();
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        intervals = out.len(),
        %start_date,
        end_year,
        "schedule generated"
    );

    Ok(out)
}

pub(super) fn generate_request(request: &ScheduleRequest) -> Result<Vec<WorkInterval>, ScheduleError> {
    generate(
        request.start_date,
        request.end_year,
        &request.pattern,
        request.pattern_index,
    )
}

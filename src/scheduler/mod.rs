//! Génération du roulement : applique le cycle on/off à partir d'une date
//! jusqu'à dépasser l'année limite.

mod generate;
mod types;
mod util;

pub use types::ScheduleError;
pub(crate) use util::check_year;

use crate::model::{Pattern, ScheduleRequest, WorkInterval};
use chrono::NaiveDate;

/// Produit les intervalles travaillés, dans l'ordre chronologique.
///
/// Pour la k-ième période, l'entrée appliquée est
/// `pattern[(pattern_index + k) % pattern.len()]`. La génération s'arrête dès
/// que l'année du curseur dépasse `end_year` ; une période commencée pendant
/// `end_year` peut donc se terminer l'année suivante.
pub fn generate(
    start_date: NaiveDate,
    end_year: i32,
    pattern: &Pattern,
    pattern_index: usize,
) -> Result<Vec<WorkInterval>, ScheduleError> {
    generate::generate(start_date, end_year, pattern, pattern_index)
}

pub fn generate_request(request: &ScheduleRequest) -> Result<Vec<WorkInterval>, ScheduleError> {
    generate::generate_request(request)
}

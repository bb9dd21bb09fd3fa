//! Modèle de rendu en grille mensuelle, indépendant de l'affichage.

use crate::model::WorkInterval;
use chrono::{Datelike, NaiveDate};

/// Nombre de mois affichés par défaut.
pub const DEFAULT_MONTHS: u32 = 12;

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Traitement de la date `end` d'un intervalle lors du test d'appartenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShiftBoundary {
    /// `start <= d < end` : seuls les jours réellement travaillés sont marqués.
    #[default]
    Exclusive,
    /// `start <= d <= end` : le premier jour de repos est aussi marqué.
    Inclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_shift_day: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// ex. "January 2024"
    pub title: String,
    /// Cases vides avant le 1er du mois (semaine commençant le dimanche).
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    /// Grille texte ; `*` marque un jour travaillé.
    pub fn to_text(&self) -> String {
        let mut cells: Vec<String> = (0..self.leading_blanks).map(|_| "   ".to_string()).collect();
        for cell in &self.days {
            let mark = if cell.is_shift_day { '*' } else { ' ' };
            cells.push(format!("{:>2}{mark}", cell.day));
        }

        let mut out = String::new();
        out.push_str(&self.title);
        out.push('\n');
        out.push_str(&DAY_LABELS.join(" "));
        for week in cells.chunks(7) {
            out.push('\n');
            out.push_str(week.join(" ").trim_end());
        }
        out
    }
}

pub fn is_shift_day(date: NaiveDate, intervals: &[WorkInterval], boundary: ShiftBoundary) -> bool {
    intervals.iter().any(|i| match boundary {
        ShiftBoundary::Exclusive => i.start <= date && date < i.end,
        ShiftBoundary::Inclusive => i.start <= date && date <= i.end,
    })
}

/// Grilles mensuelles à partir du mois du premier intervalle, au plus
/// `month_count` mois, sans dépasser le mois du dernier `end`.
pub fn month_grids(
    intervals: &[WorkInterval],
    month_count: u32,
    boundary: ShiftBoundary,
) -> Vec<MonthGrid> {
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return Vec::new();
    };
    let last_month = (last.end.year(), last.end.month0());
    let mut out = Vec::new();

    for offset in 0..month_count {
        let month0 = first.start.month0() + offset;
        let year = first.start.year() + (month0 / 12) as i32;
        let month0 = month0 % 12;
        if (year, month0) > last_month {
            break;
        }
        let Some(first_day) = NaiveDate::from_ymd_opt(year, month0 + 1, 1) else {
            break;
        };

        let days = first_day
            .iter_days()
            .take_while(|d| d.month0() == month0)
            .map(|d| DayCell {
                year,
                month: month0 + 1,
                day: d.day(),
                is_shift_day: is_shift_day(d, intervals, boundary),
            })
            .collect();

        out.push(MonthGrid {
            year,
            month: month0 + 1,
            title: first_day.format("%B %Y").to_string(),
            leading_blanks: first_day.weekday().num_days_from_sunday(),
            days,
        });
    }

    out
}

/// Vue à plat, un élément par jour affiché.
pub fn render_model(
    intervals: &[WorkInterval],
    month_count: u32,
    boundary: ShiftBoundary,
) -> Vec<DayCell> {
    month_grids(intervals, month_count, boundary)
        .into_iter()
        .flat_map(|grid| grid.days)
        .collect()
}

use crate::scheduler::{check_year, ScheduleError};
use chrono::{Datelike, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Une entrée du cycle : `on` jours travaillés suivis de `off` jours de repos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternEntry {
    pub on: u32,
    pub off: u32,
}

impl PatternEntry {
    /// Crée une entrée en validant que `on >= 1`.
    pub fn new(on: u32, off: u32) -> Result<Self, ScheduleError> {
        if on == 0 {
            return Err(ScheduleError::InvalidPattern {
                index: 0,
                reason: "on-days must be at least 1",
            });
        }
        Ok(Self { on, off })
    }
}

/// Cycle ordonné et non vide d'entrées ; l'index boucle modulo `len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<PatternEntry>", into = "Vec<PatternEntry>")
)]
pub struct Pattern(Vec<PatternEntry>);

impl Pattern {
    pub fn new(entries: Vec<PatternEntry>) -> Result<Self, ScheduleError> {
        if entries.is_empty() {
            return Err(ScheduleError::EmptyPattern);
        }
        if let Some(index) = entries.iter().position(|e| e.on == 0) {
            return Err(ScheduleError::InvalidPattern {
                index,
                reason: "on-days must be at least 1",
            });
        }
        Ok(Self(entries))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Toujours faux : un `Pattern` validé contient au moins une entrée.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PatternEntry> {
        self.0.get(index)
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.0
    }
}

impl TryFrom<Vec<PatternEntry>> for Pattern {
    type Error = ScheduleError;

    fn try_from(entries: Vec<PatternEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Pattern> for Vec<PatternEntry> {
    fn from(pattern: Pattern) -> Self {
        pattern.0
    }
}

/// Période travaillée contiguë.
///
/// `end` vaut `start + on` : c'est le premier jour de repos, pas un jour
/// travaillé de l'intervalle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorkInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sequence: String,
}

impl WorkInterval {
    /// Nombre de jours travaillés.
    pub fn on_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }
}

/// Entrée immuable d'une génération, collectée une seule fois.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub start_date: NaiveDate,
    pub end_year: i32,
    pub pattern: Pattern,
    pub pattern_index: usize,
}

impl ScheduleRequest {
    /// Crée une requête en validant que `pattern_index` désigne une entrée
    /// et que les années tiennent sur 4 chiffres.
    pub fn new(
        start_date: NaiveDate,
        end_year: i32,
        pattern: Pattern,
        pattern_index: usize,
    ) -> Result<Self, ScheduleError> {
        check_year(start_date.year())?;
        check_year(end_year)?;
        if pattern_index >= pattern.len() {
            return Err(ScheduleError::PatternIndexOutOfRange {
                index: pattern_index,
                len: pattern.len(),
            });
        }
        Ok(Self {
            start_date,
            end_year,
            pattern,
            pattern_index,
        })
    }
}

use crate::model::{Pattern, PatternEntry, ScheduleRequest};
use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Shift";

/// Plan de roulement tel que saisi (fichier JSON ou arguments CLI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftPlan {
    pub start_date: NaiveDate,
    /// Par défaut : l'année de `start_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    #[serde(default = "default_title")]
    pub title: String,
    pub pattern: Vec<PatternEntry>,
    /// Entrée du cycle utilisée pour la première période (0 par défaut).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<usize>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl ShiftPlan {
    pub fn effective_end_year(&self) -> i32 {
        self.end_year.unwrap_or_else(|| self.start_date.year())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern.is_empty() {
            bail!("plan must contain at least one pattern row");
        }
        if let Some(pos) = self.pattern.iter().position(|e| e.on == 0) {
            bail!("pattern row {} has 0 on-days", pos + 1);
        }
        let index = self.start_index.unwrap_or(0);
        if index >= self.pattern.len() {
            bail!(
                "start_index {index} out of range (pattern has {} rows)",
                self.pattern.len()
            );
        }
        Ok(())
    }

    /// Convertit le plan en requête immuable pour le générateur.
    pub fn to_request(&self) -> Result<ScheduleRequest> {
        self.validate()?;
        let pattern = Pattern::new(self.pattern.clone())?;
        let request = ScheduleRequest::new(
            self.start_date,
            self.effective_end_year(),
            pattern,
            self.start_index.unwrap_or(0),
        )?;
        Ok(request)
    }
}

pub fn load_plan_from_file<P: AsRef<Path>>(path: P) -> Result<ShiftPlan> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading plan {}", path.display()))?;
    let plan: ShiftPlan = serde_json::from_slice(&data)
        .with_context(|| format!("parsing plan {}", path.display()))?;
    plan.validate()?;
    Ok(plan)
}

pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &ShiftPlan) -> Result<()> {
    plan.validate()?;
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let plan: ShiftPlan = serde_json::from_str(
            r#"{"start_date":"2024-03-01","pattern":[{"on":4,"off":3}]}"#,
        )
        .unwrap();
        assert_eq!(plan.title, "Shift");
        let req = plan.to_request().unwrap();
        assert_eq!(req.end_year, 2024);
        assert_eq!(req.pattern_index, 0);
    }

    #[test]
    fn rejects_bad_rows() {
        let plan: ShiftPlan = serde_json::from_str(
            r#"{"start_date":"2024-03-01","pattern":[{"on":0,"off":3}]}"#,
        )
        .unwrap();
        assert!(plan.validate().is_err());

        let plan: ShiftPlan = serde_json::from_str(
            r#"{"start_date":"2024-03-01","pattern":[],"title":"Nuit"}"#,
        )
        .unwrap();
        assert!(plan.to_request().is_err());
    }

    #[test]
    fn end_year_before_start_yields_empty_schedule() {
        let plan: ShiftPlan = serde_json::from_str(
            r#"{"start_date":"2024-03-01","end_year":2023,"pattern":[{"on":4,"off":3}]}"#,
        )
        .unwrap();
        let req = plan.to_request().unwrap();
        assert!(crate::scheduler::generate_request(&req).unwrap().is_empty());
    }

    #[test]
    fn rejects_index_past_pattern() {
        let plan: ShiftPlan = serde_json::from_str(
            r#"{"start_date":"2024-03-01","pattern":[{"on":1,"off":1}],"start_index":1}"#,
        )
        .unwrap();
        assert!(plan.validate().is_err());
    }
}

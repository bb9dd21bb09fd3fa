#![forbid(unsafe_code)]
//! Roulement — génération de plannings de travail cycliques (jours on/off).
//!
//! - Cycle ordonné d'entrées `{on, off}` appliqué à partir d'une date.
//! - Arithmétique en jours calendaires (`NaiveDate`), sans fuseau horaire.
//! - Export iCalendar (événements journée entière) et grille mensuelle.

pub mod ical;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
#[cfg(feature = "serde")]
pub mod plan;
pub mod render;
pub mod scheduler;

pub use ical::{encode, encode_with, CalendarFile, EncodeOptions};
#[cfg(feature = "serde")]
pub use io::{CalendarSink, FileSink};
pub use model::{Pattern, PatternEntry, ScheduleRequest, WorkInterval};
#[cfg(feature = "serde")]
pub use plan::{export_plan_json, load_plan_from_file, ShiftPlan};
pub use render::{is_shift_day, month_grids, render_model, DayCell, MonthGrid, ShiftBoundary};
pub use scheduler::{generate, generate_request, ScheduleError};

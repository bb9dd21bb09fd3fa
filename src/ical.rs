//! Export iCalendar : un VEVENT journée entière par intervalle travaillé.
//!
//! Par défaut le texte est recopié tel quel (aucun échappement) et les lignes
//! sont séparées par `\n`, pour un rendu octet par octet stable.

use crate::model::WorkInterval;
use chrono::{Datelike, NaiveDate};

pub const DEFAULT_FILE_NAME: &str = "shift-calendar.ics";
pub const MIME_TYPE: &str = "text/calendar";

const HEADER: [&str; 3] = ["BEGIN:VCALENDAR", "VERSION:2.0", "PRODID:-//Shift Calendar//EN"];
const FOOTER: &str = "END:VCALENDAR";
/// Longueur maximale d'une ligne de contenu, CRLF exclu (RFC 5545 §3.1).
const MAX_LINE_OCTETS: usize = 75;

/// Options d'encodage. `Default` = texte verbatim, fins de ligne `\n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Échappe SUMMARY/DESCRIPTION selon RFC 5545 (`\\`, `;`, `,`, saut de ligne).
    pub escape_text: bool,
    /// Sépare les lignes par `\r\n` au lieu de `\n` et plie les lignes
    /// au-delà de 75 octets (continuation `\r\n` + espace).
    pub crlf: bool,
}

/// Document prêt à être téléchargé ou écrit sur disque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl CalendarFile {
    pub fn new(content: String) -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            mime_type: MIME_TYPE,
            content,
        }
    }
}

/// Encode les intervalles en texte brut, sans échappement.
pub fn encode(intervals: &[WorkInterval], title: &str) -> String {
    encode_with(intervals, title, EncodeOptions::default())
}

pub fn encode_with(intervals: &[WorkInterval], title: &str, opts: EncodeOptions) -> String {
    let text = |raw: &str| {
        if opts.escape_text {
            escape_text(raw)
        } else {
            raw.to_string()
        }
    };
    let summary = text(title);

    let mut lines: Vec<String> = HEADER.iter().map(|l| l.to_string()).collect();
    lines.reserve(intervals.len() * 6 + 1);
    for interval in intervals {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("DTSTART;VALUE=DATE:{}", format_ics_date(interval.start)));
        lines.push(format!("DTEND;VALUE=DATE:{}", format_ics_date(interval.end)));
        lines.push(format!("SUMMARY:{summary}"));
        lines.push(format!("DESCRIPTION:{}", text(&interval.sequence)));
        lines.push("END:VEVENT".to_string());
    }
    lines.push(FOOTER.to_string());

    #[cfg(feature = "logging")]
    tracing::debug!(events = intervals.len(), "calendar encoded");

    if opts.crlf {
        let folded: Vec<String> = lines.iter().map(|l| fold_line(l)).collect();
        folded.join("\r\n")
    } else {
        lines.join("\n")
    }
}

/// Plie une ligne trop longue sans couper de caractère UTF-8.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / 25);
    // la première ligne a 75 octets, les suivantes 74 + l'espace de tête
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        if used + c.len_utf8() > budget {
            out.push_str("\r\n ");
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += c.len_utf8();
    }
    out
}

/// Encode puis emballe dans un [`CalendarFile`] au nom par défaut.
pub fn to_calendar_file(intervals: &[WorkInterval], title: &str, opts: EncodeOptions) -> CalendarFile {
    CalendarFile::new(encode_with(intervals, title, opts))
}

/// `YYYYMMDD`, mois et jour complétés par des zéros.
///
/// L'année doit être dans `0..=9999`, ce que garantit [`crate::scheduler::generate`].
pub fn format_ics_date(date: NaiveDate) -> String {
    let mut year = itoa::Buffer::new();
    let year = year.format(date.year());
    let mut out = String::with_capacity(8);
    for _ in year.len()..4 {
        out.push('0');
    }
    out.push_str(year);
    push_two_digits(&mut out, date.month());
    push_two_digits(&mut out, date.day());
    out
}

fn push_two_digits(out: &mut String, n: u32) {
    out.push(char::from(b'0' + (n / 10) as u8));
    out.push(char::from(b'0' + (n % 10) as u8));
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

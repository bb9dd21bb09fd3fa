use crate::ical::CalendarFile;
use crate::model::{Pattern, PatternEntry, WorkInterval};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Import du cycle depuis CSV: header `on,off`, une ligne par entrée.
pub fn import_pattern_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Pattern> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let on = rec.get(0).context("missing on")?.trim();
        let off = rec.get(1).context("missing off")?.trim();
        if on.is_empty() || off.is_empty() {
            bail!("invalid pattern row {} (empty)", row + 1);
        }
        out.push(parse_entry(on, off).with_context(|| format!("pattern row {}", row + 1))?);
    }
    Ok(Pattern::new(out)?)
}

/// Syntaxe compacte `on/off[,on/off...]`, ex. `4/3,2/2`.
pub fn parse_pattern_spec(raw: &str) -> anyhow::Result<Pattern> {
    let mut out = Vec::new();
    for chunk in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let Some((on, off)) = chunk.split_once('/') else {
            bail!("expected on/off, got {chunk:?}");
        };
        out.push(parse_entry(on.trim(), off.trim()).with_context(|| format!("in {chunk:?}"))?);
    }
    Ok(Pattern::new(out)?)
}

fn parse_entry(on: &str, off: &str) -> anyhow::Result<PatternEntry> {
    let on: u32 = on
        .parse()
        .with_context(|| format!("invalid on-days value: {on}"))?;
    let off: u32 = off
        .parse()
        .with_context(|| format!("invalid off-days value: {off}"))?;
    Ok(PatternEntry::new(on, off)?)
}

/// Export JSON des intervalles (jolie mise en forme)
pub fn export_intervals_json<P: AsRef<Path>>(
    path: P,
    intervals: &[WorkInterval],
) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(intervals)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV: header `start,end,sequence`
pub fn export_intervals_csv<P: AsRef<Path>>(
    path: P,
    intervals: &[WorkInterval],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["start", "end", "sequence"])?;
    for i in intervals {
        let start = i.start.format("%Y-%m-%d").to_string();
        let end = i.end.format("%Y-%m-%d").to_string();
        w.write_record([start.as_str(), end.as_str(), i.sequence.as_str()])?;
    }
    w.flush()?;
    Ok(())
}

/// Destination d'un calendrier exporté.
pub trait CalendarSink {
    /// Livre le document ; renvoie l'emplacement final.
    fn deliver(&self, file: &CalendarFile) -> anyhow::Result<PathBuf>;
}

/// Écrit le fichier sur disque de manière atomique.
pub enum FileSink {
    /// Le nom de fichier vient du `CalendarFile`.
    Dir(PathBuf),
    /// Chemin imposé, le nom du `CalendarFile` est ignoré.
    Path(PathBuf),
}

impl FileSink {
    /// Un répertoire existant reçoit le fichier sous son nom par défaut.
    pub fn for_output<P: AsRef<Path>>(out: P) -> Self {
        let out = out.as_ref();
        if out.is_dir() {
            FileSink::Dir(out.to_path_buf())
        } else {
            FileSink::Path(out.to_path_buf())
        }
    }

    fn target(&self, file: &CalendarFile) -> PathBuf {
        match self {
            FileSink::Dir(dir) => dir.join(&file.file_name),
            FileSink::Path(path) => path.clone(),
        }
    }
}

impl CalendarSink for FileSink {
    fn deliver(&self, file: &CalendarFile) -> anyhow::Result<PathBuf> {
        let target = self.target(file);
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(parent).with_context(|| "creating temp file")?;
        tmp.write_all(file.content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target)
            .with_context(|| format!("atomic rename to {}", target.display()))?;

        #[cfg(feature = "logging")]
        tracing::info!(path = %target.display(), mime = file.mime_type, "calendar written");

        Ok(target)
    }
}

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DeskError, Result};

/// Column order of the ledger file
pub const COLUMNS: [&str; 8] = [
    "id", "title", "price", "link", "description", "status", "note", "added_at",
];

/// Status given to freshly logged items
pub const DEFAULT_STATUS: &str = "sold";

/// Timestamp format for `added_at`
const ADDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cell values spreadsheet tools write for "nothing"
const PLACEHOLDERS: [&str; 4] = ["nan", "none", "null", "n/a"];

/// One item logged as sold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default, deserialize_with = "clean_cell")]
    pub id: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub title: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub price: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub link: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub description: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub status: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub note: String,
    #[serde(default, deserialize_with = "clean_cell")]
    pub added_at: String,
}

impl LedgerEntry {
    /// A new sold entry stamped with the current local time
    pub fn sold(id: impl Into<String>) -> Self {
        Self::sold_at(id, Local::now())
    }

    /// A new sold entry stamped with `at`
    pub fn sold_at(id: impl Into<String>, at: DateTime<Local>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            status: DEFAULT_STATUS.to_string(),
            added_at: at.format(ADDED_AT_FORMAT).to_string(),
            ..Self::default()
        }
    }
}

/// Empty and placeholder cells both load as ""
fn clean_cell<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(clean_value(&value))
}

fn clean_value(value: &str) -> String {
    let trimmed = value.trim();
    if PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p)) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Fields an operator may edit; `id` and `added_at` are fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerField {
    Title,
    Price,
    Link,
    Description,
    Status,
    Note,
}

impl LedgerField {
    pub const ALL: [LedgerField; 6] = [
        LedgerField::Title,
        LedgerField::Price,
        LedgerField::Link,
        LedgerField::Description,
        LedgerField::Status,
        LedgerField::Note,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LedgerField::Title => "title",
            LedgerField::Price => "price",
            LedgerField::Link => "link",
            LedgerField::Description => "description",
            LedgerField::Status => "status",
            LedgerField::Note => "note",
        }
    }

    pub fn get(self, entry: &LedgerEntry) -> &str {
        match self {
            LedgerField::Title => &entry.title,
            LedgerField::Price => &entry.price,
            LedgerField::Link => &entry.link,
            LedgerField::Description => &entry.description,
            LedgerField::Status => &entry.status,
            LedgerField::Note => &entry.note,
        }
    }

    pub fn set(self, entry: &mut LedgerEntry, value: &str) {
        let value = clean_value(value);
        match self {
            LedgerField::Title => entry.title = value,
            LedgerField::Price => entry.price = value,
            LedgerField::Link => entry.link = value,
            LedgerField::Description => entry.description = value,
            LedgerField::Status => entry.status = value,
            LedgerField::Note => entry.note = value,
        }
    }
}

impl FromStr for LedgerField {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        LedgerField::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| DeskError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for LedgerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order for listing the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    /// Alphabetical by title, ignoring case
    Title,
}

/// Sort entries in place; ties keep file order
pub fn sort_entries(entries: &mut [LedgerEntry], order: SortOrder) {
    match order {
        SortOrder::Newest => entries.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
        SortOrder::Oldest => entries.sort_by(|a, b| a.added_at.cmp(&b.added_at)),
        SortOrder::Title => entries.sort_by_cached_key(|e| e.title.to_lowercase()),
    }
}

/// Headline numbers shown above the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub total: usize,
    /// Latest `added_at`, cut to minutes
    pub last_added: Option<String>,
}

pub fn stats(entries: &[LedgerEntry]) -> LedgerStats {
    let last_added = entries
        .iter()
        .map(|e| e.added_at.as_str())
        .filter(|a| !a.is_empty())
        .max()
        .map(|a| a.chars().take(16).collect());
    LedgerStats {
        total: entries.len(),
        last_added,
    }
}

/// Outcome of a successful ledger write
#[derive(Debug)]
pub struct WriteReceipt {
    /// Id of the entry written or removed
    pub id: String,
    pub path: PathBuf,
    /// Backup copy location, or why it could not be made
    pub backup: std::result::Result<PathBuf, String>,
}

/// Repository over the sold-items ledger
///
/// Callers never deal with whole-file replacement; every successful write
/// also produces a dated backup copy.
pub trait LedgerStore {
    /// All entries in file order
    fn load(&self) -> Result<Vec<LedgerEntry>>;

    /// Append a new entry; a taken id gets a `-2`, `-3`, ... suffix
    fn insert(&self, entry: LedgerEntry) -> Result<WriteReceipt>;

    /// Replace the entry with the same id in place, or append it
    fn upsert(&self, entry: LedgerEntry) -> Result<WriteReceipt>;

    /// Remove an entry by id
    fn delete(&self, id: &str) -> Result<WriteReceipt>;

    /// All entries, newest first
    fn list(&self) -> Result<Vec<LedgerEntry>> {
        self.list_sorted(SortOrder::Newest)
    }

    fn list_sorted(&self, order: SortOrder) -> Result<Vec<LedgerEntry>> {
        let mut entries = self.load()?;
        sort_entries(&mut entries, order);
        Ok(entries)
    }

    fn get(&self, id: &str) -> Result<Option<LedgerEntry>> {
        let id = id.trim();
        Ok(self.load()?.into_iter().find(|e| e.id == id))
    }
}

/// Change one field of an existing entry
pub fn update_field(
    store: &dyn LedgerStore,
    id: &str,
    field: LedgerField,
    value: &str,
) -> Result<WriteReceipt> {
    let mut entry = store
        .get(id)?
        .ok_or_else(|| DeskError::EntryNotFound(id.to_string()))?;
    field.set(&mut entry, value);
    store.upsert(entry)
}

/// Ledger kept as a CSV file, rewritten in full on every change
pub struct CsvLedger {
    path: PathBuf,
}

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the dated copies
    pub fn backup_dir(&self) -> PathBuf {
        self.path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("backups")
    }

    /// Replace the file with `entries`, then copy it aside
    fn save_all(&self, entries: &[LedgerEntry], id: &str) -> Result<WriteReceipt> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write next to the ledger and rename over it, the old file survives failures
        let tmp_path = self.path.with_extension("csv.tmp");
        if let Err(e) = write_csv(&tmp_path, entries) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), entries = entries.len(), "ledger written");

        let backup = self.backup().map_err(|e| {
            tracing::warn!(error = %e, "ledger backup failed");
            e.to_string()
        });

        Ok(WriteReceipt {
            id: id.to_string(),
            path: self.path.clone(),
            backup,
        })
    }

    fn backup(&self) -> Result<PathBuf> {
        let dir = self.backup_dir();
        fs::create_dir_all(&dir)?;

        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ledger".to_string());
        let stamp = Local::now().format("%Y%m%d_%H%M%S_%3f").to_string();
        let mut target = dir.join(format!("{}_{}.csv", stem, stamp));
        let mut n = 1;
        while target.exists() {
            target = dir.join(format!("{}_{}_{}.csv", stem, stamp, n));
            n += 1;
        }

        fs::copy(&self.path, &target)?;
        Ok(target)
    }
}

fn write_csv(path: &Path, entries: &[LedgerEntry]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(COLUMNS)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

impl LedgerStore for CsvLedger {
    fn load(&self) -> Result<Vec<LedgerEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let mut entries = Vec::new();
        for record in reader.records() {
            let mut record = record?;
            // Rows cut short by hand editing still load, missing cells are empty
            while record.len() < headers.len() {
                record.push_field("");
            }
            let entry: LedgerEntry = record.deserialize(Some(&headers))?;
            if entry == LedgerEntry::default() {
                continue;
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    fn insert(&self, mut entry: LedgerEntry) -> Result<WriteReceipt> {
        require_id(&entry)?;

        let mut entries = self.load()?;
        entry.id = free_id(&entries, entry.id.trim());
        let id = entry.id.clone();
        entries.push(entry);
        self.save_all(&entries, &id)
    }

    fn upsert(&self, entry: LedgerEntry) -> Result<WriteReceipt> {
        require_id(&entry)?;

        let id = entry.id.clone();
        let mut entries = self.load()?;
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.save_all(&entries, &id)
    }

    fn delete(&self, id: &str) -> Result<WriteReceipt> {
        let id = id.trim();
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(DeskError::EntryNotFound(id.to_string()));
        }
        self.save_all(&entries, id)
    }
}

fn require_id(entry: &LedgerEntry) -> Result<()> {
    if entry.id.trim().is_empty() {
        return Err(DeskError::Validation("ledger entry needs an id".into()));
    }
    Ok(())
}

/// `wanted`, or the first `wanted-N` (N >= 2) no entry uses yet
fn free_id(entries: &[LedgerEntry], wanted: &str) -> String {
    let taken = |id: &str| entries.iter().any(|e| e.id == id);
    if !taken(wanted) {
        return wanted.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", wanted, n))
        .find(|id| !taken(id))
        .unwrap_or_else(|| wanted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parsing() {
        assert_eq!("Price".parse::<LedgerField>().unwrap(), LedgerField::Price);
        assert_eq!(" note ".parse::<LedgerField>().unwrap(), LedgerField::Note);
        assert!(matches!("id".parse::<LedgerField>(), Err(DeskError::UnknownField(_))));
        assert!(matches!("added_at".parse::<LedgerField>(), Err(DeskError::UnknownField(_))));
    }

    #[test]
    fn test_placeholder_values_become_empty() {
        let mut entry = LedgerEntry::sold("42");
        LedgerField::Note.set(&mut entry, "NaN");
        assert_eq!(entry.note, "");
        LedgerField::Note.set(&mut entry, "bez klapy");
        assert_eq!(LedgerField::Note.get(&entry), "bez klapy");
    }

    #[test]
    fn test_free_id_appends_counter() {
        let entries = vec![
            LedgerEntry::sold("manual-5J0-1700000000"),
            LedgerEntry::sold("manual-5J0-1700000000-2"),
        ];
        assert_eq!(free_id(&entries, "other"), "other");
        assert_eq!(free_id(&entries, "manual-5J0-1700000000"), "manual-5J0-1700000000-3");
    }

    #[test]
    fn test_sort_orders() {
        let mut entries: Vec<LedgerEntry> = [
            ("a", "Zderzak", "2026-01-02 10:00:00"),
            ("b", "alternator", "2026-01-03 10:00:00"),
            ("c", "Maska", "2026-01-01 10:00:00"),
        ]
        .into_iter()
        .map(|(id, title, added_at)| LedgerEntry {
            id: id.into(),
            title: title.into(),
            added_at: added_at.into(),
            ..LedgerEntry::default()
        })
        .collect();
        let ids = |entries: &[LedgerEntry]| entries.iter().map(|e| e.id.clone()).collect::<Vec<_>>();

        sort_entries(&mut entries, SortOrder::Newest);
        assert_eq!(ids(&entries), vec!["b", "a", "c"]);
        sort_entries(&mut entries, SortOrder::Oldest);
        assert_eq!(ids(&entries), vec!["c", "a", "b"]);
        sort_entries(&mut entries, SortOrder::Title);
        assert_eq!(ids(&entries), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_stats() {
        assert_eq!(stats(&[]), LedgerStats { total: 0, last_added: None });

        let mut older = LedgerEntry::sold("1");
        older.added_at = "2026-03-01 09:15:42".into();
        let mut newer = LedgerEntry::sold("2");
        newer.added_at = "2026-03-02 18:05:11".into();
        let blank = LedgerEntry { id: "3".into(), ..LedgerEntry::default() };

        let stats = stats(&[older, newer, blank]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.last_added.as_deref(), Some("2026-03-02 18:05"));
    }

    #[test]
    fn test_sold_entry_defaults() {
        let entry = LedgerEntry::sold("  123 ");
        assert_eq!(entry.id, "123");
        assert_eq!(entry.status, DEFAULT_STATUS);
        assert_eq!(entry.added_at.len(), 19);
        assert!(entry.link.is_empty());
    }
}

// 📂 Anniversary Loader - CSV table → Anniversaries
//
// Bad rows are collected, not fatal: one typo in the table should not hide
// every other anniversary. Only an unreadable file or a missing column aborts.

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

use crate::anniversary::Anniversary;
use crate::lunar_date::LunarDate;

// ============================================================================
// CSV RECORD
// ============================================================================

/// One CSV row as written in the file
///
/// Numbers stay strings here so a bad value becomes a per-row rejection
/// with a readable reason instead of a generic serde error.
#[derive(Debug, Clone, Deserialize)]
struct AnniversaryRecord {
    name: String,

    #[serde(alias = "warasDay")]
    day: String,

    #[serde(alias = "warasMonth")]
    month: String,

    #[serde(alias = "warasYear", default)]
    year: Option<String>,

    #[serde(default)]
    uid: Option<String>,
}

impl AnniversaryRecord {
    fn into_anniversary(self) -> Result<Anniversary, String> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("name is empty".to_string());
        }

        let day = parse_field::<u8>("day", &self.day)?;
        let month = parse_field::<u8>("month", &self.month)?;
        let year = match self.year.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(raw) => parse_field::<u32>("year", raw)?,
        };

        let date = LunarDate::new(year, month, day).map_err(|e| e.to_string())?;

        let uid = match self.uid.as_deref().map(str::trim) {
            Some(uid) if !uid.is_empty() => uid.to_string(),
            _ => derive_uid(&name, &date),
        };

        Ok(Anniversary::new(name, date, uid))
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, String> {
    let raw = raw.trim();
    raw.parse::<T>()
        .map_err(|_| format!("{} is not a valid number: {:?}", field, raw))
}

/// Stable uid for rows without one: UUID v5 over name + lunar month/day
///
/// Same row → same uid on every run, so regenerated calendars update
/// existing events instead of duplicating them.
pub fn derive_uid(name: &str, date: &LunarDate) -> String {
    let key = format!("{}|{:02}|{:02}", name, date.month(), date.day());
    Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes()).to_string()
}

// ============================================================================
// LOAD REPORT
// ============================================================================

/// A row that could not become an Anniversary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based line in the source file (header is line 1)
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub anniversaries: Vec<Anniversary>,
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.anniversaries.len() + self.rejected.len()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Load the anniversary table from a CSV file
pub fn load_anniversaries(csv_path: &Path) -> Result<LoadReport> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open anniversary table: {}", csv_path.display()))?;

    let source = csv_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv");

    read_anniversaries(file, source)
}

/// Read the anniversary table from any CSV source
///
/// `source` only labels log lines and errors.
pub fn read_anniversaries<R: Read>(input: R, source: &str) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header in {}", source))?
        .clone();
    check_headers(&headers, source)?;

    let mut report = LoadReport::default();

    for (row_num, result) in reader.records().enumerate() {
        // +2 because: 1-indexed + header row
        let line = row_num + 2;

        let outcome = result
            .map_err(|e| format!("malformed CSV row: {}", e))
            .and_then(|record| {
                record
                    .deserialize::<AnniversaryRecord>(Some(&headers))
                    .map_err(|e| format!("malformed CSV row: {}", e))
            })
            .and_then(AnniversaryRecord::into_anniversary);

        match outcome {
            Ok(anniversary) => report.anniversaries.push(anniversary),
            Err(reason) => {
                warn!(source, line, %reason, "rejected anniversary row");
                report.rejected.push(RejectedRecord { line, reason });
            }
        }
    }

    info!(
        source,
        loaded = report.anniversaries.len(),
        rejected = report.rejected.len(),
        "anniversary table loaded"
    );

    Ok(report)
}

fn check_headers(headers: &StringRecord, source: &str) -> Result<()> {
    let has = |names: &[&str]| headers.iter().any(|h| names.contains(&h));

    let required: [(&str, &[&str]); 3] = [
        ("name", &["name"]),
        ("day", &["day", "warasDay"]),
        ("month", &["month", "warasMonth"]),
    ];

    for (column, accepted) in required {
        if !has(accepted) {
            bail!("{} is missing the required '{}' column", source, column);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> LoadReport {
        read_anniversaries(csv.as_bytes(), "test.csv").unwrap()
    }

    #[test]
    fn test_read_valid_table() {
        let report = read("name,day,month,year,uid\nTest name,01,01,1441,abc-123\n");

        assert!(report.is_clean());
        assert_eq!(report.anniversaries.len(), 1);

        let a = &report.anniversaries[0];
        assert_eq!(a.name, "Test name");
        assert_eq!(a.date, LunarDate::new(1441, 1, 1).unwrap());
        assert_eq!(a.uid, "abc-123");
    }

    #[test]
    fn test_legacy_headers_and_leading_spaces() {
        let report = read("name, warasDay, warasMonth, warasYear\nGrandfather, 12, 3, 1398\n");

        assert!(report.is_clean(), "{:?}", report.rejected);
        let a = &report.anniversaries[0];
        assert_eq!(a.name, "Grandfather");
        assert_eq!(a.date.month_day(), (3, 12));
        assert_eq!(a.date.year(), 1398);
    }

    #[test]
    fn test_missing_year_defaults_to_zero() {
        let report = read("name,day,month\nNo year,5,2\n");
        assert_eq!(report.anniversaries[0].date.year(), 0);
    }

    #[test]
    fn test_bad_rows_are_rejected_not_fatal() {
        let csv = "name,day,month,year,uid\n\
                   Good,1,1,1441,g\n\
                   Bad day,30,8,1441,b1\n\
                   Bad month,1,13,1441,b2\n\
                   Not a number,x,1,1441,b3\n\
                   ,1,1,1441,b4\n\
                   Also good,29,12,1441,g2\n";
        let report = read(csv);

        let names: Vec<&str> = report.anniversaries.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Also good"]);

        let lines: Vec<usize> = report.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert!(report.rejected[0].reason.contains("invalid lunar day"));
        assert!(report.rejected[1].reason.contains("invalid lunar month"));
        assert!(report.rejected[2].reason.contains("day is not a valid number"));
        assert_eq!(report.total_rows(), 6);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let report = read("name,day,month\nOnly name\nFine,1,1\n");
        assert_eq!(report.anniversaries.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = read_anniversaries("name,month\nA,1\n".as_bytes(), "test.csv").unwrap_err();
        assert!(err.to_string().contains("'day'"));
    }

    #[test]
    fn test_derived_uid_is_stable() {
        let a = read("name,day,month\nSame,2,8\n");
        let b = read("name,day,month,year,uid\nSame,02,08,1300,\n");

        assert_eq!(a.anniversaries[0].uid, b.anniversaries[0].uid);
        assert_eq!(a.anniversaries[0].uid.len(), 36);

        let other = read("name,day,month\nDifferent,2,8\n");
        assert_ne!(a.anniversaries[0].uid, other.anniversaries[0].uid);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_anniversaries(Path::new("/definitely/not/here.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_rejected_record_display() {
        let rejected = RejectedRecord {
            line: 7,
            reason: "name is empty".to_string(),
        };
        assert_eq!(rejected.to_string(), "line 7: name is empty");
    }
}

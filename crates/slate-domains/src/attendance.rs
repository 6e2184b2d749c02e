//! Attendance tracking.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use slate_core::validate::min_len;
use slate_core::{Constraint, Fields, Filter, Record, UniqueKey, ValidationError};

/// Reported when a student already has an entry for the same date.
pub const DUPLICATE_ENTRY_MESSAGE: &str =
    "An attendance record already exists for this student on this date";

/// Whether a student attended on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Late => "Late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attendance status '{0}' (expected Present, Absent or Late)")]
pub struct ParseStatusError(String);

impl FromStr for AttendanceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// One student's attendance on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_name: String,
    /// Uppercased on write.
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: String,
}

impl AttendanceEntry {
    pub fn new(
        student_name: impl Into<String>,
        student_id: impl Into<String>,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            student_id: student_id.into(),
            date,
            status,
            remarks: String::new(),
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }
}

/// Partial update for an [`AttendanceEntry`].
#[derive(Debug, Clone, Default)]
pub struct AttendancePatch {
    pub student_name: Option<String>,
    pub student_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

impl Fields for AttendanceEntry {
    const STORAGE_KEY: &'static str = "attendanceRecords";

    type Patch = AttendancePatch;

    fn apply(&mut self, patch: AttendancePatch) {
        if let Some(student_name) = patch.student_name {
            self.student_name = student_name;
        }
        if let Some(student_id) = patch.student_id {
            self.student_id = student_id;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(remarks) = patch.remarks {
            self.remarks = remarks;
        }
    }

    fn normalize(&mut self) {
        self.student_name = self.student_name.trim().to_string();
        self.student_id = self.student_id.trim().to_uppercase();
        self.remarks = self.remarks.trim().to_string();
    }

    fn validate(&self, errors: &mut ValidationError) {
        min_len(errors, "studentName", "Name", &self.student_name, 2);
        min_len(errors, "studentId", "ID", &self.student_id, 3);
    }

    fn constraints() -> Vec<Box<dyn Constraint<Self>>> {
        vec![Box::new(UniqueKey::new(
            "studentId",
            DUPLICATE_ENTRY_MESSAGE,
            |entry: &AttendanceEntry| (entry.student_id.clone(), entry.date),
        ))]
    }
}

/// Search criteria for the attendance list.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Matched against student name and id.
    pub search: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub date: Option<NaiveDate>,
}

impl AttendanceFilter {
    pub fn into_filter(self) -> Filter<AttendanceEntry> {
        Filter::all()
            .text(self.search.as_deref().unwrap_or_default(), |e: &AttendanceEntry| {
                vec![e.student_name.as_str(), e.student_id.as_str()]
            })
            .eq_opt(self.status, |e: &AttendanceEntry| &e.status)
            .eq_opt(self.date, |e: &AttendanceEntry| &e.date)
    }
}

/// Summary counters for the attendance dashboard.
///
/// `total` counts every record; the per-status counts only cover `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceStats {
    pub day: NaiveDate,
    pub total: usize,
    pub day_total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

impl AttendanceStats {
    pub fn compute<'a>(
        records: impl IntoIterator<Item = &'a Record<AttendanceEntry>>,
        day: NaiveDate,
    ) -> Self {
        let mut stats = Self {
            day,
            total: 0,
            day_total: 0,
            present: 0,
            absent: 0,
            late: 0,
        };

        for record in records {
            stats.total += 1;
            if record.fields.date != day {
                continue;
            }
            stats.day_total += 1;
            match record.fields.status {
                AttendanceStatus::Present => stats.present += 1,
                AttendanceStatus::Absent => stats.absent += 1,
                AttendanceStatus::Late => stats.late += 1,
            }
        }

        stats
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Late => self.late,
        }
    }

    /// Share of the day's records with `status`, rounded to a whole
    /// percent (halves round up). Zero when the day has no records.
    pub fn percentage(&self, status: AttendanceStatus) -> usize {
        if self.day_total == 0 {
            return 0;
        }
        (200 * self.count(status) + self.day_total) / (2 * self.day_total)
    }
}

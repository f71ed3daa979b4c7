//! Result renderer: pure projection of a [`ParsedResult`] into read-only
//! display groups.
//!
//! Absence is always rendered explicitly (a missing cell becomes
//! "No Information Found", an empty education list becomes a single no-data
//! row, an empty skill list becomes a visible message) so the user can tell
//! "the parser found nothing" apart from "the section silently vanished".

use crate::model::ParsedResult;
use std::fmt;

/// Placeholder for a single missing table cell.
pub const NO_INFORMATION: &str = "No Information Found";
/// No-data row message for an empty education table.
pub const NO_EDUCATION: &str = "No Education Details Available";
/// No-data row message for an empty experience table.
pub const NO_EXPERIENCE: &str = "No Experience Details Available";
/// Message shown instead of an empty skill-tag region.
pub const NO_SKILLS: &str = "No technical skills found.";

/// One read-only identity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

/// A table section: either data rows or an explicit no-data message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<T> {
    Rows(Vec<T>),
    NoData(&'static str),
}

/// One row of the education table, placeholders already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationRow {
    pub degree: String,
    pub college: String,
    pub year: String,
    pub mark: String,
}

/// One row of the experience table, placeholders already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceRow {
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

/// The skill-tag region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skills {
    Tags(Vec<String>),
    None(&'static str),
}

/// The complete read-only view of a parsed resume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeView {
    pub identity: Vec<Field>,
    pub certifications: Vec<String>,
    pub education: Section<EducationRow>,
    pub experience: Section<ExperienceRow>,
    pub skills: Skills,
}

/// Headers of the education table, in display order.
pub const EDUCATION_HEADERS: [&str; 4] = ["Degree/Course", "University", "Year", "Score/CGPA"];
/// Headers of the experience table, in display order.
pub const EXPERIENCE_HEADERS: [&str; 4] = ["Company Name", "Designation", "Start Date", "End Date"];

/// Project a parsed result into display groups. Pure; never fails.
pub fn render(result: &ParsedResult) -> ResumeView {
    let identity = vec![
        Field { label: "Name", value: result.name.clone() },
        Field { label: "DOB", value: result.dob.clone() },
        Field { label: "Contact No", value: result.phone.clone() },
        Field { label: "Marital Status", value: result.marital_status.clone() },
        Field { label: "Email", value: result.email.clone() },
        Field { label: "Languages", value: result.languages.join(", ") },
        Field { label: "Job Title", value: result.job_title.clone() },
        Field { label: "Gender", value: result.gender.clone() },
    ];

    let education = if result.education.is_empty() {
        Section::NoData(NO_EDUCATION)
    } else {
        Section::Rows(
            result
                .education
                .iter()
                .map(|e| EducationRow {
                    degree: or_placeholder(&e.degree),
                    college: or_placeholder(&e.college),
                    year: or_placeholder(&e.year),
                    mark: or_placeholder(&e.mark),
                })
                .collect(),
        )
    };

    let experience = if result.experience.is_empty() {
        Section::NoData(NO_EXPERIENCE)
    } else {
        Section::Rows(
            result
                .experience
                .iter()
                .map(|e| ExperienceRow {
                    company: or_placeholder(&e.company),
                    role: or_placeholder(&e.role),
                    start_date: or_placeholder(&e.start_date),
                    end_date: or_placeholder(&e.end_date),
                })
                .collect(),
        )
    };

    let skills = if result.skills().is_empty() {
        Skills::None(NO_SKILLS)
    } else {
        Skills::Tags(result.skills().to_vec())
    };

    ResumeView {
        identity,
        certifications: result.certifications.clone(),
        education,
        experience,
        skills,
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        NO_INFORMATION.to_string()
    } else {
        value.to_string()
    }
}

// ── Plain-text rendering (CLI) ───────────────────────────────────────────

impl fmt::Display for ResumeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .identity
            .iter()
            .map(|fld| fld.label.len())
            .max()
            .unwrap_or(0);
        for field in &self.identity {
            writeln!(f, "{:<label_width$}  {}", field.label, field.value)?;
        }

        writeln!(f, "\nCertifications:")?;
        if self.certifications.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for cert in &self.certifications {
            writeln!(f, "  - {cert}")?;
        }

        writeln!(f, "\nEducation:")?;
        match &self.education {
            Section::NoData(msg) => writeln!(f, "  {msg}")?,
            Section::Rows(rows) => {
                let table: Vec<[&str; 4]> = rows
                    .iter()
                    .map(|r| {
                        [
                            r.degree.as_str(),
                            r.college.as_str(),
                            r.year.as_str(),
                            r.mark.as_str(),
                        ]
                    })
                    .collect();
                write_table(f, &EDUCATION_HEADERS, &table)?;
            }
        }

        writeln!(f, "\nExperience:")?;
        match &self.experience {
            Section::NoData(msg) => writeln!(f, "  {msg}")?,
            Section::Rows(rows) => {
                let table: Vec<[&str; 4]> = rows
                    .iter()
                    .map(|r| {
                        [
                            r.company.as_str(),
                            r.role.as_str(),
                            r.start_date.as_str(),
                            r.end_date.as_str(),
                        ]
                    })
                    .collect();
                write_table(f, &EXPERIENCE_HEADERS, &table)?;
            }
        }

        writeln!(f, "\nTechnical Skills:")?;
        match &self.skills {
            Skills::None(msg) => writeln!(f, "  {msg}")?,
            Skills::Tags(tags) => writeln!(f, "  {}", tags.join(", "))?,
        }

        Ok(())
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, headers: &[&str; 4], rows: &[[&str; 4]]) -> fmt::Result {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let line = |f: &mut fmt::Formatter<'_>, cells: &[&str; 4]| -> fmt::Result {
        write!(f, "  ")?;
        for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{cell:<w$}")?;
        }
        writeln!(f)
    };

    line(f, headers)?;
    for row in rows {
        line(f, row)?;
    }
    Ok(())
}

//! The parsing service's response, as a tolerant boundary schema.
//!
//! ## Why so defensive?
//!
//! The remote parser's output drifts: fields go missing, certifications come
//! back as either a list or a comma-delimited string, years arrive as numbers
//! one day and strings the next. Rather than branching on shape throughout
//! the renderer, every coercion happens *here*, once, at deserialisation
//! time. Downstream code sees plain `String`s and `Vec<String>`s: missing
//! data is an empty value, never a null to trip over.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured fields returned by the parsing service.
///
/// Every field is optional on the wire and defaults to empty here. Unknown
/// fields in the response are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResult {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub dob: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub marital_status: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_string")]
    pub job_title: String,

    /// Spoken languages; tolerated as a list or a delimited string.
    #[serde(deserialize_with = "list_or_delimited")]
    pub languages: Vec<String>,

    #[serde(deserialize_with = "null_to_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_to_default")]
    pub experience: Vec<ExperienceEntry>,

    #[serde(deserialize_with = "null_to_default")]
    pub technical_skills: TechnicalSkills,

    /// Certifications; the service sends either `["AWS", "Azure"]` or
    /// `"AWS, Azure"`. Both normalise to a trimmed list on receipt.
    #[serde(deserialize_with = "list_or_delimited")]
    pub certifications: Vec<String>,
}

impl ParsedResult {
    /// Shorthand for the extracted skill tags.
    pub fn skills(&self) -> &[String] {
        &self.technical_skills.extracted_skills
    }
}

/// One row of the education table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_string")]
    pub college: String,
    /// Often a bare number in the JSON; coerced to its decimal string.
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(deserialize_with = "lenient_string")]
    pub mark: String,
}

/// One row of the experience table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub company: String,
    #[serde(deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(deserialize_with = "lenient_string")]
    pub start_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub end_date: String,
}

/// The `technicalSkills` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSkills {
    #[serde(deserialize_with = "list_or_delimited")]
    pub extracted_skills: Vec<String>,
    #[serde(deserialize_with = "list_or_delimited")]
    pub found_keywords: Vec<String>,
}

// ── Coercion helpers ─────────────────────────────────────────────────────

/// Accept `null` (or an absent field) where a list or sub-object is
/// expected, yielding the empty default instead of a type error.
fn null_to_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Accept a string, number, bool, or null where a string is expected.
/// Null and absent both become the empty string; strings are trimmed.
fn lenient_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // Arrays/objects in a scalar slot: keep the JSON text rather than drop data.
        Some(other) => other.to_string(),
    })
}

/// Accept a list of strings or a single comma-delimited string.
///
/// List entries are trimmed but never split; a certification may legally
/// contain a comma ("Solutions Architect, Associate"). Only a bare string
/// value is treated as delimited.
fn list_or_delimited<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(de)?;
    Ok(coerce_list(v))
}

fn coerce_list(v: Option<Value>) -> Vec<String> {
    match v {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => split_delimited(&s),
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => {
                    let t = s.trim().to_string();
                    (!t.is_empty()).then_some(t)
                }
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(other) => split_delimited(&other.to_string()),
    }
}

fn split_delimited(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

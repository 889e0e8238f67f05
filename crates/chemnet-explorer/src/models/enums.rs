//! Enumeration types for search filters and output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// Machine-readable JSON format.
    Json,
}

/// What a funding-source network is built around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyCategory {
    /// Funding source relationships and partnerships.
    #[default]
    Affiliations,
    /// Chemicals associated with the funding source.
    Chemicals,
    /// Researchers affiliated with the funding source.
    Researchers,
    /// University collaborations.
    Universities,
}

impl CompanyCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] =
        [Self::Affiliations, Self::Chemicals, Self::Researchers, Self::Universities];

    /// Wire and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Affiliations => "Affiliations",
            Self::Chemicals => "Chemicals",
            Self::Researchers => "Researchers",
            Self::Universities => "Universities",
        }
    }
}

/// What a university network is built around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniversityCategory {
    /// Chemicals studied at the university.
    Chemicals,
    /// Funding sources of the university.
    #[default]
    #[serde(rename = "Funding Sources")]
    FundingSources,
}

impl UniversityCategory {
    /// All categories in display order.
    pub const ALL: [Self; 2] = [Self::Chemicals, Self::FundingSources];

    /// Wire and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chemicals => "Chemicals",
            Self::FundingSources => "Funding Sources",
        }
    }
}

/// Chemical subset used when building a network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChemicalGroup {
    /// Every chemical.
    #[default]
    All,
    /// Organic chemicals only.
    Organic,
}

impl ChemicalGroup {
    /// All groups in display order.
    pub const ALL: [Self; 2] = [Self::All, Self::Organic];

    /// Wire and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Organic => "Organic",
        }
    }
}

/// Coarse category the backend assigns to a funding source.
///
/// Parsed case-insensitively; anything unrecognized becomes `Unknown`,
/// including values that are not strings at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    Government,
    University,
    Foundation,
    Company,
    #[default]
    Unknown,
}

impl Classification {
    /// Display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::University => "University",
            Self::Foundation => "Foundation",
            Self::Company => "Company",
            Self::Unknown => "Unknown",
        }
    }

    /// Lowercase slug used for styling.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Government => "government",
            Self::University => "university",
            Self::Foundation => "foundation",
            Self::Company => "company",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for Classification {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "government" => Self::Government,
            "university" => Self::University,
            "foundation" => Self::Foundation,
            "company" => Self::Company,
            _ => Self::Unknown,
        }
    }
}

macro_rules! display_and_parse {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| {
                        v.as_str().eq_ignore_ascii_case(wanted)
                            || v.as_str().replace(' ', "-").eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| {
                        let options: Vec<_> = <$ty>::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown value {wanted:?}, expected one of: {}", options.join(", "))
                    })
            }
        }
    };
}

display_and_parse!(CompanyCategory);
display_and_parse!(UniversityCategory);
display_and_parse!(ChemicalGroup);

impl<'de> Deserialize<'de> for Classification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Self::from(s),
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_case_insensitive() {
        assert_eq!(Classification::from("GOVERNMENT".to_string()), Classification::Government);
        assert_eq!(Classification::from("company".to_string()), Classification::Company);
        assert_eq!(Classification::from("Hospital".to_string()), Classification::Unknown);
    }

    #[test]
    fn test_classification_deserializes_from_string() {
        let c: Classification = serde_json::from_str("\"Foundation\"").unwrap();
        assert_eq!(c, Classification::Foundation);

        let c: Classification = serde_json::from_str("42").unwrap();
        assert_eq!(c, Classification::Unknown);
    }

    #[test]
    fn test_university_category_wire_name() {
        let json = serde_json::to_string(&UniversityCategory::FundingSources).unwrap();
        assert_eq!(json, "\"Funding Sources\"");
        let parsed: UniversityCategory = serde_json::from_str("\"Funding Sources\"").unwrap();
        assert_eq!(parsed, UniversityCategory::FundingSources);
    }

    #[test]
    fn test_from_str_accepts_cli_spellings() {
        assert_eq!("funding-sources".parse::<UniversityCategory>(), Ok(UniversityCategory::FundingSources));
        assert_eq!("Funding Sources".parse::<UniversityCategory>(), Ok(UniversityCategory::FundingSources));
        assert_eq!("organic".parse::<ChemicalGroup>(), Ok(ChemicalGroup::Organic));
        assert_eq!("researchers".parse::<CompanyCategory>(), Ok(CompanyCategory::Researchers));
        assert!("bogus".parse::<CompanyCategory>().unwrap_err().contains("Affiliations"));
    }

    #[test]
    fn test_defaults_match_panel_defaults() {
        assert_eq!(CompanyCategory::default(), CompanyCategory::Affiliations);
        assert_eq!(UniversityCategory::default(), UniversityCategory::FundingSources);
        assert_eq!(ChemicalGroup::default(), ChemicalGroup::All);
    }
}

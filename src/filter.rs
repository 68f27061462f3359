//! Registry of named row predicates.
//!
//! The set is closed: each filter is a variant of [`NamedFilter`], selected on
//! the command line by its name (`ufo-states`) or its alias
//! (`unidentified_states`).

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use clap::builder::PossibleValue;

use crate::Record;
use crate::error::FilterError;

/// A predefined predicate over a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedFilter {
    /// State is missing, or longer than two characters and not "National"
    UnidentifiedStates,
    /// Title is missing or empty
    NoTitle,
    /// Group name is missing or empty
    NoGroup,
    /// Category holds more than one comma-separated value
    MultipleCategories,
}

impl NamedFilter {
    pub const ALL: [NamedFilter; 4] = [
        NamedFilter::UnidentifiedStates,
        NamedFilter::NoTitle,
        NamedFilter::NoGroup,
        NamedFilter::MultipleCategories,
    ];

    /// Resolve a filter by name or alias. Unknown names mean "no filter".
    pub fn lookup(name: &str) -> Option<NamedFilter> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name || f.alias() == name)
    }

    /// Name accepted by `--filter`.
    pub fn name(&self) -> &'static str {
        match self {
            NamedFilter::UnidentifiedStates => "ufo-states",
            NamedFilter::NoTitle => "no-title",
            NamedFilter::NoGroup => "no-group",
            NamedFilter::MultipleCategories => "multi-cat",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            NamedFilter::UnidentifiedStates => "unidentified_states",
            NamedFilter::NoTitle => "no_title",
            NamedFilter::NoGroup => "no_group",
            NamedFilter::MultipleCategories => "multiple_categories",
        }
    }

    /// One-line help shown for `--filter` values.
    pub fn description(&self) -> &'static str {
        match self {
            NamedFilter::UnidentifiedStates => {
                "State is missing, or longer than two characters and not \"National\""
            }
            NamedFilter::NoTitle => "Title is missing or empty",
            NamedFilter::NoGroup => "Group name is missing or empty",
            NamedFilter::MultipleCategories => "Category holds more than one comma-separated value",
        }
    }

    /// Evaluate the predicate. Total over any record: missing fields are
    /// treated as absent, never as an error.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            NamedFilter::UnidentifiedStates => match record.get("State") {
                None => true,
                // Length is measured before trimming, equality after.
                Some(state) => state.chars().count() > 2 && state.trim() != "National",
            },
            NamedFilter::NoTitle => record.get("Title").is_none_or(str::is_empty),
            NamedFilter::NoGroup => record.get("Group name").is_none_or(str::is_empty),
            NamedFilter::MultipleCategories => {
                record.get("Category").unwrap_or("").split(',').count() > 1
            }
        }
    }
}

impl fmt::Display for NamedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ValueEnum for NamedFilter {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(
            PossibleValue::new(self.name())
                .alias(self.alias())
                .help(self.description()),
        )
    }
}

impl FromStr for NamedFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| FilterError::InvalidFilterName {
            name: s.to_string(),
            expected: Self::ALL
                .iter()
                .map(NamedFilter::name)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(name: &str, value: &str) -> Record {
        Record::from_pairs([(name, value)])
    }

    #[test]
    fn test_lookup_by_name_and_alias() {
        assert_eq!(NamedFilter::lookup("no-group"), Some(NamedFilter::NoGroup));
        assert_eq!(NamedFilter::lookup("no_group"), Some(NamedFilter::NoGroup));
        assert_eq!(
            NamedFilter::lookup("multi-cat"),
            Some(NamedFilter::MultipleCategories)
        );
        assert_eq!(
            NamedFilter::lookup("unidentified_states"),
            Some(NamedFilter::UnidentifiedStates)
        );
    }

    #[test]
    fn test_lookup_unknown_is_absent() {
        assert_eq!(NamedFilter::lookup("bogus"), None);
        assert_eq!(NamedFilter::lookup(""), None);
        assert_eq!(NamedFilter::lookup("NO-GROUP"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "bogus".parse::<NamedFilter>().unwrap_err();
        match err {
            FilterError::InvalidFilterName { name, expected } => {
                assert_eq!(name, "bogus");
                assert_eq!(expected, "ufo-states, no-title, no-group, multi-cat");
            }
            other => panic!("Expected InvalidFilterName, got {other:?}"),
        }
    }

    #[test]
    fn test_value_enum_matches_registry() {
        for filter in NamedFilter::ALL {
            assert_eq!(
                <NamedFilter as ValueEnum>::from_str(filter.name(), false),
                Ok(filter)
            );
            assert_eq!(
                <NamedFilter as ValueEnum>::from_str(filter.alias(), false),
                Ok(filter)
            );
        }
        assert_eq!(NamedFilter::value_variants().len(), NamedFilter::ALL.len());
    }

    #[test]
    fn test_possible_value_help_is_description() {
        for filter in NamedFilter::ALL {
            let value = filter.to_possible_value().unwrap();
            assert_eq!(value.get_name(), filter.name());
            assert_eq!(
                value.get_help().map(|h| h.to_string()),
                Some(filter.description().to_string())
            );
        }
    }

    #[test]
    fn test_unidentified_states() {
        let f = NamedFilter::UnidentifiedStates;
        assert!(f.matches(&Record::default()));
        assert!(!f.matches(&with("State", "National")));
        assert!(!f.matches(&with("State", "CA")));
        assert!(f.matches(&with("State", "California")));
        assert!(!f.matches(&with("State", "")));
    }

    #[test]
    fn test_unidentified_states_trim_and_length_asymmetry() {
        let f = NamedFilter::UnidentifiedStates;
        // Trimmed equals "National", so not unidentified.
        assert!(!f.matches(&with("State", "  National ")));
        // Untrimmed length 3 passes the length check even though "CA" would not.
        assert!(f.matches(&with("State", " CA")));
    }

    #[test]
    fn test_no_title() {
        let f = NamedFilter::NoTitle;
        assert!(f.matches(&Record::default()));
        assert!(f.matches(&with("Title", "")));
        assert!(!f.matches(&with("Title", "X")));
        assert!(!f.matches(&with("Title", " ")));
    }

    #[test]
    fn test_no_group() {
        let f = NamedFilter::NoGroup;
        assert!(f.matches(&with("Title", "X")));
        assert!(f.matches(&with("Group name", "")));
        assert!(!f.matches(&with("Group name", "Rangers")));
    }

    #[test]
    fn test_multiple_categories() {
        let f = NamedFilter::MultipleCategories;
        assert!(!f.matches(&Record::default()));
        assert!(!f.matches(&with("Category", "")));
        assert!(!f.matches(&with("Category", "a")));
        assert!(f.matches(&with("Category", "a,b")));
        assert!(f.matches(&with("Category", ",")));
    }

    #[test]
    fn test_display_uses_cli_name() {
        assert_eq!(NamedFilter::NoTitle.to_string(), "no-title");
    }
}

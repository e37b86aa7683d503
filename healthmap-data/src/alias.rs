//! Static aliases reconciling boundary-dataset names with dataset names.
//!
//! Every known divergence is listed explicitly: historical names,
//! ampersand spellings and diacritic variants. Nothing is inferred.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

/// Merged union territory name used by current datasets.
const DADRA_DAMAN_DIU: &str = "dadra and nagar haveli and daman and diu";

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // Renamed states and territories.
    ("orissa", "odisha"),
    ("uttaranchal", "uttarakhand"),
    ("pondicherry", "puducherry"),
    ("nct of delhi", "delhi"),
    ("national capital territory of delhi", "delhi"),
    ("jammu & kashmir", "jammu and kashmir"),
    ("andaman & nicobar island", "andaman and nicobar islands"),
    ("andaman & nicobar islands", "andaman and nicobar islands"),
    ("andaman and nicobar", "andaman and nicobar islands"),
    ("arunanchal pradesh", "arunachal pradesh"),
    // Territories merged in 2020.
    ("dadara & nagar havelli", DADRA_DAMAN_DIU),
    ("dadra & nagar haveli", DADRA_DAMAN_DIU),
    ("dadra and nagar haveli", DADRA_DAMAN_DIU),
    ("daman & diu", DADRA_DAMAN_DIU),
    ("daman and diu", DADRA_DAMAN_DIU),
    ("dadra & nagar haveli and daman & diu", DADRA_DAMAN_DIU),
    // Diacritic spellings.
    ("tamil nādu", "tamil nadu"),
    ("mahārāshtra", "maharashtra"),
    ("odishā", "odisha"),
    ("telangāna", "telangana"),
    ("gujarāt", "gujarat"),
    ("punjāb", "punjab"),
];

static BUILTIN: LazyLock<AliasTable> =
    LazyLock::new(|| AliasTable::from_pairs(BUILTIN_ALIASES.iter().copied()));

/// Errors raised while loading an alias table from JSON.
#[derive(Debug, Error)]
pub enum AliasTableError {
    /// The document was not a JSON object of strings.
    #[error("failed to parse alias table: {source}")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// An alias or canonical name was blank.
    #[error("alias entry '{alias}' has an empty name")]
    EmptyEntry {
        /// The offending alias key.
        alias: String,
    },
}

/// Mapping from a lowercased external name to a lowercased canonical name.
///
/// # Examples
/// ```
/// use healthmap_data::AliasTable;
///
/// let aliases = AliasTable::builtin();
/// assert_eq!(aliases.canonical("Orissa"), Some("odisha"));
/// assert_eq!(aliases.canonical("Kerala"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Return the table shipped with the dataset.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a table from `(alias, canonical)` pairs, lowercasing both.
    ///
    /// A later pair for the same alias replaces an earlier one.
    pub fn from_pairs<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(alias, canonical)| (normalise(alias.as_ref()), normalise(canonical.as_ref())))
            .collect();
        Self { entries }
    }

    /// Parse a JSON object of `{"alias": "canonical"}` entries.
    ///
    /// # Errors
    /// Returns [`AliasTableError::Parse`] for malformed JSON and
    /// [`AliasTableError::EmptyEntry`] for blank names.
    ///
    /// # Examples
    /// ```
    /// use healthmap_data::AliasTable;
    ///
    /// let table = AliasTable::from_json(r#"{"Bombay State": "Maharashtra"}"#)?;
    /// assert_eq!(table.canonical("bombay state"), Some("maharashtra"));
    /// # Ok::<(), healthmap_data::AliasTableError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AliasTableError> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).map_err(|source| AliasTableError::Parse { source })?;
        if let Some((alias, _)) = raw
            .iter()
            .find(|(alias, canonical)| alias.trim().is_empty() || canonical.trim().is_empty())
        {
            return Err(AliasTableError::EmptyEntry {
                alias: alias.clone(),
            });
        }
        Ok(Self::from_pairs(raw))
    }

    /// Look up the canonical name for `name`, case-insensitively.
    #[must_use]
    pub fn canonical(&self, name: &str) -> Option<&str> {
        self.entries.get(&normalise(name)).map(String::as_str)
    }

    /// Number of aliases in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the table has no aliases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(alias, canonical)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }
}

/// Trim and lowercase a name for lookup.
pub(crate) fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Orissa", "odisha")]
    #[case("UTTARANCHAL", "uttarakhand")]
    #[case("Jammu & Kashmir", "jammu and kashmir")]
    #[case("Andaman & Nicobar Island", "andaman and nicobar islands")]
    #[case("Dadara & Nagar Havelli", DADRA_DAMAN_DIU)]
    #[case("Daman & Diu", DADRA_DAMAN_DIU)]
    #[case("Tamil Nādu", "tamil nadu")]
    #[case("  NCT of Delhi ", "delhi")]
    fn builtin_covers_known_variants(#[case] alias: &str, #[case] canonical: &str) {
        assert_eq!(AliasTable::builtin().canonical(alias), Some(canonical));
    }

    #[rstest]
    fn canonical_names_are_not_aliases() {
        let table = AliasTable::builtin();
        for (_, canonical) in table.iter() {
            assert!(table.canonical(canonical).is_none(), "{canonical} loops");
        }
    }

    #[rstest]
    fn json_rejects_blank_entries() {
        let err = AliasTable::from_json(r#"{"Orissa": "  "}"#).unwrap_err();
        assert!(matches!(err, AliasTableError::EmptyEntry { alias } if alias == "Orissa"));
    }

    #[rstest]
    fn json_rejects_non_string_values() {
        let err = AliasTable::from_json(r#"{"Orissa": 1}"#).unwrap_err();
        assert!(matches!(err, AliasTableError::Parse { .. }));
    }

    #[rstest]
    fn pairs_are_lowercased() {
        let table = AliasTable::from_pairs([("Madras State", "Tamil Nadu")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.canonical("MADRAS STATE"), Some("tamil nadu"));
    }
}

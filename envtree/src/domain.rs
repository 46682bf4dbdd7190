//! The case-insensitive prefix that selects one registry's variables.

use std::fmt;

use uncased::UncasedStr;

use crate::{EnvTreeError, EnvTreeResult};

/// Immutable, case-insensitive prefix identifying the environment variables
/// that belong to one configuration instance.
///
/// The domain is normalised by trimming surrounding whitespace and trailing
/// underscores and lower-casing the remainder, so `"MyApp_"` and `"myapp"`
/// describe the same variables (`MYAPP_*`).
///
/// # Examples
///
/// ```
/// use envtree::Domain;
///
/// let domain = Domain::new("MyApp_")?;
/// assert_eq!(domain.as_str(), "myapp");
/// assert_eq!(domain.env_prefix(), "MYAPP_");
/// assert!(domain.matches("myapp_db_host"));
/// assert!(!domain.matches("MYAPP"));
/// # Ok::<_, envtree::EnvTreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    lower: String,
    env_prefix: String,
}

impl Domain {
    /// Normalise `raw` into a domain.
    ///
    /// # Errors
    ///
    /// Returns [`EnvTreeError::InvalidDomain`] when nothing remains after
    /// trimming whitespace and trailing underscores.
    pub fn new(raw: &str) -> EnvTreeResult<Self> {
        let lower = raw.trim().trim_end_matches('_').to_lowercase();
        if lower.is_empty() {
            return Err(EnvTreeError::InvalidDomain {
                domain: raw.to_owned(),
            });
        }
        let env_prefix = format!("{}_", lower.to_uppercase());
        Ok(Self { lower, env_prefix })
    }

    /// Lower-case form of the domain.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.lower
    }

    /// Upper-case key prefix including the trailing separator, e.g. `MYAPP_`.
    #[must_use]
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Whether `key` names a variable under this domain.
    ///
    /// A key equal to the bare domain, or to the domain followed only by the
    /// separator, does not match.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.strip(key).is_some()
    }

    /// Whether `key` is the bare domain or names a variable under it.
    pub(crate) fn owns(&self, key: &str) -> bool {
        self.matches(key) || UncasedStr::new(key) == UncasedStr::new(&self.lower)
    }

    /// Remove the domain prefix from `key`, comparing case-insensitively.
    pub(crate) fn strip<'k>(&self, key: &'k str) -> Option<&'k str> {
        let head = key.get(..self.env_prefix.len())?;
        if UncasedStr::new(head) != UncasedStr::new(&self.env_prefix) {
            return None;
        }
        key.get(self.env_prefix.len()..).filter(|rest| !rest.is_empty())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lower)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Domain;
    use crate::EnvTreeError;

    #[rstest]
    #[case("myapp", "myapp")]
    #[case("MYAPP", "myapp")]
    #[case(" MyApp__ ", "myapp")]
    fn normalises_input(#[case] raw: &str, #[case] expected: &str) {
        let domain = Domain::new(raw).expect("valid domain");
        assert_eq!(domain.as_str(), expected);
        assert_eq!(domain.env_prefix(), "MYAPP_");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("__")]
    fn rejects_empty_domains(#[case] raw: &str) {
        let err = Domain::new(raw).expect_err("empty domain must fail");
        assert!(matches!(err, EnvTreeError::InvalidDomain { .. }));
    }

    #[test]
    fn owns_bare_domain_and_prefixed_keys() {
        let domain = Domain::new("myapp").expect("valid domain");
        assert!(domain.owns("MYAPP"));
        assert!(domain.owns("myapp_x"));
        assert!(!domain.owns("MYAPP_"));
        assert!(!domain.owns("MYAPPX"));
    }

    #[rstest]
    #[case("MYAPP_DB", Some("DB"))]
    #[case("myapp_db_1_user", Some("db_1_user"))]
    #[case("MyApp_Db", Some("Db"))]
    #[case("MYAPP", None)]
    #[case("MYAPP_", None)]
    #[case("MYAPPX_DB", None)]
    #[case("OTHER_DB", None)]
    #[case("MY", None)]
    fn strips_prefix_case_insensitively(#[case] key: &str, #[case] expected: Option<&str>) {
        let domain = Domain::new("myapp").expect("valid domain");
        assert_eq!(domain.strip(key), expected);
    }
}

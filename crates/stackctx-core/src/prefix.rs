//! Deployment prefix derivation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How project name and stage combine into a prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingPolicy {
    /// `{name}{stage}`
    #[default]
    NameAndStage,
    /// `{name}-{stage}`
    NameHyphenStage,
    /// `{name}`
    NameOnly,
}

impl NamingPolicy {
    /// Derive the prefix. Inputs are used verbatim; no trimming or case
    /// folding is applied.
    ///
    /// ```
    /// use stackctx_core::NamingPolicy;
    ///
    /// assert_eq!(NamingPolicy::NameAndStage.resolve("acme", "prod"), "acmeprod");
    /// assert_eq!(NamingPolicy::NameHyphenStage.resolve("acme", "prod"), "acme-prod");
    /// assert_eq!(NamingPolicy::NameOnly.resolve("acme", "prod"), "acme");
    /// ```
    pub fn resolve(&self, name: &str, stage: &str) -> String {
        match self {
            Self::NameAndStage => format!("{name}{stage}"),
            Self::NameHyphenStage => format!("{name}-{stage}"),
            Self::NameOnly => name.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NameAndStage => "name-and-stage",
            Self::NameHyphenStage => "name-hyphen-stage",
            Self::NameOnly => "name-only",
        }
    }
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name-and-stage" => Ok(Self::NameAndStage),
            "name-hyphen-stage" => Ok(Self::NameHyphenStage),
            "name-only" => Ok(Self::NameOnly),
            other => Err(format!(
                "unknown naming policy '{other}' (expected name-and-stage, name-hyphen-stage or name-only)"
            )),
        }
    }
}

/// Derive the prefix for `name` and `stage` under `policy`.
pub fn resolve_prefix(name: &str, stage: &str, policy: NamingPolicy) -> String {
    policy.resolve(name, stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NamingPolicy::NameAndStage, "acmeprod")]
    #[case(NamingPolicy::NameHyphenStage, "acme-prod")]
    #[case(NamingPolicy::NameOnly, "acme")]
    fn resolves_each_policy(#[case] policy: NamingPolicy, #[case] expected: &str) {
        assert_eq!(resolve_prefix("acme", "prod", policy), expected);
    }

    #[test]
    fn default_is_name_and_stage() {
        assert_eq!(NamingPolicy::default(), NamingPolicy::NameAndStage);
    }

    #[test]
    fn no_normalization_is_applied() {
        assert_eq!(
            NamingPolicy::NameHyphenStage.resolve("Acme ", "Dev"),
            "Acme -Dev"
        );
    }

    #[test]
    fn parses_from_display_form() {
        for policy in [
            NamingPolicy::NameAndStage,
            NamingPolicy::NameHyphenStage,
            NamingPolicy::NameOnly,
        ] {
            assert_eq!(policy.to_string().parse::<NamingPolicy>(), Ok(policy));
        }
        assert!("name_stage".parse::<NamingPolicy>().is_err());
    }
}

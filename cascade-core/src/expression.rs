//! Profile targeting expressions.
//!
//! An expression is one or more profile tokens joined by `AND`. A token may
//! be negated with a `not:` prefix, and the `*` token matches any profile set.
//!
//! ```text
//! msie6 AND not:css-enabled
//! ```

use crate::{error::ConfigError, profile::ProfileSet, weights::SpecificityWeights};
use std::{fmt, str::FromStr};

/// The token that matches every profile set.
pub const WILDCARD_TOKEN: &str = "*";

const NEGATION_PREFIX: &str = "not:";
const AND_KEYWORD: &str = "AND";

/// A single (possibly negated) profile token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionToken {
    profile: String,
    negated: bool,
}

impl ExpressionToken {
    /// A token matching sets that contain `profile`.
    pub fn positive(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            negated: false,
        }
    }

    /// A token matching sets that do not contain `profile`.
    pub fn negated(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
            negated: true,
        }
    }

    /// The profile named by this token.
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Is the token prefixed with `not:`.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Is the token the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.profile == WILDCARD_TOKEN
    }

    /// Does the token hold for `profile_set`.
    pub fn is_match(&self, profile_set: &ProfileSet) -> bool {
        if self.is_wildcard() {
            true
        } else if self.negated {
            !profile_set.is_member(&self.profile)
        } else {
            profile_set.is_member(&self.profile)
        }
    }

    /// Score of this token against `profile_set`. Zero when it does not apply.
    pub fn specificity(&self, profile_set: &ProfileSet, weights: &SpecificityWeights) -> f64 {
        if self.negated {
            if self.is_wildcard() || profile_set.is_member(&self.profile) {
                0.0
            } else {
                weights.negated_token
            }
        } else if profile_set.is_base_profile(&self.profile) {
            weights.base_profile
        } else if let Some(profile) = profile_set.get_profile(&self.profile) {
            weights.sub_profile_score(profile.quality())
        } else if self.is_wildcard() {
            weights.wildcard_token
        } else {
            0.0
        }
    }
}

impl fmt::Display for ExpressionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str(NEGATION_PREFIX)?;
        }
        f.write_str(&self.profile)
    }
}

/// A conjunction of profile tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTargetingExpression {
    tokens: Vec<ExpressionToken>,
}

impl ProfileTargetingExpression {
    /// Build an expression from already-parsed tokens.
    pub fn new(tokens: Vec<ExpressionToken>) -> Result<Self, ConfigError> {
        if tokens.is_empty() || tokens.iter().any(|t| t.profile.trim().is_empty()) {
            return Err(ConfigError::InvalidExpression(
                tokens.iter().map(ToString::to_string).collect::<Vec<_>>().join(" AND "),
            ));
        }
        Ok(Self { tokens })
    }

    /// The tokens of this expression, in source order.
    pub fn tokens(&self) -> &[ExpressionToken] {
        &self.tokens
    }

    /// Does every token hold for `profile_set`.
    pub fn is_match(&self, profile_set: &ProfileSet) -> bool {
        self.tokens.iter().all(|token| token.is_match(profile_set))
    }

    /// Sum of the token scores, or zero when the expression does not match.
    pub fn specificity(&self, profile_set: &ProfileSet, weights: &SpecificityWeights) -> f64 {
        if !self.is_match(profile_set) {
            return 0.0;
        }
        self.tokens
            .iter()
            .map(|token| token.specificity(profile_set, weights))
            .sum()
    }
}

impl FromStr for ProfileTargetingExpression {
    type Err = ConfigError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidExpression(expression.to_owned());
        let mut tokens = Vec::new();
        let mut expect_token = true;

        for word in expression.split_whitespace() {
            if expect_token {
                if word == AND_KEYWORD {
                    return Err(invalid());
                }
                let token = match word.strip_prefix(NEGATION_PREFIX) {
                    Some("") => return Err(invalid()),
                    Some(profile) => ExpressionToken::negated(profile),
                    None => ExpressionToken::positive(word),
                };
                tokens.push(token);
            } else if word != AND_KEYWORD {
                return Err(invalid());
            }
            expect_token = !expect_token;
        }

        // An expression must end on a token, not a dangling AND.
        if tokens.is_empty() || expect_token {
            return Err(invalid());
        }
        Ok(Self { tokens })
    }
}

impl fmt::Display for ProfileTargetingExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

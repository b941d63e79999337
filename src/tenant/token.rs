//! Identity token carried in the `user_cookie` cookie: `{user_type}_{staff_id}_{branch_id}`.
//!
//! The token is plain text with no signature or expiry; it is trusted only because the login
//! endpoint set it. Parsing is purely syntactic. Whether `user_type` means anything is for the
//! feature services to decide.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cookie holding the identity token.
pub const COOKIE_NAME: &str = "user_cookie";

/// Separator between token components.
pub const DELIMITER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("identity token has fewer than 3 components")]
    MalformedToken,

    #[error("'{0}' cannot be encoded into an identity token")]
    InvalidComponent(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityToken {
    pub user_type: String,
    pub staff_id: String,
    pub branch_id: String,
}

impl IdentityToken {
    /// Build a token for encoding. Components must be non-empty and free of the delimiter,
    /// otherwise the encoded form would not parse back to the same fields.
    pub fn new(
        user_type: impl Into<String>,
        staff_id: impl Into<String>,
        branch_id: impl Into<String>,
    ) -> Result<Self, TokenError> {
        let token = Self {
            user_type: user_type.into(),
            staff_id: staff_id.into(),
            branch_id: branch_id.into(),
        };
        for component in [&token.user_type, &token.staff_id, &token.branch_id] {
            if component.is_empty() || component.contains(DELIMITER) {
                return Err(TokenError::InvalidComponent(component.clone()));
            }
        }
        Ok(token)
    }

    /// Split on `_`; components 0, 1 and 2 become user type, staff id and branch id. Anything
    /// after the third component is ignored.
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        let mut parts = raw.split(DELIMITER);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user_type), Some(staff_id), Some(branch_id)) => Ok(Self {
                user_type: user_type.to_string(),
                staff_id: staff_id.to_string(),
                branch_id: branch_id.to_string(),
            }),
            _ => Err(TokenError::MalformedToken),
        }
    }
}

impl FromStr for IdentityToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.user_type,
            self.staff_id,
            self.branch_id,
            d = DELIMITER
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_components() {
        let token = IdentityToken::parse("normal_H123abc_C001").unwrap();
        assert_eq!(token.user_type, "normal");
        assert_eq!(token.staff_id, "H123abc");
        assert_eq!(token.branch_id, "C001");
    }

    #[test]
    fn ignores_components_after_the_third() {
        let token: IdentityToken = "sys_H1_C002_extra_more".parse().unwrap();
        assert_eq!(token.branch_id, "C002");
    }

    #[test]
    fn rejects_fewer_than_three_components() {
        for raw in ["", "normal", "normal_H123abc", "_"] {
            assert_eq!(IdentityToken::parse(raw), Err(TokenError::MalformedToken), "{raw:?}");
        }
    }

    #[test]
    fn empty_components_are_syntactically_valid() {
        let token = IdentityToken::parse("__").unwrap();
        assert_eq!(token.user_type, "");
        assert_eq!(token.branch_id, "");
    }

    #[test]
    fn encoded_token_parses_back() {
        let token = IdentityToken::new("supersys", "root", "C001").unwrap();
        assert_eq!(token.to_string(), "supersys_root_C001");
        assert_eq!(IdentityToken::parse(&token.to_string()).unwrap(), token);
    }

    #[test]
    fn refuses_components_containing_the_delimiter() {
        assert_eq!(
            IdentityToken::new("normal", "H_1", "C001"),
            Err(TokenError::InvalidComponent("H_1".to_string()))
        );
        assert!(IdentityToken::new("normal", "H1", "").is_err());
    }
}

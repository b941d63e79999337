use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Login credential of one staff member. The hash never leaves the server.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Authority {
    pub id: i64,
    pub authority_id: String,
    pub staff_id: String,
    #[serde(skip_serializing)]
    pub user_password: String,
    pub user_type: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordEdit {
    pub staff_id: String,
    pub password: String,
}

/// Account classes stored in `authority.user_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Supersys,
    Sys,
    Normal,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Supersys => "supersys",
            UserType::Sys => "sys",
            UserType::Normal => "normal",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "supersys" => Some(UserType::Supersys),
            "sys" => Some(UserType::Sys),
            "normal" => Some(UserType::Normal),
            _ => None,
        }
    }

    /// Readable name for a stored user type; anything unrecognised is "Unknown".
    pub fn display_name(raw: &str) -> &'static str {
        match Self::parse(raw) {
            Some(UserType::Supersys) => "Super administrator",
            Some(UserType::Sys) => "System administrator",
            Some(UserType::Normal) => "Staff",
            None => "Unknown",
        }
    }
}

/// Permission document for one (user type, module) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthorityDetail {
    pub id: i64,
    pub user_type: String,
    pub model: String,
    pub name: String,
    pub authority_content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityDetailCreate {
    pub user_type: String,
    pub model: String,
    #[serde(default)]
    pub name: String,
    pub authority_content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityDetailEdit {
    pub id: i64,
    pub name: Option<String>,
    pub authority_content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityDetailQuery {
    pub user_type: String,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_type_names() {
        assert_eq!(UserType::display_name("supersys"), "Super administrator");
        assert_eq!(UserType::display_name("sys"), "System administrator");
        assert_eq!(UserType::display_name("normal"), "Staff");
        assert_eq!(UserType::display_name("Normal"), "Unknown");
        assert_eq!(UserType::parse(UserType::Sys.as_str()), Some(UserType::Sys));
    }
}

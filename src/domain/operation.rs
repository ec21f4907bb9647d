//! Remote operations and their endpoint and fallback message table.

use std::fmt;

use crate::domain::entities::HttpMethod;

/// Every call the client can make against the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /auth/login`.
    Login,
    /// `POST /auth/register`.
    Register,
    /// `GET /auth/profile`.
    GetProfile,
    /// `PUT /auth/profile`.
    UpdateProfile,
    /// `POST /code/generate`.
    GenerateCode,
    /// `POST /code/sql`.
    GenerateSql,
    /// `POST /debug/debug`.
    DebugCode,
    /// `POST /debug/explain`.
    ExplainCode,
}

impl Operation {
    /// Returns the HTTP verb.
    #[must_use]
    pub const fn method(self) -> HttpMethod {
        match self {
            Self::GetProfile => HttpMethod::Get,
            Self::UpdateProfile => HttpMethod::Put,
            Self::Login
            | Self::Register
            | Self::GenerateCode
            | Self::GenerateSql
            | Self::DebugCode
            | Self::ExplainCode => HttpMethod::Post,
        }
    }

    /// Path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
            Self::GetProfile | Self::UpdateProfile => "/auth/profile",
            Self::GenerateCode => "/code/generate",
            Self::GenerateSql => "/code/sql",
            Self::DebugCode => "/debug/debug",
            Self::ExplainCode => "/debug/explain",
        }
    }

    /// Message shown when the service gives no usable error text.
    #[must_use]
    pub const fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => "Failed to log in",
            Self::Register => "Failed to register",
            Self::GetProfile => "Failed to load profile",
            Self::UpdateProfile => "Failed to update profile",
            Self::GenerateCode => "Failed to generate code",
            Self::GenerateSql => "Failed to generate SQL",
            Self::DebugCode => "Failed to debug code",
            Self::ExplainCode => "Failed to explain code",
        }
    }

    /// Returns the name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::GetProfile => "get_profile",
            Self::UpdateProfile => "update_profile",
            Self::GenerateCode => "generate_code",
            Self::GenerateSql => "generate_sql",
            Self::DebugCode => "debug_code",
            Self::ExplainCode => "explain_code",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Operation::GenerateCode, "Failed to generate code" ; "generate")]
    #[test_case(Operation::DebugCode, "Failed to debug code" ; "debug")]
    #[test_case(Operation::ExplainCode, "Failed to explain code" ; "explain")]
    #[test_case(Operation::GenerateSql, "Failed to generate SQL" ; "sql")]
    fn test_fallback_messages(operation: Operation, expected: &str) {
        assert_eq!(operation.fallback_message(), expected);
    }

    #[test_case(Operation::Login, HttpMethod::Post, "/auth/login" ; "login")]
    #[test_case(Operation::Register, HttpMethod::Post, "/auth/register" ; "register")]
    #[test_case(Operation::GetProfile, HttpMethod::Get, "/auth/profile" ; "get_profile")]
    #[test_case(Operation::UpdateProfile, HttpMethod::Put, "/auth/profile" ; "update_profile")]
    #[test_case(Operation::GenerateCode, HttpMethod::Post, "/code/generate" ; "generate")]
    #[test_case(Operation::DebugCode, HttpMethod::Post, "/debug/debug" ; "debug")]
    #[test_case(Operation::ExplainCode, HttpMethod::Post, "/debug/explain" ; "explain")]
    fn test_endpoints(operation: Operation, method: HttpMethod, path: &str) {
        assert_eq!(operation.method(), method);
        assert_eq!(operation.path(), path);
    }
}

use thiserror::Error;

/// Why an API call was rejected. The `Display` output is the short
/// diagnostic stored alongside a rejected action
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("No token")]
    NoToken,
    #[error("Server error")]
    Status(u16),
    #[error("Network error")]
    Network(String),
    #[error("Invalid response")]
    Decode(String),
    #[error("{0}")]
    Invalid(String),
}

impl ApiError {
    /// 401s are handled by the client redirecting to the login view,
    /// nobody should notify about them again
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ApiError::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Network(value.to_string())
        }
    }
}

pub(crate) trait ResultExt {
    type Output;
    /// Log the failure together with the name of the call
    fn api_error(self, call: &'static str) -> Result<Self::Output, ApiError>;
}

impl<T, E: Into<ApiError> + std::fmt::Debug> ResultExt for Result<T, E> {
    type Output = T;
    fn api_error(self, call: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| {
            log::error!("API Error: {call} {e:?}");
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_are_short() {
        assert_eq!(ApiError::Status(500).to_string(), "Server error");
        assert_eq!(ApiError::NoToken.to_string(), "No token");
        assert_eq!(
            ApiError::Network("connection refused".to_string()).to_string(),
            "Network error"
        );
        assert_eq!(ApiError::Invalid("Too short".to_string()).to_string(), "Too short");
    }

    #[test]
    fn unauthorized_is_a_401() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }
}

use thiserror::Error;

/// Failures talking to the enterprise directory provider.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{operation} failed: {errmsg} (errcode {errcode})")]
    Provider {
        operation: &'static str,
        errcode: i64,
        errmsg: String,
    },

    #[error("{operation} response is missing {field}")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

// Provider errcodes for an invalid or expired access token
const INVALID_ACCESS_TOKEN: i64 = 40014;
const EXPIRED_ACCESS_TOKEN: i64 = 42001;

impl DirectoryError {
    /// Turn a provider reply's `errcode`/`errmsg` pair into a result.
    pub fn check(operation: &'static str, errcode: i64, errmsg: &str) -> Result<(), Self> {
        if errcode == 0 {
            Ok(())
        } else {
            Err(DirectoryError::Provider {
                operation,
                errcode,
                errmsg: errmsg.to_string(),
            })
        }
    }

    /// Whether the provider refused the access token itself.
    pub fn is_token_rejected(&self) -> bool {
        matches!(
            self,
            DirectoryError::Provider { errcode, .. }
                if *errcode == INVALID_ACCESS_TOKEN || *errcode == EXPIRED_ACCESS_TOKEN
        )
    }
}

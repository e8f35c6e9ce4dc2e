use crate::Chips;
use thiserror::Error;

/// Failure variant returned by a table or tournament canister.
///
/// Canister calls answer with a two-variant result; this is the `Err`
/// half, decoded as-is from the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TableError {
    #[error("table not found")]
    TableNotFound,
    #[error("tournament not found")]
    TournamentNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("table is full")]
    TableFull,
    #[error("user already in game")]
    UserAlreadyInGame,
    #[error("invalid bet: {0}")]
    InvalidBet(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("canister call failed: {0}")]
    CanisterCallFailed(String),
}

/// Problems with what the user typed or clicked. These are shown inline
/// next to the offending control and never reach the canister.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("you are not seated at this table")]
    NotSeated,
    #[error("wait for your turn")]
    NotYourTurn,
    #[error("{0} is not available right now")]
    Unavailable(String),
    #[error("raise must be at least {0}")]
    RaiseTooSmall(Chips),
    #[error("raise cannot exceed {0}")]
    RaiseTooLarge(Chips),
    #[error("amount must be greater than zero")]
    ZeroAmount,
    #[error("amount exceeds available balance of {0}")]
    ExceedsBalance(Chips),
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message longer than {0} characters")]
    MessageTooLong(usize),
    #[error("another request is still pending")]
    Pending,
}

/// Everything a client-side operation can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The only failure allowed to escape a view; the route shows its
    /// own error page.
    #[error("table not found")]
    TableNotFound,
    #[error(transparent)]
    Remote(TableError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("unsupported environment: {0}")]
    Environment(String),
}

impl From<TableError> for ClientError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::TableNotFound => Self::TableNotFound,
            e => Self::Remote(e),
        }
    }
}

impl ClientError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TableNotFound)
    }
}

/// Optional piece of the environment, such as an interactive terminal or
/// browser storage. A missing one switches its feature off instead of
/// failing the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Enabled,
    Disabled,
}

impl Capability {
    pub fn probe<T>(name: &str, result: Result<T, ClientError>) -> (Self, Option<T>) {
        match result {
            Ok(value) => (Self::Enabled, Some(value)),
            Err(e) => {
                log::debug!("[capability] {} disabled: {}", name, e);
                (Self::Disabled, None)
            }
        }
    }
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifts_missing_table() {
        assert!(ClientError::from(TableError::TableNotFound).is_fatal());
        assert!(!ClientError::from(TableError::NotYourTurn).is_fatal());
        assert!(!ClientError::from(InputError::ZeroAmount).is_fatal());
    }

    #[test]
    fn missing_environment_disables() {
        let (capability, value) = Capability::probe::<u8>(
            "storage",
            Err(ClientError::Environment(String::from("no window"))),
        );
        assert!(!capability.is_enabled());
        assert_eq!(value, None);
        assert_eq!(Capability::probe("storage", Ok(1)), (Capability::Enabled, Some(1)));
    }

    #[test]
    fn decodes_tagged_failure() {
        let json = r#"{"Err":{"InvalidBet":"below minimum"}}"#;
        let reply = serde_json::from_str::<Result<u64, TableError>>(json).unwrap();
        assert_eq!(reply, Err(TableError::InvalidBet("below minimum".into())));
        let json = r#"{"Ok":7}"#;
        let reply = serde_json::from_str::<Result<u64, TableError>>(json).unwrap();
        assert_eq!(reply, Ok(7));
    }
}

//! Errors raised by the wallet, selection and draw rules.
//!
//! None of these are fatal: the session controller turns every variant into a
//! transient notice and leaves state exactly as it was before the call.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("amount must be a positive whole number")]
    InvalidAmount,

    #[error("registration required before recharging")]
    RegistrationRequired,

    #[error("name, phone and email are all required")]
    IncompleteRegistration,

    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("a draw is already in progress")]
    DrawInProgress,

    #[error("nothing selected")]
    EmptySelection,

    #[error("cell {index} is outside the {total}-cell grid")]
    CellOutOfRange { index: usize, total: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

impl GameError {
    /// Text shown to the player in the notice toast.
    pub fn notice_text(&self) -> String {
        match self {
            Self::InvalidAmount => "Please enter a valid amount".to_string(),
            Self::RegistrationRequired => "Please register to recharge".to_string(),
            Self::IncompleteRegistration => "Please fill in all registration fields".to_string(),
            Self::InsufficientFunds { required, .. } => {
                format!("Insufficient balance, ¥{required} required")
            }
            Self::DrawInProgress => "A draw is already running".to_string(),
            Self::EmptySelection => "Select at least one cell".to_string(),
            other => other.to_string(),
        }
    }
}

use crate::domain::{Amount, TransactionKind};

/// One incoming ledger request, addressed by the caller's email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Register { email: String },
    Move {
        email: String,
        kind: TransactionKind,
        amount: Amount,
    },
}

impl core::fmt::Display for Request {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Request::Register { email } => write!(f, "register,account={}", email),
            Request::Move {
                email,
                kind,
                amount,
            } => write!(f, "{},account={},amount={}", kind, email, amount),
        }
    }
}

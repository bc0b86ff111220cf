//! # Notices
//!
//! User-facing messages the cart emits when an operation does not go through.
//! The texts are the storefront's (pt-BR) and are part of the UI contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// The three mutating cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Remove => write!(f, "remove"),
            Operation::UpdateAmount => write!(f, "update_amount"),
        }
    }
}

/// A message surfaced to the user on the notification sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Notice {
    /// Requested quantity exceeds stock.
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's quantity failed.
    UpdateFailed,
}

impl Notice {
    /// The generic failure notice for an operation.
    pub const fn failure(op: Operation) -> Self {
        match op {
            Operation::Add => Notice::AddFailed,
            Operation::Remove => Notice::RemoveFailed,
            Operation::UpdateAmount => Notice::UpdateFailed,
        }
    }

    /// Text shown to the user.
    pub const fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "Quantidade solicitada fora de estoque",
            Notice::AddFailed => "Erro na adição do produto",
            Notice::RemoveFailed => "Erro na remoção do produto",
            Notice::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_per_operation() {
        assert_eq!(Notice::failure(Operation::Add), Notice::AddFailed);
        assert_eq!(Notice::failure(Operation::Remove), Notice::RemoveFailed);
        assert_eq!(
            Notice::failure(Operation::UpdateAmount),
            Notice::UpdateFailed
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Notice::OutOfStock.to_string(),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(Notice::AddFailed.message(), "Erro na adição do produto");
        assert_eq!(Notice::RemoveFailed.message(), "Erro na remoção do produto");
        assert_eq!(
            Notice::UpdateFailed.message(),
            "Erro na alteração de quantidade do produto"
        );
    }
}

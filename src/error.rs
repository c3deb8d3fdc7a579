//! Errors reported by checked constructors and by the Buchberger engine.

use thiserror::Error;

use crate::types::MAX_VARS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A variable index outside `1..=max`.
    #[error("variable x{var} is out of range 1..={max}")]
    VariableOutOfRange { var: u32, max: u32 },

    /// The engine was asked for more variables than a monomial can hold.
    #[error("{0} variables requested, at most {MAX_VARS} are supported")]
    TooManyVariables(u32),
}

pub type Result<T> = std::result::Result<T, Error>;

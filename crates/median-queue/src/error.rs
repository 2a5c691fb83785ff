use thiserror::Error;

/// Errors raised by the median structures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedianError {
    #[error("The structure holds no logical elements for this operation")]
    EmptyStructure,
}

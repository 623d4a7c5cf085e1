use thiserror::Error;

/// Degenerate geometry detected while building math objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    #[error("transformation matrix is not invertible")]
    SingularMatrix,
}

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("zero denominator")]
    ZeroDenominator,

    #[error("invalid rational literal {token:?}")]
    InvalidNumber { token: String },

    #[error("singular basis")]
    SingularBasis,

    #[error("no feasible point")]
    Infeasible,

    #[error("artificial row remained basic after phase one")]
    DegenerateInfeasibility,

    #[error("generator row {row} must lead with 0 or a positive vertex scale")]
    BadGeneratorRow { row: usize },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

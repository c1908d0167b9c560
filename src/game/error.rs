use super::pieces::Color;

/// Reasons a FEN string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("missing FEN field: {0}")]
    MissingField(&'static str),

    #[error("expected at most 6 FEN fields, found {0}")]
    TooManyFields(usize),

    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),

    #[error("rank {0} describes more than 8 squares")]
    RankOverflow(usize),

    #[error("rank {0} describes fewer than 8 squares")]
    RankUnderflow(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling letter '{0}'")]
    InvalidCastling(char),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("{0:?} must have exactly one king")]
    MissingKing(Color),
}

/// Reasons a move string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("move '{0}' must be 4 or 5 characters long")]
    InvalidLength(String),

    #[error("invalid square in move '{0}'")]
    InvalidSquare(String),

    #[error("no piece of the side to move on {0}")]
    EmptySource(String),

    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    #[error("move '{0}' is not legal in this position")]
    Illegal(String),
}

//! Error types for coordinate math and catalog lookups

/// Errors raised by the hex coordinate library
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("attributes 'q', 'r', 's' must have a sum of 0, not {sum}")]
    InvalidCoordinate { sum: i64 },

    #[error(transparent)]
    InvalidOperand(#[from] OperandError),

    #[error("argument 'angle' must be in 60 degree increments, not {angle}")]
    InvalidAngle { angle: i32 },

    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },
}

/// Malformed right-hand operands for cube arithmetic
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperandError {
    #[error("sequence must have length 3, not {len}")]
    WrongLength { len: usize },

    #[error("mapping must contain keys 'q', 'r', 's', not {}", quote_keys(.found))]
    WrongKeys { found: Vec<String> },

    #[error("unsupported operand type(s) for {op}: '{left}' and '{right}'")]
    IncompatibleType {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("integer division or modulo by zero")]
    DivisionByZero,
}

fn quote_keys(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while building or querying the tile catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("tile number must be between 1 and 91, number is {0}")]
    UnknownTileNumber(u16),

    #[error("invalid tile code: {0:?}")]
    InvalidTileCode(String),

    #[error("tile not found: {0}")]
    TileNotFound(String),

    #[error("faction has no home system: {0}")]
    NoHomeSystem(String),

    #[error("unknown faction: {0:?}")]
    UnknownFaction(String),

    #[error("board index out of range: {0}")]
    UnknownIndex(usize),

    #[error("map not found: {players} players, style {style:?}")]
    MapNotFound { players: u8, style: String },

    #[error("{factions} factions requested but the map has {slots} home slots")]
    TooManyFactions { factions: usize, slots: usize },

    #[error(transparent)]
    Hex(#[from] HexError),
}

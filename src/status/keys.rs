//! Status keys the engine itself interprets.
//!
//! Game data may use any other key; those are stored and ticked but carry
//! no built-in behavior.

/// Damage absorption, consumed before health.
pub const GUARD: &str = "guard";

/// Flat bonus added to every outgoing hit.
pub const STRENGTH: &str = "strength";

/// Incoming damage is multiplied while active.
pub const VULNERABLE: &str = "vulnerable";

/// Reduces the player's energy gain at turn start.
pub const DRAIN: &str = "drain";

/// Base key for elemental freeze variants (`freeze_water`, ...).
pub const FREEZE: &str = "freeze";

/// Cards played this turn; cleared at the holder's turn start.
pub const CARDS_PLAYED: &str = "cards_played";

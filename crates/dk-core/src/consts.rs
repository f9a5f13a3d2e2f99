//! Game-wide tuning constants

/// Maximum Chebyshev radius searched for a free landing cell.
pub const MAX_LANDING_RADIUS: i32 = 10;

/// Throne summons skip members already within this distance (and in view).
pub const THRONE_SUMMON_DIST: u32 = 3;

/// Distance assumed when two positions are on different levels.
/// Always beyond [`THRONE_SUMMON_DIST`], so off-level members get recalled.
pub const UNKNOWN_DIST: u32 = 4;

/// Turns a creature stays restrained after being tied up.
pub const TIE_UP_TURNS: u64 = 100;

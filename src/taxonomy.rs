//! The provider's numeric type-code taxonomy.
//!
//! Standing details and team statistics are keyed by opaque numeric codes.
//! The mapping is injected into every derivation instead of being inlined as
//! magic numbers, so a taxonomy revision upstream is a data change here, not
//! a code change. Unknown codes in payloads are ignored everywhere.

/// Per-view codes for the standard table statistics.
#[derive(Debug, Clone, Copy)]
pub struct ViewCodes {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct Taxonomy {
    pub overall: ViewCodes,
    pub home: ViewCodes,
    pub away: ViewCodes,
    /// Team corner totals (flat number or venue split).
    pub corners: u32,
    /// Goals-by-period table, keyed by `0-15` .. `75-90`.
    pub scoring_minutes: u32,
    /// Conceding-by-period table, same bucket keys.
    pub conceding_minutes: u32,
    /// Market id of the three-way full-time result market.
    pub market_three_way: u64,
    /// Market id of the both-teams-to-score (yes/no) market.
    pub market_btts: u64,
    /// Market id of the goals over/under market.
    pub market_over_under: u64,
}

impl Default for Taxonomy {
    /// Snapshot of the provider's v3 taxonomy.
    fn default() -> Self {
        Taxonomy {
            overall: ViewCodes {
                played: 129,
                won: 130,
                drawn: 131,
                lost: 132,
                goals_for: 133,
                goals_against: 134,
                points: 187,
            },
            home: ViewCodes {
                played: 135,
                won: 136,
                drawn: 137,
                lost: 138,
                goals_for: 139,
                goals_against: 140,
                points: 185,
            },
            away: ViewCodes {
                played: 141,
                won: 142,
                drawn: 143,
                lost: 144,
                goals_for: 145,
                goals_against: 146,
                points: 186,
            },
            corners: 34,
            scoring_minutes: 196,
            conceding_minutes: 213,
            market_three_way: 1,
            market_btts: 14,
            market_over_under: 12,
        }
    }
}

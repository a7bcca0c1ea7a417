//! Standings.
//!
//! Players are ordered by score (descending), then display name (ascending),
//! then ID. The ID key only matters for two players sharing a name and a
//! score, and makes the order total.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Player, PlayerId, Score, WinLossRecord};
use crate::registry::PlayerRegistry;

/// Canonical standings comparator.
pub fn standing_order(a: &Player, b: &Player) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Rank players. Pure; the input is not mutated.
pub fn rank<'a, I>(players: I) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut ranked: Vec<&Player> = players.into_iter().collect();
    ranked.sort_by(|a, b| standing_order(a, b));
    ranked
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub score: Score,
    pub record: WinLossRecord,
}

/// Current leaderboard rows for a registry.
pub fn standings(registry: &PlayerRegistry) -> Vec<Standing> {
    rank(registry.iter())
        .into_iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: i as u32 + 1,
            player_id: p.id.clone(),
            name: p.name.clone(),
            score: p.score,
            record: p.record,
        })
        .collect()
}

/// Text report, one `"1. Name - 3 points"` line per player.
pub fn format_leaderboard(rows: &[Standing]) -> String {
    let mut report = String::new();
    for row in rows {
        report.push_str(&format!("{}. {} - {} points\n", row.rank, row.name, row.score));
    }
    report
}

//! Authored content tables: enemy archetypes, wave schedule, upgrade
//! catalog, and synergy pairs.

pub mod synergies;
pub mod upgrades;
pub mod waves;

//! Loyalty grade classification for Dog Universe clients.

pub mod engine;

pub use dog_universe_core::loyalty::{is_upgrade, ClientLoyaltyFacts, GradeSuggestion, Locale, LoyaltyTier};
pub use engine::{clamp_revenue, label, LoyaltyEngine};

//! Loyalty grade domain types for boarding and taxi clients.
//!
//! - Four-grade ladder: Bronze → Silver → Gold → Platinum
//! - Grades are earned from completed stays, or from lifetime revenue for Platinum
//! - Grade labels are localized for French (default) and English

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DogUniverseError;

// ─── Grade Ladder ───────────────────────────────────────────────────────────

/// Loyalty grade, ordered by customer-value rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoyaltyTier {
    /// Default grade for every client.
    Bronze,
    /// 4 completed stays.
    Silver,
    /// 10 completed stays.
    Gold,
    /// 20 completed stays, or lifetime revenue above the configured threshold.
    Platinum,
}

impl LoyaltyTier {
    pub const ALL: [LoyaltyTier; 4] = [
        LoyaltyTier::Bronze,
        LoyaltyTier::Silver,
        LoyaltyTier::Gold,
        LoyaltyTier::Platinum,
    ];

    pub fn rank(&self) -> u8 {
        match self {
            LoyaltyTier::Bronze => 1,
            LoyaltyTier::Silver => 2,
            LoyaltyTier::Gold => 3,
            LoyaltyTier::Platinum => 4,
        }
    }

    /// Completed stays required to reach this grade on stays alone.
    pub fn min_stays(&self) -> u32 {
        match self {
            LoyaltyTier::Bronze => 0,
            LoyaltyTier::Silver => 4,
            LoyaltyTier::Gold => 10,
            LoyaltyTier::Platinum => 20,
        }
    }

    pub fn next(&self) -> Option<LoyaltyTier> {
        match self {
            LoyaltyTier::Bronze => Some(LoyaltyTier::Silver),
            LoyaltyTier::Silver => Some(LoyaltyTier::Gold),
            LoyaltyTier::Gold => Some(LoyaltyTier::Platinum),
            LoyaltyTier::Platinum => None,
        }
    }

    /// Stored grade code, as used in the clients table.
    pub fn code(&self) -> &'static str {
        match self {
            LoyaltyTier::Bronze => "BRONZE",
            LoyaltyTier::Silver => "SILVER",
            LoyaltyTier::Gold => "GOLD",
            LoyaltyTier::Platinum => "PLATINUM",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Fr, LoyaltyTier::Bronze) => "Bronze",
            (Locale::Fr, LoyaltyTier::Silver) => "Argent",
            (Locale::Fr, LoyaltyTier::Gold) => "Or",
            (Locale::Fr, LoyaltyTier::Platinum) => "Platine",
            (Locale::En, LoyaltyTier::Bronze) => "Bronze",
            (Locale::En, LoyaltyTier::Silver) => "Silver",
            (Locale::En, LoyaltyTier::Gold) => "Gold",
            (Locale::En, LoyaltyTier::Platinum) => "Platinum",
        }
    }
}

impl Default for LoyaltyTier {
    fn default() -> Self {
        LoyaltyTier::Bronze
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LoyaltyTier {
    type Err = DogUniverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoyaltyTier::ALL
            .into_iter()
            .find(|tier| tier.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DogUniverseError::Validation(format!("unknown loyalty grade: {s:?}")))
    }
}

/// True iff `new` ranks strictly above `old`.
pub fn is_upgrade(old: LoyaltyTier, new: LoyaltyTier) -> bool {
    new.rank() > old.rank()
}

// ─── Locale ─────────────────────────────────────────────────────────────────

/// Display language for grade labels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Strict parse of a language tag (`fr`, `EN`, `en-GB`, `fr_FR`).
    pub fn parse(tag: &str) -> Option<Locale> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("fr") {
            Some(Locale::Fr)
        } else if primary.eq_ignore_ascii_case("en") {
            Some(Locale::En)
        } else {
            None
        }
    }

    /// Lenient parse: anything unrecognized selects the default locale.
    pub fn from_tag(tag: &str) -> Locale {
        Locale::parse(tag).unwrap_or_default()
    }
}

// ─── Classifier Input / Output ──────────────────────────────────────────────

/// Aggregated history for one client, as produced by the stays/invoices query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientLoyaltyFacts {
    #[serde(default)]
    pub client_id: Option<String>,
    /// Completed stays counted toward loyalty.
    pub stay_count: u32,
    /// Cumulative amount billed, in the base currency unit.
    pub lifetime_revenue: f64,
    /// Grade currently stored for the client, possibly set manually.
    #[serde(default)]
    pub current_tier: Option<LoyaltyTier>,
}

impl ClientLoyaltyFacts {
    pub fn new(stay_count: u32, lifetime_revenue: f64) -> Self {
        Self {
            stay_count,
            lifetime_revenue,
            ..Default::default()
        }
    }
}

/// Advisory grade for a client. Whether to store it is the caller's decision.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GradeSuggestion {
    pub client_id: Option<String>,
    pub suggested: LoyaltyTier,
    pub current: Option<LoyaltyTier>,
    pub is_upgrade: bool,
    pub label: String,
    /// Next grade reachable by stays, if any.
    pub next_tier: Option<LoyaltyTier>,
    pub stays_to_next: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_table() {
        let ranks: Vec<u8> = LoyaltyTier::ALL.iter().map(|t| t.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert!(LoyaltyTier::Bronze < LoyaltyTier::Platinum);
    }

    #[test]
    fn test_is_upgrade() {
        assert!(is_upgrade(LoyaltyTier::Bronze, LoyaltyTier::Gold));
        assert!(!is_upgrade(LoyaltyTier::Gold, LoyaltyTier::Silver));
        assert!(!is_upgrade(LoyaltyTier::Gold, LoyaltyTier::Gold));
    }

    #[test]
    fn test_labels() {
        assert_eq!(LoyaltyTier::Silver.label(Locale::Fr), "Argent");
        assert_eq!(LoyaltyTier::Silver.label(Locale::En), "Silver");
        assert_eq!(LoyaltyTier::Platinum.label(Locale::Fr), "Platine");
    }

    #[test]
    fn test_locale_fallback() {
        assert_eq!(Locale::from_tag("en-GB"), Locale::En);
        assert_eq!(Locale::from_tag("FR_fr"), Locale::Fr);
        assert_eq!(Locale::from_tag("de"), Locale::Fr);
        assert_eq!(Locale::from_tag(""), Locale::Fr);
        assert_eq!(Locale::parse("es"), None);
    }

    #[test]
    fn test_tier_code_roundtrip() {
        for tier in LoyaltyTier::ALL {
            assert_eq!(tier.to_string().parse::<LoyaltyTier>().unwrap(), tier);
        }
        assert_eq!("gold".parse::<LoyaltyTier>().unwrap(), LoyaltyTier::Gold);
        assert!("diamond".parse::<LoyaltyTier>().is_err());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&LoyaltyTier::Platinum).unwrap();
        assert_eq!(json, "\"PLATINUM\"");

        let facts: ClientLoyaltyFacts =
            serde_json::from_str(r#"{"stay_count": 3, "lifetime_revenue": 120.5, "current_tier": "SILVER"}"#)
                .unwrap();
        assert_eq!(facts.stay_count, 3);
        assert_eq!(facts.current_tier, Some(LoyaltyTier::Silver));
        assert_eq!(facts.client_id, None);
    }

    #[test]
    fn test_next_tier() {
        assert_eq!(LoyaltyTier::Bronze.next(), Some(LoyaltyTier::Silver));
        assert_eq!(LoyaltyTier::Platinum.next(), None);
    }
}

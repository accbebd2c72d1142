//! Loyalty grade engine: classifies clients from stay count and lifetime
//! revenue, detects upgrades, and reports progress toward the next grade.

use dog_universe_core::config::LoyaltyConfig;
use dog_universe_core::error::DogUniverseResult;
use dog_universe_core::loyalty::*;
use tracing::{debug, info};

/// Loyalty grade engine — stateless computation over client history facts.
#[derive(Debug, Clone)]
pub struct LoyaltyEngine {
    config: LoyaltyConfig,
}

impl LoyaltyEngine {
    /// Rejects a non-finite or negative revenue threshold and an unknown
    /// default locale.
    pub fn new(config: &LoyaltyConfig) -> DogUniverseResult<Self> {
        config.validate()?;
        info!(
            platinum_revenue = config.platinum_revenue_threshold,
            locale = %config.default_locale,
            "Loyalty engine initialized"
        );
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Grade earned by a stay count and lifetime revenue. First match wins:
    /// Platinum on 20 stays or the revenue threshold, then Gold, Silver, Bronze.
    pub fn classify(&self, stay_count: u32, lifetime_revenue: f64) -> LoyaltyTier {
        let revenue = clamp_revenue(lifetime_revenue);

        let tier = if stay_count >= LoyaltyTier::Platinum.min_stays()
            || revenue >= self.config.platinum_revenue_threshold
        {
            LoyaltyTier::Platinum
        } else if stay_count >= LoyaltyTier::Gold.min_stays() {
            LoyaltyTier::Gold
        } else if stay_count >= LoyaltyTier::Silver.min_stays() {
            LoyaltyTier::Silver
        } else {
            LoyaltyTier::Bronze
        };

        metrics::counter!("loyalty.grades_classified").increment(1);
        debug!(stay_count, revenue, tier = %tier, "Grade classified");
        tier
    }

    pub fn classify_facts(&self, facts: &ClientLoyaltyFacts) -> LoyaltyTier {
        self.classify(facts.stay_count, facts.lifetime_revenue)
    }

    /// Next grade reachable on stays alone and the stays still missing.
    /// `None` once the stay count alone earns Platinum.
    pub fn stays_to_next_tier(&self, stay_count: u32) -> Option<(LoyaltyTier, u32)> {
        let reached = LoyaltyTier::ALL
            .into_iter()
            .rev()
            .find(|tier| stay_count >= tier.min_stays())
            .unwrap_or_default();
        let next = reached.next()?;
        Some((next, next.min_stays() - stay_count))
    }

    /// Advisory grade for one client, compared with the grade already on file.
    /// A client without a stored grade is compared as Bronze.
    pub fn suggest(&self, facts: &ClientLoyaltyFacts, locale: Locale) -> GradeSuggestion {
        let suggested = self.classify_facts(facts);
        let upgrade = is_upgrade(facts.current_tier.unwrap_or_default(), suggested);

        let progress = if suggested == LoyaltyTier::Platinum {
            None
        } else {
            self.stays_to_next_tier(facts.stay_count)
        };

        if upgrade {
            metrics::counter!("loyalty.grade_upgrades").increment(1);
            info!(
                client_id = facts.client_id.as_deref().unwrap_or("-"),
                old = ?facts.current_tier,
                new = %suggested,
                "Grade upgrade suggested"
            );
        }

        GradeSuggestion {
            client_id: facts.client_id.clone(),
            suggested,
            current: facts.current_tier,
            is_upgrade: upgrade,
            label: suggested.label(locale).to_string(),
            next_tier: progress.map(|(tier, _)| tier),
            stays_to_next: progress.map(|(_, remaining)| remaining),
        }
    }

    pub fn suggest_batch(&self, clients: &[ClientLoyaltyFacts], locale: Locale) -> Vec<GradeSuggestion> {
        let suggestions: Vec<GradeSuggestion> =
            clients.iter().map(|facts| self.suggest(facts, locale)).collect();

        let upgrades = suggestions.iter().filter(|s| s.is_upgrade).count();
        info!(clients = clients.len(), upgrades, "Batch grades suggested");
        suggestions
    }

    /// Label in the engine's configured default locale.
    pub fn default_label(&self, tier: LoyaltyTier) -> &'static str {
        tier.label(self.config.locale())
    }

    pub fn config(&self) -> &LoyaltyConfig {
        &self.config
    }
}

/// Negative and NaN revenue count as zero.
pub fn clamp_revenue(revenue: f64) -> f64 {
    if revenue.is_nan() || revenue < 0.0 {
        debug!(revenue, "Out-of-range revenue clamped to zero");
        0.0
    } else {
        revenue
    }
}

/// Display label for a grade; unrecognized language tags get French.
pub fn label(tier: LoyaltyTier, language_tag: &str) -> &'static str {
    tier.label(Locale::from_tag(language_tag))
}

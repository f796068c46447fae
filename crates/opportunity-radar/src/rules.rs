//! Signal Rules
//!
//! Each rule inspects one sector aggregate and fires at most one signal.

use event_core::math::round_half_up;
use event_core::{Sector, SentimentLabel};
use sector_analytics::SectorAggregate;

use crate::models::{Signal, SignalKind, SignalSource};

/// Hard ceiling for any signal confidence
pub const MAX_CONFIDENCE: u8 = 99;

pub const ML_ALERT_MIN_SAMPLES: usize = 3;
pub const ML_ALERT_MIN_PROBABILITY: f64 = 0.65;

pub const MOMENTUM_MIN_EVENTS: usize = 3;
pub const MOMENTUM_MIN_SHARE: f64 = 0.70;
pub const MOMENTUM_ML_BOOST: u32 = 10;
pub const MOMENTUM_BOOST_MIN_PROBABILITY: f64 = 0.5;

pub const CONTRARIAN_MIN_EVENTS: usize = 4;
pub const CONTRARIAN_MIN_BEARISH_SHARE: f64 = 0.80;
/// ML probability below this confirms the selloff is overdone
pub const CONTRARIAN_MAX_PROBABILITY: f64 = 0.35;
pub const CONTRARIAN_CONFIRMED_CONFIDENCE: u8 = 78;
pub const CONTRARIAN_BASE_CONFIDENCE: u8 = 65;

pub const CLUSTER_MIN_HIGH_EVENTS: usize = 3;
pub const CLUSTER_BASE_CONFIDENCE: f64 = 50.0;
pub const CLUSTER_RATIO_WEIGHT: f64 = 40.0;
pub const CLUSTER_ML_BONUS: u32 = 8;
pub const CLUSTER_BONUS_MIN_ML_HIGH: usize = 2;
pub const CLUSTER_MAX_CONFIDENCE: u32 = 95;

pub const SOCIAL_MIN_EVENTS: usize = 3;
pub const SOCIAL_CONFIDENCE: u8 = 60;

/// A single opportunity rule evaluated per sector
pub trait SignalRule: Send + Sync {
    fn kind(&self) -> SignalKind;

    fn evaluate(&self, sector: Sector, aggregate: &SectorAggregate) -> Option<Signal>;
}

fn percentage(share: f64) -> u32 {
    round_half_up(share * 100.0) as u32
}

fn capped(value: u32, cap: u32) -> u8 {
    value.min(cap).min(MAX_CONFIDENCE as u32) as u8
}

/// Sector whose events carry a consistently high ML impact probability
pub struct MlAlertRule;

impl SignalRule for MlAlertRule {
    fn kind(&self) -> SignalKind {
        SignalKind::MlAlert
    }

    fn evaluate(&self, sector: Sector, agg: &SectorAggregate) -> Option<Signal> {
        let avg = agg.avg_probability();
        if agg.ml_sample_count < ML_ALERT_MIN_SAMPLES || avg < ML_ALERT_MIN_PROBABILITY {
            return None;
        }

        let pct = percentage(avg);
        Some(Signal {
            kind: self.kind(),
            sector,
            direction: None,
            confidence: capped(pct, MAX_CONFIDENCE as u32),
            event_count: agg.ml_sample_count,
            source: SignalSource::Ml,
            title: format!("ML Impact Alert: {}", sector),
            description: format!(
                "{} events average {}% predicted impact probability.",
                agg.ml_sample_count, pct
            ),
            action: format!("Prioritize {} headlines. Model expects market-moving news.", sector),
        })
    }
}

/// Strong one-sided sentiment consensus
pub struct MomentumRule {
    direction: SentimentLabel,
}

impl MomentumRule {
    pub fn bullish() -> Self {
        Self {
            direction: SentimentLabel::Bullish,
        }
    }

    pub fn bearish() -> Self {
        Self {
            direction: SentimentLabel::Bearish,
        }
    }
}

impl SignalRule for MomentumRule {
    fn kind(&self) -> SignalKind {
        SignalKind::Momentum
    }

    fn evaluate(&self, sector: Sector, agg: &SectorAggregate) -> Option<Signal> {
        if agg.total < MOMENTUM_MIN_EVENTS {
            return None;
        }

        let share = match self.direction {
            SentimentLabel::Bearish => agg.bearish_ratio(),
            _ => agg.bullish_ratio(),
        };
        if share < MOMENTUM_MIN_SHARE {
            return None;
        }

        let pct = percentage(share);
        let boosted = agg.avg_probability() >= MOMENTUM_BOOST_MIN_PROBABILITY;
        let boost = if boosted { MOMENTUM_ML_BOOST } else { 0 };

        let (title, mut description, action) = match self.direction {
            SentimentLabel::Bearish => (
                format!("Bearish Momentum in {}", sector),
                format!("{}% of {} news are negative. Selling pressure.", pct, agg.total),
                format!("Review exposure in {}. Consider hedging.", sector),
            ),
            _ => (
                format!("Bullish Momentum in {}", sector),
                format!("{}% of {} news are positive. Strong bullish consensus.", pct, agg.total),
                format!("Monitor entry opportunities in {}. Confirm with volume.", sector),
            ),
        };
        if boosted {
            description.push_str(&format!(
                " ML impact probability averages {}%.",
                percentage(agg.avg_probability())
            ));
        }

        Some(Signal {
            kind: self.kind(),
            sector,
            direction: Some(self.direction),
            confidence: capped(pct + boost, MAX_CONFIDENCE as u32),
            event_count: agg.total,
            source: SignalSource::nlp(boosted),
            title,
            description,
            action,
        })
    }
}

/// Extreme pessimism that may mark a bottom
///
/// Only a sector with ML samples and a low average probability is confirmed
/// (78, `NLP+ML`). A sector with no samples stays at 65 with source `NLP`:
/// its average of 0 means "no predictions", not "low probability".
pub struct ContrarianRule;

impl SignalRule for ContrarianRule {
    fn kind(&self) -> SignalKind {
        SignalKind::Contrarian
    }

    fn evaluate(&self, sector: Sector, agg: &SectorAggregate) -> Option<Signal> {
        if agg.total < CONTRARIAN_MIN_EVENTS || agg.bearish_ratio() < CONTRARIAN_MIN_BEARISH_SHARE {
            return None;
        }

        let confirmed = agg.has_ml_samples() && agg.avg_probability() < CONTRARIAN_MAX_PROBABILITY;
        let pct = percentage(agg.bearish_ratio());

        let mut description = format!(
            "Extreme pessimism ({}%). Historically, sentiment this negative may signal a bottom.",
            pct
        );
        if confirmed {
            description.push_str(&format!(
                " Low ML impact probability ({}%) suggests the selloff may be overdone.",
                percentage(agg.avg_probability())
            ));
        }

        Some(Signal {
            kind: self.kind(),
            sector,
            direction: Some(SentimentLabel::Bearish),
            confidence: if confirmed {
                CONTRARIAN_CONFIRMED_CONFIDENCE
            } else {
                CONTRARIAN_BASE_CONFIDENCE
            },
            event_count: agg.total,
            source: SignalSource::nlp(confirmed),
            title: format!("Contrarian Opportunity: {}", sector),
            description,
            action: "Watch for reversals. Opportunity for contrarian investors.".to_string(),
        })
    }
}

/// Several high-impact events concentrated in one sector
pub struct HighImpactClusterRule;

impl SignalRule for HighImpactClusterRule {
    fn kind(&self) -> SignalKind {
        SignalKind::HighImpactCluster
    }

    fn evaluate(&self, sector: Sector, agg: &SectorAggregate) -> Option<Signal> {
        let combined = agg.ml_high_confidence_count.max(agg.high_impact_count);
        if combined < CLUSTER_MIN_HIGH_EVENTS || agg.total == 0 {
            return None;
        }

        let ratio = combined as f64 / agg.total as f64;
        let base = round_half_up(CLUSTER_BASE_CONFIDENCE + ratio * CLUSTER_RATIO_WEIGHT) as u32;
        let bonus_applied = agg.ml_high_confidence_count >= CLUSTER_BONUS_MIN_ML_HIGH;
        let bonus = if bonus_applied { CLUSTER_ML_BONUS } else { 0 };

        Some(Signal {
            kind: self.kind(),
            sector,
            direction: None,
            confidence: capped(base + bonus, CLUSTER_MAX_CONFIDENCE),
            event_count: combined,
            source: SignalSource::nlp(bonus_applied),
            title: format!("High-Impact Cluster: {}", sector),
            description: format!(
                "{} high-impact events detected. Possible market catalyst.",
                combined
            ),
            action: format!("Stay alert. Evaluate positions and stops in {}.", sector),
        })
    }
}

/// Retail chatter volume in the social sector
pub struct SocialBuzzRule;

impl SignalRule for SocialBuzzRule {
    fn kind(&self) -> SignalKind {
        SignalKind::SocialBuzz
    }

    fn evaluate(&self, sector: Sector, agg: &SectorAggregate) -> Option<Signal> {
        if sector != Sector::Social || agg.total < SOCIAL_MIN_EVENTS {
            return None;
        }

        let dominant = agg.dominant_sentiment();
        let mood = match dominant {
            SentimentLabel::Bullish => "bullish",
            SentimentLabel::Bearish => "bearish",
            SentimentLabel::Neutral => "mixed",
        };

        Some(Signal {
            kind: self.kind(),
            sector,
            direction: Some(dominant),
            confidence: SOCIAL_CONFIDENCE,
            event_count: agg.total,
            source: SignalSource::Nlp,
            title: "Social Buzz: Retail Active".to_string(),
            description: format!(
                "{} social media posts captured. Dominant sentiment: {}.",
                agg.total, mood
            ),
            action: "Compare social vs. institutional sentiment. Divergence = opportunity.".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(total: usize, bullish: usize, bearish: usize) -> SectorAggregate {
        SectorAggregate {
            total,
            bullish_count: bullish,
            bearish_count: bearish,
            neutral_count: total - bullish - bearish,
            ..Default::default()
        }
    }

    fn with_ml(mut agg: SectorAggregate, samples: usize, avg: f64, high: usize) -> SectorAggregate {
        agg.ml_sample_count = samples;
        agg.ml_probability_sum = avg * samples as f64;
        agg.ml_high_confidence_count = high;
        agg
    }

    #[test]
    fn test_momentum_bullish_without_ml() {
        let signal = MomentumRule::bullish()
            .evaluate(Sector::Crypto, &aggregate(10, 8, 0))
            .expect("momentum should fire");

        assert_eq!(signal.confidence, 80);
        assert_eq!(signal.source, SignalSource::Nlp);
        assert_eq!(signal.event_count, 10);
        assert_eq!(signal.direction, Some(SentimentLabel::Bullish));
    }

    #[test]
    fn test_momentum_boosted_by_ml() {
        let agg = with_ml(aggregate(10, 8, 0), 5, 0.7, 0);
        let signal = MomentumRule::bullish().evaluate(Sector::Crypto, &agg).unwrap();

        assert_eq!(signal.confidence, 90);
        assert_eq!(signal.source, SignalSource::NlpMl);
    }

    #[test]
    fn test_momentum_caps_at_99() {
        let agg = with_ml(aggregate(5, 5, 0), 5, 0.9, 0);
        let signal = MomentumRule::bullish().evaluate(Sector::Tech, &agg).unwrap();
        assert_eq!(signal.confidence, 99);

        let unboosted = MomentumRule::bullish().evaluate(Sector::Tech, &aggregate(5, 5, 0)).unwrap();
        assert_eq!(unboosted.confidence, 99);
    }

    #[test]
    fn test_momentum_thresholds() {
        // Too few events
        assert!(MomentumRule::bullish().evaluate(Sector::Tech, &aggregate(2, 2, 0)).is_none());
        // 7 of 10 is exactly 70%
        assert!(MomentumRule::bearish().evaluate(Sector::Tech, &aggregate(10, 0, 7)).is_some());
        assert!(MomentumRule::bearish().evaluate(Sector::Tech, &aggregate(10, 0, 6)).is_none());
    }

    #[test]
    fn test_contrarian_confirmed_by_low_probability() {
        let agg = with_ml(aggregate(5, 0, 4), 5, 0.2, 0);
        let signal = ContrarianRule.evaluate(Sector::Macro, &agg).unwrap();

        assert_eq!(signal.confidence, 78);
        assert_eq!(signal.source, SignalSource::NlpMl);
        assert_eq!(signal.event_count, 5);
    }

    #[test]
    fn test_contrarian_without_predictions_is_plain_nlp() {
        let signal = ContrarianRule.evaluate(Sector::Macro, &aggregate(5, 0, 4)).unwrap();
        assert_eq!(signal.confidence, 65);
        assert_eq!(signal.source, SignalSource::Nlp);
        assert!(!signal.description.contains("ML impact probability"));

        let high_prob = with_ml(aggregate(5, 0, 5), 3, 0.6, 0);
        assert_eq!(ContrarianRule.evaluate(Sector::Macro, &high_prob).unwrap().confidence, 65);
    }

    #[test]
    fn test_contrarian_needs_four_events() {
        assert!(ContrarianRule.evaluate(Sector::Macro, &aggregate(3, 0, 3)).is_none());
    }

    #[test]
    fn test_cluster_confidence() {
        let mut agg = aggregate(6, 0, 0);
        agg.high_impact_count = 3;
        let signal = HighImpactClusterRule.evaluate(Sector::Market, &agg).unwrap();
        // 50 + 0.5 * 40 = 70
        assert_eq!(signal.confidence, 70);
        assert_eq!(signal.source, SignalSource::Nlp);
        assert_eq!(signal.event_count, 3);
    }

    #[test]
    fn test_cluster_ml_bonus_and_cap() {
        let mut agg = with_ml(aggregate(4, 0, 0), 4, 0.8, 4);
        agg.high_impact_count = 1;
        let signal = HighImpactClusterRule.evaluate(Sector::Market, &agg).unwrap();
        // 50 + 1.0 * 40 + 8 = 98, capped at 95
        assert_eq!(signal.confidence, 95);
        assert_eq!(signal.event_count, 4);
        assert_eq!(signal.source, SignalSource::NlpMl);
    }

    #[test]
    fn test_ml_alert() {
        let agg = with_ml(aggregate(10, 0, 0), 5, 0.7, 0);
        let signal = MlAlertRule.evaluate(Sector::Crypto, &agg).unwrap();
        assert_eq!(signal.confidence, 70);
        assert_eq!(signal.source, SignalSource::Ml);
        assert_eq!(signal.event_count, 5);

        let too_few = with_ml(aggregate(10, 0, 0), 2, 0.9, 0);
        assert!(MlAlertRule.evaluate(Sector::Crypto, &too_few).is_none());
    }

    #[test]
    fn test_ml_alert_never_reaches_100() {
        let agg = with_ml(aggregate(3, 0, 0), 3, 1.0, 3);
        assert_eq!(MlAlertRule.evaluate(Sector::Tech, &agg).unwrap().confidence, 99);
    }

    #[test]
    fn test_social_buzz_only_for_social_sector() {
        let agg = aggregate(4, 1, 2);
        assert!(SocialBuzzRule.evaluate(Sector::Tech, &agg).is_none());

        let signal = SocialBuzzRule.evaluate(Sector::Social, &agg).unwrap();
        assert_eq!(signal.confidence, 60);
        assert_eq!(signal.direction, Some(SentimentLabel::Bearish));
        assert!(signal.description.contains("bearish"));
    }
}

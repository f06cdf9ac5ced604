//! Fixed-threshold decision classification.

use serde::{Deserialize, Serialize};
use valuation_core::DecisionColor;

/// Thresholds for the GREEN/ORANGE/RED verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecisionRule {
    /// Minimum margin of safety (percent) for GREEN.
    pub green_min_mos: f64,
    /// Margin of safety (percent) below which the verdict is RED.
    pub red_max_mos: f64,
    /// Maximum net-debt/EBITDA tolerated for GREEN.
    pub green_max_leverage: f64,
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self {
            green_min_mos: 20.0,
            red_max_mos: -10.0,
            green_max_leverage: 2.0,
        }
    }
}

/// Derive the investment verdict from normalized ratios.
///
/// RED when margin of safety is below the red cutoff or when ROIC fails to
/// beat WACC; value-destroying returns override an otherwise attractive
/// margin of safety. GREEN requires the margin-of-safety, return-spread,
/// and leverage conditions all at once. Everything else is ORANGE.
pub fn classify(
    margin_of_safety: f64,
    roic: f64,
    wacc: f64,
    net_debt_to_ebitda: f64,
    rule: &DecisionRule,
) -> DecisionColor {
    if margin_of_safety < rule.red_max_mos || roic <= wacc {
        return DecisionColor::Red;
    }
    if margin_of_safety >= rule.green_min_mos && net_debt_to_ebitda <= rule.green_max_leverage {
        return DecisionColor::Green;
    }
    DecisionColor::Orange
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(mos: f64, roic: f64, wacc: f64, leverage: f64) -> DecisionColor {
        classify(mos, roic, wacc, leverage, &DecisionRule::default())
    }

    #[test]
    fn all_conditions_met_is_green() {
        assert_eq!(verdict(25.0, 15.0, 9.0, 1.0), DecisionColor::Green);
        assert_eq!(verdict(20.0, 10.0, 9.0, 2.0), DecisionColor::Green);
    }

    #[test]
    fn value_destruction_overrides_margin_of_safety() {
        assert_eq!(verdict(25.0, 8.0, 9.0, 1.0), DecisionColor::Red);
        // Exactly ROIC == WACC is still value destruction.
        assert_eq!(verdict(25.0, 9.0, 9.0, 1.0), DecisionColor::Red);
    }

    #[test]
    fn deep_negative_margin_is_red() {
        assert_eq!(verdict(-15.0, 15.0, 9.0, 1.0), DecisionColor::Red);
        // -10 exactly sits in the residual band, not RED.
        assert_eq!(verdict(-10.0, 15.0, 9.0, 1.0), DecisionColor::Orange);
    }

    #[test]
    fn residual_band_is_orange() {
        assert_eq!(verdict(5.0, 15.0, 9.0, 1.0), DecisionColor::Orange);
        assert_eq!(verdict(19.99, 15.0, 9.0, 1.0), DecisionColor::Orange);
    }

    #[test]
    fn leverage_blocks_green() {
        assert_eq!(verdict(20.0, 12.0, 9.0, 3.0), DecisionColor::Orange);
    }

    #[test]
    fn custom_rule_thresholds() {
        let strict = DecisionRule {
            green_min_mos: 30.0,
            red_max_mos: 0.0,
            green_max_leverage: 1.0,
        };
        assert_eq!(classify(25.0, 15.0, 9.0, 0.5, &strict), DecisionColor::Orange);
        assert_eq!(classify(-5.0, 15.0, 9.0, 0.5, &strict), DecisionColor::Red);
    }
}

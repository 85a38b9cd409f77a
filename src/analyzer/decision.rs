use crate::model::{Decision, IndicatorSnapshot, Recommendation};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Threshold rule over the latest values. First match wins:
/// oversold in an uptrend above SMA50 invests, overbought or below SMA50
/// stays out, anything else holds.
pub fn decide(s: &IndicatorSnapshot) -> Recommendation {
    if s.rsi < RSI_OVERSOLD && s.sma50 > s.sma200 && s.close > s.sma50 {
        return Recommendation {
            decision: Decision::Invest,
            rationale: "RSI < 30, SMA50 > SMA200, Close > SMA50".to_string(),
        };
    }

    let mut held = Vec::new();
    if s.rsi > RSI_OVERBOUGHT {
        held.push("RSI > 70");
    }
    if s.close < s.sma50 {
        held.push("Close < SMA50");
    }
    if !held.is_empty() {
        return Recommendation {
            decision: Decision::DontInvest,
            rationale: held.join(", "),
        };
    }

    Recommendation {
        decision: Decision::Hold,
        rationale: "No clear signal".to_string(),
    }
}

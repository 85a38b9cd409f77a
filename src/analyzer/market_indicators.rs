/// Indicator series over close prices. Every series is aligned with its
/// input, `None` where the lookback window is not yet filled.
pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Wilder RSI. The first `period` positions are undefined; position
    /// `period` is seeded from the simple mean of the first `period` changes.
    pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        if period == 0 || closes.len() <= period {
            return out;
        }

        let mut gains = Vec::with_capacity(closes.len() - 1);
        let mut losses = Vec::with_capacity(closes.len() - 1);
        for w in closes.windows(2) {
            let delta = w[1] - w[0];
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }

        let n = period as f64;
        let mut avg_gain = gains[..period].iter().sum::<f64>() / n;
        let mut avg_loss = losses[..period].iter().sum::<f64>() / n;
        out[period] = Some(Self::rsi_from_averages(avg_gain, avg_loss));

        // change i moves close i into close i + 1
        for i in period..gains.len() {
            avg_gain = (avg_gain * (n - 1.0) + gains[i]) / n;
            avg_loss = (avg_loss * (n - 1.0) + losses[i]) / n;
            out[i + 1] = Some(Self::rsi_from_averages(avg_gain, avg_loss));
        }

        out
    }

    /// RSI from smoothed averages. No movement at all reads as neutral 50,
    /// gains without losses as 100.
    pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return if avg_gain == 0.0 { 50.0 } else { 100.0 };
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }

    /// Mean of the trailing `window` closes at each position.
    pub fn moving_average_series(data: &[f64], window_size: usize) -> Vec<Option<f64>> {
        let mut out = vec![None; data.len()];
        if window_size == 0 || data.len() < window_size {
            return out;
        }
        for (i, window) in data.windows(window_size).enumerate() {
            out[i + window_size - 1] = Some(window.iter().sum::<f64>() / window_size as f64);
        }
        out
    }
}

use crate::model::PriceBar;
use crate::parser::RawBar;
use tracing::debug;

/// Drops bars without a usable close, orders by date and keeps the last
/// bar for any repeated date.
pub fn normalize_all(raw: Vec<RawBar>) -> Vec<PriceBar> {
    let total = raw.len();
    let mut bars: Vec<PriceBar> = raw.into_iter().filter_map(normalize_bar).collect();
    let usable = bars.len();

    // stable, so equal dates keep delivery order
    bars.sort_by_key(|b| b.date);

    let mut out: Vec<PriceBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(prev) if prev.date == bar.date => *prev = bar,
            _ => out.push(bar),
        }
    }

    debug!(
        "Normalized {} raw bars: {} usable, {} after dedup",
        total,
        usable,
        out.len()
    );
    out
}

fn normalize_bar(raw: RawBar) -> Option<PriceBar> {
    let close = raw.close.filter(|c| c.is_finite())?;
    Some(PriceBar {
        date: raw.date,
        open: raw.open.filter(|v| v.is_finite()),
        high: raw.high.filter(|v| v.is_finite()),
        low: raw.low.filter(|v| v.is_finite()),
        close,
        volume: raw.volume,
    })
}

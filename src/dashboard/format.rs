use crate::dashboard::chart::ChartKind;

fn compact(scaled: f64, suffix: &str) -> String {
    if scaled >= 10.0 {
        format!("{:.0}{}", scaled, suffix)
    } else {
        let s = format!("{:.1}", scaled);
        format!("{}{}", s.strip_suffix(".0").unwrap_or(&s), suffix)
    }
}

/// Abbreviated USD volume: `1.2B`, `890M`, `12K`.
pub fn format_volume(volume: f64) -> String {
    let v = volume.abs();
    if v >= 1e9 {
        compact(v / 1e9, "B")
    } else if v >= 1e6 {
        compact(v / 1e6, "M")
    } else if v >= 1e3 {
        compact(v / 1e3, "K")
    } else {
        format!("{:.0}", v)
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Signed percentage with one decimal: `+5.2%`, `-2.1%`.
pub fn format_change(change_pct: f64) -> String {
    format!("{:+.1}%", change_pct)
}

/// Axis/tooltip label for a chart value.
pub fn format_value(kind: ChartKind, value: f64) -> String {
    match kind {
        ChartKind::Price => format_price(value),
        ChartKind::Volume | ChartKind::Liquidity => format!("${:.1}M", value / 1e6),
    }
}

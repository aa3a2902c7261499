use crate::analysis::{extremes, SwingPoint};
use crate::ui::chart::format_price;
use chrono::DateTime;
use chrono_tz::Tz;

/// Plain-text listing of the swing points followed by the extremes.
pub fn render_report(symbol: &str, interval: &str, points: &[SwingPoint], timezone: Tz) -> String {
    let mut lines = vec![format!("{} {} swing points:", symbol, interval)];

    if points.is_empty() {
        lines.push("  none".to_string());
    }
    lines.extend(points.iter().map(|point| {
        format!(
            "  {}  {}  {:>12}  (#{})",
            point.kind.label(),
            local_time(point.open_time, timezone),
            format_price(point.price),
            point.index
        )
    }));

    let (highest, lowest) = extremes(points);
    lines.push(format!("Highest High (HH): {}", describe(highest, timezone)));
    lines.push(format!("Lowest Low (LL): {}", describe(lowest, timezone)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe(point: Option<SwingPoint>, timezone: Tz) -> String {
    match point {
        Some(p) => format!(
            "{} at {}",
            format_price(p.price),
            local_time(p.open_time, timezone)
        ),
        None => "none".to_string(),
    }
}

fn local_time(millis: i64, timezone: Tz) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&timezone).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

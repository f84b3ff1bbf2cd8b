use chrono::{DateTime, Utc};

/// WCAG relative luminance of a `rrggbb` color, in `0.0..=1.0`.
pub fn relative_luminance(hex: &str) -> Option<f64> {
    let hex = hex.trim().trim_start_matches('#');
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };

    let channel = |i: usize| -> Option<f64> {
        let value = u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok()?;
        let c = f64::from(value) / 255.0;
        Some(if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        })
    };

    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some(0.2126 * r + 0.7152 * g + 0.0722 * b)
}

/// Text color that stays readable on a label with the given background.
pub fn label_text_color(hex: &str) -> &'static str {
    match relative_luminance(hex) {
        Some(l) if l < 0.5 => "#fff",
        _ => "#000",
    }
}

pub fn format_number(n: u32) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

pub fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - created).num_days().max(0);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };

    match days {
        0 => "today".to_string(),
        1..=29 => plural(days, "day"),
        30..=364 => plural(days / 30, "month"),
        _ => plural(days / 365, "year"),
    }
}

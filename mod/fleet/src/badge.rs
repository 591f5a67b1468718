//! Presentation-category mapping for status and severity labels.
//!
//! Total, case-insensitive functions: any label the UI has never heard of
//! maps to [`Tone::Neutral`] rather than failing.

/// Presentation tone for a badge or indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Green — healthy/positive.
    Success,
    /// Red — failure/expiry.
    Danger,
    /// Orange — needs attention.
    Warning,
    /// Yellow — mild attention.
    Caution,
    /// Blue — informational/in-flight.
    Info,
    /// Gray — unknown or uncategorized.
    Neutral,
}

/// Tone for an entity status label (device, installation, visit, contract).
pub fn status_tone(label: &str) -> Tone {
    match label.to_lowercase().as_str() {
        "online" | "active" | "completed" => Tone::Success,
        "offline" | "expired" | "cancelled" => Tone::Danger,
        "maintenance" | "expiring soon" | "in progress" => Tone::Warning,
        "installation" | "pending" | "scheduled" => Tone::Info,
        _ => Tone::Neutral,
    }
}

/// Tone for an alert severity label.
pub fn severity_tone(label: &str) -> Tone {
    match label.to_lowercase().as_str() {
        "critical" => Tone::Danger,
        "high" => Tone::Warning,
        "medium" => Tone::Caution,
        "low" => Tone::Info,
        _ => Tone::Neutral,
    }
}

/// Tone for a battery charge percentage.
pub fn battery_tone(level: u8) -> Tone {
    if level <= 20 {
        Tone::Danger
    } else if level <= 50 {
        Tone::Warning
    } else {
        Tone::Success
    }
}

/// Display glyph for an equipment category.
pub fn device_glyph(device_type: &str) -> &'static str {
    match device_type.to_lowercase().as_str() {
        "ventilator" => "🫁",
        "patient monitor" => "📊",
        "infusion pump" => "💉",
        "defibrillator" => "⚡",
        _ => "🏥",
    }
}

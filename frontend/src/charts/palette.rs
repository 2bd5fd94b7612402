pub const EXPENSE_BREAKDOWN: [&str; 5] = ["#a8d8ea", "#98ccdb", "#88bfd0", "#78b4c5", "#68a9ba"];

pub const CATEGORY_BARS: [&str; 8] = [
    "#a8d8ea", "#98ccdb", "#88bfd0", "#78b4c5", "#68a9ba", "#6a9fb0", "#5c8fa6", "#4e7f9c",
];

pub const INCOME_SOURCES: [&str; 5] = ["#b3e5fc", "#81d4fa", "#a8d8ea", "#98ccdb", "#88bfd0"];

pub const CATEGORY_TREND: [&str; 5] = ["#a8d8ea", "#98ccdb", "#88bfd0", "#78b4c5", "#68a9ba"];

pub const INCOME: &str = "#a8d8ea";
pub const INCOME_FILL: &str = "rgba(168, 216, 234, 0.1)";
pub const INCOME_AREA: &str = "rgba(168, 216, 234, 0.2)";
pub const EXPENSE: &str = "#f5a5a5";
pub const EXPENSE_FILL: &str = "rgba(245, 165, 165, 0.1)";
pub const EXPENSE_AREA: &str = "rgba(245, 165, 165, 0.2)";
pub const CUMULATIVE: &str = "#81d4fa";
pub const CUMULATIVE_FILL: &str = "rgba(129, 212, 250, 0.1)";
pub const SLICE_BORDER: &str = "#ffffff";

pub const GOAL_DONE: &str = "#81c784";
pub const GOAL_CLOSE: &str = "#a8d8ea";
pub const GOAL_HALFWAY: &str = "#ffd54f";
pub const GOAL_BEHIND: &str = "#ef5350";

/// First `count` colors of the palette. Slices past the palette end get no
/// explicit color and fall back to the chart library's default.
pub fn clipped(palette: &[&str], count: usize) -> Vec<String> {
    palette.iter().take(count).map(|c| c.to_string()).collect()
}

/// Color for the `index`-th series, wrapping around the palette.
pub fn wrapped(palette: &[&str], index: usize) -> String {
    palette[index % palette.len()].to_string()
}

/// Same color with a low-alpha hex suffix, for area fills.
pub fn translucent(hex: &str) -> String {
    format!("{}30", hex)
}

pub fn goal_band(progress: f64) -> &'static str {
    if progress >= 100.0 {
        GOAL_DONE
    } else if progress >= 75.0 {
        GOAL_CLOSE
    } else if progress >= 50.0 {
        GOAL_HALFWAY
    } else {
        GOAL_BEHIND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_stops_at_palette_end() {
        assert_eq!(clipped(&EXPENSE_BREAKDOWN, 3).len(), 3);
        assert_eq!(clipped(&EXPENSE_BREAKDOWN, 9).len(), 5);
    }

    #[test]
    fn wrapped_repeats_palette() {
        assert_eq!(wrapped(&CATEGORY_TREND, 6), CATEGORY_TREND[1]);
        assert_eq!(translucent("#a8d8ea"), "#a8d8ea30");
    }

    #[test]
    fn goal_bands() {
        assert_eq!(goal_band(100.0), GOAL_DONE);
        assert_eq!(goal_band(80.0), GOAL_CLOSE);
        assert_eq!(goal_band(50.0), GOAL_HALFWAY);
        assert_eq!(goal_band(10.0), GOAL_BEHIND);
    }
}

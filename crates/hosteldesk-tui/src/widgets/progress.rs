//! Percent bar rendering for the listing form completion indicator.

/// Render a percentage bar split into filled and empty portions.
///
/// Returns `(filled, empty)` strings of `█` and `░` characters that together
/// span `width` character positions. Caller applies styling per segment.
pub fn fmt_pct_bar(pct: u8, width: u16) -> (String, String) {
    let width = usize::from(width);
    let filled = (usize::from(pct.min(100)) * width + 50) / 100;
    let filled = filled.min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bar_fills_proportionally_and_rounds() {
        assert_eq!(fmt_pct_bar(0, 10), (String::new(), "░".repeat(10)));
        assert_eq!(fmt_pct_bar(100, 10), ("█".repeat(10), String::new()));
        assert_eq!(fmt_pct_bar(50, 10), ("█".repeat(5), "░".repeat(5)));
        // 33% of 10 rounds to 3
        assert_eq!(fmt_pct_bar(33, 10), ("█".repeat(3), "░".repeat(7)));
        // Over-range input clamps instead of overflowing the width
        assert_eq!(fmt_pct_bar(250, 4), ("█".repeat(4), String::new()));
    }
}

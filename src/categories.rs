//! Fixed category orderings and palettes for the two grouping dimensions.
//!
//! Each dimension is an ordered list of `(category, color)` pairs, so a category's position and
//! its color can never drift apart.

use serde::Serialize;

/// 24-bit color used by both the terminal widgets and the image export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Relative luminance in 0..=1 (sRGB weights), used to pick a readable text color.
    pub fn luminance(self) -> f64 {
        (0.2126 * self.0 as f64 + 0.7152 * self.1 as f64 + 0.0722 * self.2 as f64) / 255.0
    }
}

pub const EXECUTIVE_GREEN: Rgb = Rgb(0x1B, 0x5E, 0x20);
pub const BUSINESS_YELLOW: Rgb = Rgb(0xF9, 0xA8, 0x25);
pub const STRATEGIC_RED: Rgb = Rgb(0xB7, 0x1C, 0x1C);
pub const DEEP_ORANGE: Rgb = Rgb(0xE6, 0x51, 0x00);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub color: Rgb,
}

/// A categorical column with a fixed plotting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub column: &'static str,
    pub axis_label: &'static str,
    pub categories: &'static [Category],
}

impl Dimension {
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.label)
    }

    /// Position of `label` in the fixed order; `None` for categories that are never plotted.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.label == label)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub const VALUE_TIER: Dimension = Dimension {
    column: "value_tier",
    axis_label: "Value Tier (RFM-Based)",
    categories: &[
        Category {
            label: "High Value",
            color: EXECUTIVE_GREEN,
        },
        Category {
            label: "Mid Value",
            color: BUSINESS_YELLOW,
        },
        Category {
            label: "Low Value",
            color: STRATEGIC_RED,
        },
    ],
};

pub const SHIP_BUCKET: Dimension = Dimension {
    column: "ship_bucket",
    axis_label: "Shipping Reliability Bucket",
    categories: &[
        Category {
            label: "Critical",
            color: STRATEGIC_RED,
        },
        Category {
            label: "Unreliable",
            color: DEEP_ORANGE,
        },
        Category {
            label: "Minor Issues",
            color: BUSINESS_YELLOW,
        },
        Category {
            label: "Reliable",
            color: EXECUTIVE_GREEN,
        },
    ],
};

pub const MAIN_COUNTRY_COLUMN: &str = "main_country";
pub const MONETARY_SALES_COLUMN: &str = "monetary_sales";

/// YlGnBu sequential colormap stops (light yellow to dark blue).
const YLGNBU: [Rgb; 9] = [
    Rgb(0xFF, 0xFF, 0xD9),
    Rgb(0xED, 0xF8, 0xB1),
    Rgb(0xC7, 0xE9, 0xB4),
    Rgb(0x7F, 0xCD, 0xBB),
    Rgb(0x41, 0xB6, 0xC4),
    Rgb(0x1D, 0x91, 0xC0),
    Rgb(0x22, 0x5E, 0xA8),
    Rgb(0x25, 0x34, 0x94),
    Rgb(0x08, 0x1D, 0x58),
];

/// Color for an undefined (NaN) heatmap cell.
pub const UNDEFINED_CELL: Rgb = Rgb(0xEE, 0xEE, 0xEE);

/// Map `t` in 0..=1 onto the YlGnBu ramp by linear interpolation between stops.
pub fn ylgnbu(t: f64) -> Rgb {
    if !t.is_finite() {
        return UNDEFINED_CELL;
    }
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (YLGNBU.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(YLGNBU.len() - 1);
    let frac = scaled - lo as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (YLGNBU[lo], YLGNBU[hi]);
    Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_orders() {
        assert_eq!(
            VALUE_TIER.labels().collect::<Vec<_>>(),
            ["High Value", "Mid Value", "Low Value"]
        );
        assert_eq!(
            SHIP_BUCKET.labels().collect::<Vec<_>>(),
            ["Critical", "Unreliable", "Minor Issues", "Reliable"]
        );
        assert_eq!(SHIP_BUCKET.position("Minor Issues"), Some(2));
        assert_eq!(VALUE_TIER.position("Platinum"), None);
    }

    #[test]
    fn palettes_follow_categories() {
        assert_eq!(VALUE_TIER.categories[0].color.hex(), "#1B5E20");
        assert_eq!(VALUE_TIER.categories[2].color.hex(), "#B71C1C");
        assert_eq!(SHIP_BUCKET.categories[1].color.hex(), "#E65100");
        assert_eq!(SHIP_BUCKET.categories[3].color, EXECUTIVE_GREEN);
    }

    #[test]
    fn colormap_endpoints() {
        assert_eq!(ylgnbu(0.0), Rgb(0xFF, 0xFF, 0xD9));
        assert_eq!(ylgnbu(1.0), Rgb(0x08, 0x1D, 0x58));
        assert_eq!(ylgnbu(f64::NAN), UNDEFINED_CELL);
        assert!(ylgnbu(0.1).luminance() > ylgnbu(0.9).luminance());
    }
}

use plotters::style::RGBColor;

const DARK: [RGBColor; 7] = [
    RGBColor(238, 46, 47),
    RGBColor(0, 140, 72),
    RGBColor(24, 90, 169),
    RGBColor(244, 125, 35),
    RGBColor(102, 44, 145),
    RGBColor(162, 29, 33),
    RGBColor(180, 56, 148),
];

const SOFT: [RGBColor; 7] = [
    RGBColor(241, 90, 96),
    RGBColor(122, 195, 106),
    RGBColor(90, 155, 212),
    RGBColor(250, 167, 91),
    RGBColor(158, 103, 171),
    RGBColor(206, 112, 88),
    RGBColor(215, 127, 180),
];

/// Cycles through a fixed list of colors, one per series.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: &'static [RGBColor],
    next: usize,
}

impl Palette {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            colors: &DARK,
            next: 0,
        }
    }

    #[must_use]
    pub const fn soft() -> Self {
        Self {
            colors: &SOFT,
            next: 0,
        }
    }

    /// Next color, wrapping around at the end of the list.
    pub fn pick(&mut self) -> RGBColor {
        let color = self.colors.get(self.next).copied().unwrap_or(DARK[0]);
        self.next = self
            .next
            .saturating_add(1)
            .checked_rem(self.colors.len())
            .unwrap_or(0);
        color
    }
}

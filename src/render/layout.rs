use crate::{markdown::elements::Alignment, render::properties::WindowSize};

/// Computes the horizontal position of a line of text.
#[derive(Debug)]
pub(crate) struct Layout {
    alignment: Alignment,
    margin: u16,
}

impl Layout {
    pub(crate) fn new(alignment: Alignment, margin: u16) -> Self {
        Self { alignment, margin }
    }

    /// Get the column where a line of text of the given length starts.
    pub(crate) fn start_column(&self, dimensions: &WindowSize, text_length: u16) -> u16 {
        // Ignore the margin if it's larger than the screen: we can't satisfy it so we might as
        // well not do anything about it.
        let margin = if self.margin.saturating_mul(2) > dimensions.columns { 0 } else { self.margin };
        match self.alignment {
            Alignment::Left => margin,
            Alignment::Right => dimensions.columns.saturating_sub(margin).saturating_sub(text_length).max(margin),
            // Every line is centered on its own, regardless of any margins.
            Alignment::Center => dimensions.columns.saturating_sub(text_length) / 2,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::left_no_margin(Alignment::Left, 0, 10, 0)]
    #[case::left_some_margin(Alignment::Left, 5, 10, 5)]
    #[case::left_line_overflows(Alignment::Left, 5, 150, 5)]
    #[case::left_margin_too_large(Alignment::Left, 60, 10, 0)]
    #[case::right_no_margin(Alignment::Right, 0, 10, 90)]
    #[case::right_some_margin(Alignment::Right, 5, 10, 85)]
    #[case::right_line_overflows(Alignment::Right, 5, 150, 5)]
    #[case::right_margin_too_large(Alignment::Right, 60, 10, 90)]
    #[case::center_even(Alignment::Center, 0, 10, 45)]
    #[case::center_odd(Alignment::Center, 0, 11, 44)]
    #[case::center_ignores_margin(Alignment::Center, 20, 90, 5)]
    #[case::center_line_overflows(Alignment::Center, 0, 150, 0)]
    fn layout(#[case] alignment: Alignment, #[case] margin: u16, #[case] length: u16, #[case] expected: u16) {
        let dimensions = WindowSize { rows: 0, columns: 100 };
        let column = Layout::new(alignment, margin).start_column(&dimensions, length);
        assert_eq!(column, expected);
    }

    #[test]
    fn centered_title_line() {
        let dimensions = WindowSize { rows: 24, columns: 80 };
        let column = Layout::new(Alignment::Center, 2).start_column(&dimensions, 5);
        assert_eq!(column, 37);
    }
}

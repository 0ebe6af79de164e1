use plotly::color::{Rgb, Rgba};

/// An sRGB colour used by the chart theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColor(pub u8, pub u8, pub u8);

impl ChartColor {
    pub const MEDIUM_SEA_GREEN: ChartColor = ChartColor(60, 179, 113);
    pub const CORAL: ChartColor = ChartColor(255, 127, 80);
    pub const WHITE: ChartColor = ChartColor(255, 255, 255);
    pub const LIGHT_GREY: ChartColor = ChartColor(221, 221, 221);
    pub const BLACK: ChartColor = ChartColor(0, 0, 0);

    pub(crate) fn rgb(self) -> Rgb {
        Rgb::new(self.0, self.1, self.2)
    }

    pub(crate) fn rgba(self, alpha: f64) -> Rgba {
        Rgba::new(self.0, self.1, self.2, alpha)
    }
}

/// Styling shared by both charts.
///
/// Passed to [`crate::ChartRenderer`] explicitly; nothing about chart
/// appearance is process-wide. The default is a white background with a light
/// grid, a green bar chart and a coral trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartTheme {
    pub width: usize,
    pub height: usize,
    pub title_font_size: usize,
    pub axis_title_font_size: usize,
    pub background: ChartColor,
    pub grid: ChartColor,
    pub text: ChartColor,
    pub bar_color: ChartColor,
    pub line_color: ChartColor,
    pub line_width: f64,
    pub marker_size: usize,
    /// Opacity of the area under the trend line.
    pub fill_opacity: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title_font_size: 16,
            axis_title_font_size: 12,
            background: ChartColor::WHITE,
            grid: ChartColor::LIGHT_GREY,
            text: ChartColor::BLACK,
            bar_color: ChartColor::MEDIUM_SEA_GREEN,
            line_color: ChartColor::CORAL,
            line_width: 2.5,
            marker_size: 8,
            fill_opacity: 0.2,
        }
    }
}

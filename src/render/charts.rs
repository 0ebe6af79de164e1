use crate::render::error::RenderError;
use crate::render::theme::ChartTheme;
use crate::types::views::{PlantHarm, YearHarm};
use log::info;
use plotly::common::{Fill, Font, Line, Marker, Mode, Orientation, TextPosition, TickMode, Title};
use plotly::layout::{Axis, Layout, Margin};
use plotly::{Bar, Plot, Scatter};
use std::fs;
use std::path::PathBuf;

pub const TOP_PLANTS_TITLE: &str = "Top Plants by Harm Value";
pub const YEARLY_TREND_TITLE: &str = "Yearly Harm Trend";

const TOP_PLANTS_FILE_STEM: &str = "top_plants";
const YEARLY_TREND_FILE_STEM: &str = "yearly_trend";

// Headroom past the longest bar so its value label stays inside the plot
const BAR_LABEL_HEADROOM: f64 = 1.15;

/// Where rendered charts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutput {
    /// Open each chart in the platform's default browser.
    Show,
    /// Write each chart as a standalone HTML file into the directory.
    Directory(PathBuf),
}

/// Draws the two summary charts.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    theme: ChartTheme,
    output: ChartOutput,
}

impl ChartRenderer {
    pub fn new(theme: ChartTheme, output: ChartOutput) -> Self {
        Self { theme, output }
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    fn title(&self, text: &str, size: usize) -> Title {
        Title::with_text(text).font(Font::new().size(size).color(self.theme.text.rgb()))
    }

    fn axis(&self, text: &str) -> Axis {
        Axis::new()
            .title(self.title(text, self.theme.axis_title_font_size))
            .show_grid(true)
            .grid_color(self.theme.grid.rgb())
    }

    fn layout(&self, title: &str) -> Layout {
        Layout::new()
            .title(self.title(title, self.theme.title_font_size))
            .width(self.theme.width)
            .height(self.theme.height)
            .show_legend(false)
            .plot_background_color(self.theme.background.rgb())
            .paper_background_color(self.theme.background.rgb())
    }

    /// Builds the horizontal bar chart of the top-plants view.
    ///
    /// The first row is drawn at the top. Each bar carries its total rounded to
    /// one decimal, placed just past the bar's end.
    pub fn top_plants_chart(&self, rows: &[PlantHarm]) -> Plot {
        // Category axes fill bottom-up, so feed the rows reversed
        let names: Vec<String> = rows.iter().rev().map(|r| r.plant_name.clone()).collect();
        let totals: Vec<f64> = rows.iter().rev().map(|r| r.total_harm).collect();
        let labels: Vec<String> = totals.iter().map(|v| format!("{:.1}", v)).collect();
        let max_total = totals.iter().copied().fold(0.0_f64, f64::max);

        let bars = Bar::new(totals, names)
            .orientation(Orientation::Horizontal)
            .marker(Marker::new().color(self.theme.bar_color.rgb()))
            .text_array(labels)
            .text_position(TextPosition::Outside);

        let mut x_axis = self.axis("Total Harm Value");
        if max_total > 0.0 {
            x_axis = x_axis.range(vec![0.0, max_total * BAR_LABEL_HEADROOM]);
        }

        let mut plot = Plot::new();
        plot.add_trace(bars);
        plot.set_layout(
            self.layout(TOP_PLANTS_TITLE)
                .x_axis(x_axis)
                .y_axis(self.axis("Plant Name").show_grid(false))
                .margin(Margin::new().left(160)),
        );
        plot
    }

    /// Builds the line-and-area chart of the yearly-trend view.
    ///
    /// X-axis ticks sit on exactly the years present in `rows`.
    pub fn yearly_trend_chart(&self, rows: &[YearHarm]) -> Plot {
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        let totals: Vec<f64> = rows.iter().map(|r| r.total_harm).collect();
        let tick_values: Vec<f64> = years.iter().map(|&y| f64::from(y)).collect();

        let line = Scatter::new(years, totals)
            .mode(Mode::LinesMarkers)
            .line(
                Line::new()
                    .color(self.theme.line_color.rgb())
                    .width(self.theme.line_width),
            )
            .marker(
                Marker::new()
                    .color(self.theme.line_color.rgb())
                    .size(self.theme.marker_size),
            )
            .fill(Fill::ToZeroY)
            .fill_color(self.theme.line_color.rgba(self.theme.fill_opacity));

        let x_axis = self
            .axis("Year")
            .tick_mode(TickMode::Array)
            .tick_values(tick_values)
            .tick_format("d");

        let mut plot = Plot::new();
        plot.add_trace(line);
        plot.set_layout(
            self.layout(YEARLY_TREND_TITLE)
                .x_axis(x_axis)
                .y_axis(self.axis("Total Harm Value")),
        );
        plot
    }

    /// Renders the top-plants chart. Returns the written file, if any.
    pub fn render_top_plants(&self, rows: &[PlantHarm]) -> Result<Option<PathBuf>, RenderError> {
        self.emit(&self.top_plants_chart(rows), TOP_PLANTS_FILE_STEM)
    }

    /// Renders the yearly-trend chart. Returns the written file, if any.
    pub fn render_yearly_trend(&self, rows: &[YearHarm]) -> Result<Option<PathBuf>, RenderError> {
        self.emit(&self.yearly_trend_chart(rows), YEARLY_TREND_FILE_STEM)
    }

    fn emit(&self, plot: &Plot, file_stem: &str) -> Result<Option<PathBuf>, RenderError> {
        match &self.output {
            ChartOutput::Show => {
                plot.show();
                Ok(None)
            }
            ChartOutput::Directory(dir) => {
                fs::create_dir_all(dir)
                    .map_err(|e| RenderError::OutputDirCreation(dir.clone(), e))?;
                let path = dir.join(format!("{}.html", file_stem));
                fs::write(&path, plot.to_html())
                    .map_err(|e| RenderError::ChartWrite(path.clone(), e))?;
                info!("Wrote chart to {}", path.display());
                Ok(Some(path))
            }
        }
    }
}

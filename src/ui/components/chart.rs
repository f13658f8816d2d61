use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget};

use ditdah::engine::summary::ChartData;

use crate::ui::theme::Theme;

/// Daily accuracy trend for one mode.
pub struct AccuracyChart<'a> {
    pub data: Option<&'a ChartData>,
    pub theme: &'a Theme,
}

impl<'a> AccuracyChart<'a> {
    pub fn new(data: Option<&'a ChartData>, theme: &'a Theme) -> Self {
        Self { data, theme }
    }
}

impl Widget for AccuracyChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Accuracy by Day ")
            .border_style(Style::default().fg(colors.border()));

        let Some(data) = self.data else {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(Span::styled(
                "Practice on at least two days to see a trend",
                Style::default().fg(colors.muted()),
            ))
            .alignment(Alignment::Center)
            .render(inner, buf);
            return;
        };

        let max_x = data.points.last().map(|(x, _)| *x).unwrap_or(1.0).max(1.0);

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors.accent()))
            .data(&data.points);

        // First and last day are enough to anchor the axis.
        let x_labels: Vec<Span> = match (data.labels.first(), data.labels.last()) {
            (Some(first), Some(last)) => vec![Span::raw(first.clone()), Span::raw(last.clone())],
            _ => Vec::new(),
        };

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(colors.muted()))
                    .bounds([0.0, max_x])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title("%")
                    .style(Style::default().fg(colors.muted()))
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            );

        chart.render(area, buf);
    }
}

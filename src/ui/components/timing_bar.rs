use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use ditdah::paddle::{TimingBar, TimingConfig};

use crate::ui::theme::Theme;

/// Press-length gauge. The fill takes the colour of the zone the press is
/// in; tick marks show where the dot and dash thresholds fall.
pub struct TimingBarWidget<'a> {
    pub bar: Option<TimingBar>,
    pub timing: TimingConfig,
    pub theme: &'a Theme,
}

impl<'a> TimingBarWidget<'a> {
    pub fn new(bar: Option<TimingBar>, timing: TimingConfig, theme: &'a Theme) -> Self {
        Self { bar, timing, theme }
    }

    fn marker_x(&self, inner: Rect, threshold_ms: f64) -> u16 {
        let ratio = (threshold_ms / self.timing.max_duration_ms()).clamp(0.0, 1.0);
        inner.x + ((inner.width.saturating_sub(1)) as f64 * ratio) as u16
    }
}

impl Widget for TimingBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Press ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let (filled_width, fill) = match self.bar {
            Some(bar) => (
                (bar.progress * inner.width as f64).round() as u16,
                colors.zone(bar.zone),
            ),
            None => (0, colors.bar_empty()),
        };

        for x in inner.x..inner.x + inner.width {
            let bg = if x < inner.x + filled_width {
                fill
            } else {
                colors.bar_empty()
            };
            buf[(x, inner.y)].set_style(Style::default().fg(colors.fg()).bg(bg));
        }

        let dot_x = self.marker_x(inner, self.timing.dot_threshold_ms);
        let dash_x = self.marker_x(inner, self.timing.dash_threshold_ms);
        buf[(dot_x, inner.y)].set_char('•');
        buf[(dash_x, inner.y)].set_char('−');
    }
}

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Row, Table, Widget};

use ditdah::engine::char_stats::weakest_first;
use ditdah::engine::summary::{self, ModeSummary};
use ditdah::engine::{PracticeMode, Statistics};
use ditdah::morse::code;
use ditdah::store::KeyValueStore;

use crate::ui::components::chart::AccuracyChart;
use crate::ui::theme::Theme;

pub struct StatsDashboard<'a, S: KeyValueStore> {
    pub stats: &'a Statistics<S>,
    pub mode: PracticeMode,
    pub confirm_clear: bool,
    pub theme: &'a Theme,
}

impl<'a, S: KeyValueStore> StatsDashboard<'a, S> {
    pub fn new(
        stats: &'a Statistics<S>,
        mode: PracticeMode,
        confirm_clear: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            stats,
            mode,
            confirm_clear,
            theme,
        }
    }

    fn render_cards(&self, summary: ModeSummary, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);

        let fmt_pct = |v: Option<u32>| v.map_or_else(|| "--".to_string(), |p| format!("{p}%"));
        let values = [
            ("Accuracy", fmt_pct(summary.accuracy)),
            ("Practice Days", summary.practice_days.to_string()),
            ("Best Day", fmt_pct(summary.best_daily_accuracy)),
        ];

        for ((label, value), card) in values.into_iter().zip(cards.iter()) {
            let block = Block::bordered()
                .title(format!(" {label} "))
                .border_style(Style::default().fg(colors.border()));
            let inner = block.inner(*card);
            block.render(*card, buf);
            Paragraph::new(Span::styled(
                value,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(inner, buf);
        }
    }

    fn render_characters(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let table = self.stats.get_mode_stats(self.mode);

        let rows: Vec<Row> = weakest_first(table)
            .into_iter()
            .map(|(ch, stat)| {
                let code = ch
                    .chars()
                    .next()
                    .and_then(code::code_for)
                    .map(code::display_code)
                    .unwrap_or_default();
                let accuracy = stat.accuracy().unwrap_or(0);
                let style = if accuracy >= summary::TOAST_POSITIVE_THRESHOLD {
                    Style::default().fg(colors.success())
                } else {
                    Style::default().fg(colors.warning())
                };
                Row::new(vec![
                    ch.to_string(),
                    code,
                    format!("{}/{}", stat.correct, stat.attempts),
                    format!("{accuracy}%"),
                ])
                .style(style)
            })
            .collect();

        let widget = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["Char", "Code", "Correct", "Acc"])
                .style(Style::default().fg(colors.muted()).add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::bordered()
                .title(" Characters (weakest first) ")
                .border_style(Style::default().fg(colors.border())),
        );
        widget.render(area, buf);
    }
}

impl<S: KeyValueStore> Widget for StatsDashboard<'_, S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Statistics ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Span::styled(
            self.stats.get_stats_summary().headline(),
            Style::default().fg(colors.fg()),
        ))
        .render(layout[0], buf);

        let tab_spans: Vec<Span> = PracticeMode::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, &mode)| {
                let style = if mode == self.mode {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(colors.muted())
                };
                vec![
                    Span::styled(format!(" [{}] {} ", i + 1, mode.label()), style),
                    Span::raw("  "),
                ]
            })
            .collect();
        Paragraph::new(Line::from(tab_spans)).render(layout[1], buf);

        self.render_cards(self.stats.mode_summary(self.mode), layout[2], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[3]);
        let chart = summary::chart_data(&self.stats.get_attempts_grouped_by_date(self.mode));
        AccuracyChart::new(chart.as_ref(), self.theme).render(body[0], buf);
        self.render_characters(body[1], buf);

        Paragraph::new(Span::styled(
            " [Esc] Back  [Tab] Next mode  [1-3] Switch mode  [c] Clear all",
            Style::default().fg(colors.accent()),
        ))
        .render(layout[4], buf);

        if self.confirm_clear {
            let dialog_width = 44u16.min(area.width);
            let dialog_height = 5u16.min(area.height);
            let dialog_x = area.x + area.width.saturating_sub(dialog_width) / 2;
            let dialog_y = area.y + area.height.saturating_sub(dialog_height) / 2;
            let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, dialog_height);

            Clear.render(dialog_area, buf);
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Clear ALL statistics? This cannot be undone.",
                    Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled("[y] Yes   [n] No", Style::default().fg(colors.fg()))),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(colors.error()))
                    .style(Style::default().bg(colors.bg())),
            )
            .render(dialog_area, buf);
        }
    }
}

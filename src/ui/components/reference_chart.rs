use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Row, Table, Widget};

use ditdah::morse::code::{self, CharClass};

use crate::ui::theme::Theme;

/// Characters of one tab paired with their display codes, in table order.
pub fn reference_rows(class: CharClass) -> Vec<(char, String)> {
    code::characters(&[class])
        .into_iter()
        .filter_map(|ch| code::code_for(ch).map(|c| (ch, code::display_code(c))))
        .collect()
}

pub fn next_class(class: CharClass) -> CharClass {
    let i = CharClass::ALL.iter().position(|c| *c == class).unwrap_or(0);
    CharClass::ALL[(i + 1) % CharClass::ALL.len()]
}

pub struct ReferenceChart<'a> {
    pub class: CharClass,
    pub theme: &'a Theme,
}

impl<'a> ReferenceChart<'a> {
    pub fn new(class: CharClass, theme: &'a Theme) -> Self {
        Self { class, theme }
    }

    fn render_table(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let entries = reference_rows(self.class);

        // Long tabs split into side-by-side columns.
        let per_column = area.height.saturating_sub(3).max(1) as usize;
        let columns = entries.len().div_ceil(per_column).max(1);
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(area);

        for (chunk, column) in entries.chunks(per_column).zip(areas.iter()) {
            let rows: Vec<Row> = chunk
                .iter()
                .map(|(ch, code)| {
                    Row::new(vec![
                        Span::styled(
                            ch.to_string(),
                            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(code.clone(), Style::default().fg(colors.accent())),
                    ])
                })
                .collect();
            Table::new(rows, [Constraint::Length(6), Constraint::Min(8)])
                .header(
                    Row::new(vec!["Char", "Code"])
                        .style(Style::default().fg(colors.muted()).add_modifier(Modifier::BOLD)),
                )
                .block(Block::bordered().border_style(Style::default().fg(colors.border())))
                .render(*column, buf);
        }
    }
}

impl Widget for ReferenceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Reference Charts ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let tab_spans: Vec<Span> = CharClass::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, &class)| {
                let style = if class == self.class {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(colors.muted())
                };
                vec![
                    Span::styled(format!(" [{}] {} ", i + 1, class.label()), style),
                    Span::raw("  "),
                ]
            })
            .collect();
        Paragraph::new(Line::from(tab_spans)).render(layout[0], buf);

        self.render_table(layout[1], buf);

        Paragraph::new(Span::styled(
            " [Esc] Back  [Tab] Next chart  [1-3] Switch chart",
            Style::default().fg(colors.accent()),
        ))
        .render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ditdah::morse::code::MORSE_TABLE;

    #[test]
    fn test_tabs_cover_whole_table() {
        let mut seen: Vec<char> = CharClass::ALL
            .iter()
            .flat_map(|&class| reference_rows(class))
            .map(|(ch, _)| ch)
            .collect();
        assert_eq!(seen.len(), 54);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), MORSE_TABLE.len());
    }

    #[test]
    fn test_tab_sizes() {
        assert_eq!(reference_rows(CharClass::Alphabet).len(), 26);
        assert_eq!(reference_rows(CharClass::Digits).len(), 10);
        assert_eq!(reference_rows(CharClass::Punctuation).len(), 18);
    }

    #[test]
    fn test_rows_use_display_glyphs() {
        let rows = reference_rows(CharClass::Alphabet);
        assert_eq!(rows[0], ('A', code::display_code(".-")));
    }

    #[test]
    fn test_next_class_wraps() {
        assert_eq!(next_class(CharClass::Alphabet), CharClass::Digits);
        assert_eq!(next_class(CharClass::Punctuation), CharClass::Alphabet);
    }

    #[test]
    fn test_render_shows_selected_tab() {
        let theme = Theme::load("midnight").unwrap();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        ReferenceChart::new(CharClass::Digits, &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Reference Charts"));
        assert!(text.contains("Numbers"));
    }
}

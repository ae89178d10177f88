use crate::window::LogLine;
use std::iter::once;
use tui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use unicode_segmentation::UnicodeSegmentation;

pub struct BlockWithLegend<'a> {
    legend: Vec<Spans<'a>>,
    block: Block<'a>,
    border_type: BorderType,
}

impl<'a> BlockWithLegend<'a> {
    pub fn title<T>(mut self, title: T) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.block = self.block.title(title);
        self
    }

    pub fn borders(mut self, borders: Borders) -> BlockWithLegend<'a> {
        self.block = self.block.borders(borders);
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> BlockWithLegend<'a> {
        self.block = self.block.border_type(border_type);
        self.border_type = border_type;
        self
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block.inner(area)
    }

    pub fn legend<T>(mut self, legend: Vec<T>) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.legend = legend.into_iter().map(|l| l.into()).collect();
        self
    }
}

impl<'a> Default for BlockWithLegend<'a> {
    fn default() -> BlockWithLegend<'a> {
        BlockWithLegend {
            legend: vec![],
            block: Block::default(),
            border_type: BorderType::Plain,
        }
    }
}

impl<'a> Widget for BlockWithLegend<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.render(area, buf);
        if area.height == 0 {
            return;
        }
        let symbols = BorderType::line_symbols(self.border_type);

        let legend_y = area.y + area.height - 1;
        let mut legend_x = area.x + 1;

        for legend in self.legend.into_iter() {
            let legend: Spans = once(Span::from(symbols.bottom_right))
                .chain(legend.0.into_iter())
                .chain(once(Span::from(symbols.bottom_left)))
                .collect::<Vec<_>>()
                .into();

            let width_remaining = area.width.saturating_sub(legend_x - area.x + 1);
            let (x, _) = buf.set_spans(legend_x, legend_y, &legend, width_remaining);
            legend_x = x;
        }
    }
}

/// Numeric input, drawn as `◂ 10 ▸` with the arrows dimmed at the bounds.
pub struct Stepper {
    value: u32,
    min: u32,
    max: u32,
}

impl Stepper {
    pub fn new(value: u32, min: u32, max: u32) -> Self {
        Self { value, min, max }
    }
}

impl Widget for Stepper {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let arrow = |active: bool, symbol: &'static str| {
            let style = if active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(symbol, style)
        };

        let line = Spans::from(vec![
            arrow(self.value > self.min, "◂ "),
            Span::styled(
                format!("{:>2}", self.value),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            arrow(self.value < self.max, " ▸"),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Left)
            .render(area, buf);
    }
}

pub struct Checkbox<'a> {
    label: &'a str,
    checked: bool,
}

impl<'a> Checkbox<'a> {
    pub fn new(label: &'a str, checked: bool) -> Self {
        Self { label, checked }
    }
}

impl<'a> Widget for Checkbox<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mark = if self.checked { "[x] " } else { "[ ] " };
        let line = Spans::from(vec![
            Span::styled(mark, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(self.label),
        ]);

        Paragraph::new(line).render(area, buf);
    }
}

pub struct Button<'a> {
    label: &'a str,
    busy: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self { label, busy: false }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl<'a> Widget for Button<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(format!(" {} ", self.label), style))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Append-only log that always shows its newest lines.
pub struct LogView<'a> {
    block: Option<BlockWithLegend<'a>>,
    lines: &'a [LogLine],
}

impl<'a> LogView<'a> {
    pub fn new(lines: &'a [LogLine]) -> Self {
        Self { block: None, lines }
    }

    pub fn block(mut self, block: BlockWithLegend<'a>) -> LogView<'a> {
        self.block = Some(block);
        self
    }
}

/// Breaks `text` into rows of at most `width` graphemes.
pub fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if graphemes.is_empty() {
        return vec![String::new()];
    }
    graphemes.chunks(width).map(|row| row.concat()).collect()
}

impl<'a> Widget for LogView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if let Some(block) = self.block {
            block.render(area, buf);
        }

        let visible = inner_area.height as usize;
        let width = inner_area.width as usize;

        // walk backwards until the area is full, newest line at the bottom
        let mut rows: Vec<Spans> = Vec::with_capacity(visible);
        for line in self.lines.iter().rev() {
            if rows.len() >= visible {
                break;
            }
            let style = Style::default()
                .fg(line.kind.color())
                .add_modifier(Modifier::BOLD);
            for row in wrap_rows(&line.to_string(), width).into_iter().rev() {
                rows.push(Spans::from(Span::styled(row, style)));
            }
        }
        rows.truncate(visible);
        rows.reverse();

        Paragraph::new(rows).render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::LogKind;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol.clone())
            .collect::<String>()
    }

    #[test]
    fn wraps_on_grapheme_boundaries() {
        assert_eq!(wrap_rows("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_rows("", 4), vec![""]);
        assert!(wrap_rows("abc", 0).is_empty());
        assert_eq!(wrap_rows("₿₿₿", 2), vec!["₿₿", "₿"]);
    }

    #[test]
    fn long_lines_keep_their_last_row_visible() {
        let lines = vec![
            LogLine::new("old", LogKind::Info),
            LogLine::new("x".repeat(100), LogKind::Bitcoin),
        ];
        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);

        LogView::new(&lines).render(area, &mut buf);

        assert!(row(&buf, 1).trim_end().ends_with("x]"));
    }

    #[test]
    fn log_view_shows_the_tail() {
        let lines: Vec<_> = (0..5)
            .map(|i| LogLine::new(format!("line {i}"), LogKind::Info))
            .collect();
        let area = Rect::new(0, 0, 60, 2);
        let mut buf = Buffer::empty(area);

        LogView::new(&lines).render(area, &mut buf);

        assert!(row(&buf, 0).contains("[line 3]"));
        assert!(row(&buf, 1).contains("[line 4]"));
    }

    #[test]
    fn checkbox_marks_state() {
        let area = Rect::new(0, 0, 24, 1);
        let mut buf = Buffer::empty(area);
        Checkbox::new("get bitcoin price", true).render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim_end(), "[x] get bitcoin price");

        let mut buf = Buffer::empty(area);
        Checkbox::new("get bitcoin price", false).render(area, &mut buf);
        assert_eq!(row(&buf, 0).trim_end(), "[ ] get bitcoin price");
    }

    #[test]
    fn stepper_shows_value() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        Stepper::new(7, 0, 10).render(area, &mut buf);
        assert!(row(&buf, 0).contains(" 7"));
    }
}

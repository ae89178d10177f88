use crate::tui::widgets::{BlockWithLegend, Button, Checkbox, LogView, Stepper};
use crate::window::{MainWindow, STEPPER_LIMIT};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{self, BorderType, Gauge},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;

fn split_initial(str: &str) -> (&str, &str) {
    let mut graphemes = str.graphemes(true);

    let initial = graphemes.next().unwrap_or("");
    let remainder = graphemes.as_str();

    (initial, remainder)
}

fn define_block<'a>(title: &'a str, legend: Vec<&'a str>) -> BlockWithLegend<'a> {
    let (initial, remainder) = split_initial(title);

    let text_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let initials_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let title = Spans::from(vec![
        Span::styled(initial, initials_style),
        Span::styled(remainder, text_style),
    ]);

    let legend = legend
        .into_iter()
        .map(|s| {
            let (initial, remainder) = split_initial(s);

            Spans::from(vec![
                Span::styled(initial, initials_style),
                Span::styled(remainder, text_style),
            ])
        })
        .collect();

    BlockWithLegend::default()
        .borders(widgets::Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .legend(legend)
}

pub fn render_ui<B: Backend>(frame: &mut Frame<B>, window: &MainWindow) {
    let (controls_chunk, progress_chunk, log_chunk) = {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(frame.size());

        (chunks[0], chunks[1], chunks[2])
    };

    let controls_block = define_block(
        "coinwatch",
        vec!["↕ number", "⏎ ok", "␣ bitcoin", "quit"],
    );
    let (stepper_row, button_row, checkbox_row) = {
        let inner = controls_block.inner(controls_chunk).inner(&Margin {
            horizontal: 1,
            vertical: 0,
        });
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        (rows[0], rows[1], rows[2])
    };

    frame.render_widget(controls_block, controls_chunk);
    frame.render_widget(Stepper::new(window.number(), 0, STEPPER_LIMIT), stepper_row);
    frame.render_widget(
        Button::new("OK").busy(window.counter_is_running()),
        button_row,
    );
    frame.render_widget(
        Checkbox::new("get bitcoin price", window.get_price()),
        checkbox_row,
    );

    let progress = window.progress();
    let gauge = Gauge::default()
        .block(
            widgets::Block::default()
                .borders(widgets::Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .label(format!("{}/{}", progress.value, progress.maximum))
        .ratio(progress.ratio());
    frame.render_widget(gauge, progress_chunk);

    let log_view = LogView::new(window.log_lines()).block(define_block("log", vec![]));
    frame.render_widget(log_view, log_chunk);
}

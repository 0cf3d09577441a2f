use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState,
    Wrap,
};
use ratatui::Frame;

use phonebook_core::display::number_lines;
use phonebook_core::Record;

use crate::app::{App, Mode, RowForm};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(size);

    render_header(frame, chunks[0], app);

    match &app.mode {
        Mode::Search => render_results(frame, chunks[1], app),
        Mode::Edit | Mode::RowForm(_) => render_table(frame, chunks[1], app),
    }

    render_footer(frame, chunks[2], app);

    if app.show_help {
        render_help(frame, size);
    }

    if let Mode::RowForm(form) = &app.mode {
        render_row_form(frame, size, form);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(app.query.clone(), Style::default().fg(Color::Yellow)),
    ];
    if matches!(app.mode, Mode::Search) {
        spans.push(Span::styled("_", Style::default().fg(Color::DarkGray)));
    }
    spans.push(Span::raw(format!(
        "   {} / {} entries",
        app.results.len(),
        app.book.len()
    )));
    if let Some(as_of) = &app.as_of {
        spans.push(Span::styled(
            format!("   as of {}", as_of),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.dirty {
        spans.push(Span::styled(
            "   [unsaved]",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title("phonebook");
    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let hint = match app.mode {
        Mode::Search => "type to search  esc clear  up/down move  ctrl+r reload  ctrl+e edit  ctrl+c quit",
        Mode::Edit => "j/k move  enter edit row  d delete  s save  esc back  ? help",
        Mode::RowForm(_) => "tab next  shift+tab prev  enter select  esc cancel",
    };

    let mut lines = vec![Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    ))];

    if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame<'_>, area: Rect, app: &App) {
    if app.results.is_empty() {
        let paragraph = Paragraph::new(app.empty_hint())
            .block(Block::default().borders(Borders::ALL).title("Directory"))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible_records()
        .map(|(_, record)| result_item(record))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Directory"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(list, area, &mut state);
}

fn result_item(record: &Record) -> ListItem<'static> {
    let place = if record.place.is_empty() {
        Span::styled("-", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            record.place.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )
    };

    let numbers = number_lines(&record.number);
    let mut lines = Vec::with_capacity(numbers.len().max(1));
    let mut numbers = numbers.into_iter();
    lines.push(Line::from(vec![
        place,
        Span::raw("  "),
        Span::styled(
            numbers.next().unwrap_or_default().to_string(),
            Style::default().fg(Color::Cyan),
        ),
    ]));
    for number in numbers {
        lines.push(Line::from(Span::styled(
            format!("    {}", number),
            Style::default().fg(Color::Cyan),
        )));
    }
    ListItem::new(Text::from(lines))
}

fn render_table(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut rows: Vec<Row> = app
        .book
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Row::new(vec![
                Cell::from(index.to_string()),
                Cell::from(record.place.clone()),
                Cell::from(record.number.clone()),
            ])
        })
        .collect();
    rows.push(
        Row::new(vec![
            Cell::from("+"),
            Cell::from("(new entry)"),
            Cell::from(""),
        ])
        .style(Style::default().fg(Color::DarkGray)),
    );

    let header = Row::new(vec!["#", "Place", "Number"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(5),
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ];

    let mut state = TableState::default();
    state.select(Some(app.edit_selected));

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Edit"))
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("➤ ");

    frame.render_stateful_widget(table, area, &mut state);
}

fn render_row_form(frame: &mut Frame<'_>, area: Rect, form: &RowForm) {
    let modal = centered_rect(60, 40, area);
    frame.render_widget(Clear, modal);

    let title = match form.index {
        Some(index) => format!("Edit row {}", index),
        None => "New entry".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let mut lines = vec![
        field_line("Place", &form.place, form.focus == 0),
        field_line("Number", &form.number, form.focus == 1),
        Line::from(Span::styled(
            "Separate several numbers with \" / \".",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let save_style = if form.is_save_focus() {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::Green)
    };
    let cancel_style = if form.is_cancel_focus() {
        Style::default().fg(Color::Black).bg(Color::LightRed)
    } else {
        Style::default().fg(Color::Red)
    };

    lines.push(Line::from(vec![
        Span::styled("[Save]", save_style),
        Span::raw("  "),
        Span::styled("[Cancel]", cancel_style),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal);
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let modal = centered_rect(70, 60, area);
    frame.render_widget(Clear, modal);

    let text = vec![
        Line::from("Global: Ctrl+C quit"),
        Line::from("Search: type to filter by place or number, esc clear, up/down move, Ctrl+R reload, Ctrl+E edit"),
        Line::from("Edit: j/k move, enter edit row, d delete row, s save export, esc back, ? help"),
        Line::from("Row form: tab/shift+tab move, enter activate, esc cancel"),
        Line::from(""),
        Line::from("The last row of the edit table adds a new entry."),
    ];

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, modal);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", label),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), style),
    ])
}

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        block::Title, Block, Borders, Cell, Clear, Padding, Paragraph, Row, Table, Tabs, Wrap,
    },
};
use promptdeck_core::{Category, Filter, Placement, ProjectedPrompt, Severity, ViewMode};
use crate::app::App;

const ORANGE: Color = Color::Rgb(249, 115, 22);
const PURPLE: Color = Color::Rgb(168, 85, 247);

/// Wrap text to fit within a given width, returning multiple lines
/// Uses word boundaries for wrapping (doesn't break mid-word)
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current_line = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_len = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// One row of the cards view: a category heading or a prompt card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardEntry {
    Header(Category),
    Card(usize), // Index into the projection
}

/// Cards in projection order, with a heading wherever the category changes.
fn build_card_entries(prompts: &[ProjectedPrompt]) -> Vec<CardEntry> {
    let mut entries = Vec::with_capacity(prompts.len() + Category::all().len());
    let mut current: Option<Category> = None;

    for (idx, prompt) in prompts.iter().enumerate() {
        if current != Some(prompt.category) {
            entries.push(CardEntry::Header(prompt.category));
            current = Some(prompt.category);
        }
        entries.push(CardEntry::Card(idx));
    }

    entries
}

fn card_height(prompt: &ProjectedPrompt, text_width: usize) -> usize {
    // borders + wrapped text + category line
    2 + wrap_text_to_width(&prompt.text, text_width).len() + 1
}

/// First entry to draw so the selected card is fully visible.
/// Only scrolls when the selection would leave the view.
fn visible_offset(heights: &[usize], current: usize, selected: usize, view_height: usize) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);

    // Show the heading directly above the selected card too, when there is one
    let want_start = selected.saturating_sub(1);
    let mut offset = current.min(want_start);

    while offset < selected && heights[offset..=selected].iter().sum::<usize>() > view_height {
        offset += 1;
    }

    offset
}

/// Where the `slot`-th toast of a placement goes. Slot 0 is the newest.
/// `None` when the slot does not fit inside `area`.
fn toast_rect(area: Rect, placement: Placement, slot: u16, width: u16) -> Option<Rect> {
    const TOAST_HEIGHT: u16 = 3;

    let width = width.min(area.width);
    let x = match placement {
        Placement::TopRight | Placement::BottomRight => area.x + area.width - width,
        Placement::BottomCenter => area.x + (area.width - width) / 2,
    };

    // Keep one row clear: the header on top, the footer at the bottom
    let stacked = TOAST_HEIGHT.checked_mul(slot + 1)?.checked_add(1)?;
    if stacked > area.height {
        return None;
    }
    let y = match placement {
        Placement::TopRight => area.y + stacked - TOAST_HEIGHT,
        Placement::BottomRight | Placement::BottomCenter => area.bottom() - stacked,
    };

    Some(Rect {
        x,
        y,
        width,
        height: TOAST_HEIGHT,
    })
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, filters, body, footer
    let [header_area, filter_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    app.body_area = Some(body_area);

    render_header(app, frame, header_area);
    render_filter_bar(app, frame, filter_area);

    match app.view_mode() {
        ViewMode::Cards => render_cards(app, frame, body_area),
        ViewMode::Table => render_table(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
    render_toasts(app, frame, area);

    if app.show_help {
        render_help(frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let favorites = app.deck.favorites().len();
    let favorites_indicator = if favorites > 0 {
        format!(" [{} ★]", favorites)
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(" Save The Prompt ", Style::default().fg(ORANGE).bold()),
        Span::styled("prompts from heyAnon", Style::default().fg(Color::Gray)),
        Span::styled(favorites_indicator, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::Black));
    frame.render_widget(header, area);
}

fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect) {
    let options = Filter::options();
    let active = app.active_filter();

    let titles: Vec<Line> = options
        .iter()
        .map(|filter| {
            let label = match filter {
                Filter::Favorites => format!("★ {}", filter.label()),
                _ => filter.label().to_string(),
            };
            Line::from(format!(" {} ({}) ", label, app.deck.count(filter)))
        })
        .collect();

    let selected = options.iter().position(|f| *f == active).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Category "),
        )
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().bg(ORANGE).fg(Color::White).add_modifier(Modifier::BOLD))
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));

    frame.render_widget(tabs, area);
}

fn body_block(app: &App, count: usize) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} · {} prompts ", app.active_filter().label(), count))
        .title(
            Title::from(format!(" {} view ", app.view_mode().as_str()))
                .alignment(Alignment::Right),
        )
}

fn render_empty(app: &App, frame: &mut Frame, area: Rect) {
    let message = match app.active_filter() {
        Filter::Favorites => "No favorites yet. Press f on a prompt to add it.",
        _ => "No prompts in this category.",
    };

    let paragraph = Paragraph::new(Line::styled(message, Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_cards(app: &mut App, frame: &mut Frame, area: Rect) {
    let prompts = app.prompts();
    let outer = body_block(app, prompts.len());
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if prompts.is_empty() {
        app.card_offset = 0;
        render_empty(app, frame, inner);
        return;
    }

    // Card borders and horizontal padding
    let text_width = (inner.width as usize).saturating_sub(4);

    let entries = build_card_entries(&prompts);
    let heights: Vec<usize> = entries
        .iter()
        .map(|entry| match entry {
            CardEntry::Header(_) => 1,
            CardEntry::Card(idx) => card_height(&prompts[*idx], text_width),
        })
        .collect();

    let selected_entry = entries
        .iter()
        .position(|e| *e == CardEntry::Card(app.cursor))
        .unwrap_or(0);
    app.card_offset = visible_offset(&heights, app.card_offset, selected_entry, inner.height as usize);

    let bottom = inner.y + inner.height;
    let mut y = inner.y;

    for (entry, height) in entries.iter().zip(&heights).skip(app.card_offset) {
        if y >= bottom {
            break;
        }
        let height = (*height as u16).min(bottom - y);
        let rect = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };

        match entry {
            CardEntry::Header(category) => {
                let heading = Line::from(vec![
                    Span::styled("▍", Style::default().fg(ORANGE)),
                    Span::styled(category.as_str(), Style::default().fg(Color::White).bold()),
                ]);
                frame.render_widget(Paragraph::new(heading), rect);
            }
            CardEntry::Card(idx) => {
                render_card(frame, rect, &prompts[*idx], *idx == app.cursor, text_width);
            }
        }

        y += height;
    }
}

fn render_card(frame: &mut Frame, area: Rect, prompt: &ProjectedPrompt, selected: bool, text_width: usize) {
    let border_color = if selected { ORANGE } else { Color::DarkGray };

    let mut status = Vec::new();
    if prompt.is_favorite {
        status.push(Span::styled(" ★ ", Style::default().fg(Color::Yellow)));
    }
    if prompt.just_copied {
        status.push(Span::styled(" ✓ Copied ", Style::default().fg(Color::Green).bold()));
    } else if selected {
        status.push(Span::styled(" c to copy ", Style::default().fg(Color::DarkGray)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .padding(Padding::horizontal(1))
        .title(Line::from(Span::styled(
            format!(" {} ", prompt.protocol),
            Style::default().bg(PURPLE).fg(Color::White).bold(),
        )))
        .title(Title::from(Line::from(status)).alignment(Alignment::Right));

    let text_style = if selected {
        Style::default().fg(ORANGE)
    } else {
        Style::default().fg(Color::White)
    };

    let mut lines: Vec<Line> = wrap_text_to_width(&prompt.text, text_width)
        .into_iter()
        .map(|line| Line::styled(line, text_style))
        .collect();
    lines.push(Line::styled(
        format!("⧩ {}", prompt.category),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(app: &mut App, frame: &mut Frame, area: Rect) {
    let prompts = app.prompts();
    let block = body_block(app, prompts.len());

    if prompts.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        render_empty(app, frame, inner);
        return;
    }

    let header = Row::new(vec!["", "Protocol", "Category", "Prompt", ""])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = prompts
        .iter()
        .map(|prompt| {
            let favorite = if prompt.is_favorite { "★" } else { " " };
            let copied = if prompt.just_copied { "✓ Copied" } else { "" };
            Row::new(vec![
                Cell::from(favorite).style(Style::default().fg(Color::Yellow)),
                Cell::from(Span::styled(prompt.protocol.clone(), Style::default().fg(PURPLE))),
                Cell::from(prompt.category.as_str()).style(Style::default().fg(Color::Gray)),
                Cell::from(prompt.text.clone()),
                Cell::from(copied).style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = Style::default().bg(Color::Blue).fg(Color::White);
    let mode_text = match app.view_mode() {
        ViewMode::Cards => " CARDS ",
        ViewMode::Table => " TABLE ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = [
        ("j/k", "move"),
        ("Tab", "filter"),
        ("c", "copy"),
        ("f", "favorite"),
        ("v", "view"),
        ("?", "help"),
        ("q", "quit"),
    ];

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_toasts(app: &App, frame: &mut Frame, area: Rect) {
    let toasts: Vec<_> = app.deck.notifier().visible().collect();

    for placement in [Placement::TopRight, Placement::BottomRight, Placement::BottomCenter] {
        // Newest first, so it sits closest to the anchor edge
        let stacked = toasts
            .iter()
            .rev()
            .filter(|t| t.notification.placement == placement)
            .enumerate();

        for (slot, toast) in stacked {
            let (icon, color) = match toast.notification.severity {
                Severity::Success => ("✓", Color::Green),
                Severity::Error => ("✗", Color::Red),
                Severity::Info => ("ℹ", Color::Cyan),
            };
            let text = format!("{} {}", icon, toast.notification.message);
            let width = text.chars().count() as u16 + 4;
            let Some(rect) = toast_rect(area, placement, slot as u16, width) else {
                break;
            };

            let paragraph = Paragraph::new(Line::styled(text, Style::default().fg(color)))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .padding(Padding::horizontal(1)),
                );

            frame.render_widget(Clear, rect);
            frame.render_widget(paragraph, rect);
        }
    }
}

fn render_help(frame: &mut Frame, area: Rect) {
    let bindings = [
        ("j / k, ↓ / ↑", "Move between prompts"),
        ("g / G", "First / last prompt"),
        ("Tab / Shift-Tab", "Next / previous filter"),
        ("0", "Show all prompts"),
        ("*", "Show favorites"),
        ("1-6", "Show one category"),
        ("c, y, Enter", "Copy prompt text"),
        ("f", "Toggle favorite"),
        ("v", "Switch cards / table"),
        ("q, Esc", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, description) in bindings {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<16}", key), Style::default().fg(ORANGE).bold()),
            Span::raw(description),
        ]));
    }

    let height = lines.len() as u16 + 2;
    let rect = centered_rect(area, 52, height);
    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ORANGE))
            .title(" Keys ")
            .title(Title::from(" ? to close ").alignment(Alignment::Right)),
    );

    frame.render_widget(Clear, rect);
    frame.render_widget(help, rect);
}

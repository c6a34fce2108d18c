//! Layout rendering (header, selectors, verse row, footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveField, CatalogStatus, UiState, RECITERS};
use super::utils::{border_style, item_style, render_scrollable_list, truncate_string};

pub fn render_header(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let status = match ui_state.catalog_status {
        CatalogStatus::Loading => Span::styled("Loading chapters...", Style::default().fg(Color::Yellow)),
        CatalogStatus::Ready => Span::styled(
            format!("{} chapters", ui_state.catalog.len()),
            Style::default().fg(Color::DarkGray),
        ),
        CatalogStatus::Unavailable => Span::styled("Offline", Style::default().fg(Color::Red)),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled("اختر القارئ، السورة، ورقم الآية", Style::default().fg(Color::White)),
        Span::raw("  "),
        status,
    ]))
    .right_aligned()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 🕌 Mushaf ")
            .title(Line::from(" المصحف المعلم ").right_aligned())
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(header, area);
}

pub fn render_selectors(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // Reciters
            Constraint::Percentage(55), // Chapters
        ])
        .split(area);

    render_reciters(frame, chunks[0], ui_state);
    render_chapters(frame, chunks[1], ui_state);
}

fn render_reciters(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let focused = ui_state.active_field == ActiveField::Reciter;
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = RECITERS
        .iter()
        .enumerate()
        .map(|(i, reciter)| {
            let selected = i == ui_state.form.reciter_selected;
            let marker = if selected { "● " } else { "  " };
            ListItem::new(vec![
                Line::from(truncate_string(&format!("{}{}", marker, reciter.label), width)),
                Line::from(truncate_string(reciter.arabic_label, width)).right_aligned(),
            ])
            .style(item_style(selected, focused))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🎙 Reciter ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(focused));

    render_scrollable_list(frame, area, items, ui_state.form.reciter_selected, block);
}

fn render_chapters(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let focused = ui_state.active_field == ActiveField::Chapter;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chapter ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(focused));

    if ui_state.catalog.is_empty() {
        let placeholder = match ui_state.catalog_status {
            CatalogStatus::Loading => "Loading...",
            _ => "No chapters available",
        };
        let paragraph = Paragraph::new(placeholder)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = ui_state
        .catalog
        .chapters()
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let selected = i == ui_state.form.chapter_selected;
            let line = if chapter.english_name.is_empty() {
                chapter.label()
            } else {
                format!("{}  {}", chapter.label(), chapter.english_name)
            };
            ListItem::new(Line::from(truncate_string(&line, width)).right_aligned())
                .style(item_style(selected, focused))
        })
        .collect();

    render_scrollable_list(frame, area, items, ui_state.form.chapter_selected, block);
}

pub fn render_verse_row(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Verse stepper
            Constraint::Length(24), // Submit button
        ])
        .split(area);

    let verse_focused = ui_state.active_field == ActiveField::Verse;
    let limit = ui_state.form.verse_limit(&ui_state.catalog);
    let value = if verse_focused && !ui_state.form.verse_input.is_empty() {
        format!("{}_", ui_state.form.verse_input)
    } else {
        ui_state.form.verse_number.to_string()
    };

    let verse = Paragraph::new(Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(value, item_style(true, verse_focused)),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        Span::styled(format!("   (1 - {})", limit), Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Verse ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(verse_focused)),
    );
    frame.render_widget(verse, chunks[0]);

    let submit_focused = ui_state.active_field == ActiveField::Submit;
    let button_style = if submit_focused {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let button = Paragraph::new(Span::styled(" Show & Listen ", button_style))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(submit_focused)),
        );
    frame.render_widget(button, chunks[1]);
}

pub fn render_footer(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let hints = match ui_state.catalog_status {
        CatalogStatus::Unavailable => " R retry | H help | Q quit",
        _ => " Tab field | ↑/↓ select | 0-9 verse | Enter show | A listen | H help | Q quit",
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(Color::DarkGray))];
    if let Some(status) = &ui_state.status_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Cyan)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

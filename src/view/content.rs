//! Content area rendering (verse, audio line, commentary, notices)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::controller::CATALOG_UNAVAILABLE_MESSAGE;
use crate::model::{CatalogStatus, ContentState, ContentView, UiState, VerseRequest, VerseResult};

pub fn render_main_content(frame: &mut Frame, area: Rect, ui_state: &UiState, content_state: &ContentState) {
    match ui_state.catalog_status {
        CatalogStatus::Unavailable => {
            render_notice(
                frame,
                area,
                vec![
                    Line::from(Span::styled(
                        CATALOG_UNAVAILABLE_MESSAGE,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from("Press R to try loading the chapter list again."),
                ],
            );
            return;
        }
        CatalogStatus::Loading => {
            render_notice(frame, area, vec![Line::from("Loading chapter list...")]);
            return;
        }
        CatalogStatus::Ready => {}
    }

    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Verse "));
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Empty => {
            render_notice(
                frame,
                area,
                vec![
                    Line::from("Pick a reciter, a chapter and a verse number,"),
                    Line::from("then press Enter to read and listen."),
                ],
            );
        }
        ContentView::Failed { message } => {
            render_notice(
                frame,
                area,
                vec![Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))],
            );
        }
        ContentView::Verse { request, result } => {
            render_verse(frame, area, request, result);
        }
    }
}

fn render_notice(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let notice = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::uniform(1)),
        );
    frame.render_widget(notice, area);
}

fn render_verse(frame: &mut Frame, area: Rect, request: &VerseRequest, result: &VerseResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Verse text
            Constraint::Length(3),      // Audio
            Constraint::Min(0),         // Commentary
        ])
        .split(area);

    let number = if result.number_in_chapter > 0 {
        result.number_in_chapter
    } else {
        request.verse_number
    };
    let title = format!(" {} ﴿{}﴾ ", result.chapter_name, number);

    let verse = Paragraph::new(result.text.as_str())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(title).right_aligned())
                .title(format!(" {} ", request.reference()))
                .padding(Padding::uniform(1)),
        );
    frame.render_widget(verse, chunks[0]);

    let audio = Paragraph::new(Line::from(vec![
        Span::styled("♪ ", Style::default().fg(Color::Green)),
        Span::raw(result.audio_url.as_str()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recitation ")
            .title_bottom(Line::from(" A to play ").right_aligned())
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(audio, chunks[1]);

    let commentary = Paragraph::new(result.commentary.as_str())
        .style(Style::default().fg(Color::Yellow))
        .right_aligned()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Commentary ")
                .title(Line::from(" 📚 التفسير الميسر ").right_aligned())
                .border_style(Style::default().fg(Color::Yellow))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(commentary, chunks[2]);
}

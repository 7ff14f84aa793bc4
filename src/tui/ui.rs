use crate::core::editor::EditorMode;
use crate::core::state::{App, Route};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    BrowseView, DetailsView, GenrePicker, PostEditorScreen, TitleBar,
};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

const BROWSE_HINTS: &str =
    " ↑↓ Row  ←→ Card  [ ] Page  Enter Details  g Genre  n New post  e Edit post  q Quit ";

pub fn route_label(app: &App) -> &'static str {
    match &app.route {
        Route::Browse => "Browse",
        Route::Details { .. } => "Details",
        Route::Editor => match app.editor.as_ref().map(|e| e.mode()) {
            Some(EditorMode::Update { .. }) => "Edit post",
            _ => "New post",
        },
        Route::Published { .. } => "Published",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    TitleBar::new(
        route_label(app),
        app.session.display_name(),
        app.status_message.as_str(),
    )
    .render(frame, title_area);

    match &app.route {
        Route::Browse => {
            let [rows_area, hint_area] = Layout::vertical([Min(0), Length(1)]).areas(body_area);
            BrowseView::new(&app.rows, app.focused_row, &mut tui.browse_offset)
                .render(frame, rows_area);
            frame.render_widget(
                Paragraph::new(BROWSE_HINTS).style(Style::default().fg(Color::DarkGray)),
                hint_area,
            );
        }
        Route::Details { .. } => {
            DetailsView::new(
                app.detail.get(),
                app.detail.is_loading(),
                &app.image_base_url,
                &mut tui.details_scroll,
            )
            .render(frame, body_area);
        }
        Route::Editor => {
            if let Some(editor) = app.editor.as_ref() {
                PostEditorScreen::new(&mut tui.editor_view, editor, &app.session)
                    .render(frame, body_area);
            }
        }
        Route::Published { location } => draw_published(frame, body_area, location),
    }

    // Overlays on top of everything else
    if let Some(picker) = tui.genre_picker.as_mut() {
        GenrePicker::new(picker).render(frame, body_area);
    }
    if let Some(prompt) = tui.prompt.as_mut() {
        prompt.render(frame, body_area);
    }
}

fn draw_published(frame: &mut Frame, area: Rect, location: &str) {
    let lines = vec![
        Line::styled(
            "Post saved",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::raw(location.to_string()),
        Line::default(),
        Line::styled(
            "Enter or Esc to go back",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}

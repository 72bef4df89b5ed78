mod dialog;

use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::info;

use crate::app::{App, Focus};
use crate::domain::task::Task;
use crate::item::{ItemState, TaskItem};
use crate::store::dialog::Choice;

pub fn run(mut app: App, tick_rate: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!("screen started");

    let mut last_tick = Instant::now();
    let res = loop {
        if let Err(err) = terminal.draw(|f| draw(f, &app)) {
            break Err(anyhow::Error::from(err));
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        match poll_key(timeout) {
            Ok(Some(code)) => {
                if handle_key(&mut app, code) {
                    break Ok(());
                }
            }
            Ok(None) => {}
            Err(err) => break Err(err),
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    };

    cleanup_terminal(&mut terminal)?;
    info!(tasks = app.tasks().len(), "screen closed");
    res
}

fn poll_key(timeout: Duration) -> Result<Option<KeyCode>> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        return Ok(Some(key.code));
    }
    Ok(None)
}

/// Routes one key press. Returns `true` when the screen should close.
pub fn handle_key(app: &mut App, code: KeyCode) -> bool {
    if app.dialog().is_some() {
        match code {
            KeyCode::Char('y') => app.answer_dialog(Choice::Confirm),
            KeyCode::Char('n') | KeyCode::Esc => app.answer_dialog(Choice::Decline),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => app.cycle_dialog(),
            KeyCode::Enter | KeyCode::Char(' ') => app.activate_dialog(),
            _ => {}
        }
        return false;
    }

    if app.editing_id().is_some() {
        match code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => app.submit_edit(),
            KeyCode::Backspace => app.edit_backspace(),
            KeyCode::Tab => app.toggle_editing(),
            KeyCode::Down => app.select_next(),
            KeyCode::Up => app.select_previous(),
            KeyCode::Char(c) => app.edit_insert(c),
            _ => {}
        }
        return false;
    }

    match app.focus {
        Focus::List => match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => app.select_next(),
            KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') => {
                app.focus_new_task();
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Tab => app.toggle_selected(),
            KeyCode::Char('e') => app.start_edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
            _ => {}
        },
        Focus::NewTask => match code {
            KeyCode::Esc => app.leave_new_task(),
            KeyCode::Enter => app.submit_new_task(),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(c) => app.input.push(c),
            _ => {}
        },
    }

    false
}

pub fn draw(f: &mut ratatui::Frame, app: &App) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(size);

    f.render_widget(render_header(app), chunks[0]);
    f.render_widget(render_input(app), chunks[1]);

    let mut list_state = ListState::default();
    if !app.tasks().is_empty() {
        list_state.select(Some(app.selected));
    }
    let list = render_list(app);
    f.render_stateful_widget(list, chunks[2], &mut list_state);

    f.render_widget(render_footer(app), chunks[3]);

    if let Some(d) = app.dialog() {
        dialog::draw(f, size, d);
    }
}

fn render_header(app: &App) -> Paragraph<'static> {
    let total = app.tasks().len();
    let done = app.store.done_count();
    let open = app.store.open_count();
    let noun = if total == 1 { "task" } else { "tasks" };
    let line = Line::from(vec![
        Span::styled("ticklist", Style::default().fg(Color::Cyan)),
        Span::raw("  |  "),
        Span::styled(
            format!("You have {total} {noun}"),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  |  "),
        Span::styled(format!("{open} open"), Style::default().fg(Color::Magenta)),
        Span::raw(" / "),
        Span::styled(format!("{done} done"), Style::default().fg(Color::Green)),
    ]);
    Paragraph::new(line)
        .block(Block::default().title("Overview").borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}

fn render_input(app: &App) -> Paragraph<'_> {
    let focused = app.focus == Focus::NewTask;
    let mut spans = vec![Span::styled(&app.input, Style::default().fg(Color::Yellow))];
    if focused {
        spans.push(Span::raw("█"));
    } else if app.input.is_empty() {
        spans.push(Span::styled(
            "Add a new task...",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("New task (Enter to add / Esc to leave)")
            .borders(Borders::ALL)
            .border_style(border),
    )
}

fn render_row<'a>(idx: usize, task: &'a Task, row: Option<&'a TaskItem>) -> ListItem<'a> {
    let marker = if task.done { "[x]" } else { "[ ]" };
    let title_style = if task.done {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut spans = vec![Span::raw(format!("{:>2}. {marker} ", idx + 1))];
    match row {
        Some(r) if r.state() == ItemState::Editing => {
            spans.push(Span::styled(
                r.draft(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::raw("█"));
            spans.push(Span::styled(
                "  (Esc cancel ; remove disabled)",
                Style::default().fg(Color::DarkGray),
            ));
        }
        _ => spans.push(Span::styled(task.title.as_str(), title_style)),
    }

    ListItem::new(Line::from(spans))
}

fn render_list(app: &App) -> List<'_> {
    let items: Vec<ListItem> = app
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| render_row(idx, task, app.row(task.id)))
        .collect();

    List::new(items)
        .block(
            Block::default()
                .title("Tasks (j/k move ; a add ; Space toggle ; e edit ; d remove)")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .highlight_symbol("➤ ")
}

fn render_footer(app: &App) -> Paragraph<'_> {
    let (title, hint) = if app.editing_id().is_some() {
        ("Editing", "Enter save ; Esc cancel ; Tab toggle")
    } else {
        match app.focus {
            Focus::List => ("Normal", "q quit ; a add ; e edit ; d remove"),
            Focus::NewTask => ("Input", "Enter add ; Esc leave"),
        }
    };
    let msg = app.status.as_deref().unwrap_or(hint);
    Paragraph::new(msg).block(Block::default().title(title).borders(Borders::ALL))
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::store::TaskStore;

    fn app_with(titles: &[&str]) -> App {
        let mut store = TaskStore::default();
        for title in titles {
            store.add_task(*title).unwrap();
        }
        App::new(store)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, code)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buf = terminal.backend().buffer();
        let area = buf.area;
        let mut lines = Vec::new();
        for y in area.y..area.y + area.height {
            let mut line = String::new();
            for x in area.x..area.x + area.width {
                line.push_str(buf[(x, y)].symbol());
            }
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }

    #[test]
    fn keys_drive_add_toggle_remove() {
        let mut app = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Wash car");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.focus, Focus::List);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.tasks()[0].done);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.dialog().is_some());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.tasks().len(), 1);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn dialog_swallows_other_keys() {
        let mut app = app_with(&["a"]);
        press(&mut app, KeyCode::Char('d'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Char('j'));
        assert!(app.dialog().is_some());
        press(&mut app, KeyCode::Esc);
        assert!(app.dialog().is_none());
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn edit_keys_type_into_draft() {
        let mut app = app_with(&["Buy milk"]);
        press(&mut app, KeyCode::Char('e'));
        for _ in 0..4 {
            press(&mut app, KeyCode::Backspace);
        }
        // 'q' and 'd' are plain characters while editing.
        type_str(&mut app, "oat mqd");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "ilk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tasks()[0].title, "Buy oat milk");
        assert!(app.dialog().is_none());
    }

    #[test]
    fn header_counts_and_titles_render() {
        let mut app = app_with(&["Wash car", "Buy milk"]);
        app.toggle_selected();
        let screen = render_to_string(&app, 80, 14);
        assert!(screen.contains("You have 2 tasks"));
        assert!(screen.contains("1 open / 1 done"));
        assert!(screen.contains("[x] Wash car"));
        assert!(screen.contains("[ ] Buy milk"));
    }

    #[test]
    fn confirm_dialog_renders_over_list() {
        let mut app = app_with(&["Wash car"]);
        app.remove_selected();
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("Remove item"));
        assert!(screen.contains("Are you sure you want to remove this item?"));
        assert!(screen.contains("[ No ]"));
        assert!(screen.contains("Yes"));
    }
}

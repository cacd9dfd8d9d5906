pub mod app;
pub mod ui;

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use region_editor::ready::ViewReady;
use region_editor::{EditorConfig, Point, PointerEvent};

use crate::tui::app::{App, EditOptions, TuiMessage};
use crate::zones;

const UI_FPS: u64 = 30;
const UI_FRAME_TIME: Duration = Duration::from_millis(1000 / UI_FPS);

/// Interactive editing of a zone file with the mouse.
pub fn edit_with_tui(config: EditorConfig, options: EditOptions) -> Result<()> {
    let app = App::new(&config, options.clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let (tx, rx) = mpsc::channel();
    let ready = ViewReady::new();

    // The zones can only be placed once the canvas has a size.
    let loader_ready = ready.clone();
    let worker = thread::spawn(move || {
        let msg = match loader_ready.wait(config.ready_timeout(), config.ready_poll()) {
            Ok(()) => match zones::load_zones(&options.zones_path, &config) {
                Ok(zones) => TuiMessage::Loaded(zones),
                Err(e) => TuiMessage::Error(format!("{e:#}")),
            },
            Err(e) => TuiMessage::Error(e.to_string()),
        };
        let _ = tx.send(msg);
    });

    let result = run_tui_loop(&mut terminal, rx, app, &ready);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let _ = worker.join();

    result
}

fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    rx: Receiver<TuiMessage>,
    mut app: App,
    ready: &ViewReady,
) -> Result<()> {
    let mut canvas = Rect::default();
    let mut last_render: Option<Instant> = None;
    let mut needs_redraw = true;

    loop {
        if needs_redraw || last_render.map_or(true, |t| t.elapsed() >= UI_FRAME_TIME) {
            terminal.draw(|f| {
                canvas = ui::canvas_area(f.area(), app.aspect());
                app.resize_canvas(canvas.width, canvas.height);
                ui::draw(f, &app, canvas);
            })?;
            last_render = Some(Instant::now());
            needs_redraw = false;
            if !canvas.is_empty() {
                ready.mark_ready();
            }
        }

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('a') | KeyCode::Char('A') => app.toggle_drawing(),
                    KeyCode::Char('d') | KeyCode::Char('D') => app.delete_all(),
                    KeyCode::Char('w') | KeyCode::Char('W') => app.fill_whole(),
                    KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_mode(),
                    KeyCode::Char('s') | KeyCode::Char('S') => app.save(),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(mouse, canvas) {
                        app.pointer(pointer);
                        needs_redraw = true;
                    }
                }
                Event::Resize(..) => needs_redraw = true,
                _ => {}
            }
        }

        // Process messages from the loader thread
        while let Ok(msg) = rx.try_recv() {
            app.update(msg);
            needs_redraw = true;
        }

        if app.should_quit() {
            break;
        }
    }

    if app.dirty {
        log::warn!("Quit with unsaved changes");
    }
    Ok(())
}

/// Left button events relative to the canvas. A drag may start only on the
/// canvas but is followed anywhere.
fn pointer_event(mouse: MouseEvent, canvas: Rect) -> Option<PointerEvent> {
    let p = Point::new(
        mouse.column as f32 - canvas.x as f32,
        mouse.row as f32 - canvas.y as f32,
    );
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let on_canvas = mouse.column >= canvas.x
                && mouse.column < canvas.x + canvas.width
                && mouse.row >= canvas.y
                && mouse.row < canvas.y + canvas.height;
            on_canvas.then_some(PointerEvent::Down(p))
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move(p)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_pointer_is_canvas_relative() {
        let canvas = Rect::new(1, 4, 40, 20);
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Down(MouseButton::Left), 11, 9), canvas),
            Some(PointerEvent::Down(Point::new(10.0, 5.0)))
        );
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 2), canvas),
            Some(PointerEvent::Move(Point::new(-1.0, -2.0)))
        );
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Up(MouseButton::Left), 70, 70), canvas),
            Some(PointerEvent::Up)
        );
    }

    #[test]
    fn test_press_outside_canvas_is_ignored() {
        let canvas = Rect::new(1, 4, 40, 20);
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Down(MouseButton::Left), 41, 9), canvas),
            None
        );
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 9), canvas),
            None
        );
        assert_eq!(pointer_event(mouse(MouseEventKind::Moved, 10, 9), canvas), None);
    }
}

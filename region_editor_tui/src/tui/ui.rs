use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use region_editor::layout::fit_canvas;
use region_editor::DrawOp;

use crate::tui::app::{App, TuiMode};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 0.5;

fn split(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Picture
            Constraint::Length(3), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Where the canvas goes for a frame of `area`, keeping the picture's
/// `aspect` (height / width).
pub fn canvas_area(area: Rect, aspect: f32) -> Rect {
    let inner = Block::default().borders(Borders::ALL).inner(split(area)[1]);
    let size = fit_canvas(inner.width as f32, aspect * CELL_ASPECT, inner.height as f32);
    Rect {
        x: inner.x,
        y: inner.y,
        width: (size.width.max(0.0) as u16).min(inner.width),
        height: (size.height.round().max(0.0) as u16).min(inner.height),
    }
}

pub fn draw(f: &mut Frame, app: &App, canvas: Rect) {
    let [header, body, footer] = split(f.area());
    draw_header(f, app, header);
    draw_picture(f, app, body, canvas);
    draw_footer(f, app, footer);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let (mode, color) = match app.tui_mode {
        TuiMode::Loading => ("LOADING", Color::Gray),
        TuiMode::Mask => ("PRIVACY MASK", Color::Cyan),
        TuiMode::Motion => ("MOTION GRID", Color::Green),
    };
    let title = format!(" Region Editor - {mode} ");
    let drawing = if app.editor.drawing_armed() {
        Span::styled(" DRAW ", Style::default().fg(Color::Black).bg(Color::Yellow))
    } else {
        Span::raw("")
    };
    let dirty = if app.dirty { " *" } else { "" };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        drawing,
        Span::raw(format!(
            " {}x{}{dirty}",
            app.zones.reference.width, app.zones.reference.height
        )),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn draw_picture(f: &mut Frame, app: &App, area: Rect, canvas: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Picture");
    f.render_widget(block, area);
    if canvas.width == 0 || canvas.height == 0 {
        return;
    }

    let grid = rasterize(&app.editor.scene(), canvas.width, canvas.height);
    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, color)| Span::styled(ch.to_string(), Style::default().fg(color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let picture = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(24, 24, 32)));
    f.render_widget(picture, canvas);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} | ", app.status), Style::default().fg(Color::Gray)),
        key("[A]"),
        Span::raw("Draw "),
        key("[D]"),
        Span::raw("Clear "),
        key("[W]"),
        Span::raw("Whole "),
        key("[M]"),
        Span::raw("Mask/Motion "),
        key("[S]"),
        Span::raw("ave "),
        Span::styled("[Q]", Style::default().fg(Color::Red)),
        Span::raw("uit"),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

type Cell = (char, Color);

/// Lay a display list out on a `width` x `height` character grid.
pub fn rasterize(ops: &[DrawOp], width: u16, height: u16) -> Vec<Vec<Cell>> {
    let (w, h) = (width as i32, height as i32);
    let mut grid = vec![vec![(' ', Color::Reset); width as usize]; height as usize];
    let put = |grid: &mut Vec<Vec<Cell>>, x: i32, y: i32, cell: Cell| {
        if (0..w).contains(&x) && (0..h).contains(&y) {
            grid[y as usize][x as usize] = cell;
        }
    };

    for op in ops {
        match op {
            DrawOp::Outline(r) => {
                let x0 = r.x.round() as i32;
                let y0 = r.y.round() as i32;
                let x1 = (r.x + r.width).round() as i32 - 1;
                let y1 = (r.y + r.height).round() as i32 - 1;
                if x1 < x0 || y1 < y0 {
                    continue;
                }
                for x in x0..=x1 {
                    put(&mut grid, x, y0, ('─', Color::Yellow));
                    put(&mut grid, x, y1, ('─', Color::Yellow));
                }
                for y in y0..=y1 {
                    put(&mut grid, x0, y, ('│', Color::Yellow));
                    put(&mut grid, x1, y, ('│', Color::Yellow));
                }
                put(&mut grid, x0, y0, ('┌', Color::Yellow));
                put(&mut grid, x1, y0, ('┐', Color::Yellow));
                put(&mut grid, x0, y1, ('└', Color::Yellow));
                put(&mut grid, x1, y1, ('┘', Color::Yellow));
            }
            DrawOp::Label { x, y, text, .. } => {
                let (x, y) = (x.round() as i32, y.round() as i32);
                for (i, ch) in text.chars().enumerate() {
                    put(&mut grid, x + i as i32, y, (ch, Color::White));
                }
            }
            DrawOp::Shade(r) => {
                let x0 = r.x.round() as i32;
                let y0 = r.y.round() as i32;
                let x1 = (r.x + r.width).round() as i32;
                let y1 = (r.y + r.height).round() as i32;
                for y in y0.max(0)..y1.min(h) {
                    for x in x0.max(0)..x1.min(w) {
                        if grid[y as usize][x as usize].0 == ' ' {
                            grid[y as usize][x as usize] = ('░', Color::DarkGray);
                        }
                    }
                }
            }
            DrawOp::Handle(r) => {
                let x = (r.x + r.width / 2.0).floor() as i32;
                let y = (r.y + r.height / 2.0).floor() as i32;
                put(&mut grid, x, y, ('■', Color::Red));
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use region_editor::Rect as CanvasRect;

    fn text(grid: &[Vec<Cell>]) -> Vec<String> {
        grid.iter().map(|row| row.iter().map(|c| c.0).collect()).collect()
    }

    #[test]
    fn test_outline_box() {
        let grid = rasterize(&[DrawOp::Outline(CanvasRect::new(1.0, 1.0, 4.0, 3.0))], 7, 5);
        assert_eq!(
            text(&grid),
            vec!["       ", " ┌──┐  ", " │  │  ", " └──┘  ", "       "]
        );
    }

    #[test]
    fn test_label_shade_and_clipping() {
        let ops = [
            DrawOp::Label {
                x: 0.0,
                y: 0.0,
                text: "Gate".to_string(),
                size: 16.0,
            },
            DrawOp::Shade(CanvasRect::new(0.0, 0.0, 10.0, 2.0)),
            DrawOp::Handle(CanvasRect::new(1.0, -2.0, 5.0, 5.0)),
        ];
        let grid = rasterize(&ops, 6, 2);
        assert_eq!(text(&grid), vec!["Gat■░░", "░░░░░░"]);
        assert_eq!(grid[0][0].1, Color::White);
    }

    #[test]
    fn test_canvas_keeps_aspect() {
        let area = Rect::new(0, 0, 100, 60);
        let canvas = canvas_area(area, 0.5625);
        assert_eq!((canvas.x, canvas.y), (1, 4));
        assert_eq!(canvas.width, 98);
        assert_eq!(canvas.height, 28);
    }
}

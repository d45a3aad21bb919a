use std::{
    collections::VecDeque,
    io::{self, Write},
    time::{Duration, Instant},
};

use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use blockfall_engine::{Event, Game, Phase, PieceKind, Rgb, Rotation};

/// What one board cell should be drawn as this frame, locked tiles overlaid
/// with the ghost and the active piece.
#[derive(Clone, Copy)]
enum Tile {
    Empty,
    Locked(PieceKind),
    Ghost(PieceKind),
    Active(PieceKind),
}

/// Full-frame renderer for a running game: bordered board with ghost piece,
/// clear-row flash and spawn fade, plus a sidebar with the next-piece
/// preview, score/level/line counters and transient notices.
#[derive(Debug)]
pub struct GameScreen {
    notices: VecDeque<(Instant, String)>,
}

impl GameScreen {
    const NOTICE_DURATION: Duration = Duration::from_secs(3);
    const NOTICE_COUNT: usize = 3;
    /// Where the sidebar starts, right of the 22-character board frame.
    const SIDEBAR_DX: u16 = 26;

    pub fn new() -> Self {
        Self {
            notices: VecDeque::new(),
        }
    }

    /// Turns engine feedback events into transient sidebar notices.
    pub fn push_events(&mut self, events: Vec<Event>) {
        for event in events {
            let notice = match event {
                Event::LinesClearing { rows } => match rows.len() {
                    1 => "Single!".to_owned(),
                    2 => "Double!".to_owned(),
                    3 => "Triple!".to_owned(),
                    _ => "Quadruple!".to_owned(),
                },
                Event::LevelUp { level } => format!("Level {level}!"),
                Event::GameOver => "Game Over".to_owned(),
                // Locks and drops happen constantly; not worth a message.
                Event::PieceLocked { .. } | Event::HardDropped { .. } => continue,
            };
            self.set_notice(notice);
        }
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notices.push_front((Instant::now(), notice.into()));
        self.notices.truncate(Self::NOTICE_COUNT);
    }

    pub fn render<T: Write>(
        &mut self,
        game: &Game,
        high_score: u32,
        (x_main, y_main): (u16, u16),
        term: &mut T,
        clear_all: bool,
    ) -> io::Result<()> {
        if clear_all {
            term.queue(Clear(ClearType::All))?;
        }
        self.notices
            .retain(|(since, _)| since.elapsed() < Self::NOTICE_DURATION);

        term.queue(MoveTo(x_main, y_main))?
            .queue(Print("+--------------------+"))?;
        term.queue(MoveTo(x_main, y_main + 1 + Game::HEIGHT as u16))?
            .queue(Print("+--------------------+"))?;

        let mut tiles = [[Tile::Empty; Game::WIDTH]; Game::HEIGHT];
        for (y, line) in game.grid().iter().enumerate() {
            for (x, cell) in line.iter().enumerate() {
                if let Some(kind) = cell {
                    tiles[y][x] = Tile::Locked(*kind);
                }
            }
        }
        // The active piece only exists on screen while it is controllable;
        // during the clear animation the locked tiles tell the story.
        let piece = game.piece();
        if matches!(game.phase(), Phase::Falling) {
            for (x, y) in piece.ghost_cells() {
                if let Some(tile) = tile_at(&mut tiles, x, y) {
                    *tile = Tile::Ghost(piece.kind());
                }
            }
            for (x, y) in piece.cells() {
                if let Some(tile) = tile_at(&mut tiles, x, y) {
                    *tile = Tile::Active(piece.kind());
                }
            }
        }

        let clearing = game.clearing();
        let appearing = game.spawn_fraction() < 0.5;
        for (y, line) in tiles.iter().enumerate() {
            term.queue(MoveTo(x_main, y_main + 1 + y as u16))?
                .queue(Print("|"))?;
            let flash = clearing.and_then(|(rows, fraction)| {
                rows.contains(&y).then_some(fraction)
            });
            for tile in line {
                let styled = match (*tile, flash) {
                    // Completed rows flash white first, then dim out.
                    (Tile::Locked(_), Some(fraction)) if fraction > 0.7 => "██".with(Color::White),
                    (Tile::Locked(kind), Some(_)) => "▒▒".with(color(kind.color().darker())),
                    (Tile::Locked(kind), None) => "██".with(color(kind.color())),
                    (Tile::Active(kind), _) => {
                        let rgb = if appearing {
                            kind.color().darker()
                        } else {
                            kind.color()
                        };
                        "██".with(color(rgb))
                    }
                    (Tile::Ghost(kind), _) => "░░".with(color(kind.color().darker())),
                    (Tile::Empty, _) => " .".with(Color::DarkGrey),
                };
                term.queue(PrintStyledContent(styled))?;
            }
            term.queue(Print("|"))?;
        }

        // Sidebar.
        let x_side = x_main + Self::SIDEBAR_DX;
        term.queue(MoveTo(x_side, y_main + 1))?.queue(Print("NEXT"))?;
        let next = game.next_kind();
        for dy in -1..=2i32 {
            term.queue(MoveTo(x_side, y_main + (3 + dy) as u16))?;
            for dx in -1..=1i32 {
                if next.cells(Rotation::R0).contains(&(dx, dy)) {
                    term.queue(PrintStyledContent("██".with(color(next.color()))))?;
                } else {
                    term.queue(Print("  "))?;
                }
            }
        }

        let stats = [
            (format!("SCORE  {:<10}", game.score()), 8),
            (format!("HIGH   {:<10}", high_score.max(game.score())), 9),
            (format!("LEVEL  {:<10}", game.level()), 11),
            (format!("LINES  {:<10}", game.lines_cleared()), 12),
        ];
        for (text, dy) in stats {
            term.queue(MoveTo(x_side, y_main + dy))?.queue(Print(text))?;
        }
        if game.config.zen {
            term.queue(MoveTo(x_side, y_main + 14))?
                .queue(Print("ZEN MODE"))?;
        }
        for i in 0..Self::NOTICE_COUNT {
            let notice = self
                .notices
                .get(i)
                .map(|(_, notice)| notice.as_str())
                .unwrap_or("");
            term.queue(MoveTo(x_side, y_main + 16 + i as u16))?
                .queue(PrintStyledContent(format!("{notice:<24}").italic()))?;
        }

        term.queue(MoveTo(x_main, y_main + 2 + Game::HEIGHT as u16))?
            .queue(PrintStyledContent(
                "[←|↓|→] move · [↑|z] rotate · [Space] drop · [Esc] pause"
                    .italic(),
            ))?;

        term.flush()?;
        Ok(())
    }
}

fn tile_at(
    tiles: &mut [[Tile; Game::WIDTH]; Game::HEIGHT],
    x: i32,
    y: i32,
) -> Option<&mut Tile> {
    if (0..Game::WIDTH as i32).contains(&x) && (0..Game::HEIGHT as i32).contains(&y) {
        Some(&mut tiles[y as usize][x as usize])
    } else {
        None
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

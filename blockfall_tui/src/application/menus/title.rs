use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Color, Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use blockfall_engine::PieceKind;

use crate::application::{Application, Menu, MenuUpdate};

impl<T: Write> Application<T> {
    pub(in crate::application) fn run_menu_title(&mut self) -> io::Result<MenuUpdate> {
        let selection = ["Play", "Quit"];
        let mut selected = 0usize;
        loop {
            let w_main: usize = Self::W_MAIN.into();
            let (x_main, y_main) = Self::fetch_main_xy();
            let y_selection = Self::H_MAIN / 5;

            let title = [
                "█▀▀▄ █   ▄▀▀▄ ▄▀▀▄ █ ▄▀ █▀▀▀ ▄▀▀▄ █   █  ",
                "█▀▀▄ █   █  █ █    █▀▄  █▀▀  █▀▀█ █   █  ",
                "█▄▄▀ █▄▄ ▀▄▄▀ ▀▄▄▀ █ ▀▄ █    █  █ █▄▄ █▄▄",
            ];
            let title_colors = "5555 666 1111 0000 3333 4444 2222 666 666";

            self.term.queue(Clear(ClearType::All))?;

            let dx_title = w_main.saturating_sub(41) / 2;

            for (dy, bline) in title.iter().enumerate() {
                for (dx, (bchar, cchar)) in bline.chars().zip(title_colors.chars()).enumerate() {
                    self.term.queue(MoveTo(
                        x_main + u16::try_from(dx_title + dx).unwrap(),
                        y_main + y_selection + u16::try_from(dy).unwrap(),
                    ))?;

                    self.term.queue(PrintStyledContent(bchar.to_string().with(
                        match cchar.to_digit(10) {
                            Some(digit) => {
                                let rgb = PieceKind::VARIANTS[digit as usize].color();
                                Color::Rgb {
                                    r: rgb.r,
                                    g: rgb.g,
                                    b: rgb.b,
                                }
                            }
                            None => Color::Reset,
                        },
                    )))?;
                }
            }

            self.term
                .queue(MoveTo(x_main, y_main + y_selection + 4))?
                .queue(Print(format!(
                    "{:^w_main$}",
                    format!("High Score: {}", self.high_score)
                )))?;

            for (i, name) in selection.iter().enumerate() {
                self.term
                    .queue(MoveTo(
                        x_main,
                        y_main + y_selection + 6 + u16::try_from(i).unwrap(),
                    ))?
                    .queue(Print(format!(
                        "{:^w_main$}",
                        if i == selected {
                            format!(">> {name} <<")
                        } else {
                            name.to_string()
                        }
                    )))?;
            }
            self.term
                .queue(MoveTo(
                    x_main,
                    y_main + y_selection + 6 + u16::try_from(selection.len()).unwrap() + 2,
                ))?
                .queue(PrintStyledContent(
                    format!("{:^w_main$}", "(Controls: [↑|↓] [Esc|Enter] / jke)").italic(),
                ))?;

            self.term.flush()?;

            // Wait for new input.
            match event::read()? {
                // Quit application.
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c' | 'C'),
                    modifiers: KeyModifiers::CONTROL,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    state: _,
                }) => break Ok(MenuUpdate::Push(Menu::Quit)),
                Event::Key(KeyEvent {
                    code: KeyCode::Esc | KeyCode::Char('q' | 'Q'),
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    selected = selection.len() - 1;
                }
                // Confirm selection.
                Event::Key(KeyEvent {
                    code: KeyCode::Enter | KeyCode::Char('e' | 'E'),
                    kind: KeyEventKind::Press,
                    ..
                }) => {
                    let menu = match selected {
                        0 => self.new_game(),
                        _ => Menu::Quit,
                    };
                    break Ok(MenuUpdate::Push(menu));
                }
                // Move selector up.
                Event::Key(KeyEvent {
                    code: KeyCode::Up | KeyCode::Char('k' | 'K'),
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => {
                    selected += selection.len() - 1;
                }
                // Move selector down.
                Event::Key(KeyEvent {
                    code: KeyCode::Down | KeyCode::Char('j' | 'J'),
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => {
                    selected += 1;
                }
                // Other event: don't care.
                _ => {}
            }
            selected = selected.rem_euclid(selection.len());
        }
    }
}

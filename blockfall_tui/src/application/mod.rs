mod menus;

use std::{
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
};

use crossterm::{cursor, event::KeyboardEnhancementFlags, style, terminal, ExecutableCommand};

use blockfall_engine::Game;

use crate::game_screen::GameScreen;

/// One finished round on the scoreboard.
#[derive(
    PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Debug, serde::Serialize, serde::Deserialize,
)]
pub struct ScoresEntry {
    pub datetime: String,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

/// Everything that survives between sessions.
#[derive(PartialEq, Eq, Clone, Default, Debug, serde::Serialize, serde::Deserialize)]
struct Savefile {
    high_score: u32,
    scoreboard: Vec<ScoresEntry>,
}

#[derive(Debug)]
enum Menu {
    Title,
    PlayGame {
        game: Box<Game>,
        screen: Box<GameScreen>,
    },
    Pause,
    GameOver(Box<ScoresEntry>),
    Quit,
}

#[derive(Debug)]
enum MenuUpdate {
    Pop,
    Push(Menu),
}

pub struct Application<T: Write> {
    term: T,
    kitty_assumed: bool,
    high_score: u32,
    scoreboard: Vec<ScoresEntry>,
    start_seed: Option<u64>,
    zen: bool,
}

impl<T: Write> Drop for Application<T> {
    fn drop(&mut self) {
        // (Try to) undo terminal setup.
        let _ = terminal::disable_raw_mode();
        let _ = self.term.execute(style::ResetColor);
        let _ = self.term.execute(cursor::Show);
        let _ = self.term.execute(terminal::LeaveAlternateScreen);

        // Persist high score and scoreboard using the file system.
        if let Err(e) = self.store_savefile(Self::savefile_path()) {
            eprintln!("{e}");
        }
    }
}

impl<T: Write> Application<T> {
    pub const W_MAIN: u16 = 62;
    pub const H_MAIN: u16 = 23;

    pub const SAVEFILE_NAME: &'static str = ".blockfall_savefile.json";

    pub const KEYBOARD_ENHANCEMENT_FLAGS: KeyboardEnhancementFlags =
        KeyboardEnhancementFlags::all();

    pub fn new(mut term: T, start_seed: Option<u64>, zen: bool) -> Self {
        // Console prologue: Initialization.
        let _v = term.execute(terminal::EnterAlternateScreen);
        let _v = term.execute(terminal::SetTitle("Blockfall"));
        let _v = term.execute(cursor::Hide);
        let _v = terminal::enable_raw_mode();
        let mut app = Self {
            term,
            kitty_assumed: false,
            high_score: 0,
            scoreboard: Vec::new(),
            start_seed,
            zen,
        };

        // A missing or unreadable savefile degrades to the defaults above,
        // high score zero included.
        let _v = app.load_savefile(Self::savefile_path());

        app.kitty_assumed = terminal::supports_keyboard_enhancement().unwrap_or(false);
        app
    }

    pub(crate) fn fetch_main_xy() -> (u16, u16) {
        let (w_console, h_console) = terminal::size().unwrap_or((0, 0));
        (
            w_console.saturating_sub(Self::W_MAIN) / 2,
            h_console.saturating_sub(Self::H_MAIN) / 2,
        )
    }

    fn savefile_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::SAVEFILE_NAME)
    }

    fn store_savefile(&mut self, path: PathBuf) -> io::Result<()> {
        let save_state = Savefile {
            high_score: self.high_score,
            scoreboard: self.scoreboard.clone(),
        };
        let save_str = serde_json::to_string(&save_state)?;
        let mut file = File::create(path)?;

        let n_written = file.write(save_str.as_bytes())?;

        // Handle the case when save_str could not be written entirely.
        if n_written < save_str.len() {
            Err(io::Error::other(
                "attempt to write to file consumed `n < save_str.len()` bytes",
            ))
        } else {
            Ok(())
        }
    }

    fn load_savefile(&mut self, path: PathBuf) -> io::Result<()> {
        let mut file = File::open(path)?;
        let mut save_str = String::new();
        file.read_to_string(&mut save_str)?;
        let Savefile {
            high_score,
            scoreboard,
        } = serde_json::from_str(&save_str)?;

        self.high_score = high_score;
        self.scoreboard = scoreboard;

        Ok(())
    }

    /// Builds a fresh game from the session's command-line options.
    fn new_game(&self) -> Menu {
        let mut builder = Game::builder();
        if let Some(seed) = self.start_seed {
            builder.seed(seed);
        }
        builder.zen(self.zen);
        Menu::PlayGame {
            game: Box::new(builder.build()),
            screen: Box::new(GameScreen::new()),
        }
    }

    /// Puts a finished round on the scoreboard and updates the high score.
    fn record_finished_game(&mut self, game: &Game) -> ScoresEntry {
        let entry = ScoresEntry {
            datetime: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            score: game.score(),
            level: game.level(),
            lines: game.lines_cleared(),
        };
        self.high_score = self.high_score.max(entry.score);
        self.scoreboard.push(entry.clone());
        entry
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut menu_stack = vec![Menu::Title];
        loop {
            // Retrieve active menu, stop application if stack is empty.
            let Some(menu) = menu_stack.last_mut() else {
                break;
            };
            // Open new menu screen, then store what it returns.
            let menu_update = match menu {
                Menu::Title => self.run_menu_title(),
                Menu::PlayGame { game, screen } => self.run_menu_play_game(game, screen),
                Menu::Pause => self.run_menu_pause(),
                Menu::GameOver(entry) => self.run_menu_game_over(entry),
                Menu::Quit => break,
            }?;

            // Change screen session depending on what response screen gave.
            match menu_update {
                MenuUpdate::Pop => {
                    if menu_stack.len() > 1 {
                        menu_stack.pop();
                    }
                }
                MenuUpdate::Push(menu) => {
                    if matches!(menu, Menu::Title | Menu::PlayGame { .. } | Menu::GameOver(_)) {
                        menu_stack.clear();
                    }
                    menu_stack.push(menu);
                }
            }
        }

        Ok(())
    }
}

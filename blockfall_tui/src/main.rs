mod application;
mod game_screen;
mod live_input;

use std::io;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Custom starting seed, given as a 64-bit integer.
    /// This determines the sequence of pieces dealt and makes it possible to
    /// replay a run with the same pieces if the same seed is entered.
    /// Example: `./blockfall_tui --seed=42` or `./blockfall_tui -s 42`.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Zen mode: the game never ends, blocked spawns are tolerated.
    #[arg(short, long)]
    zen: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Read commandline arguments.
    let args = Args::parse();

    // Initialize application.
    let stdout = io::BufWriter::new(io::stdout());
    let mut app = application::Application::new(stdout, args.seed, args.zen);

    // Catch panics and print the error after force-resetting the terminal,
    // so it isn't lost to the alternate screen.
    std::panic::set_hook(Box::new(|panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ =
            crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::style::ResetColor);
        let _ = crossterm::ExecutableCommand::execute(&mut io::stderr(), crossterm::cursor::Show);
        let _ = crossterm::ExecutableCommand::execute(
            &mut io::stderr(),
            crossterm::terminal::LeaveAlternateScreen,
        );

        eprint!("{panic_info}\n\n");
    }));

    // Run main application.
    app.run()?;

    Ok(())
}

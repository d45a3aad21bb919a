use std::{
    io::{self, Write},
    sync::mpsc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    ExecutableCommand,
};

use blockfall_engine::{Button, ButtonChange, Game};

use crate::{
    application::{Application, Menu, MenuUpdate},
    game_screen::GameScreen,
    live_input::{self, LiveTermSignal},
};

impl<T: Write> Application<T> {
    pub(in crate::application) fn run_menu_play_game(
        &mut self,
        game: &mut Game,
        screen: &mut GameScreen,
    ) -> io::Result<MenuUpdate> {
        /* The game loop recipe looks like this:
          * Enter 'update_and_render loop:
            - If the game has ended, break loop into the game-over menu.
            - Enter 'wait loop (budget based on the next frame time):
              + Feed player input into the game as it arrives.
              + If the budget ran out, break loop.
            - Do game.update() with the real time that passed.
            - Do screen.render().
            - Continue 'update_and_render.
        */

        // Toggle on enhanced-keyboard-events where the terminal has them;
        // elsewhere key releases are synthesized right after each press.
        if self.kitty_assumed {
            let flags = Self::KEYBOARD_ENHANCEMENT_FLAGS;
            let _v = self.term.execute(event::PushKeyboardEnhancementFlags(flags));
        }

        // Prepare channel from which to receive terminal inputs.
        let (input_sender, input_receiver) = mpsc::channel();

        // Spawn input handler thread.
        let _join_handle = live_input::spawn(input_sender, live_input::default_keybinds());

        let frame_interval = Duration::from_secs_f64(1.0 / 30.0);

        // Initial render.
        screen.render(
            game,
            self.high_score,
            Self::fetch_main_xy(),
            &mut self.term,
            true,
        )?;

        // Explicitly tells the renderer if the entire screen needs one redraw.
        let mut rerender_entire_view = false;

        let mut last_update = Instant::now();
        let mut time_next_frame = Instant::now();

        // Main Game Loop

        let menu_update = 'update_and_render: loop {
            if game.over() {
                let entry = self.record_finished_game(game);
                break 'update_and_render MenuUpdate::Push(Menu::GameOver(Box::new(entry)));
            }

            // Calculate the time of the next render we can catch.
            // We just skip any frame whose window we missed anyway.
            let now = Instant::now();
            loop {
                time_next_frame += frame_interval;
                if time_next_frame >= now {
                    break;
                }
            }

            'wait: loop {
                // Compute duration left until we should stop waiting.
                let refresh_time_budget_remaining =
                    time_next_frame.saturating_duration_since(Instant::now());

                // Read terminal signal or finish waiting.
                match input_receiver.recv_timeout(refresh_time_budget_remaining) {
                    Ok((signal, _timestamp)) => match signal {
                        // Found a recognized game input: use it.
                        LiveTermSignal::RecognizedButton(button, key_event_kind) => {
                            if self.kitty_assumed {
                                // Enhanced keyboard events: a determinate
                                // single press or release.
                                let button_change = match key_event_kind {
                                    KeyEventKind::Press => ButtonChange::Press(button),
                                    // Kitty does not care about terminal/OS
                                    // keyboard 'repeat' events.
                                    KeyEventKind::Repeat => continue 'wait,
                                    KeyEventKind::Release => ButtonChange::Release(button),
                                };
                                screen.push_events(game.handle(button_change));
                            } else {
                                // Some terminals STILL send "release" events
                                // despite us assuming it's not enhanced.
                                if matches!(key_event_kind, KeyEventKind::Release) {
                                    continue 'wait;
                                }

                                // Non-enhanced terminal - no "release" events
                                // exist, so treat a button press as an
                                // instantaneous sequence of press+release.
                                screen.push_events(game.handle(ButtonChange::Press(button)));
                                screen.push_events(game.handle(ButtonChange::Release(button)));
                            }
                        }

                        // Some other input that is not an in-game action.
                        LiveTermSignal::RawEvent(raw_event) => match raw_event {
                            event::Event::Key(KeyEvent {
                                code,
                                modifiers,
                                kind,
                                state: _,
                            }) => {
                                if !matches!(kind, KeyEventKind::Press) {
                                    continue 'wait;
                                }

                                match (code, modifiers) {
                                    // [Esc]: Pause.
                                    (KeyCode::Esc, _) => {
                                        break 'update_and_render MenuUpdate::Push(Menu::Pause);
                                    }

                                    // [Ctrl+C]: Abort program.
                                    (KeyCode::Char('c' | 'C'), KeyModifiers::CONTROL) => {
                                        break 'update_and_render MenuUpdate::Push(Menu::Quit);
                                    }

                                    // [Ctrl+R]: Restart round in place.
                                    (KeyCode::Char('r' | 'R'), KeyModifiers::CONTROL) => {
                                        game.reset();
                                        screen.set_notice("(Game restarted!)");
                                        rerender_entire_view = true;
                                        break 'wait;
                                    }

                                    // Other misc. key event: we don't care.
                                    _ => continue 'wait,
                                }
                            }

                            event::Event::Resize(_, _) => {
                                // Need to redraw screen for proper centering.
                                rerender_entire_view = true;
                                break 'wait;
                            }

                            _ => {}
                        },
                    },

                    Err(recv_timeout_error) => {
                        match recv_timeout_error {
                            // Frame budget expired on its own: leave wait loop.
                            mpsc::RecvTimeoutError::Timeout => {
                                break 'wait;
                            }

                            // Input handler thread died... Pause game for now.
                            mpsc::RecvTimeoutError::Disconnected => {
                                break 'update_and_render MenuUpdate::Push(Menu::Pause);
                            }
                        }
                    }
                }
            }

            // Update with however much real time passed since the last pass.
            let now = Instant::now();
            screen.push_events(game.update(now.saturating_duration_since(last_update)));
            last_update = now;

            // Render current state of the game.
            screen.render(
                game,
                self.high_score,
                Self::fetch_main_xy(),
                &mut self.term,
                rerender_entire_view,
            )?;
            rerender_entire_view = false;
        };

        // Game loop epilogue: De-initialization.

        if self.kitty_assumed {
            let _v = self.term.execute(event::PopKeyboardEnhancementFlags);
        }

        if !game.over() {
            // Manually release any pressed buttons so pausing doesn't leave
            // a phantom key held when play resumes.
            for button in Button::VARIANTS {
                game.handle(ButtonChange::Release(button));
            }
        }

        Ok(menu_update)
    }
}

use std::{
    collections::HashMap,
    sync::mpsc::{SendError, Sender},
    thread::{self, JoinHandle},
    time::Instant,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use blockfall_engine::Button;

pub type Keybinds = HashMap<(KeyCode, KeyModifiers), Button>;

/// Normalize character keycodes to lowercase so keybind lookup is not
/// affected by Shift or Caps Lock.
pub fn normalize((mut code, modifiers): (KeyCode, KeyModifiers)) -> (KeyCode, KeyModifiers) {
    if let KeyCode::Char(ref mut char) = code {
        *char = char.to_ascii_lowercase();
    }
    (code, modifiers)
}

pub fn default_keybinds() -> Keybinds {
    let keybinds: [((KeyCode, KeyModifiers), Button); 6] = [
        (KeyCode::Left, Button::MoveLeft),
        (KeyCode::Right, Button::MoveRight),
        (KeyCode::Up, Button::RotateCw),
        (KeyCode::Char('z'), Button::RotateCcw),
        (KeyCode::Down, Button::DropSoft),
        (KeyCode::Char(' '), Button::DropHard),
    ]
    .map(|(k, b)| ((k, KeyModifiers::NONE), b));
    HashMap::from(keybinds)
}

pub enum LiveTermSignal {
    RecognizedButton(Button, KeyEventKind),
    RawEvent(Event),
}

pub fn spawn(
    input_sender: Sender<(LiveTermSignal, Instant)>,
    keybinds: Keybinds,
) -> JoinHandle<()> {
    thread::spawn(move || {
        'detect_events: loop {
            // Read event.
            match event::read() {
                Ok(event) => {
                    let timestamp = Instant::now();

                    let mut stop_thread = false;

                    let signal = match event {
                        Event::Key(KeyEvent {
                            code,
                            modifiers,
                            kind,
                            ..
                        }) => {
                            let is_press_or_repeat =
                                matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat);
                            let escape = matches!(code, KeyCode::Esc);
                            let ctrl_c = matches!(code, KeyCode::Char('c'))
                                && matches!(modifiers, KeyModifiers::CONTROL);

                            // The menu taking back over will spawn a fresh
                            // input thread; this one must not keep competing
                            // for terminal events.
                            if is_press_or_repeat && (escape || ctrl_c) {
                                stop_thread = true;
                            }

                            match keybinds.get(&normalize((code, modifiers))) {
                                // No binding: just directly transmit whatever the event was.
                                None => LiveTermSignal::RawEvent(event),

                                // Binding found: send button un-/press.
                                Some(&button) => LiveTermSignal::RecognizedButton(button, kind),
                            }
                        }

                        // Not a key event, just send directly.
                        _ => LiveTermSignal::RawEvent(event),
                    };

                    // Send signal.
                    match input_sender.send((signal, timestamp)) {
                        Ok(()) => {}
                        Err(SendError(_event_which_failed_to_transmit)) => {
                            break 'detect_events;
                        }
                    }

                    if stop_thread {
                        break 'detect_events;
                    }
                }

                Err(_e) => {}
            }
        }
    })
}

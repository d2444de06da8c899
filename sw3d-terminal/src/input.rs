/// Keyboard polling through crossterm events
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashSet;
use std::io;
use std::time::Duration;
use sw3d_core::{InputSource, InputSymbol};

/// Keys bound to each input symbol
pub fn bindings(symbol: InputSymbol) -> &'static [KeyCode] {
    match symbol {
        InputSymbol::TurnLeft => &[KeyCode::Left],
        InputSymbol::TurnRight => &[KeyCode::Right],
        InputSymbol::PitchUp => &[KeyCode::Up],
        InputSymbol::PitchDown => &[KeyCode::Down],
        InputSymbol::Forward => &[KeyCode::Char('w')],
        InputSymbol::Backward => &[KeyCode::Char('s')],
        InputSymbol::StrafeLeft => &[KeyCode::Char('a')],
        InputSymbol::StrafeRight => &[KeyCode::Char('d')],
        InputSymbol::Up => &[KeyCode::Char('e')],
        InputSymbol::Down => &[KeyCode::Char('q')],
        InputSymbol::ToggleAxis => &[KeyCode::Char('t')],
        InputSymbol::ToggleWireframe => &[KeyCode::Char('y')],
    }
}

/// Key presses collected between frames
#[derive(Debug, Default)]
pub struct KeyboardInput {
    pressed: HashSet<KeyCode>,
    quit: bool,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every pending terminal event without blocking
    pub fn collect(&mut self) -> io::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.record(key);
            }
        }
        Ok(())
    }

    pub fn record(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char(c) => {
                self.pressed.insert(KeyCode::Char(c.to_ascii_lowercase()));
            }
            code => {
                self.pressed.insert(code);
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Forget this frame's presses once every symbol has been polled
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }
}

impl InputSource for KeyboardInput {
    fn was_activated(&mut self, symbol: InputSymbol) -> bool {
        bindings(symbol).iter().any(|key| self.pressed.contains(key))
    }
}

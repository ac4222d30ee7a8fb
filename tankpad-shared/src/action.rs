/// A logical game action driven by one on-screen control region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Fire,
    ];

    /// Flags asserted while this action's region is held.
    ///
    /// Movement drives both the semantic WASD flag and the raw arrow flag,
    /// since the game loop may consult either one.
    pub fn flags(self) -> &'static [KeyFlag] {
        match self {
            Action::MoveUp => &[KeyFlag::W, KeyFlag::ArrowUp],
            Action::MoveDown => &[KeyFlag::S, KeyFlag::ArrowDown],
            Action::MoveLeft => &[KeyFlag::A, KeyFlag::ArrowLeft],
            Action::MoveRight => &[KeyFlag::D, KeyFlag::ArrowRight],
            Action::Fire => &[KeyFlag::Space],
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Caption rendered on the button.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "↑",
            Action::MoveDown => "↓",
            Action::MoveLeft => "←",
            Action::MoveRight => "→",
            Action::Fire => "FIRE",
        }
    }

    pub fn is_movement(self) -> bool {
        !matches!(self, Action::Fire)
    }
}

/// A named boolean on the game's shared `keys` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFlag {
    W,
    S,
    A,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
}

impl KeyFlag {
    pub const COUNT: usize = 9;

    pub const ALL: [KeyFlag; KeyFlag::COUNT] = [
        KeyFlag::W,
        KeyFlag::S,
        KeyFlag::A,
        KeyFlag::D,
        KeyFlag::ArrowUp,
        KeyFlag::ArrowDown,
        KeyFlag::ArrowLeft,
        KeyFlag::ArrowRight,
        KeyFlag::Space,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Property name on the JS `keys` object.
    pub fn name(self) -> &'static str {
        match self {
            KeyFlag::W => "w",
            KeyFlag::S => "s",
            KeyFlag::A => "a",
            KeyFlag::D => "d",
            KeyFlag::ArrowUp => "arrowUp",
            KeyFlag::ArrowDown => "arrowDown",
            KeyFlag::ArrowLeft => "arrowLeft",
            KeyFlag::ArrowRight => "arrowRight",
            KeyFlag::Space => "space",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        KeyFlag::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Map a `KeyboardEvent.key` value onto a flag.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(KeyFlag::W),
            "s" | "S" => Some(KeyFlag::S),
            "a" | "A" => Some(KeyFlag::A),
            "d" | "D" => Some(KeyFlag::D),
            "ArrowUp" => Some(KeyFlag::ArrowUp),
            "ArrowDown" => Some(KeyFlag::ArrowDown),
            "ArrowLeft" => Some(KeyFlag::ArrowLeft),
            "ArrowRight" => Some(KeyFlag::ArrowRight),
            " " | "Space" | "Spacebar" => Some(KeyFlag::Space),
            _ => None,
        }
    }
}

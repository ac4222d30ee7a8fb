use crate::action::KeyFlag;

/// Where an assertion of a flag comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard,
    Touch,
}

impl InputSource {
    fn bit(self) -> u8 {
        match self {
            InputSource::Keyboard => 0b01,
            InputSource::Touch => 0b10,
        }
    }
}

/// Aggregated key state read by the game loop once per frame.
///
/// Every flag keeps the set of sources currently asserting it; the flag is
/// held while any source holds it.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    sources: [u8; KeyFlag::COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert `flag` for `source`. Returns true if the effective value changed.
    pub fn set(&mut self, source: InputSource, flag: KeyFlag) -> bool {
        let slot = &mut self.sources[flag.index()];
        let was_held = *slot != 0;
        *slot |= source.bit();
        !was_held
    }

    /// Withdraw `source`'s assertion of `flag`. Returns true if the effective
    /// value changed.
    pub fn clear(&mut self, source: InputSource, flag: KeyFlag) -> bool {
        let slot = &mut self.sources[flag.index()];
        let was_held = *slot != 0;
        *slot &= !source.bit();
        was_held && *slot == 0
    }

    pub fn is_held(&self, flag: KeyFlag) -> bool {
        self.sources[flag.index()] != 0
    }

    pub fn is_held_by(&self, source: InputSource, flag: KeyFlag) -> bool {
        self.sources[flag.index()] & source.bit() != 0
    }

    pub fn any_held(&self) -> bool {
        self.sources.iter().any(|s| *s != 0)
    }

    /// Copy of the effective flags for one frame.
    pub fn snapshot(&self) -> KeySnapshot {
        let mut held = [false; KeyFlag::COUNT];
        for flag in KeyFlag::ALL {
            held[flag.index()] = self.is_held(flag);
        }
        KeySnapshot { held }
    }
}

/// Frozen view of [`KeyState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySnapshot {
    held: [bool; KeyFlag::COUNT],
}

impl KeySnapshot {
    pub fn is_held(&self, flag: KeyFlag) -> bool {
        self.held[flag.index()]
    }

    pub fn held_flags(&self) -> impl Iterator<Item = KeyFlag> + '_ {
        KeyFlag::ALL.into_iter().filter(|flag| self.is_held(*flag))
    }
}

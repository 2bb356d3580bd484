//! Key mapping for broadcast input
//!
//! Converts key events to the byte sequences a remote shell expects. The
//! mapping is table driven: an ordered list of modifier chords, a table of
//! named keys, and plain printable characters.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
        /// Platform meta (Cmd / Super)
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Control or platform meta held
    pub fn has_command(self) -> bool {
        self.intersects(Modifiers::CTRL | Modifiers::META)
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        if mods.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            result |= Modifiers::META;
        }
        result
    }
}

/// A key, named the way keyboard events name them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    /// Anything with no terminal meaning (Shift alone, CapsLock, ...)
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`"ArrowUp"`, `"F5"`, `"a"`)
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Key::Char(ch);
        }
        match name {
            "Enter" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Insert" => Key::Insert,
            _ => name
                .strip_prefix('F')
                .and_then(|n| n.parse::<u8>().ok())
                .map_or(Key::Other, Key::F),
        }
    }
}

/// A key press with its modifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::empty())
    }

    pub fn ctrl(ch: char) -> Self {
        Self::new(Key::Char(ch), Modifiers::CTRL)
    }
}

impl From<&KeyEvent> for KeyInput {
    fn from(event: &KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Other,
        };
        Self::new(key, Modifiers::from(event.modifiers))
    }
}

/// Control/meta chords, checked before anything else
const CONTROL_CHORDS: &[(char, &[u8])] = &[
    ('c', b"\x03"), // interrupt
    ('d', b"\x04"), // EOF
    ('l', b"\x0c"), // clear screen
    ('u', b"\x15"), // kill line
    ('k', b"\x0b"), // kill to end of line
    ('a', b"\x01"), // line start
    ('e', b"\x05"), // line end
    ('w', b"\x17"), // delete word
];

/// Named keys
const NAMED_KEYS: &[(Key, &[u8])] = &[
    (Key::Enter, b"\n"),
    (Key::Backspace, b"\x08"),
    (Key::Delete, b"\x7f"),
    (Key::Tab, b"\x09"),
    (Key::Escape, b"\x1b"),
    (Key::ArrowUp, b"\x1b[A"),
    (Key::ArrowDown, b"\x1b[B"),
    (Key::ArrowLeft, b"\x1b[D"),
    (Key::ArrowRight, b"\x1b[C"),
    (Key::Home, b"\x1b[H"),
    (Key::End, b"\x1b[F"),
    (Key::PageUp, b"\x1b[5~"),
    (Key::PageDown, b"\x1b[6~"),
    (Key::Insert, b"\x1b[2~"),
    (Key::F(1), b"\x1bOP"),
    (Key::F(2), b"\x1bOQ"),
    (Key::F(3), b"\x1bOR"),
    (Key::F(4), b"\x1bOS"),
    (Key::F(5), b"\x1b[15~"),
    (Key::F(6), b"\x1b[17~"),
    (Key::F(7), b"\x1b[18~"),
    (Key::F(8), b"\x1b[19~"),
    (Key::F(9), b"\x1b[20~"),
    (Key::F(10), b"\x1b[21~"),
    (Key::F(11), b"\x1b[23~"),
    (Key::F(12), b"\x1b[24~"),
];

/// Key mapper for converting key presses to bytes
pub struct KeyMapper;

impl KeyMapper {
    /// Map a key press to the bytes a shell expects.
    ///
    /// `Some` means the event is consumed; `None` leaves it to the UI. While
    /// control or meta is held only the chord table applies.
    pub fn translate(input: &KeyInput) -> Option<Vec<u8>> {
        if input.modifiers.has_command() {
            return Self::chord(input.key).map(<[u8]>::to_vec);
        }
        if let Some(bytes) = Self::named(input.key) {
            return Some(bytes.to_vec());
        }
        match input.key {
            Key::Char(ch) if !ch.is_control() => Some(ch.to_string().into_bytes()),
            _ => None,
        }
    }

    fn chord(key: Key) -> Option<&'static [u8]> {
        let Key::Char(ch) = key else {
            return None;
        };
        CONTROL_CHORDS
            .iter()
            .find(|(chord, _)| *chord == ch)
            .map(|(_, bytes)| *bytes)
    }

    fn named(key: Key) -> Option<&'static [u8]> {
        NAMED_KEYS
            .iter()
            .find(|(named, _)| *named == key)
            .map(|(_, bytes)| *bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(name: &str, mods: Modifiers) -> Option<Vec<u8>> {
        KeyMapper::translate(&KeyInput::new(Key::from_name(name), mods))
    }

    #[test]
    fn test_control_chords() {
        let expected: &[(&str, u8)] = &[
            ("c", 0x03),
            ("d", 0x04),
            ("l", 0x0c),
            ("u", 0x15),
            ("k", 0x0b),
            ("a", 0x01),
            ("e", 0x05),
            ("w", 0x17),
        ];
        for &(key, code) in expected {
            assert_eq!(translate(key, Modifiers::CTRL), Some(vec![code]), "Ctrl+{}", key);
            assert_eq!(translate(key, Modifiers::META), Some(vec![code]), "Meta+{}", key);
        }
    }

    #[test]
    fn test_other_chords_are_not_consumed() {
        assert_eq!(translate("x", Modifiers::CTRL), None);
        assert_eq!(translate("C", Modifiers::CTRL | Modifiers::SHIFT), None);
        assert_eq!(translate("Enter", Modifiers::CTRL), None);
        assert_eq!(translate("ArrowUp", Modifiers::META), None);
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(translate("Enter", Modifiers::empty()), Some(b"\n".to_vec()));
        assert_eq!(translate("Backspace", Modifiers::empty()), Some(b"\x08".to_vec()));
        assert_eq!(translate("Delete", Modifiers::empty()), Some(b"\x7f".to_vec()));
        assert_eq!(translate("Tab", Modifiers::empty()), Some(b"\t".to_vec()));
        assert_eq!(translate("Escape", Modifiers::empty()), Some(b"\x1b".to_vec()));
        assert_eq!(translate("ArrowUp", Modifiers::empty()), Some(b"\x1b[A".to_vec()));
        assert_eq!(translate("ArrowDown", Modifiers::empty()), Some(b"\x1b[B".to_vec()));
        assert_eq!(translate("ArrowLeft", Modifiers::empty()), Some(b"\x1b[D".to_vec()));
        assert_eq!(translate("ArrowRight", Modifiers::empty()), Some(b"\x1b[C".to_vec()));
        assert_eq!(translate("Home", Modifiers::empty()), Some(b"\x1b[H".to_vec()));
        assert_eq!(translate("End", Modifiers::empty()), Some(b"\x1b[F".to_vec()));
        assert_eq!(translate("PageUp", Modifiers::empty()), Some(b"\x1b[5~".to_vec()));
        assert_eq!(translate("PageDown", Modifiers::empty()), Some(b"\x1b[6~".to_vec()));
        assert_eq!(translate("Insert", Modifiers::empty()), Some(b"\x1b[2~".to_vec()));
    }

    #[test]
    fn test_function_keys() {
        let expected: [&[u8]; 12] = [
            b"\x1bOP",
            b"\x1bOQ",
            b"\x1bOR",
            b"\x1bOS",
            b"\x1b[15~",
            b"\x1b[17~",
            b"\x1b[18~",
            b"\x1b[19~",
            b"\x1b[20~",
            b"\x1b[21~",
            b"\x1b[23~",
            b"\x1b[24~",
        ];
        for (i, bytes) in expected.iter().enumerate() {
            let name = format!("F{}", i + 1);
            assert_eq!(translate(&name, Modifiers::empty()), Some(bytes.to_vec()), "{}", name);
        }
        assert_eq!(translate("F13", Modifiers::empty()), None);
    }

    #[test]
    fn test_named_keys_ignore_shift_and_alt() {
        assert_eq!(translate("ArrowUp", Modifiers::SHIFT), Some(b"\x1b[A".to_vec()));
        assert_eq!(translate("Tab", Modifiers::ALT), Some(b"\t".to_vec()));
    }

    #[test]
    fn test_printable_characters() {
        assert_eq!(translate("a", Modifiers::empty()), Some(b"a".to_vec()));
        assert_eq!(translate("A", Modifiers::SHIFT), Some(b"A".to_vec()));
        assert_eq!(translate(" ", Modifiers::empty()), Some(b" ".to_vec()));
        assert_eq!(translate("é", Modifiers::empty()), Some("é".as_bytes().to_vec()));
        assert_eq!(translate("x", Modifiers::ALT), Some(b"x".to_vec()));
    }

    #[test]
    fn test_unmapped_keys_are_not_consumed() {
        assert_eq!(translate("Shift", Modifiers::SHIFT), None);
        assert_eq!(translate("CapsLock", Modifiers::empty()), None);
        assert_eq!(KeyMapper::translate(&KeyInput::plain(Key::Char('\u{7}'))), None);
    }

    #[test]
    fn test_translate_is_pure() {
        let inputs = [
            KeyInput::ctrl('c'),
            KeyInput::plain(Key::F(5)),
            KeyInput::plain(Key::Char('q')),
            KeyInput::plain(Key::Other),
        ];
        let first: Vec<_> = inputs.iter().map(KeyMapper::translate).collect();
        let again: Vec<_> = inputs.iter().rev().map(KeyMapper::translate).collect();
        assert_eq!(first, again.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_from_crossterm_event() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyInput::from(&event), KeyInput::ctrl('c'));

        let event = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::SUPER);
        let input = KeyInput::from(&event);
        assert_eq!(KeyMapper::translate(&input), Some(vec![0x17]));

        let event = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(KeyInput::from(&event).key, Key::Escape);

        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(KeyMapper::translate(&KeyInput::from(&event)), None);
    }
}

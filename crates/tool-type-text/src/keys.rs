//! Best-effort key identity for synthesized keyboard events.

use dom_port::{KeyPhase, KeyStroke};

const TAB_KEY_CODE: u32 = 9;

/// `KeyA`..`KeyZ` for ASCII letters, empty otherwise.
pub fn physical_code(ch: char) -> String {
    if ch.is_ascii_alphabetic() {
        format!("Key{}", ch.to_ascii_uppercase())
    } else {
        String::new()
    }
}

/// Legacy numeric code: the code point of a single-character key, else 0.
pub fn numeric_code(key: &str) -> u32 {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => ch as u32,
        _ => 0,
    }
}

fn stroke(phase: KeyPhase, key: &str, code: &str, key_code: u32) -> KeyStroke {
    KeyStroke {
        phase,
        key: key.to_string(),
        code: code.to_string(),
        key_code,
        which: key_code,
    }
}

/// Down, press and up strokes for one printable character.
pub fn char_strokes(ch: char) -> [KeyStroke; 3] {
    let key = ch.to_string();
    let code = physical_code(ch);
    let key_code = numeric_code(&key);
    [
        stroke(KeyPhase::Down, &key, &code, key_code),
        stroke(KeyPhase::Press, &key, &code, key_code),
        stroke(KeyPhase::Up, &key, &code, key_code),
    ]
}

/// Tab down/up. No press: Tab is not a printable key.
pub fn tab_strokes() -> [KeyStroke; 2] {
    [
        stroke(KeyPhase::Down, "Tab", "Tab", TAB_KEY_CODE),
        stroke(KeyPhase::Up, "Tab", "Tab", TAB_KEY_CODE),
    ]
}

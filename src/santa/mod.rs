//! The gift exchange itself: who gives to whom, and the hints givers leave.
//!
//! Participants are created in bulk by [`assign::regenerate`], looked up by
//! their access code in [`lookup`], and annotated through [`hints`]. All of it
//! goes through a [`ParticipantStore`](crate::store::ParticipantStore).

pub mod assign;
pub mod hints;
pub mod lookup;

use std::fmt;

use uuid::Uuid;

pub type ParticipantId = Uuid;

/// Longest code accepted from a client. Issued codes are always 6 chars.
pub const CODE_MAX_LEN: usize = 50;
pub const HINT_MAX_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub code: String,
    pub gives_to: Option<ParticipantId>,
    pub hints: [Option<String>; 3],
}

impl Participant {
    pub fn hint(&self, slot: HintSlot) -> Option<&str> {
        self.hints[slot.index()].as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintSlot {
    One,
    Two,
    Three,
}

impl HintSlot {
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            HintSlot::One => 0,
            HintSlot::Two => 1,
            HintSlot::Three => 2,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            HintSlot::One => "hint1",
            HintSlot::Two => "hint2",
            HintSlot::Three => "hint3",
        }
    }

    /// Accepts the number `1` (or `1.0`) and the exact string `"1"`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let number = match value {
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(whole) => whole,
                None => n.as_f64().filter(|f| f.fract() == 0.0 && (1.0..=3.0).contains(f))? as u64,
            },
            serde_json::Value::String(s) => match s.as_str() {
                "1" => 1,
                "2" => 2,
                "3" => 3,
                _ => return None,
            },
            _ => return None,
        };
        match number {
            1 => Some(HintSlot::One),
            2 => Some(HintSlot::Two),
            3 => Some(HintSlot::Three),
            _ => None,
        }
    }
}

impl fmt::Display for HintSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Rejects codes that cannot possibly have been issued, before any lookup.
pub fn valid_code(code: &str) -> bool {
    !code.is_empty() && code.chars().count() <= CODE_MAX_LEN
}

pub fn valid_hint_text(text: &str) -> bool {
    !text.is_empty() && text.chars().count() <= HINT_MAX_LEN
}

use super::{EffectId, Style};

/// Scripted text shown by readables, exits, rooms and hooks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub id: EffectId,
    pub text: String,
    pub style: Style,
    pub seen: bool,
}

impl Effect {
    pub fn new(id: EffectId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            ..Self::default()
        }
    }
}

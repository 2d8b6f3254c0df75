use crate::error::InvariantError;
use crate::state::{Effect, EffectId};

#[derive(Clone, Debug, Default)]
pub struct EffectRepository {
    effects: Vec<Effect>,
}

impl EffectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> EffectId {
        EffectId(self.effects.iter().map(|effect| effect.id.0).max().unwrap_or(0) + 1)
    }

    pub fn add(&mut self, effect: Effect) -> Result<EffectId, InvariantError> {
        if self.get(effect.id).is_some() {
            return Err(InvariantError::DuplicateEffect(effect.id));
        }
        let id = effect.id;
        self.effects.push(effect);
        Ok(id)
    }

    pub fn get(&self, id: EffectId) -> Option<&Effect> {
        self.effects.iter().find(|effect| effect.id == id)
    }

    pub fn get_mut(&mut self, id: EffectId) -> Option<&mut Effect> {
        self.effects.iter_mut().find(|effect| effect.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

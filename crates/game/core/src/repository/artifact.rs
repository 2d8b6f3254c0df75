use tracing::trace;

use crate::error::InvariantError;
use crate::state::{Artifact, ArtifactId, MonsterId, RoomId};

/// All artifacts plus the list visible in the current room.
///
/// Inventories and container contents are not stored here; they are derived
/// from each artifact's location.
#[derive(Clone, Debug, Default)]
pub struct ArtifactRepository {
    artifacts: Vec<Artifact>,
    visible: Vec<ArtifactId>,
}

impl ArtifactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> ArtifactId {
        ArtifactId(self.artifacts.iter().map(|artifact| artifact.id.0).max().unwrap_or(0) + 1)
    }

    pub fn add(&mut self, artifact: Artifact) -> Result<ArtifactId, InvariantError> {
        if self.get(artifact.id).is_some() {
            return Err(InvariantError::DuplicateArtifact(artifact.id));
        }
        let id = artifact.id;
        trace!(target: "core::repo", artifact = %id, name = %artifact.info.name, "artifact added");
        self.artifacts.push(artifact);
        Ok(id)
    }

    pub fn get(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.id == id)
    }

    pub fn get_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        self.artifacts.iter_mut().find(|artifact| artifact.id == id)
    }

    pub fn require(&self, id: ArtifactId) -> Result<&Artifact, InvariantError> {
        self.get(id).ok_or(InvariantError::UnknownArtifact(id))
    }

    pub fn require_mut(&mut self, id: ArtifactId) -> Result<&mut Artifact, InvariantError> {
        self.get_mut(id).ok_or(InvariantError::UnknownArtifact(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Artifact> {
        self.artifacts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// First artifact matching `name` anywhere in the adventure.
    pub fn get_by_name(&self, name: &str) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|artifact| artifact.info.matches(name))
            .or_else(|| {
                self.artifacts
                    .iter()
                    .find(|artifact| artifact.info.matches_partially(name))
            })
    }

    pub fn in_room(&self, room: RoomId) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(move |artifact| artifact.room_id() == Some(room))
    }

    pub fn carried_by(&self, monster: MonsterId) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(move |artifact| artifact.holder() == Some(monster))
    }

    pub fn contents(&self, container: ArtifactId) -> impl Iterator<Item = &Artifact> {
        self.artifacts
            .iter()
            .filter(move |artifact| artifact.container_id() == Some(container))
    }

    /// In `room` or carried by the player.
    pub fn is_here(&self, id: ArtifactId, room: Option<RoomId>) -> bool {
        self.get(id).is_some_and(|artifact| {
            artifact.holder() == Some(MonsterId::PLAYER)
                || (room.is_some() && artifact.room_id() == room)
        })
    }

    /// Artifact called `name` that is in `room` or carried by the player.
    ///
    /// Exact matches win over partial ones. Embedded artifacts match too;
    /// the caller decides whether finding one reveals it.
    pub fn find_local(&self, name: &str, room: Option<RoomId>) -> Option<ArtifactId> {
        let local: Vec<&Artifact> = self
            .artifacts
            .iter()
            .filter(|artifact| self.is_here(artifact.id, room))
            .collect();
        local
            .iter()
            .find(|artifact| artifact.info.matches(name))
            .or_else(|| {
                local
                    .iter()
                    .find(|artifact| artifact.info.matches_partially(name))
            })
            .map(|artifact| artifact.id)
    }

    /// Artifact called `name` carried by `monster`.
    pub fn find_carried(&self, name: &str, monster: MonsterId) -> Option<ArtifactId> {
        self.carried_by(monster)
            .find(|artifact| artifact.info.matches(name))
            .or_else(|| {
                self.carried_by(monster)
                    .find(|artifact| artifact.info.matches_partially(name))
            })
            .map(|artifact| artifact.id)
    }

    /// Recomputes the visible list: artifacts lying in `room`, neither
    /// embedded nor hidden.
    pub fn update_visible(&mut self, room: Option<RoomId>) {
        self.visible = match room {
            Some(room) => self
                .in_room(room)
                .filter(|artifact| !artifact.is_embedded() && !artifact.is_hidden())
                .map(|artifact| artifact.id)
                .collect(),
            None => Vec::new(),
        };
        trace!(target: "core::repo", count = self.visible.len(), "artifact visibility recomputed");
    }

    pub fn visible(&self) -> &[ArtifactId] {
        &self.visible
    }

    pub fn is_visible(&self, id: ArtifactId) -> bool {
        self.visible.contains(&id)
    }
}

//! Flat keyed records an adventure is authored in.
//!
//! Records mirror the data files one-to-one: numeric codes, nullable ids and
//! plain strings. [`AdventureData`] converts them into entities when a game is
//! built, assigning `index + 1` ids to records that carry none.

use std::collections::BTreeMap;

use crate::error::InvariantError;
use crate::state::{
    Armament, ArmorProfile, ArmorSlot, Artifact, ArtifactFlags, ArtifactId, ArtifactKind,
    BaseStats, CombatCode, Effect, EffectId, Exit, ExitTarget, Friendliness, Lock, Monster,
    MonsterId, ObjectInfo, PlayerProfile, Room, RoomId, Spell, Spellbook, Style,
    WeaponAbilities, WeaponProfile, WeaponType,
};

fn info(name: String, article: String, aliases: Vec<String>, description: String) -> ObjectInfo {
    ObjectInfo {
        name,
        article,
        aliases,
        description,
        seen: false,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExitRecord {
    pub direction: String,
    /// Destination room; 0 blocked, -999 / -998 leave the adventure.
    pub room_to: i32,
    pub door_id: Option<u32>,
    pub effect_id: Option<u32>,
}

impl ExitRecord {
    pub fn into_exit(self) -> Exit {
        let mut exit = Exit::new(&self.direction, ExitTarget::from_code(self.room_to));
        exit.door_id = self.door_id.map(ArtifactId);
        exit.effect_id = self.effect_id.map(EffectId);
        exit
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoomRecord {
    pub id: Option<u32>,
    pub name: String,
    pub description: String,
    pub is_dark: bool,
    pub dark_name: Option<String>,
    pub dark_description: Option<String>,
    pub effect_id: Option<u32>,
    pub exits: Vec<ExitRecord>,
}

impl RoomRecord {
    pub fn into_room(self, id: RoomId) -> Room {
        let mut room = Room::new(id, self.name);
        room.info.description = self.description;
        room.is_dark = self.is_dark;
        if let Some(name) = self.dark_name {
            room.dark_name = name;
        }
        if let Some(description) = self.dark_description {
            room.dark_description = description;
        }
        room.effect_id = self.effect_id.map(EffectId);
        room.exits = self.exits.into_iter().map(ExitRecord::into_exit).collect();
        room
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArtifactRecord {
    pub id: Option<u32>,
    pub name: String,
    pub article: String,
    pub aliases: Vec<String>,
    pub description: String,
    /// Artifact type code, 0..=16.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: u8,
    pub weight: i32,
    pub value: i32,
    pub room_id: Option<u32>,
    /// Monster carrying the artifact.
    pub monster_id: Option<u32>,
    pub container_id: Option<u32>,
    pub is_worn: bool,
    pub is_open: bool,
    pub embedded: bool,
    pub hidden: bool,
    pub is_lit: bool,
    pub dice: i32,
    pub sides: i32,
    pub weapon_type: Option<u8>,
    pub weapon_odds: i32,
    pub hands: u8,
    /// 0 armor, 1 shield, anything else worn without a slot.
    pub armor_type: Option<u8>,
    pub armor_class: i32,
    pub armor_penalty: i32,
    /// Key artifact id; -1 only scripts can open it.
    pub key_id: Option<i32>,
    pub linked_door_id: Option<u32>,
    pub guard_id: Option<u32>,
    /// Monster freed from a bound-monster or revealed by a disguised-monster artifact.
    pub released_monster_id: Option<u32>,
    pub hardiness: Option<i32>,
    pub quantity: Option<i32>,
    pub effect_id: Option<u32>,
    pub num_effects: u32,
}

impl ArtifactRecord {
    pub fn into_artifact(self, id: ArtifactId) -> Result<Artifact, InvariantError> {
        let kind =
            ArtifactKind::from_repr(self.kind).ok_or(InvariantError::UnknownArtifactKind(self.kind))?;
        let mut artifact = Artifact::new(id, self.name, kind);
        artifact.info = info(
            std::mem::take(&mut artifact.info.name),
            self.article,
            self.aliases,
            self.description,
        );
        artifact.weight = self.weight;
        artifact.value = self.value;
        artifact.dice = self.dice;
        artifact.sides = self.sides;
        if kind.is_weapon() {
            artifact.weapon = Some(WeaponProfile {
                weapon_type: self
                    .weapon_type
                    .and_then(WeaponType::from_repr)
                    .unwrap_or_default(),
                odds: self.weapon_odds,
                hands: self.hands.max(1),
            });
        }
        if kind == ArtifactKind::Wearable {
            let slot = match self.armor_type {
                Some(0) => ArmorSlot::Armor,
                Some(1) => ArmorSlot::Shield,
                _ => ArmorSlot::Other,
            };
            artifact.armor = Some(ArmorProfile {
                slot,
                class: self.armor_class,
                penalty: self.armor_penalty,
            });
        }
        artifact.flags.set(ArtifactFlags::OPEN, self.is_open);
        artifact.flags.set(ArtifactFlags::EMBEDDED, self.embedded);
        artifact.flags.set(ArtifactFlags::HIDDEN, self.hidden);
        artifact.flags.set(ArtifactFlags::LIT, self.is_lit);
        artifact.lock = match self.key_id {
            None | Some(0) => Lock::None,
            Some(-1) => Lock::Special,
            Some(key) if key > 0 => Lock::Key(ArtifactId(key as u32)),
            Some(_) => Lock::Special,
        };
        artifact.linked_door_id = self.linked_door_id.map(ArtifactId);
        artifact.guard_id = self.guard_id.map(MonsterId);
        artifact.monster_id = self.released_monster_id.map(MonsterId);
        artifact.hardiness = self.hardiness;
        artifact.quantity = self.quantity;
        artifact.effect_id = self.effect_id.map(EffectId);
        artifact.num_effects = self.num_effects;

        if let Some(monster) = self.monster_id {
            artifact.move_to_inventory(MonsterId(monster));
            artifact.set_worn(self.is_worn);
        } else if let Some(container) = self.container_id {
            artifact.put_into(ArtifactId(container));
        } else if let Some(room) = self.room_id {
            artifact.move_to_room(RoomId(room));
        }
        Ok(artifact)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonsterRecord {
    pub id: Option<u32>,
    pub name: String,
    pub article: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub room_id: Option<u32>,
    pub container_id: Option<u32>,
    /// More than 1 makes a group monster.
    pub count: u32,
    pub name_plural: Option<String>,
    pub hardiness: i32,
    pub agility: i32,
    pub charisma: i32,
    /// "friend", "hostile", "neutral" or "random".
    pub friendliness: String,
    pub friend_odds: i32,
    /// 0 normal, 1 natural only, -1 weapon if available, -2 never fights.
    pub combat_code: i32,
    pub courage: i32,
    pub pursues: bool,
    pub gold: i32,
    /// Absent unarmed, 0 natural, positive artifact, negative wants a weapon.
    pub weapon_id: Option<i32>,
    pub weapon_dice: i32,
    pub weapon_sides: i32,
    pub attack_odds: i32,
    pub defense_bonus: i32,
    pub armor_class: i32,
    pub spells: Vec<String>,
    pub spell_points: i32,
    pub spell_frequency: i32,
    pub combat_verbs: Vec<String>,
    pub health_messages: Vec<String>,
    pub dead_body_id: Option<u32>,
}

impl Default for MonsterRecord {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            article: String::new(),
            aliases: Vec::new(),
            description: String::new(),
            room_id: None,
            container_id: None,
            count: 1,
            name_plural: None,
            hardiness: 10,
            agility: 10,
            charisma: 10,
            friendliness: "hostile".to_owned(),
            friend_odds: 50,
            combat_code: 0,
            courage: 100,
            pursues: true,
            gold: 0,
            weapon_id: None,
            weapon_dice: 1,
            weapon_sides: 4,
            attack_odds: 0,
            defense_bonus: 0,
            armor_class: 0,
            spells: Vec::new(),
            spell_points: 0,
            spell_frequency: 0,
            combat_verbs: Vec::new(),
            health_messages: Vec::new(),
            dead_body_id: None,
        }
    }
}

impl MonsterRecord {
    fn friendliness(&self) -> Friendliness {
        match self.friendliness.to_lowercase().as_str() {
            "friend" => Friendliness::Friend,
            "neutral" => Friendliness::Neutral,
            "random" => Friendliness::Random(self.friend_odds),
            _ => Friendliness::Hostile,
        }
    }

    /// Builds the single monster, or the template of a group.
    pub fn to_monster(&self, id: MonsterId) -> Monster {
        let mut monster = Monster::new(id, self.name.clone());
        monster.info = info(
            self.name.clone(),
            self.article.clone(),
            self.aliases.clone(),
            self.description.clone(),
        );
        monster.room_id = self.room_id.map(RoomId);
        monster.container_id = self.container_id.map(ArtifactId);
        monster.hardiness = self.hardiness;
        monster.agility = self.agility;
        monster.charisma = self.charisma;
        monster.friendliness = self.friendliness();
        monster.combat_code = CombatCode::from_code(self.combat_code);
        monster.courage = self.courage;
        monster.pursues = self.pursues;
        monster.gold = self.gold;
        monster.weapon = Armament::from_code(self.weapon_id);
        monster.natural_dice = self.weapon_dice;
        monster.natural_sides = self.weapon_sides;
        monster.attack_odds = self.attack_odds;
        monster.defense_bonus = self.defense_bonus;
        monster.armor_class = self.armor_class;
        let spells: Vec<Spell> = self
            .spells
            .iter()
            .filter_map(|spell| spell.parse().ok())
            .collect();
        if !spells.is_empty() {
            monster.spellbook = Some(Spellbook {
                spells,
                points: self.spell_points,
                frequency: self.spell_frequency,
            });
        }
        monster.combat_verbs = self.combat_verbs.clone();
        monster.health_messages = self.health_messages.clone();
        monster.dead_body_id = self.dead_body_id.map(ArtifactId);
        monster
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectRecord {
    pub id: Option<u32>,
    pub text: String,
    /// Transcript style name ("normal", "special", ...).
    pub style: Option<String>,
}

impl EffectRecord {
    pub fn into_effect(self, id: EffectId) -> Effect {
        let style = match self.style.as_deref() {
            Some("success") => Style::Success,
            Some("warning") => Style::Warning,
            Some("danger") => Style::Danger,
            Some("special") => Style::Special,
            Some("no-space") => Style::NoSpace,
            _ => Style::Normal,
        };
        Effect {
            id,
            text: self.text,
            style,
            seen: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerRecord {
    pub name: String,
    pub hardiness: i32,
    pub agility: i32,
    pub charisma: i32,
    pub gold: i32,
    pub axe: i32,
    pub bow: i32,
    pub club: i32,
    pub spear: i32,
    pub sword: i32,
    pub armor_expertise: i32,
    pub spell_abilities: BTreeMap<String, i32>,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self {
            name: "Player".to_owned(),
            hardiness: 12,
            agility: 12,
            charisma: 12,
            gold: 200,
            axe: 5,
            bow: -10,
            club: 20,
            spear: 10,
            sword: 0,
            armor_expertise: 0,
            spell_abilities: BTreeMap::new(),
        }
    }
}

impl PlayerRecord {
    pub fn to_monster(&self) -> Monster {
        let mut player = Monster::new(MonsterId::PLAYER, self.name.clone());
        player.hardiness = self.hardiness;
        player.agility = self.agility;
        player.charisma = self.charisma;
        player.gold = self.gold;
        player.friendliness = Friendliness::Friend;
        player.reaction = crate::state::Reaction::Friend;
        player.weapon = Armament::Unarmed;
        player.natural_dice = 1;
        player.natural_sides = 2;
        let mut profile = PlayerProfile {
            weapon_abilities: WeaponAbilities::new(
                self.axe, self.bow, self.club, self.spear, self.sword,
            ),
            armor_expertise: self.armor_expertise,
            base_stats: BaseStats {
                hardiness: self.hardiness,
                agility: self.agility,
                charisma: self.charisma,
            },
            ..PlayerProfile::default()
        };
        for (name, ability) in &self.spell_abilities {
            if let Ok(spell) = name.parse::<Spell>() {
                profile.learn_spell(spell, *ability);
            }
        }
        player.player = Some(Box::new(profile));
        player
    }
}

/// Everything needed to start an adventure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdventureData {
    pub rooms: Vec<RoomRecord>,
    pub artifacts: Vec<ArtifactRecord>,
    pub monsters: Vec<MonsterRecord>,
    pub effects: Vec<EffectRecord>,
    pub player: PlayerRecord,
}

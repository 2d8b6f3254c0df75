//! The turn controller.
//!
//! Phase order after every command that advances the clock:
//!
//! 1. visibility refresh
//! 2. `endTurn`, then `endTurn1`
//! 3. description of the room, new monsters and new artifacts
//! 4. `endTurn2`
//! 5. monster battle actions, unless the command suppressed them
//! 6. clock maintenance: spell recharge, spell counters, lamp fuel
//! 7. clock increment

use tracing::debug;

use super::Game;
use crate::error::GameResult;
use crate::hooks::{EventName, HookArgs};
use crate::state::{ArtifactFlags, ArtifactKind, Style};

impl Game {
    /// Advances the game by one turn. Does nothing while the clock is paused.
    pub fn tick(&mut self) -> GameResult<()> {
        if !self.state.turn.running {
            return Ok(());
        }
        debug!(target: "core::turn", clock = self.state.turn.clock, "turn phases begin");

        self.refresh_visible()?;
        self.trigger(EventName::EndTurn, HookArgs::None)?;
        self.refresh_visible()?;
        self.trigger(EventName::EndTurn1, HookArgs::None)?;
        self.refresh_visible()?;

        self.describe_surroundings()?;
        self.trigger(EventName::EndTurn2, HookArgs::None)?;
        self.refresh_visible()?;

        if self.state.turn.in_battle && !self.state.turn.skip_battle_actions {
            self.battle_round()?;
        }

        self.recharge_spells()?;
        self.tick_spell_counters()?;
        self.burn_lights();

        self.state.turn.clock += 1;
        self.state.turn.skip_battle_actions = false;
        for monster in self.state.monsters.all_mut() {
            monster.turn_taken = false;
        }
        debug!(target: "core::turn", clock = self.state.turn.clock, "clock advanced");
        Ok(())
    }

    /// Prints the room and whatever is in it.
    ///
    /// Things seen for the first time get their full description and a
    /// `see*` hook; familiar things get a one-line mention.
    pub fn describe_surroundings(&mut self) -> GameResult<()> {
        let Some(room_id) = self.current_room() else {
            return Ok(());
        };
        let room = self.room(room_id)?;
        if room.is_dark && !self.light_is_here() {
            let (name, description) = (room.dark_name.clone(), room.dark_description.clone());
            self.write(name, Style::Special);
            self.say(description);
            return Ok(());
        }

        let (name, first_visit) = (room.info.name.clone(), !room.info.seen);
        self.write(name, Style::Special);
        if first_visit {
            let room = self.state.rooms.require_mut(room_id)?;
            room.info.seen = true;
            let description = room.info.description.clone();
            if !description.is_empty() {
                self.say(description);
            }
            self.trigger(EventName::SeeRoom, HookArgs::Room { room: room_id })?;
        }

        for id in self.state.monsters.visible().to_vec() {
            let monster = self.monster(id)?;
            if !monster.info.seen {
                let description = monster.info.description.clone();
                self.monster_mut(id)?.info.seen = true;
                if !description.is_empty() {
                    self.say(description);
                }
                self.trigger(EventName::SeeMonster, HookArgs::Monster { monster: id })?;
                continue;
            }
            let line = match self.state.monsters.group(id) {
                Some(group) => {
                    let present = self.state.monsters.present_members(id, Some(room_id)).len();
                    if present == 1 {
                        format!("{} is here.", group.base.info.display_name())
                    } else {
                        format!("{present} {} are here.", group.name_plural)
                    }
                }
                None => format!("{} is here.", monster.info.display_name()),
            };
            self.say(line);
        }

        for id in self.state.artifacts.visible().to_vec() {
            let artifact = self.artifact(id)?;
            if !artifact.info.seen {
                let description = artifact.info.description.clone();
                self.artifact_mut(id)?.info.seen = true;
                if !description.is_empty() {
                    self.say(description);
                }
                self.trigger(
                    EventName::SeeArtifact,
                    HookArgs::Artifact {
                        arg: String::new(),
                        artifact: id,
                    },
                )?;
                continue;
            }
            let line = if artifact.flags.contains(ArtifactFlags::PLAYER_BROUGHT) {
                format!("Your {} is here.", artifact.info.name)
            } else {
                format!("You see {}.", artifact.info.display_name())
            };
            self.say(line);
        }
        Ok(())
    }

    /// Lit lamps and torches burn one unit of fuel. Fuel of -1 never runs out.
    fn burn_lights(&mut self) {
        let room = self.current_room();
        let mut messages = Vec::new();
        let lit = self
            .state
            .artifacts
            .iter()
            .filter(|artifact| {
                artifact.kind == ArtifactKind::LightSource
                    && artifact.is_lit()
                    && artifact.quantity.is_some_and(|fuel| fuel != -1)
            })
            .map(|artifact| (artifact.id, self.state.artifacts.is_here(artifact.id, room)))
            .collect::<Vec<_>>();

        for (id, here) in lit {
            let Some(light) = self.state.artifacts.get_mut(id) else {
                continue;
            };
            let fuel = light.quantity.unwrap_or(0) - 1;
            light.quantity = Some(fuel);
            let name = &light.info.name;
            let message = if fuel <= 0 {
                light.flags.remove(ArtifactFlags::LIT);
                Some(format!("Your {name} just went out!"))
            } else if fuel < 10 {
                Some(format!("Your {name} is almost out!"))
            } else if fuel < 20 {
                Some(format!("Your {name} grows dim!"))
            } else {
                None
            };
            if let Some(message) = message.filter(|_| here) {
                messages.push(message);
            }
        }
        for message in messages {
            self.say(message);
        }
    }
}

//! Handler tables and the adventure contract.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::warn;

use super::{EventName, HookArgs, HookOutcome};
use crate::engine::Game;
use crate::error::{GameResult, HookError};

/// Event handler. Receives the whole game and the event's arguments.
pub type HookFn = Rc<dyn Fn(&mut Game, &HookArgs) -> GameResult<HookOutcome>>;

/// Custom command body. Receives the verb as typed and its argument.
pub type CommandFn = Rc<dyn Fn(&mut Game, &str, &str) -> GameResult<()>>;

/// One handler per event, validated when the adventure is activated.
#[derive(Clone, Default)]
pub struct HookRegistry {
    lookup_table: HashMap<EventName, HookFn>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a name-keyed table, rejecting unknown names.
    pub fn from_table<I>(table: I) -> Result<Self, HookError>
    where
        I: IntoIterator<Item = (String, HookFn)>,
    {
        let mut registry = Self::new();
        for (name, handler) in table {
            registry.register_named(&name, handler)?;
        }
        Ok(registry)
    }

    /// Installs `handler` for `event`, replacing any previous one.
    pub fn register(&mut self, event: EventName, handler: HookFn) {
        self.lookup_table.insert(event, handler);
    }

    /// Installs `handler` under an event name spelled as in adventure scripts.
    pub fn register_named(&mut self, name: &str, handler: HookFn) -> Result<(), HookError> {
        let event = name.parse::<EventName>().map_err(|_| {
            warn!(target: "core::hooks", hook = name, "hook names an unknown event");
            HookError::UnknownEvent(name.to_owned())
        })?;
        self.register(event, handler);
        Ok(())
    }

    /// Finds the handler for an event.
    pub fn find(&self, event: EventName) -> Option<&HookFn> {
        self.lookup_table.get(&event)
    }

    pub fn len(&self) -> usize {
        self.lookup_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup_table.is_empty()
    }

    /// Events with a handler installed (for debugging).
    pub fn events(&self) -> impl Iterator<Item = EventName> + '_ {
        self.lookup_table.keys().copied()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut events: Vec<_> = self.events().collect();
        events.sort();
        f.debug_struct("HookRegistry").field("events", &events).finish()
    }
}

/// Adventure-specific verb handled before the core actions.
#[derive(Clone)]
pub struct CustomCommand {
    pub name: String,
    pub verbs: Vec<String>,
    pub run: CommandFn,
}

impl CustomCommand {
    pub fn new<F>(name: impl Into<String>, verbs: &[&str], run: F) -> Self
    where
        F: Fn(&mut Game, &str, &str) -> GameResult<()> + 'static,
    {
        Self {
            name: name.into(),
            verbs: verbs.iter().map(|verb| verb.to_lowercase()).collect(),
            run: Rc::new(run),
        }
    }

    pub fn handles(&self, verb: &str) -> bool {
        self.verbs.iter().any(|candidate| candidate.eq_ignore_ascii_case(verb))
    }
}

impl std::fmt::Debug for CustomCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomCommand")
            .field("name", &self.name)
            .field("verbs", &self.verbs)
            .finish()
    }
}

/// Scripted behavior of one adventure: its hooks and its custom commands.
#[derive(Clone, Debug, Default)]
pub struct Adventure {
    pub slug: String,
    pub(crate) hooks: HookRegistry,
    pub(crate) commands: Vec<CustomCommand>,
}

impl Adventure {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// Adds a handler for `event`.
    #[must_use]
    pub fn on<F>(mut self, event: EventName, handler: F) -> Self
    where
        F: Fn(&mut Game, &HookArgs) -> GameResult<HookOutcome> + 'static,
    {
        self.hooks.register(event, Rc::new(handler));
        self
    }

    /// Adds a handler under a script-style event name.
    pub fn on_named<F>(mut self, name: &str, handler: F) -> Result<Self, HookError>
    where
        F: Fn(&mut Game, &HookArgs) -> GameResult<HookOutcome> + 'static,
    {
        self.hooks.register_named(name, Rc::new(handler))?;
        Ok(self)
    }

    /// Adds a custom command.
    pub fn command(mut self, command: CustomCommand) -> Result<Self, HookError> {
        if command.verbs.is_empty() {
            return Err(HookError::CommandWithoutVerbs(command.name));
        }
        self.commands.push(command);
        Ok(self)
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn commands(&self) -> &[CustomCommand] {
        &self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> HookFn {
        Rc::new(|_: &mut Game, _: &HookArgs| Ok(HookOutcome::NotHandled))
    }

    #[test]
    fn unknown_event_names_fail_activation() {
        let table = vec![
            ("beforeMove".to_owned(), noop()),
            ("beforeTeleport".to_owned(), noop()),
        ];
        let err = HookRegistry::from_table(table).unwrap_err();
        assert_eq!(err, HookError::UnknownEvent("beforeTeleport".to_owned()));
    }

    #[test]
    fn registry_finds_handlers_by_event() {
        let registry =
            HookRegistry::from_table(vec![("endTurn2".to_owned(), noop())]).unwrap();
        assert!(registry.find(EventName::EndTurn2).is_some());
        assert!(registry.find(EventName::EndTurn).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn commands_need_verbs() {
        let command = CustomCommand::new("dance", &[], |_, _, _| Ok(()));
        let err = Adventure::new("test").command(command).unwrap_err();
        assert_eq!(err, HookError::CommandWithoutVerbs("dance".to_owned()));

        let command = CustomCommand::new("dance", &["dance", "JIG"], |_, _, _| Ok(()));
        assert!(command.handles("jig"));
    }
}

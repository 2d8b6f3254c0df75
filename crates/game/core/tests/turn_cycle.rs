//! Whole turns driven through the command boundary of a small data-built
//! adventure.

use adventure_core::env::{
    AdventureData, ArtifactRecord, EffectRecord, ExitRecord, MonsterRecord, PlayerRecord,
    RoomRecord,
};
use adventure_core::modal::Question;
use adventure_core::{
    Adventure, ArtifactId, CustomCommand, EventName, FixedRng, Game, GameConfig, GameStatus, HookError,
    HookOutcome, MonsterId, RoomId, TurnOutcome,
};

fn exit(direction: &str, room_to: i32) -> ExitRecord {
    ExitRecord {
        direction: direction.into(),
        room_to,
        ..ExitRecord::default()
    }
}

fn gatehouse() -> AdventureData {
    AdventureData {
        rooms: vec![
            RoomRecord {
                id: Some(1),
                name: "Gatehouse".into(),
                description: "A draughty stone gatehouse.".into(),
                exits: vec![
                    exit("n", 2),
                    exit("w", -999),
                    ExitRecord {
                        effect_id: Some(1),
                        ..exit("e", 0)
                    },
                ],
                ..RoomRecord::default()
            },
            RoomRecord {
                id: Some(2),
                name: "Courtyard".into(),
                description: "Weeds push through the flagstones.".into(),
                exits: vec![exit("s", 1)],
                ..RoomRecord::default()
            },
        ],
        effects: vec![EffectRecord {
            id: Some(1),
            text: "The portcullis is down.".into(),
            style: None,
        }],
        artifacts: vec![
            ArtifactRecord {
                name: "sword".into(),
                kind: 2,
                weapon_type: Some(5),
                dice: 1,
                sides: 8,
                weight: 5,
                room_id: Some(1),
                ..ArtifactRecord::default()
            },
            ArtifactRecord {
                name: "gold coins".into(),
                kind: 0,
                value: 25,
                weight: 1,
                room_id: Some(1),
                ..ArtifactRecord::default()
            },
        ],
        monsters: vec![MonsterRecord {
            name: "gatekeeper".into(),
            room_id: Some(2),
            friendliness: "neutral".into(),
            ..MonsterRecord::default()
        }],
        player: PlayerRecord {
            name: "Hero".into(),
            ..PlayerRecord::default()
        },
    }
}

fn started(adventure: Adventure) -> Game {
    let mut game = Game::new(
        gatehouse(),
        adventure,
        GameConfig::default(),
        Box::new(FixedRng::new([])),
    )
    .expect("adventure data is consistent");
    game.start().expect("start runs the first turn");
    game
}

fn rejection(outcome: TurnOutcome) -> String {
    match outcome {
        TurnOutcome::Rejected(err) => err.message,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

#[test]
fn start_describes_the_first_room_and_ticks() {
    let game = started(Adventure::new("gatehouse"));
    assert_eq!(game.current_room(), Some(RoomId(1)));
    assert!(game.state.history.mentions("Gatehouse"));
    assert!(game.state.history.mentions("A draughty stone gatehouse."));
    assert_eq!(game.state.turn.clock, 1);
}

#[test]
fn rejected_command_leaves_the_clock_alone() {
    let mut game = started(Adventure::new("gatehouse"));
    let outcome = game.run_command("e", "").unwrap();
    assert_eq!(rejection(outcome), "The portcullis is down.");
    assert_eq!(game.state.turn.clock, 1);

    let outcome = game.run_command("xyzzy", "").unwrap();
    assert_eq!(rejection(outcome), "I don't know that command.");
    assert_eq!(game.state.turn.clock, 1);
    assert_eq!(
        game.state.history.last_entry().map(|entry| entry.command.as_str()),
        Some("xyzzy")
    );
}

#[test]
fn walking_and_picking_things_up() {
    let mut game = started(Adventure::new("gatehouse"));
    assert_eq!(game.run_command("get", "all").unwrap(), TurnOutcome::Completed);
    assert_eq!(game.player().unwrap().gold, 225);
    assert_eq!(game.player().unwrap().inventory.len(), 1);

    game.run_command("north", "").unwrap();
    assert_eq!(game.current_room(), Some(RoomId(2)));
    assert!(game.state.history.mentions("Weeds push through the flagstones."));
    assert_eq!(game.state.turn.clock, 3);
}

#[test]
fn vetoed_move_still_takes_a_turn() {
    let adventure = Adventure::new("gatehouse").on(EventName::BeforeMove, |game, _| {
        game.say("A voice booms: not yet!");
        Ok(HookOutcome::veto())
    });
    let mut game = started(adventure);
    assert_eq!(game.run_command("n", "").unwrap(), TurnOutcome::Completed);
    assert_eq!(game.current_room(), Some(RoomId(1)));
    assert!(game.state.history.mentions("A voice booms: not yet!"));
    assert_eq!(game.state.turn.clock, 2);
}

#[test]
fn custom_commands_win_over_core_verbs() {
    let adventure = Adventure::new("gatehouse")
        .command(CustomCommand::new("pray", &["pray", "look"], |game, verb, _| {
            game.say(format!("You {verb} quietly."));
            Ok(())
        }))
        .unwrap();
    let mut game = started(adventure);
    game.run_command("LOOK", "").unwrap();
    assert!(game.state.history.mentions("You LOOK quietly."));
}

#[test]
fn leaving_asks_first_when_answers_are_queued() {
    let mut game = started(Adventure::new("gatehouse"));
    game.push_mock_answers(["yes"]);
    assert_eq!(game.run_command("w", "").unwrap(), TurnOutcome::Completed);
    assert_eq!(game.state.status, GameStatus::Won);
    assert!(game.state.history.mentions(GameConfig::DEFAULT_EXIT_MESSAGE));

    let outcome = game.run_command("look", "").unwrap();
    assert_eq!(rejection(outcome), "The adventure is over.");
}

#[test]
fn leave_prompt_suspends_the_turn_until_answered() {
    let mut game = started(Adventure::new("gatehouse"));
    assert_eq!(game.run_command("w", "").unwrap(), TurnOutcome::AwaitingAnswer);
    assert!(!game.state.turn.running);

    let blocked = game.run_command("look", "").unwrap();
    assert_eq!(rejection(blocked), "Please answer the question first.");
    let unclear = game.submit_answer("maybe").unwrap();
    assert_eq!(rejection(unclear), "Please choose one of: Yes, No.");
    assert!(game.modal().is_open());

    assert_eq!(game.submit_answer("no").unwrap(), TurnOutcome::Completed);
    assert_eq!(game.state.status, GameStatus::Active);
    assert!(game.state.turn.running);
    // the suspended turn finished when the modal closed
    assert_eq!(game.state.turn.clock, 2);
}

#[test]
fn prompt_answers_reach_script_flags() {
    let adventure = Adventure::new("gatehouse")
        .command(CustomCommand::new("sign", &["sign"], |game, _, _| {
            let visits = game.state.flag("signed") + 1;
            game.state.set_flag("signed", visits);
            game.show_prompt("Your name?", |game, answer| {
                game.state.set_flag("name length", answer.len() as i64);
                Ok(true)
            })
        }))
        .unwrap();
    let mut game = started(adventure);
    assert_eq!(game.state.flag("signed"), 0);
    assert_eq!(game.run_command("sign", "").unwrap(), TurnOutcome::AwaitingAnswer);
    assert_eq!(game.submit_answer(" Ada ").unwrap(), TurnOutcome::Completed);
    assert_eq!(game.state.flag("signed"), 1);
    assert_eq!(game.state.flag("name length"), 3);
}

#[test]
fn a_false_continuation_ends_the_modal_early() {
    let adventure = Adventure::new("gatehouse")
        .command(CustomCommand::new("quiz", &["quiz"], |game, _, _| {
            game.run_modal(vec![
                Question::text("First?", |_, _| Ok(true)),
                Question::text("Second?", |_, _| Ok(false)),
                Question::text("Third?", |_, _| panic!("never asked")),
            ])
        }))
        .unwrap();
    let mut game = started(adventure);
    assert_eq!(game.run_command("quiz", "").unwrap(), TurnOutcome::AwaitingAnswer);
    assert_eq!(game.submit_answer("one").unwrap(), TurnOutcome::AwaitingAnswer);
    assert_eq!(game.submit_answer("two").unwrap(), TurnOutcome::Completed);

    assert!(!game.modal().is_open());
    let answers: Vec<_> = game
        .modal()
        .questions()
        .iter()
        .map(|question| question.answer.clone())
        .collect();
    assert_eq!(answers, vec![Some("one".into()), Some("two".into()), None]);
}

#[test]
fn hook_tables_reject_unknown_event_names() {
    let unknown = Adventure::new("typo").on_named("beforeMoov", |_, _| Ok(HookOutcome::proceed()));
    assert!(matches!(unknown, Err(HookError::UnknownEvent(name)) if name == "beforeMoov"));

    let known = Adventure::new("fine").on_named("afterMove", |_, _| Ok(HookOutcome::proceed()));
    assert!(known.is_ok());
}

#[test]
fn neutral_gatekeeper_does_not_start_a_fight() {
    let mut game = started(Adventure::new("gatehouse"));
    game.run_command("n", "").unwrap();
    assert!(!game.state.turn.in_battle);
    assert!(game.is_here(MonsterId(1)));
}

#[test]
fn unnumbered_records_follow_the_highest_id() {
    let room = |id: Option<u32>, name: &str| RoomRecord {
        id,
        name: name.into(),
        ..RoomRecord::default()
    };
    let artifact = |id: Option<u32>, name: &str| ArtifactRecord {
        id,
        name: name.into(),
        kind: 1,
        room_id: Some(2),
        ..ArtifactRecord::default()
    };
    let data = AdventureData {
        rooms: vec![room(Some(2), "Hall"), room(Some(3), "Yard"), room(None, "Attic")],
        artifacts: vec![artifact(Some(2), "gem"), artifact(None, "ring")],
        ..AdventureData::default()
    };

    let game = Game::new(
        data,
        Adventure::new("sparse"),
        GameConfig::default(),
        Box::new(FixedRng::new([])),
    )
    .unwrap();
    assert_eq!(game.room(RoomId(4)).unwrap().info.name, "Attic");
    assert_eq!(game.artifact(ArtifactId(3)).unwrap().info.name, "ring");
}

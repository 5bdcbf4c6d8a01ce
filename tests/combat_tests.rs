//! End-to-end combat tests.
//!
//! These drive a `Combat` only through its public commands
//! (`play_card`, `end_turn`) and check the results through accessors,
//! snapshots and drained events.

use resonance_combat::cards::{CardDefinition, CardInstance, CardType, Keyword};
use resonance_combat::catalog::{Catalogs, ModifierDefinition, OpponentDefinition};
use resonance_combat::combat::{Combat, CombatEvent, CombatOutcome, CombatSetup, TurnPhase};
use resonance_combat::core::{CombatConfig, Element, InstanceId, PlayError};
use resonance_combat::effects::{Effect, EffectPayload};
use resonance_combat::intent::{OpponentMove, PhaseAction, PhaseSchedule};
use resonance_combat::momentum::MomentumModifier;
use resonance_combat::piles::Pile;
use resonance_combat::powers::{PowerSpec, PowerTrigger};
use resonance_combat::status::{keys, StatusDuration};

fn catalogs() -> Catalogs {
    let mut catalogs = Catalogs::new();
    catalogs
        .cards
        .register_all([
            CardDefinition::new("spark", "Spark", CardType::Attack)
                .with_element(Element::Fire)
                .with_cost(1)
                .with_effect(Effect::damage(6)),
            CardDefinition::new("tide", "Tide", CardType::Attack)
                .with_element(Element::Water)
                .with_cost(1)
                .with_effect(Effect::damage(6))
                .with_resonance_bonus(EffectPayload::from_effects([Effect::guard(4)])),
            CardDefinition::new("flare", "Flare", CardType::Attack)
                .with_element(Element::Fire)
                .with_cost(0)
                .with_effect(Effect::damage(2))
                .with_momentum_bonus(2, EffectPayload::from_effects([Effect::damage(5)])),
            CardDefinition::new("smash", "Smash", CardType::Attack)
                .with_cost(2)
                .with_effect(Effect::damage(30)),
            CardDefinition::new("burn", "Burn", CardType::Skill)
                .with_cost(0)
                .with_keyword(Keyword::Exhaust)
                .with_effect(Effect::guard(3)),
            CardDefinition::new("ghost", "Ghost", CardType::Skill)
                .with_cost(1)
                .with_keyword(Keyword::Ethereal)
                .with_effect(Effect::guard(1)),
            CardDefinition::new("keep", "Keep", CardType::Skill)
                .with_cost(1)
                .with_keyword(Keyword::Retain)
                .with_effect(Effect::guard(1)),
            CardDefinition::new("kindle", "Kindle", CardType::Power)
                .with_element(Element::Fire)
                .with_cost(1)
                .with_effect(Effect::power("kindle", 1, StatusDuration::Indefinite))
                .with_power(PowerSpec::new(
                    PowerTrigger::TurnStart,
                    EffectPayload::from_effects([Effect::damage(3)]),
                )),
            CardDefinition::new("slimed", "Slimed", CardType::Status).with_cost(1),
            CardDefinition::new("ruin", "Ruin", CardType::Attack)
                .with_cost(1)
                .with_effect(Effect::damage(100)),
        ])
        .unwrap();

    catalogs
        .opponents
        .register_all([
            OpponentDefinition::new("brute", "Brute", 45)
                .with_move(OpponentMove::attack("punch", 5)),
            OpponentDefinition::new("turtle", "Turtle", 30)
                .with_weakness(Element::Water)
                .with_move(OpponentMove::defend("shell", 10)),
            OpponentDefinition::new("rat", "Rat", 10).with_move(OpponentMove::attack("bite", 10)),
            OpponentDefinition::new("golem", "Golem", 40)
                .with_move(OpponentMove::defend("brace", 0))
                .with_phases(
                    PhaseSchedule::new(vec![0.5])
                        .with_transition(2, vec![PhaseAction::GainGuard(5)]),
                ),
        ])
        .unwrap();

    catalogs
        .modifiers
        .register_all([
            ModifierDefinition::new("battery", "Battery")
                .with_energy_bonus(1)
                .on_turn_start(EffectPayload::from_effects([Effect::draw(1)])),
            ModifierDefinition::new("pocket", "Pocket").retaining_hand(),
            ModifierDefinition::new("kiln", "Kiln")
                .with_momentum_modifier(MomentumModifier::for_element(Element::Fire, 1)),
            ModifierDefinition::new("anchor", "Anchor")
                .on_combat_start(EffectPayload::from_effects([Effect::guard(10), Effect::energy(2)])),
        ])
        .unwrap();

    catalogs
}

fn deck(cards: &[&str]) -> Vec<CardInstance> {
    cards
        .iter()
        .enumerate()
        .map(|(i, id)| CardInstance::new(InstanceId(i as u32), *id))
        .collect()
}

fn start<'a>(catalogs: &'a Catalogs, cards: &[&str], opponent: &str) -> Combat<'a> {
    let setup = CombatSetup::new(80, 80)
        .with_deck(deck(cards))
        .with_opponent(opponent);
    Combat::new(catalogs, CombatConfig::default().with_seed(7), setup).unwrap()
}

fn in_hand(combat: &Combat<'_>, card_id: &str) -> InstanceId {
    combat
        .hand()
        .iter()
        .find(|card| card.card_id == card_id)
        .map(|card| card.id)
        .expect("card should be in hand")
}

/// A 1-cost "deal 6" card against a 45 HP opponent with no matchup.
#[test]
fn test_basic_attack_scenario() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["spark"; 5], "brute");

    let report = combat.play_card(in_hand(&combat, "spark"), None).unwrap();

    assert_eq!(combat.opponents()[0].health.current(), 39);
    assert_eq!(combat.player().energy, 2);
    assert_eq!(combat.player().momentum.momentum(), 1);
    assert_eq!(report.momentum, 1);
    assert_eq!(report.execution.damage_dealt, 6);
    assert_eq!(combat.pile(Pile::Discard).len(), 1);
}

/// A weakness hit fully absorbed by guard still counts as a weakness hit.
#[test]
fn test_weakness_into_guard_scenario() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["tide"; 10], "turtle");

    // Turtle shells up on its first turn; opponent guard persists.
    combat.end_turn().unwrap();
    assert_eq!(combat.opponents()[0].statuses.guard(), 10);

    let report = combat.play_card(in_hand(&combat, "tide"), None).unwrap();

    assert_eq!(report.execution.guard_absorbed, 9);
    assert_eq!(report.execution.damage_dealt, 0);
    assert_eq!(report.execution.weakness_hits, 1);
    assert_eq!(combat.opponents()[0].statuses.guard(), 1);
    assert_eq!(combat.opponents()[0].health.current(), 30);
    assert_eq!(combat.player().momentum.resonance(Element::Water), 1);
}

/// Resonance bonuses read resonance built by earlier plays.
#[test]
fn test_resonance_bonus_after_weakness_hit() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["tide"; 5], "turtle");

    let first = combat.play_card(in_hand(&combat, "tide"), None).unwrap();
    assert!(!first.execution.resonance_bonus_fired);

    let second = combat.play_card(in_hand(&combat, "tide"), None).unwrap();
    assert!(second.execution.resonance_bonus_fired);
    assert_eq!(combat.player().statuses.guard(), 4);

    // floor(6 * 1.5) twice
    assert_eq!(combat.opponents()[0].health.current(), 12);
}

/// Momentum bonuses read momentum from prior plays, not the current one.
#[test]
fn test_momentum_bonus_threshold() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["flare"; 5], "brute");

    let first = combat.play_card(in_hand(&combat, "flare"), None).unwrap();
    assert!(!first.execution.momentum_bonus_fired);
    assert_eq!(first.momentum, 1);

    let second = combat.play_card(in_hand(&combat, "flare"), None).unwrap();
    assert!(!second.execution.momentum_bonus_fired);
    assert_eq!(second.momentum, 2);

    let third = combat.play_card(in_hand(&combat, "flare"), None).unwrap();
    assert!(third.execution.momentum_bonus_fired);
    assert_eq!(third.execution.damage_dealt, 7);

    assert_eq!(combat.opponents()[0].health.current(), 45 - 2 - 2 - 7);
}

/// Momentum and resonance reset or decay when the player's turn ends.
#[test]
fn test_momentum_resets_at_turn_end() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["tide"; 10], "turtle");

    combat.play_card(in_hand(&combat, "tide"), None).unwrap();
    combat.play_card(in_hand(&combat, "tide"), None).unwrap();
    assert_eq!(combat.player().momentum.momentum(), 2);
    assert_eq!(combat.player().momentum.resonance(Element::Water), 2);

    combat.end_turn().unwrap();
    assert_eq!(combat.player().momentum.momentum(), 0);
    assert_eq!(combat.player().momentum.last_element(), Element::Neutral);
    assert_eq!(combat.player().momentum.resonance(Element::Water), 1);
}

/// Killing the last opponent ends the combat immediately.
#[test]
fn test_victory() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["spark"; 5], "rat");
    combat.drain_events();

    combat.play_card(in_hand(&combat, "spark"), None).unwrap();
    let report = combat.play_card(in_hand(&combat, "spark"), None).unwrap();

    assert_eq!(report.outcome, Some(CombatOutcome::Victory));
    assert_eq!(combat.phase(), TurnPhase::Finished(CombatOutcome::Victory));
    assert_eq!(combat.opponents()[0].health.current(), 0);

    let events = combat.drain_events();
    assert!(events.contains(&CombatEvent::OpponentDefeated { opponent: 0 }));
    assert_eq!(events.last(), Some(&CombatEvent::Victory));

    let card = in_hand(&combat, "spark");
    assert_eq!(combat.play_card(card, None), Err(PlayError::CombatOver));
    assert_eq!(combat.end_turn(), Err(PlayError::CombatOver));
}

/// The player dropping to 0 HP during the opponent turn is a defeat.
#[test]
fn test_defeat() {
    let catalogs = catalogs();
    let setup = CombatSetup::new(8, 80)
        .with_deck(deck(&["keep"; 5]))
        .with_opponent("rat");
    let mut combat = Combat::new(&catalogs, CombatConfig::default(), setup).unwrap();

    let phase = combat.end_turn().unwrap();

    assert_eq!(phase, TurnPhase::Finished(CombatOutcome::Defeat));
    assert_eq!(combat.player().health.current(), 0);
    assert_eq!(combat.turn(), 1);
    assert!(combat.drain_events().contains(&CombatEvent::Defeat));
    assert_eq!(combat.finish().outcome, Some(CombatOutcome::Defeat));
}

/// Rejected plays leave every observable part of the combat unchanged.
#[test]
fn test_illegal_plays_change_nothing() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["smash", "smash", "slimed", "spark", "spark"], "brute");

    let smash = in_hand(&combat, "smash");
    combat.play_card(smash, None).unwrap();
    combat.drain_events();
    let before = combat.snapshot();

    let other_smash = in_hand(&combat, "smash");
    assert_eq!(
        combat.play_card(other_smash, None),
        Err(PlayError::NotEnoughEnergy { cost: 2, available: 1 })
    );
    assert_eq!(
        combat.play_card(smash, None),
        Err(PlayError::CardNotInHand(smash))
    );
    assert_eq!(
        combat.play_card(in_hand(&combat, "spark"), Some(1)),
        Err(PlayError::InvalidTarget)
    );

    assert_eq!(combat.snapshot(), before);
    assert!(combat.drain_events().is_empty());
}

/// A card without a cost can never be played.
#[test]
fn test_uncosted_card_unplayable() {
    let mut catalogs = catalogs();
    catalogs
        .cards
        .register(CardDefinition::new("dazed", "Dazed", CardType::Status))
        .unwrap();
    let mut combat = start(&catalogs, &["dazed", "slimed"], "brute");

    assert_eq!(
        combat.play_card(in_hand(&combat, "dazed"), None),
        Err(PlayError::Unplayable("dazed".to_string()))
    );
    assert_eq!(combat.player().energy, 3);

    // Status cards with a cost play like any other card.
    combat.play_card(in_hand(&combat, "slimed"), None).unwrap();
    assert_eq!(combat.player().energy, 2);
}

/// End of turn exhausts ethereal cards, keeps retained ones, discards the rest.
#[test]
fn test_end_of_turn_hand_cleanup() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["burn", "ghost", "keep", "spark", "spark"], "golem");

    let burn = in_hand(&combat, "burn");
    let ghost = in_hand(&combat, "ghost");
    let keep = in_hand(&combat, "keep");

    combat.play_card(burn, None).unwrap();
    assert!(combat.pile(Pile::Exhaust).iter().any(|c| c.id == burn));

    combat.end_turn().unwrap();

    let exhaust: Vec<InstanceId> = combat.pile(Pile::Exhaust).iter().map(|c| c.id).collect();
    assert!(exhaust.contains(&burn));
    assert!(exhaust.contains(&ghost));
    assert!(combat.hand().iter().any(|c| c.id == keep));
    // keep plus the two sparks reshuffled and redrawn
    assert_eq!(combat.hand().len(), 3);
}

/// Modifiers add energy, fire turn-start payloads and can retain the hand.
#[test]
fn test_modifiers() {
    let catalogs = catalogs();
    let setup = CombatSetup::new(80, 80)
        .with_deck(deck(&["spark"; 12]))
        .with_opponent("golem")
        .with_modifier("battery")
        .with_modifier("pocket")
        .with_modifier("kiln")
        .with_modifier("no-such-modifier");
    let mut combat = Combat::new(&catalogs, CombatConfig::default(), setup).unwrap();

    assert_eq!(combat.player().energy, 4);
    assert_eq!(combat.hand().len(), 6);

    let report = combat.play_card(in_hand(&combat, "spark"), None).unwrap();
    assert_eq!(report.momentum, 2);

    combat.end_turn().unwrap();
    // five retained, one from the modifier, then four drawn before the
    // hand is full and the last draw overflows to discard
    assert_eq!(combat.hand().len(), 10);
    assert_eq!(combat.pile(Pile::Discard).len(), 2);
}

/// Combat-start payloads land after the first turn's refill and last
/// only that turn.
#[test]
fn test_combat_start_payload_survives_first_turn() {
    let catalogs = catalogs();
    let setup = CombatSetup::new(80, 80)
        .with_deck(deck(&["keep"; 10]))
        .with_opponent("golem")
        .with_modifier("anchor");
    let mut combat = Combat::new(&catalogs, CombatConfig::default(), setup).unwrap();

    assert_eq!(combat.player().statuses.guard(), 10);
    assert_eq!(combat.player().energy, 5);
    assert_eq!(combat.hand().len(), 5);

    combat.end_turn().unwrap();
    assert_eq!(combat.player().statuses.guard(), 0);
    assert_eq!(combat.player().energy, 3);
}

/// The turn-scoped play counter drives the play limit and clears each turn.
#[test]
fn test_cards_played_counter() {
    let catalogs = catalogs();
    let setup = CombatSetup::new(80, 80)
        .with_deck(deck(&["flare"; 8]))
        .with_opponent("golem");
    let config = CombatConfig::default().with_seed(7).with_play_limit(2);
    let mut combat = Combat::new(&catalogs, config, setup).unwrap();

    combat.play_card(in_hand(&combat, "flare"), None).unwrap();
    combat.play_card(in_hand(&combat, "flare"), None).unwrap();
    assert_eq!(combat.player().statuses.get(keys::CARDS_PLAYED), 2);
    assert_eq!(
        combat.play_card(in_hand(&combat, "flare"), None),
        Err(PlayError::PlayLimitReached { limit: 2 })
    );

    combat.end_turn().unwrap();
    assert_eq!(combat.player().statuses.get(keys::CARDS_PLAYED), 0);
    assert!(combat.play_card(in_hand(&combat, "flare"), None).is_ok());
}

/// Powers attach on play and fire at the start of later turns.
#[test]
fn test_power_fires_each_turn() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["kindle", "keep", "keep", "keep", "keep"], "golem");

    combat.play_card(in_hand(&combat, "kindle"), None).unwrap();
    assert_eq!(combat.player().powers.stacks("kindle"), 1);
    assert_eq!(combat.opponents()[0].health.current(), 40);

    combat.end_turn().unwrap();
    assert_eq!(combat.opponents()[0].health.current(), 37);

    combat.end_turn().unwrap();
    assert_eq!(combat.opponents()[0].health.current(), 34);
}

/// One big hit past a threshold enters the next phase exactly once.
#[test]
fn test_phase_change_event() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["smash", "spark", "spark", "spark", "spark"], "golem");
    combat.drain_events();

    combat.play_card(in_hand(&combat, "smash"), None).unwrap();
    combat.play_card(in_hand(&combat, "spark"), None).unwrap();

    let phase_changes: Vec<_> = combat
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CombatEvent::PhaseChanged { .. }))
        .collect();
    assert_eq!(
        phase_changes,
        vec![CombatEvent::PhaseChanged { opponent: 0, from: 1, to: 2 }]
    );
    assert_eq!(combat.opponents()[0].phase(), 2);
    // 40 - 30 = 10, then the phase guard of 5 soaks part of the spark
    assert_eq!(combat.opponents()[0].health.current(), 9);
}

/// A killing blow past a phase threshold defeats without a phase change.
#[test]
fn test_lethal_hit_skips_phase_change() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["ruin"; 5], "golem");
    combat.drain_events();

    combat.play_card(in_hand(&combat, "ruin"), None).unwrap();

    let events = combat.drain_events();
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::PhaseChanged { .. })));
    assert!(events.contains(&CombatEvent::OpponentDefeated { opponent: 0 }));
    assert_eq!(combat.outcome(), Some(CombatOutcome::Victory));

    let golem = &combat.opponents()[0];
    assert_eq!(golem.phase(), 1);
    assert_eq!(golem.statuses.guard(), 0);
}

/// Opponents announce their next move before the player acts.
#[test]
fn test_intents_announced() {
    let catalogs = catalogs();
    let mut combat = start(&catalogs, &["spark"; 10], "brute");

    let events = combat.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::IntentChosen { opponent: 0, move_id, .. } if move_id == "punch"
    )));

    let snapshot = combat.snapshot();
    let intent = snapshot.opponents[0].intent.as_ref().unwrap();
    assert_eq!(intent.damage, Some(5));

    combat.end_turn().unwrap();
    assert_eq!(combat.player().health.current(), 75);
    assert!(combat.opponents()[0].intent().is_some());
}

/// Same seed and commands replay to the same state.
#[test]
fn test_deterministic_replay() {
    let catalogs = catalogs();
    let cards = ["spark", "tide", "flare", "keep", "ghost", "burn", "smash", "spark"];

    let run = || {
        let mut combat = start(&catalogs, &cards, "brute");
        for _ in 0..3 {
            let first = combat.hand()[0].id;
            let _ = combat.play_card(first, None);
            combat.end_turn().unwrap();
        }
        combat.snapshot()
    };

    assert_eq!(run(), run());
}

/// Finishing returns the original deck without generated cards or modifiers.
#[test]
fn test_finish_returns_deck() {
    let mut catalogs = catalogs();
    catalogs
        .opponents
        .register(
            OpponentDefinition::new("slimer", "Slimer", 50).with_move(
                OpponentMove::attack("spit", 1).with_card_grant(resonance_combat::intent::CardGrant {
                    card_id: "slimed".to_string(),
                    pile: Pile::Discard,
                    count: 2,
                }),
            ),
        )
        .unwrap();
    let mut combat = start(&catalogs, &["spark"; 6], "slimer");

    let spark = in_hand(&combat, "spark");
    assert!(combat.adjust_card(spark, 1, true));
    combat.end_turn().unwrap();
    let slimed: usize = [Pile::Draw, Pile::Hand, Pile::Discard]
        .into_iter()
        .map(|pile| combat.pile(pile).iter().filter(|c| c.card_id == "slimed").count())
        .sum();
    assert_eq!(slimed, 2);

    let result = combat.finish();
    assert_eq!(result.outcome, None);
    assert_eq!(result.deck.len(), 6);
    assert!(result.deck.iter().all(|c| c.card_id == "spark" && c.modifiers.is_empty()));
}

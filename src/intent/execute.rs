//! Opponent move execution.
//!
//! A move is translated into an [`EffectPayload`] and run through the
//! interpreter like any card, so it follows the same dispatch order:
//! damage, then guard, then statuses, then added cards.

use tracing::debug;

use super::moves::{MoveTarget, OpponentMove};
use crate::combatant::Damageable;
use crate::core::{CombatState, CombatantId};
use crate::effects::{Effect, EffectInterpreter, EffectPayload, EffectTarget, ExecutionReport};

/// Build the payload for a move used at the given HP%.
///
/// Damage is the base amount plus conditional bonuses. The user's strength
/// is added later by the interpreter.
#[must_use]
pub fn move_payload(mv: &OpponentMove, hp_percent: f64) -> EffectPayload {
    let mut payload = EffectPayload::new();

    if let Some(base) = mv.damage {
        payload.push(Effect::DealDamage {
            amount: base + mv.bonus_damage(hp_percent),
            hits: mv.hits,
            target: EffectTarget::Target,
        });
    }

    if let Some(guard) = mv.guard {
        payload.push(Effect::guard(guard));
    }

    for status in &mv.statuses {
        payload.push(Effect::ApplyStatus {
            key: status.key.clone(),
            amount: status.amount,
            duration: status.duration,
            target: match status.target {
                MoveTarget::SelfTarget => EffectTarget::SelfTarget,
                MoveTarget::Player => EffectTarget::Target,
            },
            element: status.element,
        });
    }

    for grant in &mv.add_cards {
        payload.push(Effect::add_card(grant.card_id.clone(), grant.pile, grant.count));
    }

    payload
}

/// Execute the current intent of opponent `index` against the player.
///
/// Returns `None` when the opponent is missing, defeated, or has no chosen
/// intent. On completion the move's cooldown starts and the intent clears.
pub fn execute_move(
    state: &mut CombatState,
    interpreter: &EffectInterpreter<'_>,
    index: usize,
) -> Option<ExecutionReport> {
    let opponent = state.opponents.get_mut(index)?;
    if opponent.is_defeated() {
        return None;
    }

    let mv = opponent.selector_mut().begin_execution()?;
    let hp_percent = opponent.hp_percent();
    debug!(opponent = %opponent.id, move_id = %mv.id, "executing move");

    let payload = move_payload(&mv, hp_percent);
    let report = interpreter.execute(
        state,
        &payload,
        CombatantId::Opponent(index),
        CombatantId::Player,
        mv.element,
    );

    if let Some(opponent) = state.opponents.get_mut(index) {
        opponent.selector_mut().finish_execution(&mv);
    }

    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalogs, OpponentDefinition};
    use crate::cards::{CardDefinition, CardType};
    use crate::combatant::{Health, Opponent, Player};
    use crate::core::{CombatConfig, Element};
    use crate::intent::{CardGrant, DamageBonus, IntentState, MoveStatus};
    use crate::momentum::MomentumTracker;
    use crate::piles::Pile;
    use crate::status::{keys, StatusDuration, StatusRules};
    use std::sync::Arc;

    fn setup(mv: OpponentMove) -> (Catalogs, CombatState) {
        let mut catalogs = Catalogs::new();
        catalogs
            .cards
            .register(CardDefinition::new("slimed", "Slimed", CardType::Status))
            .unwrap();

        let rules = Arc::new(StatusRules::default());
        let def = OpponentDefinition::new("brute", "Brute", 40).with_move(mv);
        let player = Player::new(Health::full(80), Arc::clone(&rules), MomentumTracker::default());
        let opponent = Opponent::from_definition(&def, 8, rules);
        let state = CombatState::new(CombatConfig::default(), player, vec![opponent]);
        (catalogs, state)
    }

    fn choose(state: &mut CombatState) {
        let turn = state.turn;
        state.opponents[0].choose_intent(turn, &mut state.intent_rng);
    }

    #[test]
    fn test_attack_with_strength_and_bonus() {
        let mv = OpponentMove::attack("rage", 5).with_damage_bonus(DamageBonus::BelowHpPercent {
            percent: 50.0,
            bonus: 4,
        });
        let (catalogs, mut state) = setup(mv);
        let interpreter = EffectInterpreter::new(&catalogs);
        state.opponents[0]
            .statuses
            .apply(keys::STRENGTH, 2, StatusDuration::Indefinite);

        choose(&mut state);
        let report = execute_move(&mut state, &interpreter, 0).unwrap();
        assert_eq!(report.damage_dealt, 7);

        state.opponents[0].health.lose(30);
        choose(&mut state);
        let report = execute_move(&mut state, &interpreter, 0).unwrap();
        assert_eq!(report.damage_dealt, 11);
        assert_eq!(state.player.health.current(), 62);
    }

    #[test]
    fn test_full_move_order() {
        let mv = OpponentMove::attack("smother", 4)
            .with_guard(6)
            .with_status(MoveStatus {
                key: keys::FREEZE.to_string(),
                amount: 1,
                duration: StatusDuration::Turns(1),
                target: MoveTarget::Player,
                element: Some(Element::Water),
            })
            .with_status(MoveStatus {
                key: keys::STRENGTH.to_string(),
                amount: 1,
                duration: StatusDuration::Indefinite,
                target: MoveTarget::SelfTarget,
                element: None,
            })
            .with_card_grant(CardGrant {
                card_id: "slimed".to_string(),
                pile: Pile::Discard,
                count: 2,
            });
        let (catalogs, mut state) = setup(mv);
        let interpreter = EffectInterpreter::new(&catalogs);

        choose(&mut state);
        let report = execute_move(&mut state, &interpreter, 0).unwrap();

        // Strength gained by this move does not affect its own damage
        assert_eq!(report.damage_dealt, 4);
        assert_eq!(state.opponents[0].statuses.guard(), 6);
        assert_eq!(state.opponents[0].statuses.get(keys::STRENGTH), 1);
        assert_eq!(state.player.statuses.get("freeze_water"), 1);
        assert_eq!(state.piles.len(Pile::Discard), 2);
    }

    #[test]
    fn test_cooldown_and_intent_cleared() {
        let (catalogs, mut state) = setup(OpponentMove::attack("slam", 9).with_cooldown(2));
        let interpreter = EffectInterpreter::new(&catalogs);

        choose(&mut state);
        execute_move(&mut state, &interpreter, 0).unwrap();

        let selector = state.opponents[0].selector();
        assert_eq!(selector.cooldown("slam"), 3);
        assert_eq!(selector.state(), IntentState::AwaitingIntent);
        assert!(state.opponents[0].intent().is_none());
    }

    #[test]
    fn test_no_intent_or_defeated_skips() {
        let (catalogs, mut state) = setup(OpponentMove::attack("slam", 9));
        let interpreter = EffectInterpreter::new(&catalogs);

        assert!(execute_move(&mut state, &interpreter, 0).is_none());

        choose(&mut state);
        state.opponents[0].health.lose(40);
        assert!(execute_move(&mut state, &interpreter, 0).is_none());
        assert!(execute_move(&mut state, &interpreter, 3).is_none());
        assert_eq!(state.player.health.current(), 80);
    }
}

//! Effect interpretation.
//!
//! The `EffectInterpreter` is the only code that turns an [`EffectPayload`]
//! into state changes. Card plays, power triggers, modifier hooks and
//! opponent moves all route through it.
//!
//! ## Execution Order
//!
//! 1. Effects run in dispatch order (see [`Effect::dispatch_rank`]).
//! 2. For a card, the momentum bonus runs if momentum has reached the
//!    card's threshold.
//! 3. Then the resonance bonus runs if the card's element has resonance.
//!
//! Bonus payloads never trigger further bonuses. Once combat reaches a
//! terminal state, remaining effects are not executed.
//!
//! ## Failure Policy
//!
//! An effect that references an unknown definition, or that has no valid
//! recipient, is logged and skipped. The rest of the payload still runs.

use tracing::{debug, warn};

use super::effect::{Effect, EffectPayload, EffectTarget};
use crate::cards::CardDefinition;
use crate::catalog::Catalogs;
use crate::combatant::Damageable;
use crate::core::{CombatState, CombatantId, Element};
use crate::powers::TriggerPoint;

/// Why an effect was skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// `AddCard` named a card id missing from the catalog.
    UnknownCard(String),
    /// `ApplyPower` named a card id that is missing or carries no power.
    UnknownPower(String),
    /// No living recipient.
    NoTarget,
    /// A player-only effect came from an opponent.
    PlayerOnly,
}

/// A skipped effect and the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEffect {
    pub kind: &'static str,
    pub reason: SkipReason,
}

/// Summary of one interpreter run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Total HP removed from recipients.
    pub damage_dealt: i32,
    /// Total damage soaked by guard.
    pub guard_absorbed: i32,
    /// Hits that matched a recipient's weakness.
    pub weakness_hits: u32,
    /// Effects that ran.
    pub applied: u32,
    pub skipped: Vec<SkippedEffect>,
    pub momentum_bonus_fired: bool,
    pub resonance_bonus_fired: bool,
}

impl ExecutionReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: ExecutionReport) {
        self.damage_dealt += other.damage_dealt;
        self.guard_absorbed += other.guard_absorbed;
        self.weakness_hits += other.weakness_hits;
        self.applied += other.applied;
        self.skipped.extend(other.skipped);
        self.momentum_bonus_fired |= other.momentum_bonus_fired;
        self.resonance_bonus_fired |= other.resonance_bonus_fired;
    }

    fn skip(&mut self, effect: &Effect, reason: SkipReason) {
        warn!(effect = effect_kind(effect), ?reason, "effect skipped");
        self.skipped.push(SkippedEffect {
            kind: effect_kind(effect),
            reason,
        });
    }
}

fn effect_kind(effect: &Effect) -> &'static str {
    match effect {
        Effect::DealDamage { .. } => "deal_damage",
        Effect::GainGuard { .. } => "gain_guard",
        Effect::Heal { .. } => "heal",
        Effect::ApplyStatus { .. } => "apply_status",
        Effect::DrawCards { .. } => "draw_cards",
        Effect::GainEnergy { .. } => "gain_energy",
        Effect::AddCard { .. } => "add_card",
        Effect::ApplyPower { .. } => "apply_power",
    }
}

/// Executes effect payloads against a combat.
#[derive(Clone, Copy, Debug)]
pub struct EffectInterpreter<'a> {
    catalogs: &'a Catalogs,
}

impl<'a> EffectInterpreter<'a> {
    #[must_use]
    pub fn new(catalogs: &'a Catalogs) -> Self {
        Self { catalogs }
    }

    /// Execute a payload from `source` against `target`.
    ///
    /// `element` is the element of any damage the payload deals.
    pub fn execute(
        &self,
        state: &mut CombatState,
        payload: &EffectPayload,
        source: CombatantId,
        target: CombatantId,
        element: Element,
    ) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        for effect in payload.in_dispatch_order() {
            if state.is_over() {
                debug!("combat over; remaining effects dropped");
                break;
            }
            self.execute_effect(state, effect, source, target, element, &mut report);
        }

        report
    }

    /// Execute a card's payload, then its eligible bonus payloads.
    pub fn execute_card(
        &self,
        state: &mut CombatState,
        card: &CardDefinition,
        upgraded: bool,
        target: CombatantId,
    ) -> ExecutionReport {
        let source = CombatantId::Player;
        let element = card.element;
        let mut report = self.execute(state, card.effect_for(upgraded), source, target, element);

        if let Some(bonus) = &card.momentum_bonus {
            let momentum = state.player.momentum.momentum();
            if !state.is_over() && momentum >= bonus.threshold {
                debug!(card = %card.id, momentum, "momentum bonus");
                report.merge(self.execute(state, &bonus.effect, source, target, element));
                report.momentum_bonus_fired = true;
            }
        }

        if let Some(bonus) = &card.resonance_bonus {
            let resonance = state.player.momentum.resonance(element);
            if !state.is_over() && !element.is_neutral() && resonance > 0 {
                debug!(card = %card.id, resonance, "resonance bonus");
                report.merge(self.execute(state, bonus, source, target, element));
                report.resonance_bonus_fired = true;
            }
        }

        report
    }

    /// Fire every player power whose trigger matches `point`.
    ///
    /// Each power runs its payload once per stack, aimed at the first
    /// living opponent.
    pub fn fire_powers(&self, state: &mut CombatState, point: TriggerPoint) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        let active: Vec<(String, i32)> = state
            .player
            .powers
            .iter()
            .map(|p| (p.source_card.clone(), p.stacks))
            .collect();

        for (source_card, stacks) in active {
            let Some(spec) = self.catalogs.card(&source_card).and_then(|c| c.power.as_ref())
            else {
                warn!(power = %source_card, "power definition missing; not fired");
                continue;
            };
            if !spec.trigger.fires_on(point) {
                continue;
            }
            let element = self
                .catalogs
                .card(&source_card)
                .map_or(Element::Neutral, |c| c.element);

            for _ in 0..stacks {
                let Some(index) = state.first_living_opponent() else {
                    break;
                };
                if state.is_over() {
                    break;
                }
                report.merge(self.execute(
                    state,
                    &spec.effect,
                    CombatantId::Player,
                    CombatantId::Opponent(index),
                    element,
                ));
            }
        }

        report
    }

    fn execute_effect(
        &self,
        state: &mut CombatState,
        effect: &Effect,
        source: CombatantId,
        target: CombatantId,
        element: Element,
        report: &mut ExecutionReport,
    ) {
        match effect {
            Effect::DealDamage {
                amount,
                hits,
                target: to,
            } => {
                let recipients = resolve_recipients(state, *to, source, target);
                if recipients.is_empty() {
                    report.skip(effect, SkipReason::NoTarget);
                    return;
                }
                let raw = amount + state.strength_of(source);
                for recipient in recipients {
                    for _ in 0..*hits {
                        if state.is_over() {
                            break;
                        }
                        let Some(outcome) = state.deal_damage(source, recipient, raw, element)
                        else {
                            break;
                        };
                        report.damage_dealt += outcome.hp_loss;
                        report.guard_absorbed += outcome.guard_absorbed;
                        if outcome.was_weakness_hit {
                            report.weakness_hits += 1;
                        }
                    }
                }
                report.applied += 1;
            }

            Effect::GainGuard { amount } => {
                if state.gain_guard(source, *amount) {
                    report.applied += 1;
                } else {
                    report.skip(effect, SkipReason::NoTarget);
                }
            }

            Effect::Heal { amount } => match state.combatant_mut(source) {
                Some(combatant) if !combatant.is_defeated() => {
                    combatant.heal(*amount);
                    report.applied += 1;
                }
                _ => report.skip(effect, SkipReason::NoTarget),
            },

            Effect::ApplyStatus {
                key,
                amount,
                duration,
                target: to,
                element: qualifier,
            } => {
                let key = match qualifier {
                    Some(e) => e.qualify(key),
                    None => key.clone(),
                };
                let recipients = resolve_recipients(state, *to, source, target);
                if recipients.is_empty() {
                    report.skip(effect, SkipReason::NoTarget);
                    return;
                }
                for recipient in recipients {
                    state.apply_status(recipient, &key, *amount, *duration);
                }
                report.applied += 1;
            }

            Effect::DrawCards { count } => {
                if !source.is_player() {
                    report.skip(effect, SkipReason::PlayerOnly);
                    return;
                }
                let drawn = state.draw_cards(*count);
                debug!(requested = *count, drawn, "cards drawn");
                report.applied += 1;
            }

            Effect::GainEnergy { amount } => {
                if !source.is_player() {
                    report.skip(effect, SkipReason::PlayerOnly);
                    return;
                }
                state.player.energy = (state.player.energy + amount).max(0);
                report.applied += 1;
            }

            Effect::AddCard {
                card_id,
                pile,
                count,
            } => {
                if !self.catalogs.cards.contains(card_id) {
                    report.skip(effect, SkipReason::UnknownCard(card_id.clone()));
                    return;
                }
                for _ in 0..*count {
                    state.create_card(card_id, *pile);
                }
                report.applied += 1;
            }

            Effect::ApplyPower {
                power_id,
                stacks,
                duration,
            } => {
                if !source.is_player() {
                    report.skip(effect, SkipReason::PlayerOnly);
                    return;
                }
                let has_power = self
                    .catalogs
                    .card(power_id)
                    .is_some_and(|c| c.power.is_some());
                if !has_power {
                    report.skip(effect, SkipReason::UnknownPower(power_id.clone()));
                    return;
                }
                state.player.powers.apply(power_id, *stacks, *duration);
                report.applied += 1;
            }
        }
    }
}

/// Living recipients of a targeted effect.
///
/// "Opponents" are relative to the source: for the player they are the
/// living opponents, for an opponent it is the player.
fn resolve_recipients(
    state: &mut CombatState,
    to: EffectTarget,
    source: CombatantId,
    target: CombatantId,
) -> Vec<CombatantId> {
    let recipients = match (to, source) {
        (EffectTarget::SelfTarget, _) => vec![source],
        (EffectTarget::Target, _) => vec![target],
        (EffectTarget::AllOpponents, CombatantId::Player) => state
            .living_opponents()
            .into_iter()
            .map(CombatantId::Opponent)
            .collect(),
        (EffectTarget::RandomOpponent, CombatantId::Player) => state
            .random_living_opponent()
            .map(CombatantId::Opponent)
            .into_iter()
            .collect(),
        (EffectTarget::AllOpponents | EffectTarget::RandomOpponent, CombatantId::Opponent(_)) => {
            vec![CombatantId::Player]
        }
    };
    recipients
        .into_iter()
        .filter(|&id| state.is_alive(id))
        .collect()
}

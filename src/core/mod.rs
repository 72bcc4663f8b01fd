//! Core card data: ids, types, descriptors, definitions, instances, catalog

pub mod card;
pub mod catalog;
pub mod effects;
pub mod entity;
pub mod hooks;
pub mod types;

pub use card::{CardDefinition, CardInstance};
pub use effects::{AbilityDescriptor, Allocation, Effect, GlobalEffect, SealEffect, TargetType, TargetedAbility};
pub use entity::{CardId, EntityId, EntityStore};
pub use hooks::{ActivateHook, BattleHook, CardHooks, EndOfRoundHook, FlipHook, LimboHook, PassiveHook, PostCombatHook};
pub use types::{Alignment, CardType, Faction, Location, MarkerKind, SealIndex, Side, SEAL_COUNT};

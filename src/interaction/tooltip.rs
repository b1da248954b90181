//! Tooltip gating, labels, and click affordances per interactable kind.
//!
//! Every lookup is total: unrecognized kinds fall through to a safe default
//! and log a warning instead of failing.
use bevy::log::warn;

use super::components::InteractableKind;

/// Mouse buttons a tooltip advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickAffordance {
    Left,
    Right,
    #[default]
    Both,
}

impl ClickAffordance {
    /// Mouse-button hint shown next to the tooltip text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "LMB",
            Self::Right => "RMB",
            Self::Both => "LMB/RMB",
        }
    }
}

/// Payload delivered to tooltip presentation on every target transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TooltipInfo {
    pub active: bool,
    pub text: String,
    pub click: ClickAffordance,
}

impl TooltipInfo {
    /// Hidden tooltip with the default affordance.
    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Facts about the target and the looking actor that gating and labels depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetContext {
    /// The target is a rock that deactivates instead of being picked up.
    pub destroy_on_pickup: bool,
    /// The target carries a [`TerminalMarker`](super::components::TerminalMarker).
    pub terminal: bool,
    /// The actor's hand currently holds a rock.
    pub hand_holds_rock: bool,
}

const DEFAULT_TOOLTIP_TEXT: &str = "Interact";

/// Whether the tooltip for `kind` should be shown at all.
pub fn needs_to_be_active(kind: &InteractableKind, context: &TargetContext) -> bool {
    match kind {
        InteractableKind::Rock => true,
        InteractableKind::PressurePlate => context.hand_holds_rock,
        InteractableKind::LightPillar => !context.terminal,
        InteractableKind::PictureTile => true,
        InteractableKind::Unrecognized(tag) => {
            warn!("No active state found for interactable type {}", tag);
            false
        }
    }
}

pub fn tooltip_text(kind: &InteractableKind, context: &TargetContext) -> &'static str {
    match kind {
        InteractableKind::Rock if context.destroy_on_pickup => "Destroy rock",
        InteractableKind::Rock => "Pickup rock",
        InteractableKind::PressurePlate => "Place rock",
        InteractableKind::LightPillar => "Rotate pillar",
        InteractableKind::PictureTile => "Rotate tile",
        InteractableKind::Unrecognized(tag) => {
            warn!("No tooltip text found for interactable type {}", tag);
            DEFAULT_TOOLTIP_TEXT
        }
    }
}

pub fn click_affordance(kind: &InteractableKind) -> ClickAffordance {
    match kind {
        InteractableKind::Rock => ClickAffordance::Left,
        InteractableKind::PressurePlate => ClickAffordance::Left,
        InteractableKind::LightPillar => ClickAffordance::Both,
        InteractableKind::PictureTile => ClickAffordance::Left,
        InteractableKind::Unrecognized(tag) => {
            warn!("No click affordance found for interactable type {}", tag);
            ClickAffordance::Both
        }
    }
}

/// Builds the tooltip for a newly acquired target, or the inactive tooltip when there is
/// no target or gating rejects it.
pub fn tooltip_for(kind: Option<&InteractableKind>, context: &TargetContext) -> TooltipInfo {
    match kind {
        Some(kind) if needs_to_be_active(kind, context) => TooltipInfo {
            active: true,
            text: tooltip_text(kind, context).to_string(),
            click: click_affordance(kind),
        },
        _ => TooltipInfo::inactive(),
    }
}

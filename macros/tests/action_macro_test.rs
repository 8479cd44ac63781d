//! Tests for #[derive(Action)] macro

use quickcourt_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum SlotAction {
    #[command]
    PickSlot { label: String },

    #[command]
    Clear,

    #[event]
    Saved(u32),

    #[event]
    SaveFailed { message: String },

    Tick,
}

#[test]
fn test_is_command() {
    let action = SlotAction::PickSlot {
        label: "06:00 - 07:00".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
    assert!(SlotAction::Clear.is_command());
}

#[test]
fn test_is_event() {
    assert!(SlotAction::Saved(1).is_event());
    assert!(!SlotAction::Saved(1).is_command());
    assert!(
        SlotAction::SaveFailed {
            message: "down".to_string()
        }
        .is_event()
    );
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!SlotAction::Tick.is_command());
    assert!(!SlotAction::Tick.is_event());
}

#[test]
fn test_name_for_every_shape() {
    assert_eq!(
        SlotAction::PickSlot {
            label: String::new()
        }
        .name(),
        "PickSlot"
    );
    assert_eq!(SlotAction::Clear.name(), "Clear");
    assert_eq!(SlotAction::Saved(3).name(), "Saved");
    assert_eq!(SlotAction::Tick.name(), "Tick");
}

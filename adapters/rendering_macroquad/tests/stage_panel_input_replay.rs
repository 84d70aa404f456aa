use drawing_buddy_rendering_macroquad::StagePanelInputState;
use drawing_buddy_system_stage_view::{Action, InputField};
use glam::Vec2;

const VIEWPORT: Vec2 = Vec2::new(1_280.0, 800.0);

fn run_sequence(sequence: &[Option<Action>]) -> Vec<Vec<Action>> {
    let mut state = StagePanelInputState::default();
    let mut delivered = Vec::new();
    for pressed in sequence {
        delivered.push(state.take_frame_input(false, VIEWPORT).actions);
        if let Some(action) = pressed {
            state.register_action(*action);
        }
    }

    // Flush any trailing latched press so the harness observes the final action.
    delivered.push(state.take_frame_input(false, VIEWPORT).actions);
    delivered
}

#[test]
fn button_press_sequence_is_delivered_once_on_the_next_frame() {
    let sequence = [
        None,
        Some(Action::Begin),
        None,
        Some(Action::ConfirmArtistName),
        Some(Action::Print),
    ];
    let expected = vec![
        vec![],
        vec![],
        vec![Action::Begin],
        vec![],
        vec![Action::ConfirmArtistName],
        vec![Action::Print],
    ];

    let first_run = run_sequence(&sequence);
    let second_run = run_sequence(&sequence);

    assert_eq!(first_run, expected);
    assert_eq!(first_run, second_run);
}

#[test]
fn typed_text_precedes_confirmation_in_frame_commands() {
    let mut state = StagePanelInputState::default();
    state.register_action(Action::ConfirmArtistName);
    state.register_edit(InputField::ArtistName, "Mi".to_owned());
    state.register_edit(InputField::ArtistName, "Mika".to_owned());

    let input = state.take_frame_input(true, VIEWPORT);
    assert!(input.quit_requested);
    assert_eq!(input.viewport, Some(VIEWPORT));
    assert_eq!(
        input.commands(),
        vec![
            InputField::ArtistName.edit_command("Mika".to_owned()),
            Action::ConfirmArtistName.command(),
        ]
    );
}

use super::*;
use crossterm::event::KeyModifiers;
use pretty_assertions::assert_eq;

fn type_str(state: &mut FormState, text: &str) {
    for c in text.chars() {
        assert_eq!(state.handle_key(&Key::char(c)), FormOutcome::Pending);
    }
}

fn press(state: &mut FormState, code: KeyCode) -> FormOutcome {
    state.handle_key(&Key::simple(code))
}

fn buffer_text(buf: &Buffer) -> String {
    buf.content().iter().map(|cell| cell.symbol()).collect()
}

#[test]
fn test_form_titles() {
    assert_eq!(FormState::create().title, "Create New Avatar");
    assert_eq!(FormState::edit(2).title, "Edit Avatar #2");
}

#[test]
fn test_text_input_editing() {
    let mut state = FormState::create();
    type_str(&mut state, "Zoë");
    assert_eq!(state.name.value(), "Zoë");
    assert_eq!(state.name.cursor(), 3);

    press(&mut state, KeyCode::Left);
    press(&mut state, KeyCode::Backspace);
    assert_eq!(state.name.value(), "Zë");

    press(&mut state, KeyCode::Home);
    type_str(&mut state, "A");
    assert_eq!(state.name.value(), "AZë");

    press(&mut state, KeyCode::End);
    press(&mut state, KeyCode::Delete);
    assert_eq!(state.name.value(), "AZë");
    assert_eq!(state.name.cursor(), 3);
}

#[test]
fn test_ctrl_chars_are_not_inserted() {
    let mut state = FormState::create();
    state.handle_key(&Key::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    assert_eq!(state.name.value(), "");
}

#[test]
fn test_focus_cycles() {
    let mut state = FormState::create();
    assert_eq!(state.focus, FormField::Name);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.focus, FormField::Email);
    type_str(&mut state, "a@b.c");
    assert_eq!(state.email.value(), "a@b.c");

    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Tab);
    press(&mut state, KeyCode::Tab);
    assert_eq!(state.focus, FormField::Create);

    press(&mut state, KeyCode::Tab);
    assert_eq!(state.focus, FormField::Name);

    press(&mut state, KeyCode::BackTab);
    assert_eq!(state.focus, FormField::Create);
}

#[test]
fn test_style_selection() {
    let mut state = FormState::create();
    state.focus = FormField::Style;

    press(&mut state, KeyCode::Left);
    assert_eq!(state.highlighted_style, 5);
    press(&mut state, KeyCode::Right);
    press(&mut state, KeyCode::Right);
    assert_eq!(state.highlighted_style, 1);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.selected_style, Some(AvatarStyle::Human));
}

#[test]
fn test_outcomes() {
    let mut state = FormState::create();
    assert_eq!(press(&mut state, KeyCode::Esc), FormOutcome::Cancelled);

    state.focus = FormField::Cancel;
    assert_eq!(press(&mut state, KeyCode::Enter), FormOutcome::Cancelled);

    press(&mut state, KeyCode::Right);
    assert_eq!(state.focus, FormField::Create);
    assert_eq!(press(&mut state, KeyCode::Enter), FormOutcome::Submitted);
}

#[test]
fn test_submit_with_empty_fields() {
    let mut state = FormState::create();
    state.focus = FormField::Create;
    assert_eq!(press(&mut state, KeyCode::Enter), FormOutcome::Submitted);
}

#[test]
fn test_render_form() {
    let area = Rect::new(0, 0, 80, 30);
    let mut buf = Buffer::empty(area);
    let mut state = FormState::edit(3);
    type_str(&mut state, "Lindsay");

    AvatarForm::new().render(area, &mut buf, &mut state);

    let text = buffer_text(&buf);
    assert!(text.contains("Edit Avatar #3"));
    assert!(text.contains("Lindsay"));
    assert!(text.contains("Fantasy"));
    assert!(text.contains("Create Avatar"));
}

#[test]
fn test_render_form_in_small_area() {
    let area = Rect::new(0, 0, 20, 8);
    let mut buf = Buffer::empty(area);
    let mut state = FormState::create();

    AvatarForm::new().render(area, &mut buf, &mut state);
}

use crate::key;
use crossterm::event::KeyCode;
use tourdesk::forms::{Field, FieldEvent, FieldSet, SelectInput, SelectOption, TextInput, TextKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Id {
    Title,
    Name,
    Note,
    Amount,
    Country,
    Active,
}

fn sample() -> FieldSet<Id> {
    FieldSet::new(vec![
        Field::heading(Id::Title, "Client"),
        Field::text(Id::Name, "Name", TextKind::Plain),
        Field::info(Id::Note, "Note", "read only"),
        Field::text(Id::Amount, "Amount", TextKind::Number),
        Field::select(Id::Country, "Country"),
        Field::toggle(Id::Active, "Active"),
    ])
}

fn countries() -> Vec<SelectOption> {
    vec![SelectOption::new("1", "France"), SelectOption::new("2", "Spain")]
}

#[test]
fn test_text_input_editing() {
    let mut input = TextInput::new(TextKind::Plain);
    for c in "héllo".chars() {
        assert!(input.insert(c));
    }
    assert_eq!(input.cursor(), 5);

    input.move_left();
    input.move_left();
    assert!(input.backspace());
    assert_eq!(input.value(), "hélo");
    assert!(input.delete());
    assert_eq!(input.value(), "héo");

    input.home();
    assert!(!input.backspace());
    input.end();
    assert!(!input.delete());
}

#[test]
fn test_text_kinds_filter_characters() {
    let mut number = TextInput::new(TextKind::Number);
    assert!(!number.insert('x'));
    assert!(number.insert('4'));
    assert!(number.insert('.'));
    assert!(number.insert('5'));
    assert_eq!(number.number(), Some(4.5));
    assert_eq!(number.integer(), None);

    assert!(TextKind::Date.accepts('-'));
    assert!(!TextKind::Date.accepts(':'));
    assert!(TextKind::DateTime.accepts('T'));
    assert_eq!(TextKind::Date.hint(), Some("YYYY-MM-DD"));
}

#[test]
fn test_select_keeps_pending_value_until_options_arrive() {
    let mut select = SelectInput::new();
    select.set_value("2");
    assert_eq!(select.value(), None);
    assert_eq!(select.pending(), Some("2"));
    assert_eq!(select.effective_value(), Some("2"));

    // An empty list is not an answer yet
    select.set_options(Vec::new());
    assert_eq!(select.pending(), Some("2"));

    assert!(select.set_options(countries()));
    assert_eq!(select.value(), Some("2"));
    assert_eq!(select.label(), Some("Spain"));
    assert_eq!(select.pending(), None);
}

#[test]
fn test_select_drops_value_missing_from_new_options() {
    let mut select = SelectInput::with_options(countries());
    select.set_value("1");
    assert_eq!(select.value_i64(), Some(1));

    assert!(select.set_options(vec![SelectOption::new("3", "Italy")]));
    assert_eq!(select.value(), None);
}

#[test]
fn test_select_cycles_through_placeholder() {
    let mut select = SelectInput::with_options(countries());
    select.select_next();
    assert_eq!(select.value(), Some("1"));
    select.select_next();
    assert_eq!(select.value(), Some("2"));
    select.select_next();
    assert_eq!(select.value(), None);

    select.select_previous();
    assert_eq!(select.value(), Some("2"));
}

#[test]
fn test_focus_skips_headings_and_static_lines() {
    let mut fields = sample();
    assert_eq!(fields.focused(), Some(Id::Name));

    fields.focus_next();
    assert_eq!(fields.focused(), Some(Id::Amount));

    fields.focus_previous();
    fields.focus_previous();
    assert_eq!(fields.focused(), Some(Id::Active));

    // Disabled fields are skipped too
    fields.set_enabled(Id::Amount, false);
    fields.focus(Id::Name);
    fields.focus_next();
    assert_eq!(fields.focused(), Some(Id::Country));
}

#[test]
fn test_key_routing() {
    let mut fields = sample();
    assert_eq!(fields.handle_key(key(KeyCode::Char('A'))), FieldEvent::Changed(Id::Name));
    assert_eq!(fields.text(Id::Name), "A");

    assert_eq!(fields.handle_key(key(KeyCode::Tab)), FieldEvent::Moved);
    assert_eq!(fields.handle_key(key(KeyCode::Char('z'))), FieldEvent::Ignored);
    assert_eq!(fields.text(Id::Amount), "");

    fields.handle_key(key(KeyCode::Down));
    fields.set_options(Id::Country, countries());
    assert_eq!(fields.handle_key(key(KeyCode::Right)), FieldEvent::Changed(Id::Country));
    assert_eq!(fields.select_i64(Id::Country), Some(1));
    assert_eq!(fields.select_label(Id::Country), Some("France".to_string()));

    fields.handle_key(key(KeyCode::Tab));
    assert!(!fields.toggled(Id::Active));
    assert_eq!(fields.handle_key(key(KeyCode::Char(' '))), FieldEvent::Changed(Id::Active));
    assert!(fields.toggled(Id::Active));
}

#[test]
fn test_insert_and_remove_fields_keep_focus() {
    let mut fields = sample();
    fields.focus(Id::Country);

    fields.retain(|id| *id != Id::Amount);
    assert_eq!(fields.focused(), Some(Id::Country));
    assert!(!fields.contains(Id::Amount));

    fields.insert_after(
        |id| *id == Id::Name,
        vec![Field::text(Id::Amount, "Amount", TextKind::Number)],
    );
    assert_eq!(fields.focused(), Some(Id::Country));
    let order: Vec<Id> = fields.fields().iter().map(|field| field.id).collect();
    assert_eq!(order, vec![Id::Title, Id::Name, Id::Amount, Id::Note, Id::Country, Id::Active]);

    // Removing the focused field moves focus forward
    fields.retain(|id| *id != Id::Country);
    assert_eq!(fields.focused(), Some(Id::Active));
}

#[test]
fn test_lines_describe_fields() {
    let mut fields = sample();
    fields.set_text(Id::Name, "Ann");
    let lines = fields.lines();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1].value, "Ann");
    assert!(lines[1].focused);
    assert_eq!(lines[2].value, "read only");
    assert_eq!(lines[4].value, tourdesk::constants::SELECT_PLACEHOLDER);
    assert_eq!(lines[5].value, "[ ]");
}

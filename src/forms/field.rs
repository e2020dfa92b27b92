//! Input widgets and the focus ring that routes keys to them.

use super::{FieldLine, LineKind};
use crate::constants::SELECT_PLACEHOLDER;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Characters a text input accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Plain,
    Number,
    Date,
    DateTime,
}

impl TextKind {
    pub fn accepts(self, c: char) -> bool {
        match self {
            TextKind::Plain => !c.is_control(),
            TextKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            TextKind::Date => c.is_ascii_digit() || c == '-',
            TextKind::DateTime => c.is_ascii_digit() || matches!(c, '-' | ':' | 'T'),
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            TextKind::Plain | TextKind::Number => None,
            TextKind::Date => Some("YYYY-MM-DD"),
            TextKind::DateTime => Some("YYYY-MM-DDTHH:MM"),
        }
    }
}

/// Single-line text input with a character cursor
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    kind: TextKind,
}

impl TextInput {
    pub fn new(kind: TextKind) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            kind,
        }
    }

    pub fn with_value(kind: TextKind, value: impl Into<String>) -> Self {
        let mut input = Self::new(kind);
        input.set_value(value);
        input
    }

    pub fn kind(&self) -> TextKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the content and move the cursor to the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn number(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }

    pub fn integer(&self) -> Option<i64> {
        self.value.trim().parse().ok()
    }

    /// Insert at the cursor; characters the kind rejects are ignored
    pub fn insert(&mut self, c: char) -> bool {
        if !self.kind.accepts(c) {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(index, _)| index)
            .unwrap_or(self.value.len())
    }
}

/// One entry of a select input
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose value is its label
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Drop-down replacement: cycles through its options with Left/Right
///
/// Starts on the placeholder. A value set before the options arrive is kept
/// as pending and selected once a list containing it is loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectInput {
    options: Vec<SelectOption>,
    selected: Option<usize>,
    pending: Option<String>,
}

impl SelectInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Vec<SelectOption>) -> Self {
        let mut select = Self::new();
        select.set_options(options);
        select
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.value.as_str())
    }

    pub fn value_i64(&self) -> Option<i64> {
        self.value().and_then(|value| value.parse().ok())
    }

    pub fn label(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(|option| option.label.as_str())
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// The selected value, or the pending one while options are loading
    pub fn effective_value(&self) -> Option<&str> {
        self.value().or(self.pending.as_deref())
    }

    /// Select `value` now, or once it shows up among the options
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        match self.options.iter().position(|option| option.value == value) {
            Some(index) => {
                self.selected = Some(index);
                self.pending = None;
            }
            None => {
                self.selected = None;
                self.pending = Some(value);
            }
        }
    }

    /// Replace the options, keeping the pending or current value if present
    ///
    /// Returns true when the selected value changed.
    pub fn set_options(&mut self, options: Vec<SelectOption>) -> bool {
        let before = self.value().map(str::to_string);
        let pending = self.pending.take();
        let wanted = pending.clone().or_else(|| before.clone());
        self.options = options;
        self.selected = wanted
            .as_deref()
            .and_then(|value| self.options.iter().position(|option| option.value == value));
        // An empty list is no answer yet
        if self.options.is_empty() {
            self.pending = pending;
        }
        before.as_deref() != self.value()
    }

    /// Drop the options and the selection
    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = None;
        self.pending = None;
    }

    pub fn select_next(&mut self) {
        self.pending = None;
        self.selected = match self.selected {
            None if !self.options.is_empty() => Some(0),
            Some(index) if index + 1 < self.options.len() => Some(index + 1),
            _ => None,
        };
    }

    pub fn select_previous(&mut self) {
        self.pending = None;
        self.selected = match self.selected {
            None if !self.options.is_empty() => Some(self.options.len() - 1),
            Some(index) if index > 0 => Some(index - 1),
            _ => None,
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Text(TextInput),
    Select(SelectInput),
    Toggle(bool),
    /// Read-only text; never takes focus
    Static(String),
    /// Section title; never takes focus
    Heading,
}

impl Widget {
    fn focusable(&self) -> bool {
        !matches!(self, Widget::Static(_) | Widget::Heading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field<F> {
    pub id: F,
    pub label: String,
    pub widget: Widget,
    pub enabled: bool,
}

impl<F> Field<F> {
    pub fn new(id: F, label: impl Into<String>, widget: Widget) -> Self {
        Self {
            id,
            label: label.into(),
            widget,
            enabled: true,
        }
    }

    pub fn text(id: F, label: impl Into<String>, kind: TextKind) -> Self {
        Self::new(id, label, Widget::Text(TextInput::new(kind)))
    }

    pub fn text_with(id: F, label: impl Into<String>, kind: TextKind, value: impl Into<String>) -> Self {
        Self::new(id, label, Widget::Text(TextInput::with_value(kind, value)))
    }

    pub fn select(id: F, label: impl Into<String>) -> Self {
        Self::new(id, label, Widget::Select(SelectInput::new()))
    }

    pub fn toggle(id: F, label: impl Into<String>) -> Self {
        Self::new(id, label, Widget::Toggle(false))
    }

    pub fn info(id: F, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, label, Widget::Static(text.into()))
    }

    pub fn heading(id: F, label: impl Into<String>) -> Self {
        Self::new(id, label, Widget::Heading)
    }

    fn focusable(&self) -> bool {
        self.enabled && self.widget.focusable()
    }
}

/// What a key did to a [`FieldSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent<F> {
    Ignored,
    Moved,
    Changed(F),
}

/// Ordered fields with a focus ring
#[derive(Debug, Clone)]
pub struct FieldSet<F> {
    fields: Vec<Field<F>>,
    focus: Option<usize>,
}

impl<F> Default for FieldSet<F> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            focus: None,
        }
    }
}

impl<F: Copy + PartialEq> FieldSet<F> {
    pub fn new(fields: Vec<Field<F>>) -> Self {
        let mut set = Self { fields, focus: None };
        set.focus = set.fields.iter().position(Field::focusable);
        set
    }

    pub fn fields(&self) -> &[Field<F>] {
        &self.fields
    }

    pub fn get(&self, id: F) -> Option<&Field<F>> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn get_mut(&mut self, id: F) -> Option<&mut Field<F>> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    pub fn contains(&self, id: F) -> bool {
        self.get(id).is_some()
    }

    // Values

    /// Text content of a text field; empty for anything else
    pub fn text(&self, id: F) -> &str {
        match self.get(id).map(|field| &field.widget) {
            Some(Widget::Text(input)) => input.value(),
            _ => "",
        }
    }

    pub fn input(&self, id: F) -> Option<&TextInput> {
        match self.get(id).map(|field| &field.widget) {
            Some(Widget::Text(input)) => Some(input),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: F, value: impl Into<String>) {
        if let Some(Widget::Text(input)) = self.get_mut(id).map(|field| &mut field.widget) {
            input.set_value(value);
        }
    }

    pub fn select(&self, id: F) -> Option<&SelectInput> {
        match self.get(id).map(|field| &field.widget) {
            Some(Widget::Select(select)) => Some(select),
            _ => None,
        }
    }

    pub fn select_mut(&mut self, id: F) -> Option<&mut SelectInput> {
        match self.get_mut(id).map(|field| &mut field.widget) {
            Some(Widget::Select(select)) => Some(select),
            _ => None,
        }
    }

    pub fn select_value(&self, id: F) -> Option<String> {
        self.select(id).and_then(SelectInput::value).map(str::to_string)
    }

    pub fn select_i64(&self, id: F) -> Option<i64> {
        self.select(id).and_then(SelectInput::value_i64)
    }

    pub fn select_effective(&self, id: F) -> Option<String> {
        self.select(id).and_then(SelectInput::effective_value).map(str::to_string)
    }

    pub fn select_label(&self, id: F) -> Option<String> {
        self.select(id).and_then(SelectInput::label).map(str::to_string)
    }

    /// Replace the options of a select; true when its value changed
    pub fn set_options(&mut self, id: F, options: Vec<SelectOption>) -> bool {
        self.select_mut(id).is_some_and(|select| select.set_options(options))
    }

    pub fn toggled(&self, id: F) -> bool {
        matches!(self.get(id).map(|field| &field.widget), Some(Widget::Toggle(true)))
    }

    pub fn set_static(&mut self, id: F, text: impl Into<String>) {
        if let Some(Widget::Static(value)) = self.get_mut(id).map(|field| &mut field.widget) {
            *value = text.into();
        }
    }

    pub fn set_enabled(&mut self, id: F, enabled: bool) {
        if let Some(field) = self.get_mut(id) {
            field.enabled = enabled;
        }
        if self.focus.is_some_and(|index| !self.fields[index].focusable()) {
            self.focus_next();
        }
    }

    // Structure

    pub fn push(&mut self, field: Field<F>) {
        self.fields.push(field);
        if self.focus.is_none() {
            self.focus = self.fields.iter().position(Field::focusable);
        }
    }

    pub fn extend(&mut self, fields: impl IntoIterator<Item = Field<F>>) {
        for field in fields {
            self.push(field);
        }
    }

    /// Insert fields after the last field matching `after`, or at the end
    pub fn insert_after(&mut self, after: impl Fn(&F) -> bool, fields: Vec<Field<F>>) {
        let focused = self.focused();
        let at = self
            .fields
            .iter()
            .rposition(|field| after(&field.id))
            .map(|index| index + 1)
            .unwrap_or(self.fields.len());
        self.fields.splice(at..at, fields);
        self.restore_focus(focused);
    }

    /// Keep only the fields matching `keep`
    pub fn retain(&mut self, keep: impl Fn(&F) -> bool) {
        let focused = self.focused();
        let old_index = self.focus.unwrap_or(0);
        self.fields.retain(|field| keep(&field.id));
        if focused.is_some_and(|id| self.contains(id)) {
            self.restore_focus(focused);
        } else {
            // Land on the closest focusable field at or after the removed one
            self.focus = (old_index.min(self.fields.len())..self.fields.len())
                .chain(0..old_index.min(self.fields.len()))
                .find(|index| self.fields[*index].focusable());
        }
    }

    // Focus

    pub fn focused(&self) -> Option<F> {
        self.focus.and_then(|index| self.fields.get(index)).map(|field| field.id)
    }

    pub fn focus(&mut self, id: F) {
        if let Some(index) = self.fields.iter().position(|field| field.id == id && field.focusable()) {
            self.focus = Some(index);
        }
    }

    fn restore_focus(&mut self, focused: Option<F>) {
        self.focus = focused
            .and_then(|id| self.fields.iter().position(|field| field.id == id))
            .or_else(|| self.fields.iter().position(Field::focusable));
    }

    pub fn focus_next(&mut self) {
        self.step_focus(true);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(false);
    }

    fn step_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        if len == 0 {
            self.focus = None;
            return;
        }
        let start = self.focus.unwrap_or(if forward { len - 1 } else { 0 });
        for step in 1..=len {
            let index = if forward {
                (start + step) % len
            } else {
                (start + len - step % len) % len
            };
            if self.fields[index].focusable() {
                self.focus = Some(index);
                return;
            }
        }
        self.focus = None;
    }

    /// Route a key to the focused field
    pub fn handle_key(&mut self, key: KeyEvent) -> FieldEvent<F> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FieldEvent::Moved;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                return FieldEvent::Moved;
            }
            _ => {}
        }

        let Some(index) = self.focus else {
            return FieldEvent::Ignored;
        };
        let field = &mut self.fields[index];
        let id = field.id;
        let changed = match &mut field.widget {
            Widget::Text(input) => match key.code {
                KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                    input.insert(c)
                }
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => {
                    input.move_left();
                    return FieldEvent::Moved;
                }
                KeyCode::Right => {
                    input.move_right();
                    return FieldEvent::Moved;
                }
                KeyCode::Home => {
                    input.home();
                    return FieldEvent::Moved;
                }
                KeyCode::End => {
                    input.end();
                    return FieldEvent::Moved;
                }
                _ => return FieldEvent::Ignored,
            },
            Widget::Select(select) => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    select.select_next();
                    true
                }
                KeyCode::Left => {
                    select.select_previous();
                    true
                }
                _ => return FieldEvent::Ignored,
            },
            Widget::Toggle(on) => match key.code {
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    *on = !*on;
                    true
                }
                _ => return FieldEvent::Ignored,
            },
            Widget::Static(_) | Widget::Heading => return FieldEvent::Ignored,
        };

        if changed {
            FieldEvent::Changed(id)
        } else {
            FieldEvent::Ignored
        }
    }

    /// Display lines for the form dialog
    pub fn lines(&self) -> Vec<FieldLine> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let focused = self.focus == Some(index);
                let (value, kind) = match &field.widget {
                    Widget::Text(input) => (
                        input.value().to_string(),
                        LineKind::Text {
                            cursor: input.cursor(),
                            hint: input.kind().hint(),
                        },
                    ),
                    Widget::Select(select) => (
                        select.label().unwrap_or(SELECT_PLACEHOLDER).to_string(),
                        LineKind::Select {
                            count: select.options().len(),
                        },
                    ),
                    Widget::Toggle(on) => (if *on { "[x]" } else { "[ ]" }.to_string(), LineKind::Toggle),
                    Widget::Static(text) => (text.clone(), LineKind::Info),
                    Widget::Heading => (String::new(), LineKind::Heading),
                };
                FieldLine {
                    label: field.label.clone(),
                    value,
                    kind,
                    focused,
                    enabled: field.enabled,
                }
            })
            .collect()
    }
}

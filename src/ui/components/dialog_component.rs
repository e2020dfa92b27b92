//! Modal dialog component.
//!
//! Hosts one dialog at a time: a record or filter form, the live search box,
//! or one of the text dialogs (info, error, help, logs). Forms report what
//! they need as [`FormOutcome`]s; this component turns those into actions for
//! the app and routes lookup and submission results back into the form.
//!
//! Submissions carry an id. Only the outcome matching the submission the
//! current form is waiting on may close the form or raise its alert, so a
//! late answer never lands in a form opened afterwards. Lookups are stamped
//! with the sequence number of the form that asked for them in the same way.

use crate::forms::{Form, FormOutcome, Lookup, TextInput, TextKind};
use crate::logger::Logger;
use crate::session::Section;
use crate::ui::components::dialogs::{form_dialog, search_dialog, system_dialogs, ScrollState};
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, style::Color, Frame};

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    form: Option<Box<dyn Form>>,
    alert: Option<String>,
    search: TextInput,
    scroll: ScrollState,
    logger: Option<Logger>,
    employee_id: i64,
    submission_seq: u64,
    awaiting: Option<u64>,
    form_seq: u64,
}

impl DialogComponent {
    pub fn new(employee_id: i64) -> Self {
        Self {
            dialog_type: None,
            form: None,
            alert: None,
            search: TextInput::new(TextKind::Plain),
            scroll: ScrollState::default(),
            logger: None,
            employee_id,
            submission_seq: 0,
            awaiting: None,
            form_seq: 0,
        }
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = Some(logger);
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    /// Message shown over the open form, if any
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Submission the open form is waiting on
    pub fn awaiting(&self) -> Option<u64> {
        self.awaiting
    }

    /// Sequence number of the most recently opened form
    pub fn form_seq(&self) -> u64 {
        self.form_seq
    }

    fn run_lookups(&self, lookups: Vec<Lookup>) -> Action {
        if lookups.is_empty() {
            Action::None
        } else {
            Action::RunLookups {
                form: self.form_seq,
                lookups,
            }
        }
    }

    pub fn search_text(&self) -> &str {
        self.search.value()
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.form = None;
        self.alert = None;
        self.awaiting = None;
        self.search.set_value("");
        self.scroll.reset();
    }

    fn open(&mut self, dialog_type: DialogType) -> Action {
        self.clear_dialog();
        let mut action = Action::None;
        match &dialog_type {
            DialogType::Form(kind) => {
                self.form_seq += 1;
                let mut form = kind.clone().build(self.employee_id);
                action = self.run_lookups(form.initial_lookups());
                self.form = Some(form);
            }
            DialogType::Search { term, .. } => self.search.set_value(term.clone()),
            DialogType::Error(message) => log::error!("{}", message),
            _ => {}
        }
        self.dialog_type = Some(dialog_type);
        action
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        // Any key dismisses the alert and returns to the form
        if self.alert.take().is_some() {
            return Action::None;
        }
        let Some(form) = self.form.as_mut() else {
            return Action::HideDialog;
        };

        match form.handle_key(key) {
            FormOutcome::None => Action::None,
            FormOutcome::Lookups(lookups) => self.run_lookups(lookups),
            FormOutcome::Submit(submission) => {
                if self.awaiting.is_some() {
                    log::debug!("Ignoring submit while a save is in flight");
                    return Action::None;
                }
                self.submission_seq += 1;
                let id = self.submission_seq;
                self.awaiting = Some(id);
                log::info!("Submitting #{}: {}", id, submission.description());
                Action::Submit { id, submission }
            }
            FormOutcome::Invalid(message) => {
                log::warn!("Form rejected: {}", message);
                self.alert = Some(message);
                Action::None
            }
            FormOutcome::Cancel => Action::HideDialog,
        }
    }

    fn handle_search_key(&mut self, section: Section, key: KeyEvent) -> Action {
        let changed = match key.code {
            KeyCode::Enter | KeyCode::Esc => return Action::HideDialog,
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => {
                self.search.move_left();
                false
            }
            KeyCode::Right => {
                self.search.move_right();
                false
            }
            KeyCode::Home => {
                self.search.home();
                false
            }
            KeyCode::End => {
                self.search.end();
                false
            }
            _ => false,
        };

        if changed {
            Action::SearchChanged {
                section,
                term: self.search.value().to_string(),
            }
        } else {
            Action::None
        }
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match self.dialog_type {
            None => Action::None,
            Some(DialogType::Form(_)) => self.handle_form_key(key),
            Some(DialogType::Search { section, .. }) => self.handle_search_key(section, key),
            Some(DialogType::Info(_)) | Some(DialogType::Error(_)) => {
                if self.scroll.handle_key(&key) {
                    Action::None
                } else {
                    Action::HideDialog
                }
            }
            Some(DialogType::Help) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') => Action::HideDialog,
                _ => {
                    self.scroll.handle_key(&key);
                    Action::None
                }
            },
            Some(DialogType::Logs) => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.scroll.handle_key(&key);
                    Action::None
                }
            },
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => self.open(dialog_type),
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            Action::LookupLoaded { form, ticket, result } => match self.form.as_mut() {
                Some(open) if form == self.form_seq => {
                    let lookups = open.apply_lookup(ticket, result);
                    self.run_lookups(lookups)
                }
                _ => {
                    log::debug!("Dropping lookup result for closed form #{}", form);
                    Action::None
                }
            },
            Action::SubmissionCompleted { id, ref outcome } if self.awaiting == Some(id) => {
                self.awaiting = None;
                let keep_open = self.form.as_mut().map_or(false, |form| form.apply_outcome(outcome));
                if !keep_open {
                    self.dialog_type = None;
                    self.form = None;
                    self.alert = None;
                }
                action
            }
            Action::SubmissionFailed { id, ref message } if self.awaiting == Some(id) => {
                self.awaiting = None;
                self.alert = Some(message.clone());
                action
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(dialog_type) = &self.dialog_type else {
            return;
        };
        match dialog_type {
            DialogType::Form(_) => {
                if let Some(form) = &self.form {
                    form_dialog::render_form_dialog(f, rect, &form.view());
                }
                if let Some(alert) = &self.alert {
                    system_dialogs::render_alert(f, rect, alert);
                }
            }
            DialogType::Search { section, .. } => {
                search_dialog::render_search_dialog(f, rect, *section, &self.search);
            }
            DialogType::Info(message) => {
                system_dialogs::render_message_dialog(
                    f,
                    rect,
                    " ℹ Info ".to_string(),
                    Color::Blue,
                    message,
                    &mut self.scroll,
                );
            }
            DialogType::Error(message) => {
                system_dialogs::render_message_dialog(
                    f,
                    rect,
                    " ⚠ Error ".to_string(),
                    Color::Red,
                    message,
                    &mut self.scroll,
                );
            }
            DialogType::Help => system_dialogs::render_help_dialog(f, rect, &mut self.scroll),
            DialogType::Logs => system_dialogs::render_logs_dialog(f, rect, self.logger.as_ref(), &mut self.scroll),
        }
    }
}

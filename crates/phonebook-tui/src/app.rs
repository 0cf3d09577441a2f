use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use phonebook_core::{PhoneBook, Record};
use phonebook_source::Loaded;

use crate::actions::Action;

const SEARCH_EMPTY: &str = "No matching entries.";
const BOOK_EMPTY: &str = "Directory is empty. Ctrl+R reloads, Ctrl+E edits.";

#[derive(Debug, Clone)]
pub enum Mode {
    Search,
    Edit,
    RowForm(RowForm),
}

#[derive(Debug, Clone)]
pub struct App {
    pub mode: Mode,
    pub show_help: bool,
    pub should_quit: bool,
    pub book: PhoneBook,
    pub as_of: Option<String>,
    pub query: String,
    pub results: Vec<usize>,
    pub selected: usize,
    pub edit_selected: usize,
    pub dirty: bool,
    pub status: Option<String>,
    pub error: Option<String>,
    actions: VecDeque<Action>,
}

impl App {
    pub fn new(start_in_edit: bool) -> Self {
        let mut app = Self {
            mode: if start_in_edit { Mode::Edit } else { Mode::Search },
            show_help: false,
            should_quit: false,
            book: PhoneBook::new(),
            as_of: None,
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            edit_selected: 0,
            dirty: false,
            status: None,
            error: None,
            actions: VecDeque::new(),
        };
        app.enqueue(Action::Load);
        app
    }

    pub fn enqueue(&mut self, action: Action) {
        self.actions.push_back(action);
    }

    pub fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Swaps in a freshly loaded list. Unsaved edits are discarded.
    pub fn apply_loaded(&mut self, loaded: Loaded) {
        self.book.replace_all(loaded.records);
        self.as_of = loaded.as_of;
        self.dirty = false;
        self.refresh_results();
        self.clamp_edit_selection();
    }

    pub fn empty_hint(&self) -> &'static str {
        if self.book.is_empty() {
            BOOK_EMPTY
        } else {
            SEARCH_EMPTY
        }
    }

    /// Results as `(index, record)` pairs in canonical order.
    pub fn visible_records(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.results
            .iter()
            .filter_map(|&index| self.book.get(index).map(|record| (index, record)))
    }

    pub fn refresh_results(&mut self) {
        self.results = self.book.search_positions(&self.query);
        if self.selected >= self.results.len() {
            self.selected = self.results.len().saturating_sub(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if is_ctrl(key, 'c') {
            self.should_quit = true;
            return;
        }

        let mut mode = std::mem::replace(&mut self.mode, Mode::Search);
        match &mut mode {
            Mode::Search => {
                if let Some(next) = self.handle_search_key(key) {
                    mode = next;
                }
            }
            Mode::Edit => {
                if let Some(next) = self.handle_edit_key(key) {
                    mode = next;
                }
            }
            Mode::RowForm(form) => {
                if let Some(next) = self.handle_row_form_key(form, key) {
                    mode = next;
                }
            }
        }
        self.mode = mode;
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Mode> {
        if is_ctrl(key, 'r') {
            self.enqueue(Action::Load);
            return None;
        }
        if is_ctrl(key, 'e') {
            self.clamp_edit_selection();
            return Some(Mode::Edit);
        }

        match key.code {
            KeyCode::Esc => {
                if !self.query.is_empty() {
                    self.query.clear();
                    self.refresh_results();
                }
            }
            KeyCode::Down => self.move_selection(1),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            _ => {
                let before = self.query.len();
                apply_text_input(&mut self.query, key);
                if self.query.len() != before {
                    self.selected = 0;
                    self.refresh_results();
                }
            }
        }
        None
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => {
                if self.dirty {
                    self.set_status("Edits kept in memory; press s in edit mode to save");
                }
                return Some(Mode::Search);
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_edit_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_edit_selection(-1),
            KeyCode::PageDown => self.move_edit_selection(10),
            KeyCode::PageUp => self.move_edit_selection(-10),
            KeyCode::Home | KeyCode::Char('g') => self.edit_selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.edit_selected = self.book.len(),
            KeyCode::Enter => {
                let form = match self.book.get(self.edit_selected) {
                    Some(record) => RowForm::existing(self.edit_selected, record),
                    None => RowForm::blank(),
                };
                return Some(Mode::RowForm(form));
            }
            KeyCode::Char('d') => {
                if let Ok(removed) = self.book.remove(self.edit_selected) {
                    self.set_status(format!("Removed {}", describe(&removed)));
                    self.after_edit();
                }
            }
            KeyCode::Char('s') => {
                self.enqueue(Action::Save);
                return Some(Mode::Search);
            }
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
        None
    }

    fn handle_row_form_key(&mut self, form: &mut RowForm, key: KeyEvent) -> Option<Mode> {
        match key.code {
            KeyCode::Esc => return Some(Mode::Edit),
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Enter => {
                if form.is_save_focus() {
                    self.apply_row_form(form);
                    return Some(Mode::Edit);
                } else if form.is_cancel_focus() {
                    return Some(Mode::Edit);
                } else {
                    form.focus_next();
                }
            }
            _ => {
                if let Some(target) = form.active_field_mut() {
                    apply_text_input(target, key);
                }
            }
        }
        None
    }

    fn apply_row_form(&mut self, form: &RowForm) {
        let record = form.to_record();
        match form.index {
            Some(index) => match self.book.replace(index, record) {
                Ok(_) => {
                    self.set_status(format!("Updated row {}", index));
                    self.after_edit();
                }
                Err(err) => self.set_error(err.to_string()),
            },
            // A blank trailing row left blank is not an edit.
            None if record.is_blank() => {}
            None => match self.book.append(record) {
                Ok(index) => {
                    self.edit_selected = index + 1;
                    self.set_status(format!("Added row {}", index));
                    self.after_edit();
                }
                Err(err) => self.set_error(err.to_string()),
            },
        }
    }

    fn after_edit(&mut self) {
        self.dirty = true;
        self.clear_error();
        self.refresh_results();
        self.clamp_edit_selection();
    }

    fn clamp_edit_selection(&mut self) {
        // The trailing blank row sits at index `len`.
        if self.edit_selected > self.book.len() {
            self.edit_selected = self.book.len();
        }
    }

    fn move_selection(&mut self, delta: i32) {
        self.selected = step(self.selected, delta, self.results.len());
    }

    fn move_edit_selection(&mut self, delta: i32) {
        self.edit_selected = step(self.edit_selected, delta, self.book.len() + 1);
    }
}

fn step(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i64 + i64::from(delta);
    next.clamp(0, len as i64 - 1) as usize
}

fn is_ctrl(key: KeyEvent, ch: char) -> bool {
    key.code == KeyCode::Char(ch) && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn describe(record: &Record) -> String {
    if record.place.is_empty() {
        record.number.clone()
    } else {
        format!("{} ({})", record.place, record.number)
    }
}

fn apply_text_input(target: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            target.clear();
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            delete_last_word(target);
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                target.push(ch);
            }
        }
        KeyCode::Backspace => {
            target.pop();
        }
        _ => {}
    }
}

fn delete_last_word(value: &mut String) {
    while value.ends_with(|ch: char| ch.is_whitespace()) {
        value.pop();
    }
    while value.ends_with(|ch: char| !ch.is_whitespace()) {
        value.pop();
    }
}

/// Place/number form for one row of the edit table. `index` is `None` for the
/// trailing blank row.
#[derive(Debug, Clone)]
pub struct RowForm {
    pub(crate) focus: usize,
    pub index: Option<usize>,
    pub place: String,
    pub number: String,
}

impl RowForm {
    const FIELD_COUNT: usize = 2;

    pub fn blank() -> Self {
        Self {
            focus: 0,
            index: None,
            place: String::new(),
            number: String::new(),
        }
    }

    pub fn existing(index: usize, record: &Record) -> Self {
        Self {
            focus: 0,
            index: Some(index),
            place: record.place.clone(),
            number: record.number.clone(),
        }
    }

    pub fn focus_next(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        self.focus = (self.focus + 1) % total;
    }

    pub fn focus_prev(&mut self) {
        let total = Self::FIELD_COUNT + 2;
        if self.focus == 0 {
            self.focus = total - 1;
        } else {
            self.focus -= 1;
        }
    }

    pub fn is_save_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT
    }

    pub fn is_cancel_focus(&self) -> bool {
        self.focus == Self::FIELD_COUNT + 1
    }

    pub fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            0 => Some(&mut self.place),
            1 => Some(&mut self.number),
            _ => None,
        }
    }

    pub fn to_record(&self) -> Record {
        Record::trimmed(&self.place, &self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Mode};
    use crate::actions::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use phonebook_core::Record;
    use phonebook_source::Loaded;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(false);
        assert!(matches!(app.next_action(), Some(Action::Load)));
        app.apply_loaded(Loaded {
            records: vec![
                Record::new("ICU", "1234"),
                Record::new("", "5678"),
                Record::new("Emergency", "1200 / 1201"),
            ],
            as_of: Some("2024-03-01".to_string()),
        });
        app
    }

    #[test]
    fn typing_narrows_results_live() {
        let mut app = loaded_app();
        assert_eq!(app.results, vec![0, 1, 2]);

        type_text(&mut app, "12");
        assert_eq!(app.results, vec![0, 2]);

        type_text(&mut app, "0");
        assert_eq!(app.results, vec![2]);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.results, vec![0, 2]);

        app.handle_key(key(KeyCode::Esc));
        assert!(app.query.is_empty());
        assert_eq!(app.results, vec![0, 1, 2]);
    }

    #[test]
    fn search_is_case_insensitive_on_place() {
        let mut app = loaded_app();
        type_text(&mut app, "icu");
        let visible: Vec<_> = app.visible_records().map(|(index, _)| index).collect();
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn ctrl_r_queues_a_reload() {
        let mut app = loaded_app();
        app.handle_key(ctrl('r'));
        assert!(matches!(app.next_action(), Some(Action::Load)));
        assert!(app.query.is_empty());
    }

    #[test]
    fn trailing_row_appends_and_blank_form_is_ignored() {
        let mut app = loaded_app();
        app.handle_key(ctrl('e'));
        assert!(matches!(app.mode, Mode::Edit));

        app.handle_key(key(KeyCode::End));
        assert_eq!(app.edit_selected, 3);

        // Blank form on the trailing row does nothing.
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.mode, Mode::Edit));
        assert_eq!(app.book.len(), 3);

        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, " Lab ");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "9000");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.book.len(), 4);
        assert_eq!(app.book.get(3), Some(&Record::new("Lab", "9000")));
        assert_eq!(app.edit_selected, 4);
        assert!(app.dirty);
        assert_eq!(app.results, vec![0, 1, 2, 3]);
    }

    #[test]
    fn editing_existing_row_replaces_fields() {
        let mut app = loaded_app();
        app.handle_key(ctrl('e'));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Triage");
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.book.get(1), Some(&Record::new("Triage", "5678")));
    }

    #[test]
    fn delete_and_save_from_edit_mode() {
        let mut app = loaded_app();
        app.handle_key(ctrl('e'));
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.book.len(), 2);
        assert_eq!(app.book.get(0), Some(&Record::new("", "5678")));

        app.handle_key(key(KeyCode::Char('s')));
        assert!(matches!(app.mode, Mode::Search));
        assert!(matches!(app.next_action(), Some(Action::Save)));
    }

    #[test]
    fn delete_on_trailing_row_is_a_no_op() {
        let mut app = loaded_app();
        app.handle_key(ctrl('e'));
        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.book.len(), 3);
        assert!(!app.dirty);
    }

    #[test]
    fn escape_from_edit_mode_does_not_save() {
        let mut app = loaded_app();
        app.handle_key(ctrl('e'));
        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.mode, Mode::Search));
        assert!(app.next_action().is_none());
    }

    #[test]
    fn reload_clamps_selection_to_shorter_list() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 2);

        app.apply_loaded(Loaded {
            records: vec![Record::new("ICU", "1234")],
            as_of: None,
        });
        assert_eq!(app.selected, 0);
        assert_eq!(app.as_of, None);
    }
}

//! The binding manager: discovery, attachment, and submission-time
//! synchronization.
//!
//! One manager instance owns all bindings on a page. Discovery resolves the
//! field and form associations once and stores them on the target; the
//! surface and field stay independent until submission, when the surface's
//! text is copied into the field as the authoritative hand-off.
//!
//! Nothing here is fatal: targets that cannot bind are skipped, stale
//! persisted cursors are discarded, and a failing store never blocks
//! submission. The hidden plain field remains a valid fallback throughout.

use crossterm::event::KeyEvent;

use fieldmirror_config::Config;
use fieldmirror_highlight::ContentType;
use fieldmirror_page::{NodeId, Page};
use fieldmirror_store::{CursorKey, CursorStore, FileStore, MemoryStore};
use fieldmirror_surface::{Surface, SurfaceOptions};

use crate::command::{is_save_gesture, InputCommand};

/// A valid binding target produced by discovery.
///
/// `index` is the target's position among all mirror-flagged containers in
/// document order, including containers that were skipped. Skipped
/// containers keep their index so persistence keys stay stable when a
/// container is conditionally empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveredTarget {
    pub index: usize,
    pub container: NodeId,
    pub field: NodeId,
    pub form: NodeId,
}

/// An attached binding: a target plus its live editing surface.
pub struct Binding {
    pub index: usize,
    pub field: NodeId,
    pub form: NodeId,
    pub field_name: String,
    pub content: ContentType,
    pub surface: Surface,
}

/// What a key event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The focused surface handled the key
    Edited,
    /// The save gesture ran: fields were synchronized and the form
    /// submitted, carrying the submitted `(name, value)` pairs
    Submitted {
        form: NodeId,
        fields: Vec<(String, String)>,
    },
    /// No surface focused, or the key is not bound
    Ignored,
}

/// Owns the bindings on one page and drives their lifecycle.
pub struct BindingManager {
    config: Config,
    store: Box<dyn CursorStore>,
    bindings: Vec<Binding>,
    focused: Option<usize>,
}

impl BindingManager {
    /// Manager over an explicit store backend.
    pub fn new(config: Config, store: Box<dyn CursorStore>) -> Self {
        Self {
            config,
            store,
            bindings: Vec::new(),
            focused: None,
        }
    }

    /// Manager over the configured file store, falling back to an
    /// in-memory store when the file cannot be opened (cursor persistence
    /// is an enhancement, never a blocker).
    pub fn with_default_store(config: Config) -> Self {
        let store: Box<dyn CursorStore> = match Self::open_file_store(&config) {
            Ok(store) => Box::new(store),
            Err(e) => {
                fieldmirror_logger::warn(format!(
                    "cursor store unavailable, falling back to memory: {e}"
                ));
                Box::new(MemoryStore::new())
            }
        };
        Self::new(config, store)
    }

    fn open_file_store(config: &Config) -> anyhow::Result<FileStore> {
        match &config.storage.state_file {
            Some(path) => FileStore::open(path),
            None => FileStore::open_default(),
        }
    }

    /// Find all valid binding targets on the page, in document order.
    ///
    /// A container without a descendant field, or without an enclosing
    /// form, is skipped; other targets are unaffected.
    pub fn discover(page: &Page) -> Vec<DiscoveredTarget> {
        let mut targets = Vec::new();
        for (index, container) in page.mirror_containers().into_iter().enumerate() {
            let Some(field) = page.descendant_field(container) else {
                fieldmirror_logger::debug(format!(
                    "target {index} on {} skipped: no plain field",
                    page.path()
                ));
                continue;
            };
            let Some(form) = page.ancestor_form(field) else {
                fieldmirror_logger::debug(format!(
                    "target {index} on {} skipped: no enclosing form",
                    page.path()
                ));
                continue;
            };
            targets.push(DiscoveredTarget {
                index,
                container,
                field,
                form,
            });
        }
        targets
    }

    /// Discover and attach every valid target on the page.
    pub fn attach_all(&mut self, page: &mut Page) {
        for target in Self::discover(page) {
            self.attach(page, target);
        }
        fieldmirror_logger::info(format!(
            "{} surface(s) attached on {}",
            self.bindings.len(),
            page.path()
        ));
    }

    /// Attach an editing surface to one discovered target.
    ///
    /// Seeds the surface from the field's value, hides the field (it stays
    /// in the page for native submission), transfers focus if the field
    /// asked for it, and restores the persisted cursor offset when one is
    /// stored and still within the document.
    pub fn attach(&mut self, page: &mut Page, target: DiscoveredTarget) {
        let Some(field) = page.field(target.field).cloned() else {
            return;
        };

        let surface_cfg = &self.config.surface;
        let options = SurfaceOptions {
            indent_unit: surface_cfg.indent_unit.clone(),
            word_wrap: surface_cfg.word_wrap,
            show_line_numbers: surface_cfg.show_line_numbers,
            min_height: surface_cfg.min_height,
            history_limit: surface_cfg.history_limit,
        };
        let mut surface = Surface::from_text(&field.value, options);

        let key = CursorKey::new(page.path(), target.index);
        if let Some(offset) = self.store.load(&key) {
            if offset <= surface.len_chars() {
                surface.set_cursor_offset(offset);
                fieldmirror_logger::debug(format!("restored cursor {offset} for {key}"));
            } else {
                // Stale entry: the document shrank since it was written.
                // Skip, never clamp.
                fieldmirror_logger::debug(format!("stale cursor {offset} for {key} discarded"));
            }
        }

        if let Some(field) = page.field_mut(target.field) {
            field.hidden = true;
        }
        if field.autofocus {
            self.focused = Some(self.bindings.len());
        }

        self.bindings.push(Binding {
            index: target.index,
            field: target.field,
            form: target.form,
            content: ContentType::from_field_name(&field.name),
            field_name: field.name,
            surface,
        });
    }

    /// Submission-time synchronization for one form, run before the native
    /// submission proceeds.
    ///
    /// For each binding on the form, in target order: persist the primary
    /// selection's starting offset (when a selection exists), then copy the
    /// surface text into the plain field. Returns the synchronized field
    /// names.
    pub fn submit(&mut self, page: &mut Page, form: NodeId) -> Vec<String> {
        let path = page.path().to_string();
        let mut synced = Vec::new();

        for i in 0..self.bindings.len() {
            if self.bindings[i].form != form {
                continue;
            }
            if let Some((from, _)) = self.bindings[i].surface.primary_selection() {
                let key = CursorKey::new(path.as_str(), self.bindings[i].index);
                if let Err(e) = self.store.save(&key, from) {
                    fieldmirror_logger::warn(format!("failed to persist cursor for {key}: {e}"));
                }
            }
            let text = self.bindings[i].surface.text();
            if let Some(field) = page.field_mut(self.bindings[i].field) {
                field.value = text;
                synced.push(field.name.clone());
            }
        }

        fieldmirror_logger::info(format!(
            "synchronized {} field(s) on {path} before submission",
            synced.len()
        ));
        synced
    }

    /// Route a key event to the focused surface.
    ///
    /// The save gesture synchronizes the host form (letting the
    /// submission-time listeners run first) and then performs the actual
    /// submission, exactly once.
    pub fn handle_key(&mut self, page: &mut Page, key: KeyEvent) -> KeyOutcome {
        let Some(focused) = self.focused else {
            return KeyOutcome::Ignored;
        };

        if is_save_gesture(&key) {
            let form = self.bindings[focused].form;
            self.submit(page, form);
            let fields = page
                .form_fields(form)
                .into_iter()
                .filter_map(|id| page.field(id))
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect();
            return KeyOutcome::Submitted { form, fields };
        }

        let surface = &mut self.bindings[focused].surface;
        match InputCommand::from_key_event(key) {
            InputCommand::MoveUp => surface.move_up(false),
            InputCommand::MoveDown => surface.move_down(false),
            InputCommand::MoveLeft => surface.move_left(false),
            InputCommand::MoveRight => surface.move_right(false),
            InputCommand::MoveUpSelecting => surface.move_up(true),
            InputCommand::MoveDownSelecting => surface.move_down(true),
            InputCommand::MoveLeftSelecting => surface.move_left(true),
            InputCommand::MoveRightSelecting => surface.move_right(true),
            InputCommand::MoveLineStart => surface.move_line_start(false),
            InputCommand::MoveLineEnd => surface.move_line_end(false),
            InputCommand::MoveDocStart => surface.move_doc_start(false),
            InputCommand::MoveDocEnd => surface.move_doc_end(false),
            InputCommand::InsertChar(c) => surface.insert_char(c),
            InputCommand::InsertNewline => surface.insert_newline(),
            InputCommand::InsertIndent => surface.insert_indent(),
            InputCommand::Backspace => surface.backspace(),
            InputCommand::DeleteForward => surface.delete_forward(),
            InputCommand::Undo => surface.undo(),
            InputCommand::Redo => surface.redo(),
            InputCommand::Complete => {
                surface.complete();
            }
            // Matched by is_save_gesture above
            InputCommand::Save => {}
            InputCommand::None => return KeyOutcome::Ignored,
        }
        KeyOutcome::Edited
    }

    // === Accessors ===

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn surface(&self, index: usize) -> Option<&Surface> {
        self.bindings.get(index).map(|b| &b.surface)
    }

    pub fn surface_mut(&mut self, index: usize) -> Option<&mut Surface> {
        self.bindings.get_mut(index).map(|b| &mut b.surface)
    }

    /// Index (into `bindings`) of the focused surface, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn focus(&mut self, index: usize) {
        if index < self.bindings.len() {
            self.focused = Some(index);
        }
    }

    /// Cycle focus to the next attached surface.
    pub fn focus_next(&mut self) {
        if self.bindings.is_empty() {
            return;
        }
        self.focused = Some(match self.focused {
            Some(i) => (i + 1) % self.bindings.len(),
            None => 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldmirror_page::PlainField;

    fn page_with_targets() -> Page {
        let mut page = Page::new("/files/site.css");
        let form = page.add_form(None);
        let c0 = page.add_container(Some(form), true);
        page.add_field(Some(c0), PlainField::new("content.css", "body {}"));
        let c1 = page.add_container(Some(form), true);
        page.add_field(Some(c1), PlainField::new("data.json", "{}"));
        page
    }

    fn manager() -> BindingManager {
        BindingManager::new(Config::default(), Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_discover_resolves_field_and_form() {
        let page = page_with_targets();
        let targets = BindingManager::discover(&page);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].index, 0);
        assert_eq!(targets[1].index, 1);
        assert_eq!(targets[0].form, targets[1].form);
    }

    #[test]
    fn test_skipped_container_keeps_index() {
        let mut page = Page::new("/p");
        let form = page.add_form(None);
        let _empty = page.add_container(Some(form), true);
        let c = page.add_container(Some(form), true);
        page.add_field(Some(c), PlainField::new("x", ""));

        let targets = BindingManager::discover(&page);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].index, 1);
    }

    #[test]
    fn test_attach_hides_field_and_seeds_surface() {
        let mut page = page_with_targets();
        let mut mgr = manager();
        mgr.attach_all(&mut page);

        assert_eq!(mgr.bindings().len(), 2);
        assert_eq!(mgr.surface(0).unwrap().text(), "body {}");
        let field = mgr.bindings()[0].field;
        assert!(page.field(field).unwrap().hidden);
        // Field value untouched until submission
        assert_eq!(page.field(field).unwrap().value, "body {}");
    }

    #[test]
    fn test_autofocus_transfers_to_surface() {
        let mut page = Page::new("/p");
        let form = page.add_form(None);
        let c0 = page.add_container(Some(form), true);
        page.add_field(Some(c0), PlainField::new("a", ""));
        let c1 = page.add_container(Some(form), true);
        page.add_field(Some(c1), PlainField::new("b", "").with_autofocus());

        let mut mgr = manager();
        mgr.attach_all(&mut page);
        assert_eq!(mgr.focused(), Some(1));
    }

    #[test]
    fn test_no_autofocus_no_focus() {
        let mut page = page_with_targets();
        let mut mgr = manager();
        mgr.attach_all(&mut page);
        assert_eq!(mgr.focused(), None);
    }

    #[test]
    fn test_content_type_from_field_name() {
        let mut page = page_with_targets();
        let mut mgr = manager();
        mgr.attach_all(&mut page);
        assert_eq!(mgr.bindings()[0].content, ContentType::Css);
        assert_eq!(mgr.bindings()[1].content, ContentType::Json);
    }

    #[test]
    fn test_submit_copies_surface_text() {
        let mut page = page_with_targets();
        let mut mgr = manager();
        mgr.attach_all(&mut page);

        let form = mgr.bindings()[0].form;
        let field = mgr.bindings()[0].field;
        mgr.surface_mut(0).unwrap().insert_text("p { margin: 0 }\n");
        let synced = mgr.submit(&mut page, form);

        assert_eq!(synced, vec!["content.css", "data.json"]);
        assert!(page
            .field(field)
            .unwrap()
            .value
            .starts_with("p { margin: 0 }\n"));
    }

    #[test]
    fn test_focus_cycling() {
        let mut page = page_with_targets();
        let mut mgr = manager();
        mgr.attach_all(&mut page);

        mgr.focus_next();
        assert_eq!(mgr.focused(), Some(0));
        mgr.focus_next();
        assert_eq!(mgr.focused(), Some(1));
        mgr.focus_next();
        assert_eq!(mgr.focused(), Some(0));
    }
}

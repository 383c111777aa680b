//! View synchronizer
//!
//! The detail panel, tab strip and dropdown menu are one projection of the
//! store: [`ViewSynchronizer::project`] derives all three together after
//! every change, so no view can disagree with another about which record is
//! active or what it is called.
//!
//! Labels are committed, not live: a name edit reaches the tab and menu only
//! when the name field loses focus.

mod tabs;

pub use tabs::{centered_scroll, tab_width};

use std::collections::HashMap;

use curator_domain::{doi_link, pubmed_link, validate_article, Article, ValidationIssue};

use crate::config::ViewConfig;
use crate::render::RenderPipeline;
use crate::store::{RecordKey, RecordStore};

/// Tab colouring by curation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStatus {
    /// Curated compound
    Success,
    /// Not yet curated
    Warning,
}

impl TabStatus {
    pub fn from_curated(curated: bool) -> Self {
        if curated {
            TabStatus::Success
        } else {
            TabStatus::Warning
        }
    }
}

/// One row of the detail panel
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub index: usize,
    pub key: RecordKey,
    pub visible: bool,
    pub formula: String,
    pub render_error: Option<String>,
    pub rendering: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub index: usize,
    pub label: String,
    pub status: TabStatus,
    pub active: bool,
    pub width: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub index: usize,
    pub label: String,
    pub checked: bool,
}

/// The dropdown menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub entries: Vec<MenuEntry>,
    /// Record count shown on the toggle
    pub count: usize,
    /// Dropdown navigation is disabled in multi-select mode
    pub toggle_enabled: bool,
}

/// Declared vs actual compound count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub declared: u32,
    pub actual: usize,
}

/// Resolver links shown in the article header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleLinks {
    pub doi: Option<String>,
    pub pubmed: Option<String>,
}

/// Everything the front end draws, derived from one store state
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub panel: Vec<PanelRow>,
    pub tabs: Vec<Tab>,
    pub tab_scroll: u16,
    pub menu: Menu,
    pub delete_label: String,
    /// "Multiple records" indicator, shown only in multi-select mode
    pub multiple_notice: bool,
    pub count_mismatch: Option<CountMismatch>,
    pub issues: Vec<ValidationIssue>,
    pub links: ArticleLinks,
}

impl ViewModel {
    /// The row shown in the detail panel
    pub fn visible_row(&self) -> Option<&PanelRow> {
        self.panel.iter().find(|row| row.visible)
    }

    /// Exactly one visible row, matching the single active tab, with tab and
    /// menu labels in agreement
    pub fn is_consistent(&self) -> bool {
        let visible: Vec<usize> = self.panel.iter().filter(|r| r.visible).map(|r| r.index).collect();
        let active: Vec<usize> = self.tabs.iter().filter(|t| t.active).map(|t| t.index).collect();
        visible.len() == 1
            && visible == active
            && self.tabs.len() == self.panel.len()
            && self.menu.entries.len() == self.tabs.len()
            && self.menu.count == self.tabs.len()
            && self
                .tabs
                .iter()
                .zip(&self.menu.entries)
                .all(|(tab, entry)| tab.label == entry.label && tab.index == entry.index)
    }
}

/// Holds the committed labels and tab scroll between projections
#[derive(Debug, Clone)]
pub struct ViewSynchronizer {
    config: ViewConfig,
    labels: HashMap<RecordKey, String>,
    tab_scroll: u16,
    viewport: u16,
}

impl ViewSynchronizer {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            viewport: config.tab_viewport,
            config,
            labels: HashMap::new(),
            tab_scroll: 0,
        }
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Commit every record's current name and scroll to the active tab
    pub fn hydrate(&mut self, store: &RecordStore) {
        self.labels = store
            .iter()
            .map(|(_, key, record)| (key, record.name.clone()))
            .collect();
        self.tab_scroll = 0;
        self.scroll_to(store, store.active());
    }

    /// Commit `name` as the tab and menu label of `key`
    pub fn commit_label(&mut self, key: RecordKey, name: &str) {
        self.labels.insert(key, name.to_string());
    }

    pub fn forget(&mut self, keys: &[RecordKey]) {
        for key in keys {
            self.labels.remove(key);
        }
    }

    /// Committed label, or the fallback for a blank name
    pub fn label(&self, key: RecordKey) -> &str {
        match self.labels.get(&key) {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.config.fallback_label,
        }
    }

    pub fn tab_scroll(&self) -> u16 {
        self.tab_scroll
    }

    fn widths(&self, store: &RecordStore) -> Vec<u16> {
        store
            .iter()
            .map(|(_, key, _)| tab_width(self.label(key), self.config.tab_padding))
            .collect()
    }

    /// Centre the tab strip on `target`
    pub fn scroll_to(&mut self, store: &RecordStore, target: usize) {
        let widths = self.widths(store);
        self.tab_scroll = centered_scroll(&widths, target, self.viewport);
    }

    pub fn viewport(&self) -> u16 {
        self.viewport
    }

    /// Adopt the width the tab strip is drawn at and re-centre the active tab
    pub fn set_viewport(&mut self, store: &RecordStore, width: u16) {
        if width == 0 || width == self.viewport {
            return;
        }
        self.viewport = width;
        self.scroll_to(store, store.active());
    }

    /// Scroll for a selection change; a tab that is already active stays put
    pub fn on_select(&mut self, store: &RecordStore, target: usize) {
        if target != store.active() && target < store.len() {
            self.scroll_to(store, target);
        }
    }

    /// Derive the panel, tabs and menu from the store
    pub fn project(
        &self,
        store: &RecordStore,
        pipeline: &RenderPipeline,
        article: &Article,
    ) -> ViewModel {
        let active = store.active();
        let selection = store.selection();
        let multi = selection.is_multi();

        let mut panel = Vec::with_capacity(store.len());
        let mut tabs = Vec::with_capacity(store.len());
        let mut entries = Vec::with_capacity(store.len());
        for (index, key, record) in store.iter() {
            let label = self.label(key).to_string();
            let slot = pipeline.slot(key);
            panel.push(PanelRow {
                index,
                key,
                visible: index == active,
                formula: slot
                    .map(|s| s.formula.clone())
                    .unwrap_or_else(|| crate::render::BLANK_FORMULA.to_string()),
                render_error: slot.and_then(|s| s.error.as_ref()).map(|e| e.to_string()),
                rendering: slot.is_some_and(|s| s.is_pending()),
            });
            tabs.push(Tab {
                index,
                width: tab_width(&label, self.config.tab_padding),
                label: label.clone(),
                status: TabStatus::from_curated(record.curated),
                active: index == active,
            });
            entries.push(MenuEntry {
                index,
                label,
                checked: selection.is_checked(index),
            });
        }

        let delete_label = if multi {
            format!("{}{}", self.config.delete_label, self.config.multiple_suffix)
        } else {
            self.config.delete_label.clone()
        };

        let count_mismatch = match article.num_compounds {
            Some(declared) if article.compound_count_mismatch(store.len()) => Some(CountMismatch {
                declared,
                actual: store.len(),
            }),
            _ => None,
        };

        ViewModel {
            panel,
            tabs,
            tab_scroll: self.tab_scroll,
            menu: Menu {
                count: entries.len(),
                entries,
                toggle_enabled: !multi,
            },
            delete_label,
            multiple_notice: multi,
            count_mismatch,
            issues: validate_article(article, store.len()),
            links: ArticleLinks {
                doi: article.doi.as_deref().and_then(doi_link),
                pubmed: article.pmid.and_then(pubmed_link),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_domain::{CompoundEdit, CompoundRecord};

    fn setup(names: &[&str]) -> (RecordStore, ViewSynchronizer) {
        let store = RecordStore::new(
            names
                .iter()
                .map(|name| CompoundRecord::new(*name, ""))
                .collect(),
        );
        let mut view = ViewSynchronizer::new(ViewConfig::default());
        view.hydrate(&store);
        (store, view)
    }

    fn project(store: &RecordStore, view: &ViewSynchronizer) -> ViewModel {
        view.project(store, &RenderPipeline::new(), &Article::default())
    }

    #[test]
    fn test_single_visible_row_follows_active() {
        let (mut store, view) = setup(&["a", "b", "c"]);
        store.set_active(2);
        let model = project(&store, &view);
        assert!(model.is_consistent());
        assert_eq!(model.visible_row().map(|r| r.index), Some(2));
        assert!(model.tabs[2].active);
    }

    #[test]
    fn test_blank_name_uses_fallback_label() {
        let (store, view) = setup(&["", "  "]);
        let model = project(&store, &view);
        assert_eq!(model.tabs[0].label, "Name");
        assert_eq!(model.menu.entries[1].label, "Name");
    }

    #[test]
    fn test_label_changes_only_on_commit() {
        let (mut store, mut view) = setup(&["alpha"]);
        store
            .edit(0, CompoundEdit::Name("beta".to_string()))
            .unwrap();
        assert_eq!(project(&store, &view).tabs[0].label, "alpha");

        let key = store.key(0).unwrap();
        view.commit_label(key, "beta");
        let model = project(&store, &view);
        assert_eq!(model.tabs[0].label, "beta");
        assert_eq!(model.menu.entries[0].label, "beta");
    }

    #[test]
    fn test_multi_mode_projection() {
        let (mut store, view) = setup(&["a", "b"]);
        store.toggle_select(1);
        let model = project(&store, &view);
        assert!(model.multiple_notice);
        assert!(!model.menu.toggle_enabled);
        assert_eq!(model.delete_label, "Delete Compound Multiple Compounds");
        assert!(model.menu.entries[1].checked);
        // The checkbox does not move the panel
        assert_eq!(model.visible_row().map(|r| r.index), Some(0));

        store.toggle_select(1);
        let model = project(&store, &view);
        assert!(!model.multiple_notice);
        assert_eq!(model.delete_label, "Delete Compound");
    }

    #[test]
    fn test_curated_status_colours_tab() {
        let (mut store, view) = setup(&["a", "b"]);
        store.edit(1, CompoundEdit::Curated(true)).unwrap();
        let model = project(&store, &view);
        assert_eq!(model.tabs[0].status, TabStatus::Warning);
        assert_eq!(model.tabs[1].status, TabStatus::Success);
        assert_eq!(model.visible_row().map(|r| r.index), Some(0));
    }

    #[test]
    fn test_scroll_only_when_target_not_active() {
        let names: Vec<String> = (0..30).map(|i| format!("compound {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut store, mut view) = setup(&refs);
        view.on_select(&store, 20);
        let scrolled = view.tab_scroll();
        assert!(scrolled > 0);
        store.set_active(20);

        // Re-selecting the active tab keeps the offset
        view.scroll_to(&store, 0);
        view.on_select(&store, 20);
        assert_eq!(view.tab_scroll(), 0);
    }

    #[test]
    fn test_viewport_width_centres_active_tab() {
        let names: Vec<String> = (0..30).map(|i| format!("compound {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (mut store, mut view) = setup(&refs);
        store.set_active(20);
        // 20 tabs of 13 columns precede the active one
        view.set_viewport(&store, 40);
        assert_eq!(view.viewport(), 40);
        assert_eq!(view.tab_scroll(), 260 - (40 - 13) / 2);

        view.set_viewport(&store, 120);
        assert_eq!(view.tab_scroll(), 260 - (120 - 13) / 2);
        assert_eq!(project(&store, &view).tab_scroll, view.tab_scroll());

        // A zero width is ignored
        view.set_viewport(&store, 0);
        assert_eq!(view.viewport(), 120);
    }

    #[test]
    fn test_count_mismatch_clears_when_counts_agree() {
        let (store, view) = setup(&["a", "b"]);
        let mut article = Article::new("Title", "J. Nat. Prod.");
        article.num_compounds = Some(3);
        let model = view.project(&store, &RenderPipeline::new(), &article);
        assert_eq!(
            model.count_mismatch,
            Some(CountMismatch {
                declared: 3,
                actual: 2
            })
        );
        article.num_compounds = Some(2);
        let model = view.project(&store, &RenderPipeline::new(), &article);
        assert_eq!(model.count_mismatch, None);
    }
}

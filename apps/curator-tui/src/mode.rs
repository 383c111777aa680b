//! TUI interaction modes

use curator_domain::{Article, CompoundRecord};

/// A form field that can be edited in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    // Active compound
    Name,
    Notation,
    SourceOrganism,
    // Article
    Title,
    Journal,
    Authors,
    Year,
    Volume,
    Issue,
    Pages,
    Doi,
    Pmid,
    Abstract,
    Notes,
    /// The article's declared compound count
    DeclaredCount,
    /// Value written into every record's source organism
    ReplaceSource,
}

impl Field {
    /// Fields reachable with Tab, in order
    pub const CYCLE: [Field; 15] = [
        Field::Name,
        Field::Notation,
        Field::SourceOrganism,
        Field::Title,
        Field::Journal,
        Field::Authors,
        Field::Year,
        Field::Volume,
        Field::Issue,
        Field::Pages,
        Field::Doi,
        Field::Pmid,
        Field::Abstract,
        Field::Notes,
        Field::DeclaredCount,
    ];

    /// Article form fields, in display order
    pub const ARTICLE: [Field; 12] = [
        Field::Title,
        Field::Journal,
        Field::Authors,
        Field::Year,
        Field::Volume,
        Field::Issue,
        Field::Pages,
        Field::Doi,
        Field::Pmid,
        Field::Abstract,
        Field::Notes,
        Field::DeclaredCount,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Notation => "SMILES",
            Field::SourceOrganism => "Source organism",
            Field::Title => "Title",
            Field::Journal => "Journal",
            Field::Authors => "Authors",
            Field::Year => "Year",
            Field::Volume => "Volume",
            Field::Issue => "Issue",
            Field::Pages => "Pages",
            Field::Doi => "DOI",
            Field::Pmid => "PMID",
            Field::Abstract => "Abstract",
            Field::Notes => "Notes",
            Field::DeclaredCount => "Number of compounds",
            Field::ReplaceSource => "Replace source organism with",
        }
    }

    /// Current text of the field for `record` and `article`
    pub fn value(&self, record: &CompoundRecord, article: &Article) -> String {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        match self {
            Field::Name => record.name.clone(),
            Field::Notation => record.notation.clone(),
            Field::SourceOrganism => record.source_organism.clone(),
            Field::Title => article.title.clone(),
            Field::Journal => article.journal.clone(),
            Field::Authors => article.authors.clone(),
            Field::Year => article.year.map(|y| y.to_string()).unwrap_or_default(),
            Field::Volume => text(&article.volume),
            Field::Issue => text(&article.issue),
            Field::Pages => text(&article.pages),
            Field::Doi => text(&article.doi),
            Field::Pmid => article.pmid.map(|p| p.to_string()).unwrap_or_default(),
            Field::Abstract => text(&article.abstract_text),
            Field::Notes => text(&article.notes),
            Field::DeclaredCount => article.num_compounds.map(|n| n.to_string()).unwrap_or_default(),
            Field::ReplaceSource => String::new(),
        }
    }

    pub fn next(self) -> Self {
        let i = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(i + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }
}

/// The current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing records (default)
    #[default]
    Normal,
    /// Typing into a field
    Insert(Field),
    /// Dropdown menu open
    Menu,
    /// Waiting for a yes/no on a delete
    Confirm,
}

impl Mode {
    /// Returns a short code for compact display.
    pub fn short_code(&self) -> &'static str {
        match self {
            Mode::Normal => "NOR",
            Mode::Insert(_) => "INS",
            Mode::Menu => "MNU",
            Mode::Confirm => "CNF",
        }
    }
}

//! Options for the cleaning pipeline.

use crate::suspicion::SuspicionThresholds;

/// Unicode composition applied before any other cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnicodeForm {
    /// Canonical composition only.
    Nfc,
    /// Compatibility composition; also folds ligatures such as `ﬁ` into `fi`.
    #[default]
    Nfkc,
}

/// Options for controlling the cleaning pipeline.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Run unicode, line-ending and control-character normalization.
    pub normalize: bool,

    /// Drop lines that hold a lone board coordinate label.
    pub strip_board_noise: bool,

    /// Rejoin hyphen-broken and hard-wrapped words across line breaks.
    pub join_wrapped_lines: bool,

    /// Run the split-word heuristics.
    pub join_split_words: bool,

    /// Strip trailing digit and underscore garbage from each line.
    pub scrub_tails: bool,

    /// Composition used by normalization.
    pub unicode_form: UnicodeForm,

    /// Maximum number of heuristic join passes (at least one pass always runs).
    pub max_join_passes: usize,

    /// Keep digits written against a letter (`e4`, `Nf3`) when stripping trailing digits.
    pub keep_square_digits: bool,

    /// Clean lesson collections in parallel.
    pub parallel: bool,

    /// Thresholds for the suspicion detector.
    pub thresholds: SuspicionThresholds,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            normalize: true,
            strip_board_noise: true,
            join_wrapped_lines: true,
            join_split_words: true,
            scrub_tails: true,
            unicode_form: UnicodeForm::Nfkc,
            max_join_passes: 4,
            keep_square_digits: false,
            parallel: true,
            thresholds: SuspicionThresholds::default(),
        }
    }
}

impl CleanupOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalization and whitespace cleanup only; no text is joined or stripped.
    pub fn minimal() -> Self {
        Self {
            strip_board_noise: false,
            join_wrapped_lines: false,
            join_split_words: false,
            scrub_tails: false,
            ..Self::default()
        }
    }

    /// More join passes.
    pub fn aggressive() -> Self {
        Self {
            max_join_passes: 8,
            ..Self::default()
        }
    }

    /// Looks up a preset by name: `standard`, `minimal` or `aggressive`.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::default()),
            "minimal" => Some(Self::minimal()),
            "aggressive" => Some(Self::aggressive()),
            _ => None,
        }
    }

    /// Sets the unicode composition form.
    pub fn with_unicode_form(mut self, form: UnicodeForm) -> Self {
        self.unicode_form = form;
        self
    }

    /// Sets the maximum number of heuristic join passes.
    pub fn with_max_join_passes(mut self, passes: usize) -> Self {
        self.max_join_passes = passes;
        self
    }

    /// Keeps digits glued to a letter (`e4`, `Kf7`) when stripping trailing digits.
    pub fn with_keep_square_digits(mut self, keep: bool) -> Self {
        self.keep_square_digits = keep;
        self
    }

    /// Sets the suspicion thresholds.
    pub fn with_thresholds(mut self, thresholds: SuspicionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Disables parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

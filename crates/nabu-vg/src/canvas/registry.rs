use std::collections::{HashMap, HashSet};

/// Owned source bytes backing one live font.
///
/// The wrapped library references these bytes for the font's whole lifetime,
/// so the entry must outlive the native font. The heap allocation behind
/// `data` never moves while the entry lives — map growth relocates only the
/// `Vec` header — which keeps pointers taken at upload time valid.
pub(crate) struct FontEntry {
    pub(crate) name: String,
    pub(crate) data: Vec<u8>,
}

/// Everything the facade tracks for one live context.
pub(crate) struct ContextState<C> {
    /// Native context, handed back to the backend exactly once.
    pub(crate) native: C,

    /// Live image handles. The wrapped library owns the pixel data; only
    /// liveness is tracked here.
    pub(crate) images: HashSet<i32>,

    /// Font-buffer registry: wrapped-library font handle → owned source bytes.
    pub(crate) fonts: HashMap<i32, FontEntry>,

    /// Set between `begin_frame` and `end_frame`.
    pub(crate) in_frame: bool,
}

impl<C> ContextState<C> {
    pub(crate) fn new(native: C) -> Self {
        Self {
            native,
            images: HashSet::new(),
            fonts: HashMap::new(),
            in_frame: false,
        }
    }

    /// Handle of the live font registered under `name`, if any.
    pub(crate) fn font_by_name(&self, name: &str) -> Option<i32> {
        self.fonts
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(handle, _)| *handle)
    }
}

//! Host text surfaces.
//!
//! The core only needs readable/writable text and a caret. What kind of host widget
//! backs a surface is decided once, when it is bound to a [`Page`].

use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Single-value field (text input, search box, textarea).
    PlainField,
    /// Editable rich-text region whose text content is edited as a whole.
    RichText,
}

/// Capability the host exposes for one editable region. Offsets are char indices.
pub trait TextSurface {
    fn kind(&self) -> SurfaceKind;
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
    fn caret_offset(&self) -> usize;
    fn set_caret_offset(&mut self, offset: usize);

    /// Hosts that lock the region while a batch is shown re-enable it here.
    fn set_editable(&mut self, editable: bool) {
        let _ = editable;
    }
}

/// In-memory surface, used by the shell binary and by hosts that mirror a widget.
#[derive(Debug, Clone)]
pub struct StringSurface {
    kind: SurfaceKind,
    text: String,
    caret: usize,
    editable: bool,
}

impl StringSurface {
    pub fn new(kind: SurfaceKind, text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            kind,
            text,
            caret,
            editable: true,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SurfaceKind::PlainField, text)
    }

    pub fn with_caret(mut self, caret: usize) -> Self {
        self.set_caret_offset(caret);
        self
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }
}

impl TextSurface for StringSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_owned();
        self.caret = self.caret.min(self.text.chars().count());
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn set_caret_offset(&mut self, offset: usize) {
        self.caret = offset.min(self.text.chars().count());
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }
}

/// Surfaces bound in one page context, plus which one has focus.
#[derive(Default)]
pub struct Page {
    next_id: u64,
    surfaces: BTreeMap<SurfaceId, Box<dyn TextSurface>>,
    focused: Option<SurfaceId>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, surface: Box<dyn TextSurface>) -> SurfaceId {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        tracing::trace!(id = id.0, kind = ?surface.kind(), "surface bound");
        self.surfaces.insert(id, surface);
        id
    }

    /// Removes a surface, as when its element leaves the document.
    pub fn detach(&mut self, id: SurfaceId) -> Option<Box<dyn TextSurface>> {
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.surfaces.remove(&id)
    }

    pub fn is_attached(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn focus(&mut self, id: SurfaceId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused_id(&self) -> Option<SurfaceId> {
        self.focused
    }

    pub fn get(&self, id: SurfaceId) -> Option<&dyn TextSurface> {
        self.surfaces.get(&id).map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut (dyn TextSurface + 'static)> {
        self.surfaces.get_mut(&id).map(|s| s.as_mut())
    }

    pub fn focused_mut(&mut self) -> Option<(SurfaceId, &mut (dyn TextSurface + 'static))> {
        let id = self.focused?;
        self.get_mut(id).map(|s| (id, s))
    }
}

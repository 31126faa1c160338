use crate::element::ElementId;
use fxlayout_core::StyleMap;
use std::cell::RefCell;

/// The host's style-application primitive. Fire-and-forget.
pub trait StyleRenderer {
    fn apply_style(&self, element: ElementId, style: &StyleMap);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStyle {
    pub element: ElementId,
    pub style: StyleMap,
}

/// Renderer that keeps every application in order
#[derive(Debug, Default)]
pub struct StyleRecorder {
    applied: RefCell<Vec<AppliedStyle>>,
}

impl StyleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Vec<AppliedStyle> {
        self.applied.borrow().clone()
    }

    /// Style the element currently has, i.e. the last one applied to it
    pub fn current(&self, element: ElementId) -> Option<StyleMap> {
        self.applied
            .borrow()
            .iter()
            .rev()
            .find(|entry| entry.element == element)
            .map(|entry| entry.style.clone())
    }

    pub fn count_for(&self, element: ElementId) -> usize {
        self.applied
            .borrow()
            .iter()
            .filter(|entry| entry.element == element)
            .count()
    }

    pub fn len(&self) -> usize {
        self.applied.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.applied.borrow_mut().clear();
    }
}

impl StyleRenderer for StyleRecorder {
    fn apply_style(&self, element: ElementId, style: &StyleMap) {
        self.applied.borrow_mut().push(AppliedStyle {
            element,
            style: style.clone(),
        });
    }
}

//! Single-object selection with a scale highlight.

use log::info;
use serde::Deserialize;

use crate::scene::world::{Handle, Scene};

/// Scale factors applied when an object gains or loses the highlight.
///
/// The defaults do not cancel out (`1.2 × 0.85 = 1.02`), so every
/// select/deselect cycle leaves the object 2% larger.  Use
/// [`HighlightFactors::reversible`] for an exact round trip.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct HighlightFactors {
    pub select: f32,
    pub deselect: f32,
}

impl Default for HighlightFactors {
    fn default() -> Self {
        Self {
            select: 1.2,
            deselect: 0.85,
        }
    }
}

impl HighlightFactors {
    pub fn reversible(select: f32) -> Self {
        Self {
            select,
            deselect: 1.0 / select,
        }
    }
}

/// Which object is selected.  `index` is remembered while inactive so the
/// next toggle reselects the same object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub active: bool,
}

impl Scene {
    /// The selected object, if the selection is active.
    pub fn selected(&self) -> Option<Handle> {
        (self.selection.active && self.selection.index < self.len())
            .then_some(Handle(self.selection.index))
    }

    /// Selects the remembered object, or deselects the current one.
    pub fn toggle_selection(&mut self, factors: HighlightFactors) {
        if self.is_empty() {
            return;
        }
        if self.selection.index >= self.len() {
            self.selection.index = 0;
        }
        let index = self.selection.index;
        if self.selection.active {
            self.selection.active = false;
            self.highlight(index, factors.deselect);
            info!("Selection: none");
        } else {
            self.selection.active = true;
            self.highlight(index, factors.select);
            info!("Selection: {}", self.objects()[index].name);
        }
    }

    /// Moves an active selection to the next object, wrapping around.
    pub fn select_next(&mut self, factors: HighlightFactors) {
        self.cycle_selection(1, factors);
    }

    /// Moves an active selection to the previous object, wrapping around.
    pub fn select_previous(&mut self, factors: HighlightFactors) {
        self.cycle_selection(-1, factors);
    }

    fn cycle_selection(&mut self, step: isize, factors: HighlightFactors) {
        let Some(Handle(current)) = self.selected() else {
            return;
        };
        let len = self.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;

        self.highlight(current, factors.deselect);
        self.selection.index = next;
        self.highlight(next, factors.select);
        info!("Selection: {}", self.objects()[next].name);
    }

    fn highlight(&mut self, index: usize, factor: f32) {
        if let Some(object) = self.objects_mut().get_mut(index) {
            object.transform.scale_by(factor);
        }
    }
}

//! Host-side option controls for picking repeat modes.
//!
//! Checkable state lives entirely in the host. The renderer only ever sees
//! the flag mask that [`ModePicker::flags`] composes from the checked
//! options.

use rpatch_core::flags::{Edge, InnerMode, RepeatFlags, SizingMode};

/// A control with an on/off state.
pub trait Checkable {
    fn is_checked(&self) -> bool;
    fn set_checked(&mut self, checked: bool);

    fn toggle(&mut self) {
        let checked = self.is_checked();
        self.set_checked(!checked);
    }
}

/// A labelled checkable option carrying a value.
#[derive(Debug, Clone)]
pub struct CheckOption<T> {
    pub label: &'static str,
    pub value: T,
    checked: bool,
}

impl<T> CheckOption<T> {
    pub fn new(label: &'static str, value: T) -> Self {
        Self {
            label,
            value,
            checked: false,
        }
    }
}

impl<T> Checkable for CheckOption<T> {
    fn is_checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

/// Value of an outer-mode option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterChoice {
    All,
    None,
    Edge(Edge),
}

type ChangeCallback = Box<dyn FnMut(RepeatFlags)>;

/// Three option groups that together produce a repeat mask.
///
/// Inner and sizing groups are single-choice. The outer group is
/// multi-choice over the four edges, with `All` and `None` acting as
/// exclusive presets.
pub struct ModePicker {
    pub inner: Vec<CheckOption<InnerMode>>,
    pub outer: Vec<CheckOption<OuterChoice>>,
    pub sizing: Vec<CheckOption<SizingMode>>,
    on_change: Option<ChangeCallback>,
}

impl Default for ModePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ModePicker {
    /// Inner Both, outer All, Discrete sizing checked.
    pub fn new() -> Self {
        let mut picker = Self {
            inner: vec![
                CheckOption::new("both", InnerMode::Both),
                CheckOption::new("none", InnerMode::None),
                CheckOption::new("x", InnerMode::X),
                CheckOption::new("y", InnerMode::Y),
            ],
            outer: vec![
                CheckOption::new("all", OuterChoice::All),
                CheckOption::new("none", OuterChoice::None),
                CheckOption::new("left", OuterChoice::Edge(Edge::Left)),
                CheckOption::new("right", OuterChoice::Edge(Edge::Right)),
                CheckOption::new("top", OuterChoice::Edge(Edge::Top)),
                CheckOption::new("bottom", OuterChoice::Edge(Edge::Bottom)),
            ],
            sizing: vec![
                CheckOption::new("discrete", SizingMode::Discrete),
                CheckOption::new("cutoff", SizingMode::Cutoff),
            ],
            on_change: None,
        };
        picker.inner[0].set_checked(true);
        picker.outer[0].set_checked(true);
        picker.sizing[0].set_checked(true);
        picker
    }

    /// Register a callback fired with the new mask after every change.
    pub fn on_change(&mut self, callback: impl FnMut(RepeatFlags) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Click an inner option. Clicking the checked option does nothing.
    pub fn select_inner(&mut self, index: usize) {
        if select_single(&mut self.inner, index) {
            self.notify();
        }
    }

    /// Click a sizing option. Clicking the checked option does nothing.
    pub fn select_sizing(&mut self, index: usize) {
        if select_single(&mut self.sizing, index) {
            self.notify();
        }
    }

    /// Click an outer option.
    pub fn click_outer(&mut self, index: usize) {
        let Some(choice) = self.outer.get(index).map(|o| o.value) else {
            return;
        };
        let will_check = !self.outer[index].is_checked();
        match choice {
            OuterChoice::All | OuterChoice::None if will_check => {
                for (i, opt) in self.outer.iter_mut().enumerate() {
                    opt.set_checked(i == index);
                }
            }
            OuterChoice::All | OuterChoice::None => self.outer[index].toggle(),
            OuterChoice::Edge(_) => {
                if will_check {
                    for opt in &mut self.outer {
                        if !matches!(opt.value, OuterChoice::Edge(_)) {
                            opt.set_checked(false);
                        }
                    }
                }
                self.outer[index].toggle();
            }
        }
        if !self.outer.iter().any(Checkable::is_checked) {
            self.outer[0].set_checked(true);
        }
        self.notify();
    }

    /// Compose the mask from the checked options.
    pub fn flags(&self) -> RepeatFlags {
        let inner = checked_value(&self.inner).unwrap_or(InnerMode::Both);
        let sizing = checked_value(&self.sizing).unwrap_or(SizingMode::Discrete);
        let base = RepeatFlags::empty().with_inner(inner).with_sizing(sizing);
        let mut outer = RepeatFlags::empty();
        for opt in self.outer.iter().filter(|o| o.is_checked()) {
            match opt.value {
                OuterChoice::All => outer |= RepeatFlags::OUTER_ALL,
                OuterChoice::None => {}
                OuterChoice::Edge(edge) => outer |= edge.flag(),
            }
        }
        base | outer
    }

    fn notify(&mut self) {
        let flags = self.flags();
        log::debug!("repeat mode changed to {:#09b}", flags.mask());
        if let Some(callback) = self.on_change.as_mut() {
            callback(flags);
        }
    }
}

/// Check `index` and uncheck the rest. Returns whether anything changed.
fn select_single<T>(options: &mut [CheckOption<T>], index: usize) -> bool {
    if options.get(index).is_none_or(|o| o.is_checked()) {
        return false;
    }
    for (i, opt) in options.iter_mut().enumerate() {
        opt.set_checked(i == index);
    }
    true
}

fn checked_value<T: Copy>(options: &[CheckOption<T>]) -> Option<T> {
    options.iter().find(|o| o.is_checked()).map(|o| o.value)
}

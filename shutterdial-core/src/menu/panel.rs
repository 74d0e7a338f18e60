//! Panel composition root
//!
//! The [`Panel`] owns every item in a fixed-size arena and tracks which one
//! has focus. Encoder events are routed to the focused item:
//!
//! ```text
//!   Menu    rotate → move cursor      select → enter highlighted child
//!   Option  rotate → change value     select → zero (stay) or confirm (leave)
//!   Action  select → trigger and leave
//!   Camera  select → capture and leave
//!   Ready   select → toggle and leave
//! ```

use core::fmt::Write;

use heapless::{String, Vec};

use super::interface::Interface;
use super::item::Item;
use super::ItemId;
use crate::encoder::EncoderEvent;
use crate::option::{SelectOutcome, TITLE_LEN};
use crate::traits::{DisplayDriver, DisplayError, DisplayExt};

/// Maximum number of items on a panel
pub const MAX_ITEMS: usize = 16;

/// Maximum focus nesting, root menu included
pub const MAX_DEPTH: usize = 4;

/// Panel composition errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Arena holds [`MAX_ITEMS`] already
    Full,
    /// Id does not refer to an item on this panel
    UnknownItem,
    /// Item is not a menu
    NotAMenu,
}

/// What an event did to the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEffect {
    /// Event had no effect
    None,
    /// Menu cursor moved
    CursorMoved { menu: ItemId, cursor: u8 },
    /// Focus moved into an item
    Entered(ItemId),
    /// Focus returned from an item to its parent
    Left(ItemId),
    /// Option value changed by rotation
    ValueChanged { id: ItemId, value: i32, previous: i32 },
    /// Option reset to zero, focus stays on it
    Zeroed { id: ItemId, previous: i32 },
    /// Option confirmed, focus returned to the parent
    Confirmed { id: ItemId, value: i32 },
    /// Action, camera or ready item fired, focus returned to the parent
    Activated { id: ItemId, value: i32 },
}

/// Items plus focus
#[derive(Debug, Clone, Default)]
pub struct Panel {
    items: Vec<Item, MAX_ITEMS>,
    focus: Vec<ItemId, MAX_DEPTH>,
}

impl Panel {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            focus: Vec::new(),
        }
    }

    /// Add an item to the arena
    ///
    /// Menus may only refer to items that were added before them.
    pub fn add(&mut self, item: impl Into<Item>) -> Result<ItemId, PanelError> {
        let item = item.into();
        if item.get_items().iter().any(|&id| self.get(id).is_none()) {
            return Err(PanelError::UnknownItem);
        }

        let id = ItemId(self.items.len() as u8);
        self.items.push(item).map_err(|_| PanelError::Full)?;
        Ok(id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Make `id` the root menu and give it focus
    pub fn set_root(&mut self, id: ItemId) -> Result<(), PanelError> {
        let item = self.get(id).ok_or(PanelError::UnknownItem)?;
        if !item.is_menu() {
            return Err(PanelError::NotAMenu);
        }
        self.focus.clear();
        // Cannot fail, the stack was just cleared
        let _ = self.focus.push(id);
        Ok(())
    }

    pub fn root(&self) -> Option<ItemId> {
        self.focus.first().copied()
    }

    /// Item with focus
    pub fn focused(&self) -> Option<ItemId> {
        self.focus.last().copied()
    }

    /// Focus nesting, 1 at the root menu
    pub fn depth(&self) -> usize {
        self.focus.len()
    }

    /// Option flagged as most recently changed
    pub fn most_recent(&self) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.as_option().is_some_and(|o| o.is_most_recent()))
            .map(|index| ItemId(index as u8))
    }

    /// Route an encoder event to the focused item
    pub fn handle(&mut self, event: EncoderEvent) -> PanelEffect {
        let Some(id) = self.focused() else {
            return PanelEffect::None;
        };

        let effect = match self.items.get_mut(id.index()) {
            Some(Item::Menu(menu)) => match event {
                EncoderEvent::Rotate(direction) => {
                    let before = menu.cursor();
                    menu.move_cursor(direction.delta() as i32);
                    if menu.cursor() == before {
                        PanelEffect::None
                    } else {
                        PanelEffect::CursorMoved {
                            menu: id,
                            cursor: menu.cursor() as u8,
                        }
                    }
                }
                EncoderEvent::Select => match menu.selected() {
                    Some(child) => self.enter(child),
                    None => PanelEffect::None,
                },
            },
            Some(Item::Option(option)) => match option.handle(event) {
                None => {
                    let value = option.get_val();
                    let previous = option.get_previous();
                    if value == previous {
                        PanelEffect::None
                    } else {
                        self.mark_most_recent(id);
                        PanelEffect::ValueChanged {
                            id,
                            value,
                            previous,
                        }
                    }
                }
                Some(SelectOutcome::Zeroed { previous }) => {
                    self.mark_most_recent(id);
                    PanelEffect::Zeroed { id, previous }
                }
                Some(SelectOutcome::Confirm) => {
                    let value = option.get_val();
                    self.leave();
                    PanelEffect::Confirmed { id, value }
                }
            },
            Some(item) => match event {
                EncoderEvent::Select => {
                    let value = match item {
                        Item::Action(action) => action.trigger() as i32,
                        Item::Camera(camera) => camera.capture() as i32,
                        Item::Ready(ready) => ready.toggle() as i32,
                        Item::Menu(_) | Item::Option(_) => item.get_val(),
                    };
                    self.leave();
                    PanelEffect::Activated { id, value }
                }
                EncoderEvent::Rotate(_) => PanelEffect::None,
            },
            None => PanelEffect::None,
        };

        #[cfg(feature = "defmt")]
        {
            if effect != PanelEffect::None {
                defmt::debug!("Panel: {} -> {}", event, effect);
            }
        }

        effect
    }

    /// Return focus to the parent, staying put at the root
    pub fn back(&mut self) -> PanelEffect {
        match self.leave() {
            Some(id) => PanelEffect::Left(id),
            None => PanelEffect::None,
        }
    }

    /// Draw the focused item
    ///
    /// A menu shows its title on the first row and one child per row below
    /// it, the most recently changed option marked with `*`. Any other item
    /// shows its value field, and options also show their previous value.
    pub fn render<D: DisplayDriver>(&self, driver: &mut D) -> Result<(), DisplayError> {
        driver.clear()?;

        let Some(item) = self.focused().and_then(|id| self.get(id)) else {
            return Ok(());
        };

        match item {
            Item::Menu(menu) => {
                driver.text(0, 0, menu.title())?;
                for (row, &child) in item.get_items().iter().enumerate() {
                    let label = self.menu_label(child);
                    driver.draw_menu_item(row as u8 + 1, &label, row == menu.cursor())?;
                }
            }
            Item::Option(option) => {
                option.display(driver, 0)?;
                let mut previous: String<12> = String::new();
                let _ = write!(previous, "{}", option.get_previous());
                driver.draw_field(1, "Previous", &previous)?;
            }
            other => other.display(driver, 0)?,
        }

        Ok(())
    }

    fn enter(&mut self, child: ItemId) -> PanelEffect {
        if self.focus.push(child).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Menu nesting deeper than {}, ignoring", MAX_DEPTH);
            return PanelEffect::None;
        }
        PanelEffect::Entered(child)
    }

    /// Pop the focused item unless it is the root
    fn leave(&mut self) -> Option<ItemId> {
        if self.focus.len() > 1 {
            self.focus.pop()
        } else {
            None
        }
    }

    fn mark_most_recent(&mut self, id: ItemId) {
        for (index, item) in self.items.iter_mut().enumerate() {
            if let Some(option) = item.as_option_mut() {
                option.set_most_recent(index == id.index());
            }
        }
    }

    fn menu_label(&self, id: ItemId) -> String<{ TITLE_LEN + 2 }> {
        let mut label = String::new();
        if let Some(item) = self.get(id) {
            let _ = label.push_str(item.title());
            if item.as_option().is_some_and(|o| o.is_most_recent()) {
                let _ = label.push_str(" *");
            }
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Direction;
    use crate::menu::{Action, Camera, Menu, Ready};
    use crate::option::BoundedOption;
    use crate::traits::display::tests::RecordingDisplay;

    const CW: EncoderEvent = EncoderEvent::Rotate(Direction::Clockwise);
    const CCW: EncoderEvent = EncoderEvent::Rotate(Direction::CounterClockwise);
    const SELECT: EncoderEvent = EncoderEvent::Select;

    struct Fixture {
        panel: Panel,
        iso: ItemId,
        exposure: ItemId,
        settings: ItemId,
        capture: ItemId,
        ready: ItemId,
    }

    /// Root: [Settings: [ISO, Exposure], Capture, Ready]
    fn fixture() -> Fixture {
        let mut panel = Panel::new();

        let mut iso = BoundedOption::new("ISO");
        iso.set_range(0, 10).unwrap();
        iso.set_val(5);
        let iso = panel.add(iso).unwrap();

        let mut exposure = BoundedOption::new("Exposure");
        exposure.set_zeroable(true);
        exposure.set_val(3);
        let exposure = panel.add(exposure).unwrap();

        let settings = panel
            .add(Menu::with_items("Settings", &[iso, exposure]).unwrap())
            .unwrap();
        let capture = panel.add(Camera::new("Capture")).unwrap();
        let ready = panel.add(Ready::new("Ready")).unwrap();
        let root = panel
            .add(Menu::with_items("Main", &[settings, capture, ready]).unwrap())
            .unwrap();
        panel.set_root(root).unwrap();

        Fixture {
            panel,
            iso,
            exposure,
            settings,
            capture,
            ready,
        }
    }

    #[test]
    fn test_empty_panel_ignores_events() {
        let mut panel = Panel::new();
        assert!(panel.is_empty());
        assert_eq!(panel.handle(SELECT), PanelEffect::None);
        assert_eq!(panel.back(), PanelEffect::None);
    }

    #[test]
    fn test_add_rejects_unknown_children() {
        let mut panel = Panel::new();
        let menu = Menu::with_items("Main", &[ItemId(0)]).unwrap();
        assert_eq!(panel.add(menu), Err(PanelError::UnknownItem));
    }

    #[test]
    fn test_add_full() {
        let mut panel = Panel::new();
        for _ in 0..MAX_ITEMS {
            panel.add(Action::new("Noop")).unwrap();
        }
        assert_eq!(panel.add(Action::new("Extra")), Err(PanelError::Full));
        assert_eq!(panel.len(), MAX_ITEMS);
    }

    #[test]
    fn test_set_root_validation() {
        let mut panel = Panel::new();
        let action = panel.add(Action::new("Go")).unwrap();
        assert_eq!(panel.set_root(action), Err(PanelError::NotAMenu));
        assert_eq!(panel.set_root(ItemId(9)), Err(PanelError::UnknownItem));
        assert_eq!(panel.focused(), None);
    }

    #[test]
    fn test_menu_navigation() {
        let mut f = fixture();
        let root = f.panel.root().unwrap();

        assert_eq!(f.panel.handle(CCW), PanelEffect::None);
        assert_eq!(
            f.panel.handle(CW),
            PanelEffect::CursorMoved { menu: root, cursor: 1 }
        );
        assert_eq!(f.panel.handle(SELECT), PanelEffect::Entered(f.capture));
        assert_eq!(f.panel.depth(), 2);
    }

    #[test]
    fn test_option_edit_and_confirm() {
        let mut f = fixture();
        f.panel.handle(SELECT); // into Settings
        assert_eq!(f.panel.focused(), Some(f.settings));
        f.panel.handle(SELECT); // into ISO

        assert_eq!(
            f.panel.handle(CW),
            PanelEffect::ValueChanged { id: f.iso, value: 6, previous: 5 }
        );
        assert_eq!(f.panel.most_recent(), Some(f.iso));

        // ISO is not zeroable, select confirms and returns to Settings
        assert_eq!(
            f.panel.handle(SELECT),
            PanelEffect::Confirmed { id: f.iso, value: 6 }
        );
        assert_eq!(f.panel.focused(), Some(f.settings));
    }

    #[test]
    fn test_option_zeroed_keeps_focus() {
        let mut f = fixture();
        f.panel.handle(SELECT);
        f.panel.handle(CW);
        assert_eq!(f.panel.handle(SELECT), PanelEffect::Entered(f.exposure));

        assert_eq!(
            f.panel.handle(SELECT),
            PanelEffect::Zeroed { id: f.exposure, previous: 3 }
        );
        assert_eq!(f.panel.focused(), Some(f.exposure));
        assert_eq!(f.panel.get(f.exposure).unwrap().get_val(), 0);
    }

    #[test]
    fn test_most_recent_moves() {
        let mut f = fixture();
        f.panel.handle(SELECT);
        f.panel.handle(SELECT);
        f.panel.handle(CW);
        f.panel.back();
        f.panel.handle(CW);
        f.panel.handle(SELECT);
        f.panel.handle(CCW);

        assert_eq!(f.panel.most_recent(), Some(f.exposure));
        let iso = f.panel.get(f.iso).unwrap().as_option().unwrap();
        assert!(!iso.is_most_recent());
    }

    #[test]
    fn test_rotate_at_range_end() {
        let mut f = fixture();
        f.panel.handle(SELECT);
        f.panel.handle(CW);
        f.panel.handle(SELECT);
        f.panel.handle(CCW);
        assert_eq!(f.panel.most_recent(), Some(f.exposure));
        f.panel.back();
        f.panel.handle(CCW);
        assert_eq!(f.panel.handle(SELECT), PanelEffect::Entered(f.iso));

        for _ in 0..5 {
            f.panel.handle(CW);
        }
        assert_eq!(f.panel.most_recent(), Some(f.iso));
        f.panel.back();
        f.panel.handle(CW);
        f.panel.handle(SELECT);
        f.panel.handle(CCW);
        f.panel.back();
        f.panel.handle(CCW);
        f.panel.handle(SELECT);

        assert_eq!(f.panel.handle(CW), PanelEffect::None);
        assert_eq!(f.panel.most_recent(), Some(f.exposure));
        let iso = f.panel.get(f.iso).unwrap().as_option().unwrap();
        assert_eq!(iso.get_val(), 10);
    }

    #[test]
    fn test_activate_leaves() {
        let mut f = fixture();
        f.panel.handle(CW);
        f.panel.handle(CW);
        assert_eq!(f.panel.handle(SELECT), PanelEffect::Entered(f.ready));
        assert_eq!(f.panel.handle(CW), PanelEffect::None);
        assert_eq!(
            f.panel.handle(SELECT),
            PanelEffect::Activated { id: f.ready, value: 1 }
        );
        assert_eq!(f.panel.depth(), 1);
    }

    #[test]
    fn test_camera_counts_captures() {
        let mut f = fixture();
        f.panel.handle(CW);
        for shots in 1..=2 {
            f.panel.handle(SELECT);
            assert_eq!(
                f.panel.handle(SELECT),
                PanelEffect::Activated { id: f.capture, value: shots }
            );
        }
    }

    #[test]
    fn test_back_stops_at_root() {
        let mut f = fixture();
        f.panel.handle(SELECT);
        assert_eq!(f.panel.back(), PanelEffect::Left(f.settings));
        assert_eq!(f.panel.back(), PanelEffect::None);
        assert_eq!(f.panel.depth(), 1);
    }

    #[test]
    fn test_depth_limited() {
        let mut panel = Panel::new();
        let leaf = panel.add(Action::new("Leaf")).unwrap();
        let mut child = panel.add(Menu::with_items("L4", &[leaf]).unwrap()).unwrap();
        for title in ["L3", "L2", "L1"] {
            child = panel.add(Menu::with_items(title, &[child]).unwrap()).unwrap();
        }
        panel.set_root(child).unwrap();

        for _ in 1..MAX_DEPTH {
            assert!(matches!(panel.handle(SELECT), PanelEffect::Entered(_)));
        }
        assert_eq!(panel.depth(), MAX_DEPTH);
        assert_eq!(panel.handle(SELECT), PanelEffect::None);
    }

    #[test]
    fn test_render_menu() {
        let mut f = fixture();
        let mut display = RecordingDisplay::default();
        f.panel.render(&mut display).unwrap();

        assert_eq!(display.row(0), "Main");
        assert!(display.row(1).starts_with("> Settings"));
        assert!(display.row(2).starts_with("  Capture"));
        assert!(display.row(3).starts_with("  Ready"));
        assert_eq!(&display.inverted[..], &[1]);

        f.panel.handle(SELECT);
        f.panel.handle(SELECT);
        f.panel.handle(CW);
        f.panel.back();
        f.panel.render(&mut display).unwrap();
        assert!(display.row(1).starts_with("> ISO *"));
        assert!(display.row(2).starts_with("  Exposure"));
    }

    #[test]
    fn test_render_option() {
        let mut f = fixture();
        f.panel.handle(SELECT);
        f.panel.handle(SELECT);
        f.panel.handle(CW);

        let mut display = RecordingDisplay::default();
        f.panel.render(&mut display).unwrap();
        assert_eq!(display.row(0), "ISO:                6");
        assert!(display.row(1).starts_with("Previous:"));
        assert!(display.row(1).ends_with('5'));
        assert_eq!(display.clears, 1);
    }
}

//! Panel item composition
//!
//! Everything the panel shows is an [`Item`]: a menu of up to four children,
//! an adjustable option, or a one-shot action. Items live in the
//! [`Panel`] arena and refer to each other by [`ItemId`].

pub mod interface;
pub mod item;
pub mod panel;

pub use interface::Interface;
pub use item::{Action, Camera, Item, Menu, MenuError, Ready, MAX_MENU_ITEMS};
pub use panel::{Panel, PanelEffect, PanelError, MAX_DEPTH, MAX_ITEMS};

/// Index of an item in the panel arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ItemId(pub u8);

impl ItemId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

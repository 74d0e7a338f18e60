//! Panel item variants

use core::fmt;

use heapless::Vec;

use super::interface::Interface;
use super::ItemId;
use crate::option::{make_title, BoundedOption, Title};
use crate::traits::{DisplayDriver, DisplayError, DisplayExt};

/// Maximum number of children in one menu
pub const MAX_MENU_ITEMS: usize = 4;

/// Menu configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Child list empty or longer than [`MAX_MENU_ITEMS`]
    InvalidArity,
}

/// A list of one to four child items with a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    title: Title,
    items: Vec<ItemId, MAX_MENU_ITEMS>,
    cursor: usize,
}

impl Menu {
    /// Create a menu with no children yet
    pub fn new(title: &str) -> Self {
        Self {
            title: make_title(title),
            items: Vec::new(),
            cursor: 0,
        }
    }

    /// Create a menu and set its children
    pub fn with_items(title: &str, items: &[ItemId]) -> Result<Self, MenuError> {
        let mut menu = Self::new(title);
        menu.set_items(items)?;
        Ok(menu)
    }

    /// Replace the children, keeping their order
    ///
    /// The cursor returns to the first child.
    pub fn set_items(&mut self, items: &[ItemId]) -> Result<(), MenuError> {
        if items.is_empty() {
            return Err(MenuError::InvalidArity);
        }
        self.items = Vec::from_slice(items).map_err(|_| MenuError::InvalidArity)?;
        self.cursor = 0;
        Ok(())
    }

    pub fn get_items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor by `delta`, stopping at the first and last child
    pub fn move_cursor(&mut self, delta: i32) {
        self.set_cursor(self.cursor as i64 + delta as i64);
    }

    /// Child under the cursor
    pub fn selected(&self) -> Option<ItemId> {
        self.items.get(self.cursor).copied()
    }

    fn set_cursor(&mut self, position: i64) {
        let last = self.items.len().saturating_sub(1) as i64;
        self.cursor = position.clamp(0, last) as usize;
    }
}

impl Interface for Menu {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Cursor position
    fn get_val(&self) -> i32 {
        self.cursor as i32
    }

    fn set_val(&mut self, value: i32) {
        self.set_cursor(value as i64);
    }

    fn get_items(&self) -> &[ItemId] {
        &self.items
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}/{}]", self.title, self.cursor + 1, self.items.len())
    }
}

/// A one-shot command, counting how often it was triggered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    title: Title,
    triggered: u32,
}

impl Action {
    pub fn new(title: &str) -> Self {
        Self {
            title: make_title(title),
            triggered: 0,
        }
    }

    /// Run the action, returning the new trigger count
    pub fn trigger(&mut self) -> u32 {
        self.triggered = self.triggered.saturating_add(1);
        self.triggered
    }

    pub fn triggered(&self) -> u32 {
        self.triggered
    }
}

impl Interface for Action {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn get_val(&self) -> i32 {
        i32::try_from(self.triggered).unwrap_or(i32::MAX)
    }

    fn set_val(&mut self, value: i32) {
        self.triggered = value.max(0) as u32;
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.title, self.triggered)
    }
}

/// Shutter release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    title: Title,
    shots: u32,
}

impl Camera {
    pub fn new(title: &str) -> Self {
        Self {
            title: make_title(title),
            shots: 0,
        }
    }

    /// Request a shot, returning the number requested so far
    pub fn capture(&mut self) -> u32 {
        self.shots = self.shots.saturating_add(1);
        self.shots
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }
}

impl Interface for Camera {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn get_val(&self) -> i32 {
        i32::try_from(self.shots).unwrap_or(i32::MAX)
    }

    fn set_val(&mut self, value: i32) {
        self.shots = value.max(0) as u32;
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} shots)", self.title, self.shots)
    }
}

/// Armed/disarmed toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ready {
    title: Title,
    ready: bool,
}

impl Ready {
    pub fn new(title: &str) -> Self {
        Self {
            title: make_title(title),
            ready: false,
        }
    }

    /// Flip the flag, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.ready = !self.ready;
        self.ready
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Interface for Ready {
    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn get_val(&self) -> i32 {
        self.ready as i32
    }

    /// Any non-zero value means ready
    fn set_val(&mut self, value: i32) {
        self.ready = value != 0;
    }

    fn display<D: DisplayDriver>(&self, driver: &mut D, row: u8) -> Result<(), DisplayError> {
        let state = if self.ready { "yes" } else { "no" };
        driver.draw_field(row, self.title.as_str(), state)
    }
}

impl fmt::Display for Ready {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.ready { "ready" } else { "not ready" };
        write!(f, "{}: {}", self.title, state)
    }
}

/// Any item the panel can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Menu(Menu),
    Option(BoundedOption),
    Action(Action),
    Camera(Camera),
    Ready(Ready),
}

impl Item {
    pub fn is_menu(&self) -> bool {
        matches!(self, Item::Menu(_))
    }

    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            Item::Menu(menu) => Some(menu),
            _ => None,
        }
    }

    pub fn as_option(&self) -> Option<&BoundedOption> {
        match self {
            Item::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_option_mut(&mut self) -> Option<&mut BoundedOption> {
        match self {
            Item::Option(option) => Some(option),
            _ => None,
        }
    }
}

impl Interface for Item {
    fn title(&self) -> &str {
        match self {
            Item::Menu(menu) => menu.title(),
            Item::Option(option) => option.title(),
            Item::Action(action) => action.title(),
            Item::Camera(camera) => camera.title(),
            Item::Ready(ready) => ready.title(),
        }
    }

    fn get_val(&self) -> i32 {
        match self {
            Item::Menu(menu) => menu.get_val(),
            Item::Option(option) => option.get_val(),
            Item::Action(action) => action.get_val(),
            Item::Camera(camera) => camera.get_val(),
            Item::Ready(ready) => ready.get_val(),
        }
    }

    fn set_val(&mut self, value: i32) {
        match self {
            Item::Menu(menu) => menu.set_val(value),
            Item::Option(option) => option.set_val(value),
            Item::Action(action) => action.set_val(value),
            Item::Camera(camera) => camera.set_val(value),
            Item::Ready(ready) => ready.set_val(value),
        }
    }

    fn get_items(&self) -> &[ItemId] {
        match self {
            Item::Menu(menu) => menu.get_items(),
            Item::Option(option) => option.get_items(),
            Item::Action(action) => action.get_items(),
            Item::Camera(camera) => camera.get_items(),
            Item::Ready(ready) => ready.get_items(),
        }
    }

    fn display<D: DisplayDriver>(&self, driver: &mut D, row: u8) -> Result<(), DisplayError> {
        match self {
            Item::Menu(menu) => menu.display(driver, row),
            Item::Option(option) => option.display(driver, row),
            Item::Action(action) => action.display(driver, row),
            Item::Camera(camera) => camera.display(driver, row),
            Item::Ready(ready) => ready.display(driver, row),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Menu(menu) => fmt::Display::fmt(menu, f),
            Item::Option(option) => fmt::Display::fmt(option, f),
            Item::Action(action) => fmt::Display::fmt(action, f),
            Item::Camera(camera) => fmt::Display::fmt(camera, f),
            Item::Ready(ready) => fmt::Display::fmt(ready, f),
        }
    }
}

impl From<Menu> for Item {
    fn from(menu: Menu) -> Self {
        Item::Menu(menu)
    }
}

impl From<BoundedOption> for Item {
    fn from(option: BoundedOption) -> Self {
        Item::Option(option)
    }
}

impl From<Action> for Item {
    fn from(action: Action) -> Self {
        Item::Action(action)
    }
}

impl From<Camera> for Item {
    fn from(camera: Camera) -> Self {
        Item::Camera(camera)
    }
}

impl From<Ready> for Item {
    fn from(ready: Ready) -> Self {
        Item::Ready(ready)
    }
}

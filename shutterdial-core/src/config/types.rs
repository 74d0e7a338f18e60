//! Configuration type definitions
//!
//! These types describe the encoder wiring and the options shown on the
//! panel. They are produced by [`parse_config`](super::parse_config) at boot
//! and turned into live objects with [`PanelConfig::build_panel`].

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::menu::{Camera, Menu, MenuError, Panel, PanelError, Ready, MAX_MENU_ITEMS};
use crate::option::{
    make_title, AlternatePolicy, BoundedOption, OptionError, Title, MAX_ALTERNATES,
};

/// Highest GPIO number on the RP2040
pub const MAX_PIN: u8 = 29;

/// Maximum options per panel, all shown in the settings menu
pub const MAX_OPTIONS: usize = MAX_MENU_ITEMS;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Two encoder lines share a pin
    DuplicateLine,
    /// Pin number above [`MAX_PIN`]
    InvalidLine,
    /// Option settings rejected
    Option(OptionError),
    /// Menu layout rejected
    Menu(MenuError),
    /// Panel composition failed
    Panel(PanelError),
}

impl From<OptionError> for ConfigError {
    fn from(e: OptionError) -> Self {
        ConfigError::Option(e)
    }
}

impl From<MenuError> for ConfigError {
    fn from(e: MenuError) -> Self {
        ConfigError::Menu(e)
    }
}

impl From<PanelError> for ConfigError {
    fn from(e: PanelError) -> Self {
        ConfigError::Panel(e)
    }
}

/// Encoder wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// GPIO for quadrature channel A
    pub pin_a: u8,
    /// GPIO for quadrature channel B
    pub pin_b: u8,
    /// GPIO for the push-button
    pub pin_select: u8,
    /// Minimum time between accepted edges on one line
    pub debounce_ms: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            pin_a: 2,
            pin_b: 3,
            pin_select: 4,
            debounce_ms: 5,
        }
    }
}

impl EncoderConfig {
    /// Check that every line is a distinct, existing pin
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = [self.pin_a, self.pin_b, self.pin_select];
        if pins.iter().any(|&pin| pin > MAX_PIN) {
            return Err(ConfigError::InvalidLine);
        }
        if self.pin_a == self.pin_b || self.pin_a == self.pin_select || self.pin_b == self.pin_select
        {
            return Err(ConfigError::DuplicateLine);
        }
        Ok(())
    }
}

/// One adjustable option
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionConfig {
    /// Display title
    pub name: Title,
    /// Starting value
    pub value: i32,
    /// Lower bound, set together with `max`
    pub min: Option<i32>,
    /// Upper bound, set together with `min`
    pub max: Option<i32>,
    /// Value change per dial step
    pub multiplier: i32,
    /// Button resets the value to zero
    pub zeroable: bool,
    /// Preset values reachable in alternate mode
    pub alternates: Vec<i32, MAX_ALTERNATES>,
    /// Behaviour at the ends of the alternate set
    pub alternate_policy: AlternatePolicy,
    /// Start in alternate mode
    pub alternate: bool,
}

impl Default for OptionConfig {
    fn default() -> Self {
        Self {
            name: Title::new(),
            value: 0,
            min: None,
            max: None,
            multiplier: 1,
            zeroable: false,
            alternates: Vec::new(),
            alternate_policy: AlternatePolicy::Clamp,
            alternate: false,
        }
    }
}

impl OptionConfig {
    /// Create a default option titled `name`
    pub fn named(name: &str) -> Self {
        Self {
            name: make_title(name),
            ..Self::default()
        }
    }

    /// Build the live option
    ///
    /// The starting value is clamped into the range.
    pub fn build(&self) -> Result<BoundedOption, ConfigError> {
        let mut option = BoundedOption::new(&self.name);
        option.set_val(self.value);
        if let (Some(min), Some(max)) = (self.min, self.max) {
            option.set_range(min, max)?;
        }
        option.set_multiplier(self.multiplier)?;
        option.set_zeroable(self.zeroable);
        for &alternate in &self.alternates {
            option.set_alternate(alternate)?;
        }
        option.set_alternate_policy(self.alternate_policy);
        option.has_alternate(self.alternate)?;
        Ok(option)
    }
}

/// Complete panel description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    pub encoder: EncoderConfig,
    pub options: Vec<OptionConfig, MAX_OPTIONS>,
}

impl PanelConfig {
    /// Assemble the panel
    ///
    /// ```text
    /// Main
    /// ├── Settings      (only when options are configured)
    /// │   └── <options>
    /// ├── Capture
    /// └── Ready
    /// ```
    pub fn build_panel(&self) -> Result<Panel, ConfigError> {
        self.encoder.validate()?;

        let mut panel = Panel::new();
        let mut root_items: Vec<_, MAX_MENU_ITEMS> = Vec::new();

        if !self.options.is_empty() {
            let mut option_ids: Vec<_, MAX_OPTIONS> = Vec::new();
            for option in &self.options {
                let id = panel.add(option.build()?)?;
                option_ids.push(id).map_err(|_| PanelError::Full)?;
            }
            let settings = panel.add(Menu::with_items("Settings", &option_ids)?)?;
            root_items.push(settings).map_err(|_| PanelError::Full)?;
        }

        let capture = panel.add(Camera::new("Capture"))?;
        root_items.push(capture).map_err(|_| PanelError::Full)?;
        let ready = panel.add(Ready::new("Ready"))?;
        root_items.push(ready).map_err(|_| PanelError::Full)?;

        let root = panel.add(Menu::with_items("Main", &root_items)?)?;
        panel.set_root(root)?;

        Ok(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Interface, Item};
    use crate::option::Limit;

    #[test]
    fn test_encoder_defaults_valid() {
        assert_eq!(EncoderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_encoder_duplicate_pins() {
        let config = EncoderConfig {
            pin_select: 2,
            ..EncoderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateLine));
    }

    #[test]
    fn test_encoder_pin_out_of_range() {
        let config = EncoderConfig {
            pin_b: 30,
            ..EncoderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidLine));
    }

    #[test]
    fn test_option_build() {
        let mut config = OptionConfig::named("Shutter");
        config.value = 12;
        config.min = Some(0);
        config.max = Some(10);
        config.multiplier = 2;
        config.zeroable = true;
        config.alternates.push(-1).unwrap();
        config.alternate_policy = AlternatePolicy::Wrap;

        let option = config.build().unwrap();
        assert_eq!(option.title(), "Shutter");
        assert_eq!(option.get_val(), 10);
        assert_eq!(option.get_range(Limit::Min), Some(0));
        assert_eq!(option.multiplier(), 2);
        assert!(option.is_zeroable());
        assert_eq!(option.alternates(), &[-1]);
        assert_eq!(option.alternate_policy(), AlternatePolicy::Wrap);
        assert!(!option.is_alternate_active());

        config.alternate = true;
        let option = config.build().unwrap();
        assert!(option.is_alternate_active());
        assert_eq!(option.get_val(), -1);
    }

    #[test]
    fn test_option_build_errors() {
        let mut config = OptionConfig::named("Bad");
        config.min = Some(5);
        config.max = Some(1);
        assert_eq!(
            config.build(),
            Err(ConfigError::Option(OptionError::InvalidRange))
        );

        let mut config = OptionConfig::named("Bad");
        config.multiplier = 0;
        assert_eq!(
            config.build(),
            Err(ConfigError::Option(OptionError::ZeroMultiplier))
        );

        let mut config = OptionConfig::named("Bad");
        config.alternate = true;
        assert_eq!(
            config.build(),
            Err(ConfigError::Option(OptionError::AlternateSetEmpty))
        );
    }

    #[test]
    fn test_build_panel_without_options() {
        let panel = PanelConfig::default().build_panel().unwrap();
        let root = panel.get(panel.root().unwrap()).unwrap();
        assert_eq!(root.title(), "Main");
        assert_eq!(root.as_menu().unwrap().get_items().len(), 2);
        assert_eq!(panel.len(), 3);
    }

    #[test]
    fn test_build_panel_with_options() {
        let mut config = PanelConfig::default();
        config.options.push(OptionConfig::named("ISO")).unwrap();
        config.options.push(OptionConfig::named("Shutter")).unwrap();

        let panel = config.build_panel().unwrap();
        let root = panel.get(panel.root().unwrap()).unwrap().as_menu().unwrap();
        let titles: Vec<&str, 4> = root
            .get_items()
            .iter()
            .filter_map(|&id| panel.get(id))
            .map(|item| item.title())
            .collect();
        assert_eq!(&titles[..], &["Settings", "Capture", "Ready"]);

        let settings = panel.get(root.get_items()[0]).unwrap().as_menu().unwrap();
        assert_eq!(settings.get_items().len(), 2);
        assert!(matches!(
            panel.get(settings.get_items()[1]),
            Some(Item::Option(o)) if o.title() == "Shutter"
        ));
    }

    #[test]
    fn test_build_panel_invalid_encoder() {
        let config = PanelConfig {
            encoder: EncoderConfig {
                pin_a: 7,
                pin_b: 7,
                ..EncoderConfig::default()
            },
            ..PanelConfig::default()
        };
        assert!(matches!(
            config.build_panel(),
            Err(ConfigError::DuplicateLine)
        ));
    }
}

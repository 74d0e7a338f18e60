//! Option configuration errors

/// Errors returned when configuring a [`BoundedOption`](super::BoundedOption)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OptionError {
    /// Range minimum is greater than its maximum
    InvalidRange,
    /// Step multiplier of zero
    ZeroMultiplier,
    /// No room left in the alternate set
    AlternateSetFull,
    /// Alternate mode enabled without any alternate values
    AlternateSetEmpty,
}

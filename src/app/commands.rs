//! Inbound commands to the operator panel.
//!
//! Button edges are translated into these by the control loop; the panel
//! interprets them and decides whether the screen needs a redraw.

/// Commands that the outside world can send into the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// Button A: one more identity (saturates at the configured maximum).
    IncrementCount,

    /// Button B: flip broadcasting on/off.
    ToggleEnabled,
}

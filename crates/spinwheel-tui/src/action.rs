use spinwheel_core::resolver::SpinTicket;

/// All actions that can flow through the application.
#[derive(Debug, Clone)]
pub enum Action {
    // System
    Tick,
    Quit,
    Resize(u16, u16),

    // Wheel
    Spin,
    ResolveSpin(SpinTicket), // delivered by the scheduler once the delay elapses

    // Popups
    ToggleLogPanel,
    ShowHelp,
    ClosePopup,

    // No-op
    None,
}

pub mod help_popup;
pub mod log_panel;
pub mod popup;
pub mod spin_button;
pub mod status_bar;
pub mod wheel_panel;
pub mod winner_banner;

use log::Level;

// Header
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;
pub const HEADER_HIDE_DEPTH: f64 = 300.0;
pub const HEADER_DEBOUNCE_MS: u32 = 10;

// In-page navigation
pub const SCROLL_OFFSET: f64 = 80.0;
pub const MOBILE_BREAKPOINT: f64 = 768.0;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

// Reveal + counters
pub const ANIMATION_DELAY_MS: u32 = 100;
pub const REVEAL_THRESHOLD: f64 = 0.15;
pub const COUNTER_THRESHOLD: f64 = 0.5;
pub const COUNTER_DURATION_MS: u32 = 2000;
pub const COUNTER_FRAME_MS: u32 = 16;
pub const RIPPLE_LIFETIME_MS: u32 = 600;

// WhatsApp
pub const WHATSAPP_NUMBER: &str = "5512991090909";
pub const WHATSAPP_MESSAGE: &str = "Olá, gostaria de solicitar uma cotação na Valle MIL.";
pub const WHATSAPP_PULSE_MS: u32 = 300;

// Quote form
pub const FORM_SUBMIT_DELAY_MS: u32 = 1500;
pub const SUCCESS_SCROLL_DELAY_MS: u32 = 100;
pub const SUCCESS_DISPLAY_MS: u32 = 5000;

pub const MODAL_FOCUS_DELAY_MS: u32 = 100;

// Hero carousel
pub const AUTOPLAY_MS: u32 = 5000;
pub const SWIPE_THRESHOLD: f64 = 50.0;

// Scroll to top
pub const SCROLL_TOP_VISIBLE_AFTER: f64 = 500.0;
pub const SCROLL_TOP_DEBOUNCE_MS: u32 = 100;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

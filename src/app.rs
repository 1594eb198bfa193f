use log::{debug, info, warn};

use crate::components::{
    header, hero_carousel, micro, mobile_menu, privacy_modal, scroll_reveal, scroll_to_top,
    smooth_scroll, whatsapp,
};
use crate::error::{WidgetError, WidgetResult};
use crate::forms;

/// A component that fails stays off; the rest still start.
fn report<T>(name: &str, result: WidgetResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(WidgetError::Missing(what)) => {
            debug!("{} disabled, missing {}", name, what);
            None
        }
        Err(e) => {
            warn!("{} failed to start: {}", name, e);
            None
        }
    }
}

pub fn init() {
    let menu = report("MobileMenu", mobile_menu::init());
    report("DynamicHeader", header::init());
    report("SmoothScroll", smooth_scroll::init(menu));
    report("ScrollReveal", scroll_reveal::init());
    report("PrivacyModal", privacy_modal::init());
    report("FormValidation", forms::dom::init());
    report("WhatsAppButton", whatsapp::init());
    report("MicroInteractions", micro::init());
    report("ScrollToTop", scroll_to_top::init());
    report("HeroCarousel", hero_carousel::init());

    info!("Valle MIL - site initialised");
}

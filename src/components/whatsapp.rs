use log::debug;
use web_sys::MouseEvent;

use crate::config;
use crate::error::WidgetResult;
use crate::timers::{BrowserScheduler, Scheduler};
use crate::utils;

pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(message))
}

pub fn init() -> WidgetResult<()> {
    let button = utils::require("#whatsapp")?;
    button.set_attribute(
        "href",
        &whatsapp_url(config::WHATSAPP_NUMBER, config::WHATSAPP_MESSAGE),
    )?;

    let pulsing = button.clone();
    utils::listen(&button, "click", move |_: MouseEvent| {
        utils::add_class(&pulsing, "clicked");
        let pulsing = pulsing.clone();
        BrowserScheduler.after(config::WHATSAPP_PULSE_MS, move || {
            utils::remove_class(&pulsing, "clicked");
        });
    })?;

    debug!("whatsapp button attached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_deep_link() {
        assert_eq!(
            whatsapp_url(config::WHATSAPP_NUMBER, config::WHATSAPP_MESSAGE),
            "https://wa.me/5512991090909?text=Ol%C3%A1%2C%20gostaria%20de%20solicitar%20uma%20cota%C3%A7%C3%A3o%20na%20Valle%20MIL."
        );
    }

    #[test]
    fn empty_message_keeps_query() {
        assert_eq!(whatsapp_url("123", ""), "https://wa.me/123?text=");
    }
}

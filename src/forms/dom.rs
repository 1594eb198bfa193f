use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::AppHandle;

use crate::config;
use crate::error::{WidgetError, WidgetResult};
use crate::forms::quote::{QuoteForm, QuoteView};
use crate::forms::success::QuoteSuccess;
use crate::forms::validation::{Field, FieldValue};
use crate::timers::BrowserScheduler;
use crate::utils;

const ERROR_COLOR: &str = "#EF4444";
const SENDING_LABEL: &str = "<i class=\"fas fa-spinner fa-spin\"></i> Enviando...";

fn annotate(control: &Element, message: &str) -> WidgetResult<()> {
    let Some(group) = control.closest(".form-group")? else {
        return Ok(());
    };
    if let Some(existing) = utils::select_in(&group, ".error-message") {
        existing.remove();
    }
    utils::add_class(control, "error");
    utils::add_class(&group, "has-error");

    let note = utils::document()?.create_element("div")?;
    note.set_class_name("error-message");
    note.set_text_content(Some(message));
    utils::set_style(&note, "color", ERROR_COLOR);
    utils::set_style(&note, "font-size", "0.875rem");
    utils::set_style(&note, "margin-top", "0.5rem");
    group.append_child(&note)?;
    Ok(())
}

fn clear_annotation(control: &Element) {
    let Ok(Some(group)) = control.closest(".form-group") else {
        return;
    };
    utils::remove_class(control, "error");
    utils::remove_class(&group, "has-error");
    if let Some(note) = utils::select_in(&group, ".error-message") {
        note.remove();
    }
}

fn control_value(control: &Element) -> FieldValue {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        if input.type_() == "checkbox" {
            FieldValue::Checked(input.checked())
        } else {
            FieldValue::Text(input.value())
        }
    } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        FieldValue::Text(select.value())
    } else if let Some(area) = control.dyn_ref::<HtmlTextAreaElement>() {
        FieldValue::Text(area.value())
    } else {
        FieldValue::Text(String::new())
    }
}

pub struct DomQuoteView {
    form: HtmlFormElement,
    wrapper: Option<Element>,
    submit: Option<HtmlButtonElement>,
    submit_label: String,
    fields: Vec<(Field, Element)>,
    success: RefCell<Option<(Element, AppHandle<QuoteSuccess>)>>,
}

impl DomQuoteView {
    fn bind(form: HtmlFormElement) -> Self {
        let fields = Field::ALL
            .into_iter()
            .filter_map(|field| {
                utils::select_in(&form, &format!("#{}", field.id())).map(|el| (field, el))
            })
            .collect();
        let submit = utils::select_in(&form, "button[type=\"submit\"]")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let submit_label = submit.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        let wrapper = form.closest(".quote__form-wrapper").ok().flatten();
        Self {
            form,
            wrapper,
            submit,
            submit_label,
            fields,
            success: RefCell::new(None),
        }
    }

    fn control(&self, field: Field) -> Option<&Element> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, el)| el)
    }

    fn container(&self) -> Option<Element> {
        self.wrapper.clone().or_else(|| self.form.parent_element())
    }

    fn mount_success(&self) -> WidgetResult<()> {
        let container = self.container().ok_or(WidgetError::Missing(".quote__form-wrapper"))?;
        let host = utils::document()?.create_element("div")?;
        host.set_class_name("success-message");
        container.append_child(&host)?;
        let handle = yew::Renderer::<QuoteSuccess>::with_root(host.clone()).render();
        self.success.borrow_mut().replace((host, handle));
        Ok(())
    }
}

impl QuoteView for DomQuoteView {
    fn has_field(&self, field: Field) -> bool {
        self.control(field).is_some()
    }

    fn value(&self, field: Field) -> FieldValue {
        self.control(field)
            .map(control_value)
            .unwrap_or(FieldValue::Text(String::new()))
    }

    fn is_required(&self, field: Field) -> bool {
        self.control(field)
            .map_or(false, |el| el.has_attribute("required"))
    }

    fn show_error(&self, field: Field, message: &str) {
        if let Some(control) = self.control(field) {
            if let Err(e) = annotate(control, message) {
                warn!("could not annotate #{}: {}", field.id(), e);
            }
        }
    }

    fn clear_error(&self, field: Field) {
        if let Some(control) = self.control(field) {
            clear_annotation(control);
        }
    }

    fn has_error(&self, field: Field) -> bool {
        self.control(field)
            .map_or(false, |el| utils::has_class(el, "error"))
    }

    fn focus(&self, field: Field) {
        if let Some(control) = self.control(field) {
            utils::focus(control);
        }
    }

    fn highlight_consent(&self, on: bool) {
        let label = self
            .control(Field::Consent)
            .and_then(|el| el.closest(".form-group").ok().flatten())
            .and_then(|group| utils::select_in(&group, ".form-checkbox__label"));
        if let Some(label) = label {
            utils::set_style(&label, "color", if on { ERROR_COLOR } else { "" });
        }
    }

    fn set_submitting(&self, submitting: bool) {
        let Some(button) = &self.submit else {
            return;
        };
        button.set_disabled(submitting);
        if submitting {
            button.set_inner_html(SENDING_LABEL);
        } else {
            button.set_inner_html(&self.submit_label);
        }
        utils::set_class(button, "loading", submitting);
    }

    fn set_form_visible(&self, visible: bool) {
        utils::set_style(&self.form, "display", if visible { "grid" } else { "none" });
    }

    fn show_success(&self) {
        if let Err(e) = self.mount_success() {
            warn!("success panel not shown: {}", e);
        }
    }

    fn hide_success(&self) {
        if let Some((host, handle)) = self.success.borrow_mut().take() {
            handle.destroy();
            host.remove();
        }
    }

    fn scroll_to_success(&self) {
        utils::smooth_scroll_to(self.container().as_ref(), config::SCROLL_OFFSET);
    }

    fn reset_fields(&self) {
        self.form.reset();
    }
}

fn event_control(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

pub fn init() -> WidgetResult<()> {
    let form = utils::require("#quote-form")?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| WidgetError::Missing("form#quote-form"))?;
    let controller = Rc::new(QuoteForm::new(
        Rc::new(DomQuoteView::bind(form.clone())),
        BrowserScheduler,
    ));

    {
        let controller = controller.clone();
        utils::listen(&form, "submit", move |event: Event| {
            event.prevent_default();
            controller.submit();
        })?;
    }

    if let Some(phone) = utils::select_in(&form, &format!("#{}", Field::Phone.id())) {
        utils::listen(&phone, "input", move |event: Event| {
            if let Some(input) = event_control(&event).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
                input.set_value(&utils::mask_phone(&input.value()));
            }
        })?;
        // A complete number is rewritten in its canonical grouping.
        utils::listen(&phone, "blur", move |event: Event| {
            if let Some(input) = event_control(&event).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
                let value = input.value();
                if utils::is_valid_phone(&value) {
                    input.set_value(&utils::format_phone(&value));
                }
            }
        })?;
    }

    let controls = utils::select_all_in(&form, "input:not([type=\"checkbox\"]), select, textarea");
    for control in &controls {
        let field = Field::from_id(&control.id());
        {
            let controller = controller.clone();
            utils::listen(control, "blur", move |_: Event| {
                if let Some(field) = field {
                    controller.on_blur(field);
                }
            })?;
        }
        {
            let controller = controller.clone();
            let control_clone = control.clone();
            utils::listen(control, "input", move |_: Event| match field {
                Some(field) => controller.on_input(field),
                None => {
                    if utils::has_class(&control_clone, "error") {
                        clear_annotation(&control_clone);
                    }
                }
            })?;
        }
    }

    debug!("quote form attached with {} controls", controls.len());
    Ok(())
}

//! Quote request flow: field checks, real-time feedback and the simulated send.
//!
//! The controller only talks to a [`QuoteView`], so the whole flow can be
//! driven without a browser.

use std::rc::Rc;

use log::{debug, info};

use crate::config;
use crate::forms::validation::{self, Field, FieldValue};
use crate::timers::Scheduler;

pub trait QuoteView {
    fn has_field(&self, field: Field) -> bool;
    fn value(&self, field: Field) -> FieldValue;
    fn is_required(&self, field: Field) -> bool;

    /// Replaces any existing annotation on the field.
    fn show_error(&self, field: Field, message: &str);
    fn clear_error(&self, field: Field);
    fn has_error(&self, field: Field) -> bool;
    fn focus(&self, field: Field);
    fn highlight_consent(&self, on: bool);

    fn set_submitting(&self, submitting: bool);
    fn set_form_visible(&self, visible: bool);
    fn show_success(&self);
    fn hide_success(&self);
    fn scroll_to_success(&self);
    fn reset_fields(&self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    Sending,
}

pub struct QuoteForm<V: QuoteView, S: Scheduler> {
    view: Rc<V>,
    scheduler: S,
}

impl<V: QuoteView + 'static, S: Scheduler> QuoteForm<V, S> {
    pub fn new(view: Rc<V>, scheduler: S) -> Self {
        Self { view, scheduler }
    }

    #[cfg(test)]
    pub fn view(&self) -> &Rc<V> {
        &self.view
    }

    /// Checks one field and updates its annotation. Failing moves focus to it.
    pub fn validate_field(&self, field: Field) -> bool {
        let value = self.view.value(field);
        let result = validation::validate(field, &value);
        if field == Field::Consent {
            self.view.highlight_consent(result.is_err());
        }
        match result {
            Ok(()) => {
                self.view.clear_error(field);
                true
            }
            Err(message) => {
                self.view.show_error(field, message);
                self.view.focus(field);
                false
            }
        }
    }

    /// Every present field is checked, so every error is shown at once.
    pub fn validate_all(&self) -> bool {
        Field::ALL
            .into_iter()
            .filter(|field| self.view.has_field(*field))
            .fold(true, |valid, field| self.validate_field(field) && valid)
    }

    pub fn on_blur(&self, field: Field) {
        if field == Field::Consent {
            return;
        }
        if self.view.is_required(field) && !self.view.value(field).is_blank() {
            self.validate_field(field);
        }
    }

    pub fn on_input(&self, field: Field) {
        if self.view.has_error(field) {
            self.view.clear_error(field);
        }
    }

    pub fn submit(&self) -> SubmitOutcome {
        if !self.validate_all() {
            debug!("quote form rejected");
            return SubmitOutcome::Rejected;
        }

        self.view.set_submitting(true);
        let view = self.view.clone();
        let scheduler = self.scheduler.clone();
        self.scheduler.after(config::FORM_SUBMIT_DELAY_MS, move || {
            view.set_submitting(false);
            view.set_form_visible(false);
            view.show_success();
            info!("quote request sent");

            {
                let view = view.clone();
                scheduler.after(config::SUCCESS_SCROLL_DELAY_MS, move || view.scroll_to_success());
            }

            clear_errors(&*view);

            scheduler.after(config::SUCCESS_DISPLAY_MS, move || {
                view.reset_fields();
                clear_errors(&*view);
                view.hide_success();
                view.set_form_visible(true);
            });
        });
        SubmitOutcome::Sending
    }
}

fn clear_errors<V: QuoteView>(view: &V) {
    for field in Field::ALL.into_iter().filter(|f| view.has_field(*f)) {
        view.clear_error(field);
    }
    view.highlight_consent(false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::validation::*;
    use crate::timers::ManualScheduler;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeView {
        values: RefCell<HashMap<Field, FieldValue>>,
        errors: RefCell<HashMap<Field, String>>,
        annotations_added: RefCell<usize>,
        focused: RefCell<Option<Field>>,
        consent_highlighted: RefCell<bool>,
        submitting: RefCell<bool>,
        form_visible: RefCell<bool>,
        success_shown: RefCell<bool>,
        scrolled: RefCell<bool>,
    }

    impl FakeView {
        fn with(values: &[(Field, FieldValue)]) -> Rc<Self> {
            let view = FakeView::default();
            *view.form_visible.borrow_mut() = true;
            for (field, value) in values {
                view.values.borrow_mut().insert(*field, value.clone());
            }
            Rc::new(view)
        }

        fn set(&self, field: Field, value: FieldValue) {
            self.values.borrow_mut().insert(field, value);
        }

        fn error_count(&self) -> usize {
            self.errors.borrow().len()
        }
    }

    impl QuoteView for FakeView {
        fn has_field(&self, field: Field) -> bool {
            self.values.borrow().contains_key(&field)
        }
        fn value(&self, field: Field) -> FieldValue {
            self.values
                .borrow()
                .get(&field)
                .cloned()
                .unwrap_or(FieldValue::Text(String::new()))
        }
        fn is_required(&self, _field: Field) -> bool {
            true
        }
        fn show_error(&self, field: Field, message: &str) {
            self.errors.borrow_mut().insert(field, message.to_string());
            *self.annotations_added.borrow_mut() += 1;
        }
        fn clear_error(&self, field: Field) {
            self.errors.borrow_mut().remove(&field);
        }
        fn has_error(&self, field: Field) -> bool {
            self.errors.borrow().contains_key(&field)
        }
        fn focus(&self, field: Field) {
            *self.focused.borrow_mut() = Some(field);
        }
        fn highlight_consent(&self, on: bool) {
            *self.consent_highlighted.borrow_mut() = on;
        }
        fn set_submitting(&self, submitting: bool) {
            *self.submitting.borrow_mut() = submitting;
        }
        fn set_form_visible(&self, visible: bool) {
            *self.form_visible.borrow_mut() = visible;
        }
        fn show_success(&self) {
            *self.success_shown.borrow_mut() = true;
        }
        fn hide_success(&self) {
            *self.success_shown.borrow_mut() = false;
        }
        fn scroll_to_success(&self) {
            *self.scrolled.borrow_mut() = true;
        }
        fn reset_fields(&self) {
            for value in self.values.borrow_mut().values_mut() {
                let cleared = match value {
                    FieldValue::Text(_) => FieldValue::Text(String::new()),
                    FieldValue::Checked(_) => FieldValue::Checked(false),
                };
                *value = cleared;
            }
        }
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn bad_form() -> Rc<FakeView> {
        FakeView::with(&[
            (Field::Name, text("Jo")),
            (Field::Email, text("bad")),
            (Field::Phone, text("123")),
            (Field::Category, text("")),
            (Field::City, text("")),
            (Field::Consent, FieldValue::Checked(false)),
        ])
    }

    fn good_form() -> Rc<FakeView> {
        FakeView::with(&[
            (Field::Name, text("Maria Silva")),
            (Field::Email, text("maria@ex.com")),
            (Field::Phone, text("12991234567")),
            (Field::Category, text("auto")),
            (Field::City, text("São Paulo/SP")),
            (Field::Consent, FieldValue::Checked(true)),
        ])
    }

    #[test]
    fn invalid_submission_shows_every_error() {
        let scheduler = ManualScheduler::new();
        let form = QuoteForm::new(bad_form(), scheduler.clone());

        assert_eq!(form.submit(), SubmitOutcome::Rejected);
        let view = form.view();
        assert_eq!(view.error_count(), 6);
        assert_eq!(view.errors.borrow()[&Field::Name], NAME_TOO_SHORT);
        assert_eq!(view.errors.borrow()[&Field::Email], EMAIL_INVALID);
        assert_eq!(view.errors.borrow()[&Field::Phone], PHONE_INVALID);
        assert_eq!(view.errors.borrow()[&Field::Category], CATEGORY_REQUIRED);
        assert_eq!(view.errors.borrow()[&Field::City], CITY_REQUIRED);
        assert_eq!(view.errors.borrow()[&Field::Consent], CONSENT_REQUIRED);
        assert!(*view.consent_highlighted.borrow());
        assert!(!*view.submitting.borrow());

        scheduler.advance(10_000);
        assert!(!*view.success_shown.borrow());
        assert!(*view.form_visible.borrow());
    }

    #[test]
    fn valid_submission_runs_the_full_cycle() {
        let scheduler = ManualScheduler::new();
        let form = QuoteForm::new(good_form(), scheduler.clone());
        let view = form.view().clone();

        assert_eq!(form.submit(), SubmitOutcome::Sending);
        assert!(*view.submitting.borrow());
        assert_eq!(view.error_count(), 0);

        scheduler.advance(1499);
        assert!(!*view.success_shown.borrow());

        scheduler.advance(1);
        assert!(!*view.submitting.borrow());
        assert!(!*view.form_visible.borrow());
        assert!(*view.success_shown.borrow());
        assert!(!*view.scrolled.borrow());

        scheduler.advance(100);
        assert!(*view.scrolled.borrow());

        scheduler.advance(4900);
        assert!(!*view.success_shown.borrow());
        assert!(*view.form_visible.borrow());
        assert_eq!(view.value(Field::Name), text(""));
        assert_eq!(view.value(Field::Consent), FieldValue::Checked(false));
        assert_eq!(view.error_count(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn errors_are_replaced_not_stacked() {
        let scheduler = ManualScheduler::new();
        let view = FakeView::with(&[(Field::Name, text(""))]);
        let form = QuoteForm::new(view.clone(), scheduler);

        assert!(!form.validate_field(Field::Name));
        assert_eq!(view.errors.borrow()[&Field::Name], NAME_REQUIRED);
        view.set(Field::Name, text("Jo"));
        assert!(!form.validate_field(Field::Name));
        assert_eq!(view.errors.borrow()[&Field::Name], NAME_TOO_SHORT);
        assert_eq!(view.error_count(), 1);

        view.set(Field::Name, text("Joana"));
        assert!(form.validate_field(Field::Name));
        assert!(!view.has_error(Field::Name));
    }

    #[test]
    fn blur_skips_empty_fields() {
        let scheduler = ManualScheduler::new();
        let view = FakeView::with(&[(Field::Email, text("  ")), (Field::Phone, text("123"))]);
        let form = QuoteForm::new(view.clone(), scheduler);

        form.on_blur(Field::Email);
        assert!(!view.has_error(Field::Email));

        form.on_blur(Field::Phone);
        assert_eq!(view.errors.borrow()[&Field::Phone], PHONE_INVALID);
        assert_eq!(*view.focused.borrow(), Some(Field::Phone));
    }

    #[test]
    fn typing_clears_existing_error() {
        let scheduler = ManualScheduler::new();
        let view = FakeView::with(&[(Field::City, text(""))]);
        let form = QuoteForm::new(view.clone(), scheduler);

        form.validate_field(Field::City);
        assert!(view.has_error(Field::City));
        form.on_input(Field::City);
        assert!(!view.has_error(Field::City));
    }

    #[test]
    fn absent_fields_are_not_checked() {
        let scheduler = ManualScheduler::new();
        let view = FakeView::with(&[(Field::Name, text("Maria"))]);
        let form = QuoteForm::new(view.clone(), scheduler);
        assert!(form.validate_all());
        assert_eq!(*view.annotations_added.borrow(), 0);
    }

    #[test]
    fn last_failing_field_keeps_focus() {
        let scheduler = ManualScheduler::new();
        let form = QuoteForm::new(bad_form(), scheduler);
        form.validate_all();
        assert_eq!(*form.view().focused.borrow(), Some(Field::Consent));
    }
}

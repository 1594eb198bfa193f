use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Category,
    City,
    Consent,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Category,
        Field::City,
        Field::Consent,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Field::Name => "nome",
            Field::Email => "email",
            Field::Phone => "telefone",
            Field::Category => "tipo-seguro",
            Field::City => "cidade",
            Field::Consent => "lgpd-consent",
        }
    }

    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.id() == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Checked(_) => "",
        }
    }

    /// Blank for text after trimming, unchecked for boxes.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Checked(checked) => !checked,
        }
    }
}

pub const NAME_REQUIRED: &str = "Por favor, informe seu nome completo.";
pub const NAME_TOO_SHORT: &str = "Nome deve ter pelo menos 3 caracteres.";
pub const EMAIL_REQUIRED: &str = "Por favor, informe seu e-mail.";
pub const EMAIL_INVALID: &str = "Por favor, informe um e-mail válido.";
pub const PHONE_REQUIRED: &str = "Por favor, informe seu telefone.";
pub const PHONE_INVALID: &str = "Por favor, informe um telefone válido.";
pub const CATEGORY_REQUIRED: &str = "Por favor, selecione uma opção.";
pub const CITY_REQUIRED: &str = "Por favor, informe sua cidade/estado.";
pub const CONSENT_REQUIRED: &str = "Você precisa concordar com a política de privacidade.";

pub fn validate(field: Field, value: &FieldValue) -> Result<(), &'static str> {
    let text = value.text().trim();
    match field {
        Field::Name => {
            if text.is_empty() {
                Err(NAME_REQUIRED)
            } else if text.chars().count() < 3 {
                Err(NAME_TOO_SHORT)
            } else {
                Ok(())
            }
        }
        Field::Email => {
            if text.is_empty() {
                Err(EMAIL_REQUIRED)
            } else if !utils::is_valid_email(text) {
                Err(EMAIL_INVALID)
            } else {
                Ok(())
            }
        }
        Field::Phone => {
            if text.is_empty() {
                Err(PHONE_REQUIRED)
            } else if !utils::is_valid_phone(text) {
                Err(PHONE_INVALID)
            } else {
                Ok(())
            }
        }
        // Select values are not trimmed.
        Field::Category => {
            if value.text().is_empty() {
                Err(CATEGORY_REQUIRED)
            } else {
                Ok(())
            }
        }
        Field::City => {
            if text.is_empty() {
                Err(CITY_REQUIRED)
            } else {
                Ok(())
            }
        }
        Field::Consent => match value {
            FieldValue::Checked(true) => Ok(()),
            _ => Err(CONSENT_REQUIRED),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn name_rules() {
        assert_eq!(validate(Field::Name, &text("   ")), Err(NAME_REQUIRED));
        assert_eq!(validate(Field::Name, &text("Jo")), Err(NAME_TOO_SHORT));
        assert_eq!(validate(Field::Name, &text(" Jo ")), Err(NAME_TOO_SHORT));
        assert_eq!(validate(Field::Name, &text("Ana")), Ok(()));
        assert_eq!(validate(Field::Name, &text("Zé ")), Err(NAME_TOO_SHORT));
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate(Field::Email, &text("")), Err(EMAIL_REQUIRED));
        assert_eq!(validate(Field::Email, &text("bad")), Err(EMAIL_INVALID));
        assert_eq!(validate(Field::Email, &text(" maria@ex.com ")), Ok(()));
    }

    #[test]
    fn phone_rules() {
        assert_eq!(validate(Field::Phone, &text("")), Err(PHONE_REQUIRED));
        assert_eq!(validate(Field::Phone, &text("123")), Err(PHONE_INVALID));
        assert_eq!(validate(Field::Phone, &text("(12) 99123-4567")), Ok(()));
    }

    #[test]
    fn select_city_and_consent() {
        assert_eq!(validate(Field::Category, &text("")), Err(CATEGORY_REQUIRED));
        assert_eq!(validate(Field::Category, &text("auto")), Ok(()));
        assert_eq!(validate(Field::City, &text("  ")), Err(CITY_REQUIRED));
        assert_eq!(validate(Field::City, &text("São Paulo/SP")), Ok(()));
        assert_eq!(validate(Field::Consent, &FieldValue::Checked(false)), Err(CONSENT_REQUIRED));
        assert_eq!(validate(Field::Consent, &FieldValue::Checked(true)), Ok(()));
    }

    #[test]
    fn ids_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_id(field.id()), Some(field));
        }
        assert_eq!(Field::from_id("mensagem"), None);
    }
}

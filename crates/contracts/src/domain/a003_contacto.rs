use serde::{Deserialize, Serialize};

/// Contact summary as returned by the contacts search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "billingTaxId", default)]
    pub billing_tax_id: Option<String>,
}

/// Manually entered contact data (end-user flow).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub billing_address: String,
}

/// Field-level validation messages for the manual contact form.
/// `None` means the field passed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactFormErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
}

impl ContactFormErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

impl ContactForm {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Required: first name, last name, phone, and a `local@domain.tld` email.
    pub fn validate(&self) -> ContactFormErrors {
        let mut errors = ContactFormErrors::default();
        if self.first_name.trim().is_empty() {
            errors.first_name = Some("El nombre es obligatorio");
        }
        if self.last_name.trim().is_empty() {
            errors.last_name = Some("Los apellidos son obligatorios");
        }
        if self.phone.trim().is_empty() {
            errors.phone = Some("El teléfono es obligatorio");
        }
        if !is_valid_email(self.email.trim()) {
            errors.email = Some("Introduce un email válido");
        }
        errors
    }
}

/// Minimal `local@domain.tld` shape check. Not RFC 5322; matches what the
/// backend accepts for booking requests.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ana@beworking.es"));
        assert!(is_valid_email("a.b+c@mail.example.com"));
        assert!(!is_valid_email("ana@beworking"));
        assert!(!is_valid_email("@beworking.es"));
        assert!(!is_valid_email("ana beworking.es"));
        assert!(!is_valid_email("ana@.es"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_form_validation_required_fields() {
        let mut form = ContactForm {
            first_name: "Ana".into(),
            last_name: "García".into(),
            email: "ana@beworking.es".into(),
            phone: "600111222".into(),
            ..Default::default()
        };
        assert!(form.validate().is_empty());

        form.phone = "  ".into();
        form.email = "no-at-sign".into();
        let errors = form.validate();
        assert!(errors.phone.is_some());
        assert!(errors.email.is_some());
        assert!(errors.first_name.is_none());
    }
}

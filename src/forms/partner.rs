use crate::forms::{
    choice, is_valid_email, required, EntityForm, FieldKind, FieldSpec, FormErrors, FormMode,
};
use crate::models::{Partner, PartnerDraft, PartnerType};

#[derive(Debug, Clone)]
pub struct PartnerForm {
    mode: FormMode,
    pub name: String,
    pub partner_type: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl PartnerForm {
    /// Blank form; type defaults to customer.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            partner_type: PartnerType::Customer.as_str().to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
        }
    }

    pub fn edit(partner: &Partner) -> Self {
        Self {
            mode: FormMode::Edit,
            name: partner.name.clone(),
            partner_type: partner.partner_type.as_str().to_string(),
            email: partner.email.clone(),
            phone: partner.phone.clone(),
            address: partner.address.clone(),
        }
    }
}

impl Default for PartnerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for PartnerForm {
    type Payload = PartnerDraft;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "name",
            label: "partners.name",
            aliases: &["Name", "Partner Name"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "type",
            label: "common.type",
            aliases: &["Type"],
            kind: FieldKind::Choice(PartnerType::LITERALS),
            required: true,
        },
        FieldSpec {
            key: "email",
            label: "partners.email",
            aliases: &["Email"],
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            key: "phone",
            label: "partners.phone",
            aliases: &["Phone"],
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            key: "address",
            label: "partners.address",
            aliases: &["Address"],
            kind: FieldKind::Text,
            required: false,
        },
    ];

    fn mode(&self) -> FormMode {
        self.mode
    }

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "type" => self.partner_type.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "address" => self.address.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "type" => self.partner_type = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "address" => self.address = value.to_string(),
            _ => {}
        }
    }

    fn validate(&self) -> Result<PartnerDraft, FormErrors> {
        let mut errors = FormErrors::new();
        let name = required(&mut errors, "name", &self.name, "Partner name is required");
        let partner_type = choice(
            &mut errors,
            "type",
            &self.partner_type,
            PartnerType::parse,
            "Please select a partner type",
        );
        // empty is allowed; anything else must look like an address
        let email = self.email.trim().to_string();
        if !email.is_empty() && !is_valid_email(&email) {
            errors.push("email", "Please enter a valid email");
        }
        let Some(partner_type) = partner_type.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };
        Ok(PartnerDraft {
            name,
            partner_type,
            email,
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> PartnerForm {
        let mut form = PartnerForm::new();
        form.set("name", name);
        form
    }

    #[test]
    fn test_defaults_to_customer() {
        let draft = named("Acme").validate().unwrap();
        assert_eq!(draft.partner_type, PartnerType::Customer);
        assert!(draft.email.is_empty());
    }

    #[test]
    fn test_empty_email_allowed_bad_email_rejected() {
        let mut form = named("Acme");
        form.set("email", "");
        assert!(form.validate().is_ok());
        form.set("email", "contact@acme");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email"));
        form.set("email", "contact@acme.com");
        assert_eq!(form.validate().unwrap().email, "contact@acme.com");
    }

    #[test]
    fn test_type_confined_to_literals() {
        let mut form = named("Acme");
        form.set("type", "company");
        assert!(form.validate().unwrap_err().get("type").is_some());
        form.set("type", "vendor");
        assert_eq!(form.validate().unwrap().partner_type, PartnerType::Vendor);
    }

    #[test]
    fn test_collects_every_failing_field() {
        let mut form = named("");
        form.set("type", "nope");
        form.set("email", "bad");
        assert_eq!(form.validate().unwrap_err().len(), 3);
    }
}

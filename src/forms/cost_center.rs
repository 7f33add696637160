use crate::forms::{required, EntityForm, FieldKind, FieldSpec, FormErrors, FormMode};
use crate::models::{CostCenter, CostCenterDraft};

#[derive(Debug, Clone)]
pub struct CostCenterForm {
    mode: FormMode,
    pub name: String,
    pub description: String,
}

impl CostCenterForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn edit(center: &CostCenter) -> Self {
        Self {
            mode: FormMode::Edit,
            name: center.name.clone(),
            description: center.description.clone(),
        }
    }
}

impl Default for CostCenterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for CostCenterForm {
    type Payload = CostCenterDraft;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "name",
            label: "costCenters.name",
            aliases: &["Name", "Cost Center Name"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "description",
            label: "common.description",
            aliases: &["Description"],
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
            "description" => self.description.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => {}
        }
    }

    fn validate(&self) -> Result<CostCenterDraft, FormErrors> {
        let mut errors = FormErrors::new();
        let name = required(&mut errors, "name", &self.name, "Cost center name is required");
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CostCenterDraft {
            name,
            description: self.description.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let form = CostCenterForm::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Cost center name is required"));
    }

    #[test]
    fn test_description_optional() {
        let mut form = CostCenterForm::new();
        form.set("name", "IT Department");
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "IT Department");
        assert!(draft.description.is_empty());
    }
}

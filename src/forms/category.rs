use crate::forms::{choice, required, EntityForm, FieldKind, FieldSpec, FormErrors, FormMode};
use crate::models::{Category, CategoryDraft, CategoryType};

#[derive(Debug, Clone)]
pub struct CategoryForm {
    mode: FormMode,
    pub name: String,
    pub category_type: String,
    pub description: String,
}

impl CategoryForm {
    /// Blank form. The type starts unselected and must be picked.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            category_type: String::new(),
            description: String::new(),
        }
    }

    pub fn edit(category: &Category) -> Self {
        Self {
            mode: FormMode::Edit,
            name: category.name.clone(),
            category_type: category.category_type.as_str().to_string(),
            description: category.description.clone(),
        }
    }
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for CategoryForm {
    type Payload = CategoryDraft;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "name",
            label: "categories.name",
            aliases: &["Name", "Category Name"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "type",
            label: "common.type",
            aliases: &["Type"],
            kind: FieldKind::Choice(CategoryType::LITERALS),
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
            "type" => self.category_type.clone(),
            "description" => self.description.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "type" => self.category_type = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => {}
        }
    }

    fn validate(&self) -> Result<CategoryDraft, FormErrors> {
        let mut errors = FormErrors::new();
        let name = required(&mut errors, "name", &self.name, "Category name is required");
        let category_type = choice(
            &mut errors,
            "type",
            &self.category_type,
            CategoryType::parse,
            "Please select a category type",
        );
        let Some(category_type) = category_type.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };
        Ok(CategoryDraft {
            name,
            category_type,
            description: self.description.trim().to_string(),
        })
    }
}

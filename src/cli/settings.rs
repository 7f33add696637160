use crate::error::Result;
use crate::i18n::Language;
use crate::models::Role;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub struct SettingsChange {
    pub language: Option<Language>,
    pub role: Option<Role>,
    pub clear_role: bool,
    pub page_size: Option<usize>,
}

impl SettingsChange {
    fn is_empty(&self) -> bool {
        self.language.is_none()
            && self.role.is_none()
            && !self.clear_role
            && self.page_size.is_none()
    }

    pub fn apply(&self, mut settings: Settings) -> Result<Settings> {
        if let Some(language) = self.language {
            settings.language = language;
        }
        if self.clear_role {
            settings.role = None;
        } else if let Some(role) = self.role {
            settings.role = Some(role);
        }
        if let Some(size) = self.page_size {
            settings = settings.with_page_size(size)?;
        }
        Ok(settings)
    }
}

pub fn run(change: &SettingsChange) -> Result<()> {
    let mut settings = load_settings();
    if !change.is_empty() {
        settings = change.apply(settings)?;
        save_settings(&settings)?;
        println!("Saved {}", settings_path().display());
    }
    println!("{}", format_settings(&settings));
    Ok(())
}

pub fn format_settings(settings: &Settings) -> String {
    let role = settings.role.map_or("(ask)".to_string(), |r| r.to_string());
    format!(
        "Language:   {}\nRole:       {role}\nPage size:  {}",
        settings.language.code(),
        settings.page_size
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_change() {
        let change = SettingsChange {
            language: Some(Language::Pt),
            role: Some(Role::ClientUser),
            clear_role: false,
            page_size: Some(25),
        };
        let settings = change.apply(Settings::default()).unwrap();
        assert_eq!(settings.language, Language::Pt);
        assert_eq!(settings.role, Some(Role::ClientUser));
        assert_eq!(settings.page_size, 25);
        assert!(format_settings(&settings).contains("Role:       client-user"));

        let clear = SettingsChange {
            language: None,
            role: None,
            clear_role: true,
            page_size: None,
        };
        assert_eq!(clear.apply(settings).unwrap().role, None);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let change = SettingsChange {
            language: None,
            role: None,
            clear_role: false,
            page_size: Some(0),
        };
        assert!(change.apply(Settings::default()).is_err());
    }
}

//! Password generation settings.

mod file;

use crate::pass::Requirements;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub pass_length: usize,
    pub number_of_passwords: usize,
    pub requirements: Requirements,
    pub output_file_path: String,
    pub to_clipboard: bool,
}

impl Settings {
    pub fn load_from_file() -> Result<Self, std::io::Error> {
        let mut settings = Settings::default();
        file::load(&mut settings)?;
        Ok(settings)
    }

    pub fn save_to_file(&self) -> Result<(), std::io::Error> {
        file::save(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pass_length: 16,
            number_of_passwords: 1,
            requirements: Requirements::default(),
            output_file_path: String::new(),
            to_clipboard: false,
        }
    }
}

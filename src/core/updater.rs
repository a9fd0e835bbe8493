// Applies count updates typed by the user
//
// Everything that can go wrong with the input is caught here, before the
// store (and the file behind it) is touched.

use crate::core::normalizer::{normalize, parse_count};
use crate::error::{LedgerError, Result};
use crate::store::Inventory;

// Card names are short. Anything past this is a paste accident.
const MAX_NAME_LENGTH: usize = 200;

pub struct Updater {
    max_name_length: usize,
}

impl Default for Updater {
    fn default() -> Self {
        Self::new()
    }
}

impl Updater {
    pub fn new() -> Self {
        Self {
            max_name_length: MAX_NAME_LENGTH,
        }
    }

    // Main entry point. Validates both fields, then hands off to the inventory.
    pub fn apply<I: Inventory + ?Sized>(
        &self,
        inventory: &mut I,
        name_text: &str,
        count_text: &str,
    ) -> Result<i64> {
        let name = self.validate_name(name_text)?;
        let count = parse_count(count_text)?;

        inventory.update(&name, count)
    }

    // Not empty, not huge, no null bytes
    fn validate_name(&self, name_text: &str) -> Result<String> {
        let cleaned = name_text.replace('\0', "");
        let trimmed = cleaned.trim();

        if trimmed.is_empty() {
            return Err(LedgerError::Validation(
                "Please enter a card name.".to_string(),
            ));
        }

        // NFKC can lengthen a name ("㍿" is four characters once normalized)
        if normalize(trimmed).chars().count() > self.max_name_length {
            return Err(LedgerError::Validation(format!(
                "Card names can be at most {} characters.",
                self.max_name_length
            )));
        }

        Ok(trimmed.to_string())
    }
}

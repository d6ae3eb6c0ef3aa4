//! Confirmation prompts

use dialoguer::Confirm;

use crate::error::Result;

/// Ask `prompt`, defaulting to no. `yes` skips the prompt.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

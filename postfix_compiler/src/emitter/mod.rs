//! Postfix output buffer

use crate::config::compile_time::translator::MAX_POSTFIX_LENGTH;
use crate::logging::{codes, Code};

/// Leads every postfix output line
pub const POSTFIX_PROMPT: &str = ">>";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitterError {
    #[error("Postfix output needs {required} bytes (capacity {capacity})")]
    CapacityExceeded { capacity: usize, required: usize },
}

impl EmitterError {
    pub fn error_code(&self) -> Code {
        codes::syntax::POSTFIX_OVERFLOW
    }
}

/// Postfix line for one top-level expression: the prompt followed by
/// space-separated atoms. Capacity bounds the whole line, prompt included.
#[derive(Debug, Clone)]
pub struct PostfixBuffer {
    text: String,
    atoms: usize,
    capacity: usize,
}

impl PostfixBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::from(POSTFIX_PROMPT),
            atoms: 0,
            capacity,
        }
    }

    /// Back to the bare prompt
    pub fn reset(&mut self) {
        self.text.truncate(POSTFIX_PROMPT.len());
        self.atoms = 0;
    }

    /// Append a separator and `atom`, or nothing at all when that would
    /// exceed the capacity
    pub fn emit(&mut self, atom: &str) -> Result<(), EmitterError> {
        let required = self.text.len() + 1 + atom.len();
        if required > self.capacity {
            return Err(EmitterError::CapacityExceeded {
                capacity: self.capacity,
                required,
            });
        }

        self.text.push(' ');
        self.text.push_str(atom);
        self.atoms += 1;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn atom_count(&self) -> usize {
        self.atoms
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PostfixBuffer {
    fn default() -> Self {
        Self::new(MAX_POSTFIX_LENGTH)
    }
}

//! Per-type handler: one optional primary plus an outermost-first decorator chain

use std::fmt;

use ogr_domain::error::{Error, Result};

use super::registration::{Registration, RegistrationKind};

/// Which registration of a handler a session invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorySlot {
    /// Decorator at this position, 0 being the outermost
    Decorator(usize),
    /// The primary factory
    Primary,
}

impl fmt::Display for FactorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decorator(index) => write!(f, "decorator[{index}]"),
            Self::Primary => f.write_str("primary"),
        }
    }
}

/// Registrations for a single service type
#[derive(Debug, Default)]
pub struct TypeHandler {
    primary: Option<Registration>,
    // Outermost first: the most recently registered decorator runs first
    decorators: Vec<Registration>,
}

impl TypeHandler {
    /// Add a registration, rejecting a second primary
    pub fn add(&mut self, registration: Registration) -> Result<()> {
        if registration.kind() == RegistrationKind::Decorator {
            self.decorators.insert(0, registration);
            return Ok(());
        }
        if let Some(existing) = &self.primary {
            return Err(Error::DuplicatePrimaryRegistration {
                service: registration.service(),
                existing: existing.description().to_string(),
                attempted: registration.description().to_string(),
            });
        }
        self.primary = Some(registration);
        Ok(())
    }

    /// Whether a primary exists, or with `primary_only == false` any registration at all
    pub fn has(&self, primary_only: bool) -> bool {
        self.primary.is_some() || (!primary_only && !self.decorators.is_empty())
    }

    /// Factory to run at decorator depth `depth`
    ///
    /// Skips `depth` decorators and takes the next one, falling back to the
    /// primary once the chain is used up.
    pub fn select(&self, depth: usize) -> Option<(FactorySlot, &Registration)> {
        match self.decorators.get(depth) {
            Some(decorator) => Some((FactorySlot::Decorator(depth), decorator)),
            None => self
                .primary
                .as_ref()
                .map(|primary| (FactorySlot::Primary, primary)),
        }
    }

    /// The primary registration, if any
    pub fn primary(&self) -> Option<&Registration> {
        self.primary.as_ref()
    }

    /// Decorators, outermost first
    pub fn decorators(&self) -> &[Registration] {
        &self.decorators
    }

    /// Human-readable listing of every registration, in invocation order
    pub fn describe(&self) -> String {
        let mut lines = Vec::with_capacity(self.decorators.len() + 1);
        for (index, decorator) in self.decorators.iter().enumerate() {
            lines.push(format!(
                "  {}: {}",
                FactorySlot::Decorator(index),
                decorator.description()
            ));
        }
        match &self.primary {
            Some(primary) => lines.push(format!("  primary: {}", primary.description())),
            None => lines.push("  primary: <none>".to_string()),
        }
        format!("Registrations:\n{}", lines.join("\n"))
    }
}

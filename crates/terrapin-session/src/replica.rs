//! The fixed four-replica set.

use terrapin_core::{TurtleInstance, TurtleResult};

/// Four coordinated replicas with fixed roles.
///
/// `display` and `display_reference` exist only while a visible binding is
/// attached; the two validation replicas always exist so grading works
/// headless. Learner commands reach `validation` (and `display` when
/// present); the reference replicas are only ever driven by the one-time
/// solution replay at reset.
pub struct ReplicaSet {
    pub(crate) display: Option<TurtleInstance>,
    pub(crate) display_reference: Option<TurtleInstance>,
    pub(crate) validation: TurtleInstance,
    pub(crate) validation_reference: TurtleInstance,
}

impl ReplicaSet {
    /// A headless set: validation replicas only.
    pub fn new() -> Self {
        Self {
            display: None,
            display_reference: None,
            validation: TurtleInstance::new(),
            validation_reference: TurtleInstance::new(),
        }
    }

    /// Whether a visible pair is currently attached.
    pub fn is_visible(&self) -> bool {
        self.display.is_some()
    }

    /// Apply `f` to every replica in the active subset: always
    /// `validation`, plus `display` when visible. The replicas are
    /// mutually independent; a command completes only once every active
    /// replica has applied it.
    pub fn for_each_active<F>(&mut self, mut f: F) -> TurtleResult<()>
    where
        F: FnMut(&mut TurtleInstance) -> TurtleResult<()>,
    {
        f(&mut self.validation)?;
        if let Some(display) = &mut self.display {
            f(display)?;
        }
        Ok(())
    }

    pub fn validation(&self) -> &TurtleInstance {
        &self.validation
    }

    pub fn validation_reference(&self) -> &TurtleInstance {
        &self.validation_reference
    }

    pub fn display(&self) -> Option<&TurtleInstance> {
        self.display.as_ref()
    }

    pub fn display_reference(&self) -> Option<&TurtleInstance> {
        self.display_reference.as_ref()
    }
}

impl Default for ReplicaSet {
    fn default() -> Self {
        Self::new()
    }
}

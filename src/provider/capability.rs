//! Capability descriptor for the linked provider API.
//!
//! Determined once at startup and passed into the gateway, so availability
//! checks are explicit values rather than flags scattered through the code.

use std::collections::HashSet;

/// A single provider capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ImageInference,
    VideoInference,
    BackgroundRemoval,
    Upscale,
    ImageCaption,
    ImageToText,
}

/// The set of capabilities the linked provider API supports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet(HashSet<Capability>);

impl CapabilitySet {
    /// Every capability this gateway knows about
    pub fn full() -> Self {
        Self(
            [
                Capability::ImageInference,
                Capability::VideoInference,
                Capability::BackgroundRemoval,
                Capability::Upscale,
                Capability::ImageCaption,
                Capability::ImageToText,
            ]
            .into_iter()
            .collect(),
        )
    }

    /// Build a set from an explicit list
    pub fn of(capabilities: &[Capability]) -> Self {
        Self(capabilities.iter().copied().collect())
    }

    /// A copy of this set with one capability removed
    pub fn without(&self, capability: Capability) -> Self {
        let mut set = self.0.clone();
        set.remove(&capability);
        Self(set)
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

//! Outline building options.

/// What to do with content that has no open heading to belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Silently drop it
    #[default]
    Drop,
    /// Attach it to a synthetic section with an empty heading
    Attach,
}

/// Options for building an outline from classified runs.
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Handling of h2/h3 headings, bullets and body text without an ancestor
    pub orphan_policy: OrphanPolicy,
}

impl OutlineOptions {
    /// Create new outline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orphan policy.
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Attach orphaned content to synthetic sections instead of dropping it.
    pub fn attach_orphans(mut self) -> Self {
        self.orphan_policy = OrphanPolicy::Attach;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_drops_orphans() {
        assert_eq!(OutlineOptions::default().orphan_policy, OrphanPolicy::Drop);
    }

    #[test]
    fn test_attach_orphans() {
        let options = OutlineOptions::new().attach_orphans();
        assert_eq!(options.orphan_policy, OrphanPolicy::Attach);
        let options = options.with_orphan_policy(OrphanPolicy::Drop);
        assert_eq!(options.orphan_policy, OrphanPolicy::Drop);
    }
}

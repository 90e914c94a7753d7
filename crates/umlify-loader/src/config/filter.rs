//! Package exclusion by glob pattern

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use umlify_core::{DeclarationSet, QualifiedId};

use crate::error::Result;

/// Drops declarations whose package path matches any exclude pattern.
/// `*` stays within one path segment; `**` spans segments.
#[derive(Debug, Clone)]
pub struct PackageFilter {
    set: GlobSet,
}

impl PackageFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(GlobBuilder::new(pattern.as_ref()).literal_separator(true).build()?);
        }
        Ok(Self { set: builder.build()? })
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn is_excluded(&self, package: &str) -> bool {
        self.set.is_match(package)
    }

    fn excludes_owner(&self, owner: Option<&QualifiedId>) -> bool {
        owner.is_some_and(|id| self.is_excluded(&id.package))
    }

    /// Remove excluded sets, and excluded types or constants inside kept sets.
    pub fn apply(&self, sets: Vec<DeclarationSet>) -> Vec<DeclarationSet> {
        if self.is_empty() {
            return sets;
        }
        sets.into_iter()
            .filter(|set| {
                let excluded = self.is_excluded(&set.package);
                if excluded {
                    tracing::debug!(package = %set.package, "package excluded");
                }
                !excluded
            })
            .map(|mut set| {
                set.types.retain(|decl| !self.is_excluded(&decl.id.package));
                set.constants.retain(|c| !self.excludes_owner(c.owner.as_ref()));
                set
            })
            .collect()
    }
}

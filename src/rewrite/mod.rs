//! Schema rewrite module
//!
//! Post-processes an inferred schema into the flattened, annotated form
//! written to disk. Three passes run in a fixed order, each a full
//! depth-first walk of its own:
//!
//! 1. **Metadata injection**: typed descriptors gain `required`,
//!    `description` and `tag`
//! 2. **Type compression**: arrays of strings become `"enum"`
//! 3. **Structure flattening**: `properties` maps are lifted onto their
//!    owning descriptor
//!
//! Running the rewriter on its own output changes nothing.

mod compress;
mod flatten;
mod metadata;

pub use compress::{compress_types, ENUM_TYPE};
pub use flatten::flatten_structure;
pub use metadata::{inject_metadata, DESCRIPTION_KEY, TAG_KEY};

use crate::error::Result;
use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What flattening does when a property name is already a key of the
/// descriptor that owns it (`type`, `required`, `items`, ...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail with [`crate::Error::KeyCollision`]
    #[default]
    Reject,
    /// The property replaces the existing key
    Overwrite,
}

/// Counts reported by one rewrite run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Descriptors that received annotations
    pub annotated: usize,
    /// Arrays renamed to `"enum"`
    pub compressed: usize,
    /// Descriptors whose `properties` were lifted
    pub flattened: usize,
}

/// Applies the three rewrite passes in order
#[derive(Debug, Clone, Default)]
pub struct SchemaRewriter {
    collision: CollisionPolicy,
}

impl SchemaRewriter {
    /// Create a rewriter with the given collision policy
    pub fn new(collision: CollisionPolicy) -> Self {
        Self { collision }
    }

    /// Collision policy used by the flattening pass
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision
    }

    /// Rewrite a schema tree in place
    pub fn rewrite(&self, schema: &mut SchemaNode) -> Result<RewriteStats> {
        let annotated = inject_metadata(schema);
        debug!(annotated, "Injected descriptor metadata");

        let compressed = compress_types(schema);
        debug!(compressed, "Compressed string arrays to enum");

        let flattened = flatten_structure(schema, self.collision)?;
        debug!(flattened, "Flattened nested properties");

        Ok(RewriteStats {
            annotated,
            compressed,
            flattened,
        })
    }
}

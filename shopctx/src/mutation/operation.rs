//! The closed set of Shopper Contexts mutations and their trigger payloads.

use std::fmt;

use crate::context::{
    ContextKey, CreateContextOptions, DeleteContextOptions, UpdateContextOptions,
};

/// A named mutation on the Shopper Contexts resource.
///
/// The set is closed; each variant maps to exactly one client method. Wire
/// names follow the backend operation identifiers (`createShopperContext`
/// etc.).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationOperation {
    /// Create (or replace) a shopper context.
    CreateShopperContext,
    /// Partially update a shopper context.
    UpdateShopperContext,
    /// Delete a shopper context.
    DeleteShopperContext,
}

impl MutationOperation {
    /// Every defined operation, in registry order.
    pub const ALL: [MutationOperation; 3] = [
        MutationOperation::CreateShopperContext,
        MutationOperation::UpdateShopperContext,
        MutationOperation::DeleteShopperContext,
    ];

    /// Returns the backend operation identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateShopperContext => "createShopperContext",
            Self::UpdateShopperContext => "updateShopperContext",
            Self::DeleteShopperContext => "deleteShopperContext",
        }
    }

    /// Resolves a backend operation identifier to an operation.
    ///
    /// Lookup is by exact key match; unknown names return `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for MutationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-operation input passed to [`MutationHandle::trigger`].
///
/// The payload variant must match the operation the handle was built for;
/// a mismatch fails the trigger before any network interaction.
///
/// [`MutationHandle::trigger`]: crate::mutation::MutationHandle::trigger
#[derive(Clone, Debug, PartialEq)]
pub enum MutationPayload {
    /// Options for `createShopperContext`.
    Create(CreateContextOptions),
    /// Options for `updateShopperContext`.
    Update(UpdateContextOptions),
    /// Options for `deleteShopperContext`.
    Delete(DeleteContextOptions),
}

impl MutationPayload {
    /// The context key the payload targets.
    pub fn context_key(&self) -> &ContextKey {
        match self {
            Self::Create(options) => &options.key,
            Self::Update(options) => &options.key,
            Self::Delete(options) => &options.key,
        }
    }

    /// The operation this payload belongs to.
    pub fn operation(&self) -> MutationOperation {
        match self {
            Self::Create(_) => MutationOperation::CreateShopperContext,
            Self::Update(_) => MutationOperation::UpdateShopperContext,
            Self::Delete(_) => MutationOperation::DeleteShopperContext,
        }
    }
}

//! Shopper context domain model.
//!
//! A shopper context is a small server-side document attached to one shopper
//! session (identified by a usid within a site). It carries the qualifiers
//! that personalize pricing and promotions for that shopper.
//!
//! # Cache Keys
//!
//! Contexts are cached under `context:{site_id}:{usid}` for debuggability.
//! Example: `context:RefArch:54ad2c5a-91f0-44ab-817c-73d6b86872d9`

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The shopper context resource payload.
///
/// All fields are optional on the wire; an empty context is valid and simply
/// applies no qualifiers. Qualifier maps use `BTreeMap` so serialized bodies
/// are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopperContext {
    /// Point in time the context becomes effective (e.g. scheduled pricing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<DateTime<Utc>>,

    /// Source code applied to the shopper's session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,

    /// Free-form qualifiers evaluated by custom promotion rules.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_qualifiers: BTreeMap<String, String>,

    /// Qualifiers evaluated by price book / customer group assignment.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assignment_qualifiers: BTreeMap<String, String>,

    /// Client IP used for geolocation-based qualification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<String>,
}

impl ShopperContext {
    /// Returns true if the context carries no qualifiers at all.
    pub fn is_empty(&self) -> bool {
        self.effective_date_time.is_none()
            && self.source_code.is_none()
            && self.custom_qualifiers.is_empty()
            && self.assignment_qualifiers.is_empty()
            && self.client_ip.is_none()
    }
}

/// Identifies one shopper context: the shopper's usid within a site.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextKey {
    /// Unique shopper identifier (session-scoped).
    pub usid: String,

    /// Site the context applies to.
    pub site_id: String,
}

impl ContextKey {
    /// Creates a new context key.
    pub fn new(usid: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            usid: usid.into(),
            site_id: site_id.into(),
        }
    }

    /// Renders the cache key for this context.
    ///
    /// Keys follow the format `context:{site_id}:{usid}`.
    pub fn cache_key(&self) -> String {
        format!("context:{}:{}", self.site_id, self.usid)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.usid, self.site_id)
    }
}

/// Options for creating a shopper context.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateContextOptions {
    /// Which shopper the context is created for.
    pub key: ContextKey,

    /// The context body to store.
    pub context: ShopperContext,
}

/// Options for updating an existing shopper context.
///
/// The body is a partial document; fields left `None` are untouched by the
/// server.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateContextOptions {
    /// Which shopper the context belongs to.
    pub key: ContextKey,

    /// The fields to update.
    pub context: ShopperContext,
}

/// Options for deleting a shopper context. Carries no body.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteContextOptions {
    /// Which shopper the context is deleted for.
    pub key: ContextKey,
}

/// Options for reading a shopper context.
#[derive(Clone, Debug, PartialEq)]
pub struct GetContextOptions {
    /// Which shopper the context is read for.
    pub key: ContextKey,
}

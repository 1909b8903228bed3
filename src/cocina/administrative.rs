//! Governance: policy links and release tags.

use serde::{Deserialize, Serialize};

use super::access::Access;
use crate::base::is_valid_druid;
use crate::error::{MappingError, Result};

/// Administrative data for items and collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Administrative {
    /// Governing policy. Many objects share one policy; this is not an owning link.
    pub has_admin_policy: String,
    #[serde(default)]
    pub release_tags: Vec<ReleaseTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_agreement: Option<String>,
}

/// One release decision, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseTag {
    /// Target audience, e.g. `Searchworks`.
    pub to: String,
    /// Scope: `self` or `collection`.
    pub what: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub who: Option<String>,
    pub release: bool,
}

impl Administrative {
    pub fn validate(&self, path: &str) -> Result<()> {
        validate_link(&self.has_admin_policy, &format!("{path}/hasAdminPolicy"))?;
        if let Some(agreement) = &self.has_agreement {
            validate_link(agreement, &format!("{path}/hasAgreement"))?;
        }
        for (i, tag) in self.release_tags.iter().enumerate() {
            if !matches!(tag.what.as_str(), "self" | "collection") {
                return Err(MappingError::schema(
                    format!("{path}/releaseTags/{i}/what"),
                    format!("'{}' is not one of self, collection", tag.what),
                ));
            }
        }
        Ok(())
    }
}

/// Administrative data for admin policies. Admin policies govern others and
/// carry the access template new members inherit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AdminPolicyAdministrative {
    pub has_admin_policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_agreement: Option<String>,
    #[serde(default)]
    pub access_template: Access,
    #[serde(default)]
    pub release_tags: Vec<ReleaseTag>,
}

impl AdminPolicyAdministrative {
    pub fn validate(&self, path: &str) -> Result<()> {
        validate_link(&self.has_admin_policy, &format!("{path}/hasAdminPolicy"))?;
        if let Some(agreement) = &self.has_agreement {
            validate_link(agreement, &format!("{path}/hasAgreement"))?;
        }
        self.access_template
            .validate(&format!("{path}/accessTemplate"))
    }
}

pub(crate) fn validate_link(druid: &str, path: &str) -> Result<()> {
    if is_valid_druid(druid) {
        Ok(())
    } else {
        Err(MappingError::schema(
            path,
            format!("'{druid}' is not a repository identifier"),
        ))
    }
}

use serde::{Deserialize, Serialize};

use crate::ids::{TenantId, UserId};

/// Caller identity for one request, built by the handler layer from the
/// identity provider's claims. The tenant is the only tenant filter applied
/// to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub tenant_id: TenantId,
    pub user_id: UserId,
}

impl RequestContext {
    pub fn new(tenant_id: TenantId, user_id: UserId) -> Self {
        Self { tenant_id, user_id }
    }

    /// Same tenant, different caller.
    pub fn as_user(&self, user_id: UserId) -> Self {
        Self {
            tenant_id: self.tenant_id,
            user_id,
        }
    }
}

//! Shared service plumbing

use pt_core::error::{PtError, PtResult};
use pt_models::{NewActivityLog, Permission, User};
use pt_store::RecordStore;
use tracing::warn;

/// Fail with `Forbidden` unless the actor's role grants `permission`
pub fn authorize(actor: &User, permission: Permission) -> PtResult<()> {
    if actor.can(permission) {
        Ok(())
    } else {
        Err(PtError::forbidden(format!(
            "{} ({}) may not {}",
            actor.username,
            actor.role.as_str(),
            permission.name()
        )))
    }
}

/// Append to the activity log.
///
/// Runs after the mutation has been saved, so a failure here is logged
/// rather than reported as a failure of the operation.
pub(crate) fn record_activity(store: &RecordStore, actor: &User, action: &str, details: String) {
    if let Err(e) = store.add_log(NewActivityLog::by(actor, action, details)) {
        warn!(action, error = %e, "Activity log write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::user_with_role;
    use pt_models::Role;

    #[test]
    fn test_authorize_by_role() {
        let operator = user_with_role(Role::Operator);
        assert!(authorize(&operator, Permission::AddActual).is_ok());

        let err = authorize(&operator, Permission::AddPlan).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}

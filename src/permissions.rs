use actix_web::http::Method;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;

/// Read access is open to everyone; writes are limited to the record owner.
pub fn is_owner_or_read_only(method: &Method, owner_id: i64, requester: Option<i64>) -> bool {
    if is_safe(method) {
        return true;
    }
    requester == Some(owner_id)
}

pub fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Fails with `PermissionDenied` unless `user` owns the record.
pub fn ensure_owner(
    method: &Method,
    owner_id: i64,
    user: &AuthenticatedUser,
) -> Result<(), AppError> {
    if is_owner_or_read_only(method, owner_id, Some(user.id)) {
        Ok(())
    } else {
        log::warn!(
            "user {} denied {} on record owned by {}",
            user.id,
            method,
            owner_id
        );
        Err(AppError::PermissionDenied)
    }
}

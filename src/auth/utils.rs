use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Admins may act on any user's resources; everyone else only on their own.
pub fn require_owner_or_admin(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.is_admin() || claims.sub == resource_owner {
        return Ok(());
    }

    log::warn!(
        "User {} denied access to resources of {}",
        claims.sub,
        resource_owner
    );
    Err(AppError::Forbidden(
        "You can only access your own results".to_string(),
    ))
}

/// Resolves whose results a request targets: the caller by default, or an
/// explicitly requested user subject to [`require_owner_or_admin`].
pub fn results_owner(claims: &Claims, requested: Option<&str>) -> AppResult<String> {
    match requested {
        Some(user_id) => {
            require_owner_or_admin(claims, user_id)?;
            Ok(user_id.to_string())
        }
        None => Ok(claims.sub.clone()),
    }
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}

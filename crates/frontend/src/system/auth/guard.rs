use crate::routes::{NavigationContext, Next};

use super::session::AuthSession;

/// Guard that lets everyone reach `public_path` and sends unauthenticated
/// visitors of any other route back to it.
pub fn auth_guard(
    session: AuthSession,
    public_path: String,
) -> impl Fn(&NavigationContext, Next) + 'static {
    move |ctx, next| {
        if ctx.to_path() == public_path || session.is_authenticated() {
            next.proceed();
        } else {
            log::debug!("{} requires authentication", ctx.target);
            next.redirect(public_path.clone());
        }
    }
}

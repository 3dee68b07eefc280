use crate::context::{RequestContext, RequestStart};

/// Pre-handler hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTimer;

impl RequestTimer {
    /// Stamp the current time as the request start.
    pub fn before(&self, ctx: &mut RequestContext) {
        ctx.set_start(RequestStart::now());
    }
}

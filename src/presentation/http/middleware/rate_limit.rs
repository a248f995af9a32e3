use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

type LoginLimiter = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Per-client-IP limiter for the login route: a burst of 5 attempts refilled one every 2 seconds.
///
/// `None` only when the quota is rejected by the builder.
pub fn login_rate_limit_layer() -> Option<LoginLimiter> {
    static RATE_LIMITER: OnceLock<Option<LoginLimiter>> = OnceLock::new();

    RATE_LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(2);
            builder.burst_size(5);
            let config = builder.key_extractor(SmartIpKeyExtractor).finish()?;
            Some(GovernorLayer::new(config))
        })
        .clone()
}

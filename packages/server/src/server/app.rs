//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use twilio::{TwilioOptions, TwilioService};

use crate::config::TwilioConfig;
use crate::domains::otp::OtpStore;
use crate::kernel::{BaseSmsDelivery, ServerDeps, TwilioDelivery};
use crate::server::routes::{health_handler, send_otp_handler, verify_otp_handler};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router
///
/// Returns (Router, Arc<ServerDeps>) - deps are also needed by the expiry
/// sweep scheduler.
pub fn build_app(
    twilio_config: Option<TwilioConfig>,
    otp_ttl: Duration,
    code_echo_enabled: bool,
) -> (Router, Arc<ServerDeps>) {
    // SMS delivery channel, if credentials are configured
    let sms_delivery: Option<Arc<dyn BaseSmsDelivery>> = twilio_config.map(|config| {
        let twilio = Arc::new(TwilioService::new(TwilioOptions {
            account_sid: config.account_sid,
            auth_token: config.auth_token,
            from_number: config.from_number,
        }));
        Arc::new(TwilioDelivery::new(twilio)) as Arc<dyn BaseSmsDelivery>
    });

    if sms_delivery.is_none() {
        tracing::warn!("No SMS delivery channel configured; OTP issuance runs in console mode");
    }

    let server_deps = Arc::new(ServerDeps::new(
        Arc::new(OtpStore::new()),
        sms_delivery,
        otp_ttl,
        code_echo_enabled,
    ));

    let app_state = AxumAppState {
        server_deps: server_deps.clone(),
    };

    // CORS configuration - browser clients post from the web app origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting configuration
    // OTP issuance is an SMS spend and an enumeration vector: 2 requests
    // per second per IP with bursts up to 5
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(5)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // OTP endpoints with rate limiting
    let otp_routes = Router::new()
        .route("/api/auth/send-otp", post(send_otp_handler))
        .route("/api/auth/verify-otp", post(verify_otp_handler))
        .layer(rate_limit_layer);

    let app = otp_routes
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    (app, server_deps)
}

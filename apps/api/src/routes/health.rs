/// GET /
/// Plain-text liveness probe used by the deployment platform and by
/// clients sanity-checking connectivity before hitting /api/check.
pub async fn health_handler() -> &'static str {
    "VIP API is running"
}

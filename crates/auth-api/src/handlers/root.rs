//! Service banner

/// Plain-text banner
///
/// GET /
pub async fn index() -> &'static str {
    "JWT Authentication API Running"
}

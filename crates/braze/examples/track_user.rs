//! Example: push a profile update for a single user.
//!
//! Usage:
//!   BRAZE_API_KEY=... cargo run -p braze --example track_user
//!
//! Set BRAZE_BASE_URL to target a cluster other than the default.

use braze::{BrazeClient, ClientConfig, CustomAttribute, Error, UserAttributes, UsersTrackRequest};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> braze::Result<()> {
    let api_key = std::env::var("BRAZE_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| Error::InvalidRequest("BRAZE_API_KEY is not set".to_string()))?;

    let mut config = ClientConfig::with_api_key(api_key);
    if let Ok(base_url) = std::env::var("BRAZE_BASE_URL") {
        config = config.base_url(base_url);
    }
    let client = BrazeClient::new(config)?;

    let attributes = UserAttributes {
        external_id: Some("example-user".to_string()),
        first_name: Some("Ada".to_string()),
        ..Default::default()
    };
    attributes.add_attributes([
        CustomAttribute::boolean("beta_tester", true),
        CustomAttribute::string("favorite_color", "teal"),
    ]);

    let request = UsersTrackRequest {
        attributes: vec![attributes],
        ..Default::default()
    };

    let response = client
        .track_users(&CancellationToken::new(), &request)
        .await?;

    println!("message: {:?}", response.message);
    for error in &response.errors {
        println!("minor error: {error:?}");
    }

    Ok(())
}

use serde::{Deserialize, Serialize};

/// Claims required by the MobileRTC SDK token.
///
/// The SDK expects both `exp` and `tokenExp`, set to the same instant.
#[derive(Debug, Serialize, Deserialize)]
pub struct SdkTokenClaims {
    #[serde(rename = "appKey")]
    pub app_key: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(rename = "tokenExp")]
    pub token_exp: i64,
}

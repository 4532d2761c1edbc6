//! Status callback addresses
//!
//! The provider delivers call progress to a stateless webhook, so the
//! registrant's phone travels inside the callback URL as `userId`. When a
//! secret is configured the URL also carries `sig`, an HMAC-SHA256 of the
//! identifier, and inbound events must present a matching signature.

use crate::domain::shared::error::{DomainError, Result};
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Path of the status webhook, relative to the public base URL
pub const STATUS_CALLBACK_PATH: &str = "call-status";

/// Signs and verifies callback identifiers
#[derive(Clone)]
pub struct CallbackSigner {
    mac: HmacSha256,
}

impl CallbackSigner {
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(DomainError::Configuration(
                "callback secret must not be empty".to_string(),
            ));
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| DomainError::Configuration(format!("invalid callback secret: {}", e)))?;
        Ok(Self { mac })
    }

    /// Hex-encoded signature for `user_id`
    pub fn sign(&self, user_id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(user_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time check of a hex signature
    pub fn verify(&self, user_id: &str, signature: &str) -> bool {
        let Ok(bytes) = hex::decode(signature) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(user_id.as_bytes());
        mac.verify_slice(&bytes).is_ok()
    }
}

/// Builds status-callback URLs under a public base URL
#[derive(Clone)]
pub struct CallbackAddress {
    endpoint: Url,
    signer: Option<CallbackSigner>,
}

impl CallbackAddress {
    pub fn new(base_url: &str, signer: Option<CallbackSigner>) -> Result<Self> {
        let mut endpoint = Url::parse(base_url)
            .map_err(|e| DomainError::Configuration(format!("invalid base URL {}: {}", base_url, e)))?;
        endpoint
            .path_segments_mut()
            .map_err(|_| DomainError::Configuration(format!("base URL {} cannot carry a path", base_url)))?
            .pop_if_empty()
            .push(STATUS_CALLBACK_PATH);
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        Ok(Self { endpoint, signer })
    }

    /// Callback URL for `user_id`, query-encoded so `+` survives the round trip
    pub fn url_for(&self, user_id: &str) -> String {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("userId", user_id);
            if let Some(signer) = &self.signer {
                query.append_pair("sig", &signer.sign(user_id));
            }
        }
        url.into()
    }

    pub fn is_signed(&self) -> bool {
        self.signer.is_some()
    }

    /// Whether an inbound event for `user_id` is authentic.
    ///
    /// Always true when signing is disabled.
    pub fn verify(&self, user_id: &str, signature: Option<&str>) -> bool {
        match (&self.signer, signature) {
            (None, _) => true,
            (Some(signer), Some(sig)) => signer.verify(user_id, sig),
            (Some(_), None) => false,
        }
    }
}

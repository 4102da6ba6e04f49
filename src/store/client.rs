use secrecy::{ExposeSecret, SecretString};

use super::types::{NewPolicy, Policy, StoreError};

/// REST path of the policies table under the datastore's base URL.
const POLICIES_PATH: &str = "/rest/v1/policies";

/// Client for the hosted datastore's REST interface.
///
/// One instance wraps one credential: the server constructs a writer from the
/// privileged service key and a reader from the public anonymous key, matching
/// the access split of the hosted backend. The key is sent both as the
/// `apikey` header and as a bearer token, which is what the backend expects.
pub struct PolicyStore {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl PolicyStore {
    /// Build a client for `base_url` with the given credential.
    ///
    /// Enforce HTTPS for the base URL so the key never travels in clear text.
    /// Allow HTTP only for localhost/127.0.0.1 (testing purposes).
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self, StoreError> {
        url::Url::parse(base_url).map_err(|e| StoreError::InvalidBaseUrl(e.to_string()))?;

        if !base_url.starts_with("https://") {
            let is_localhost = base_url.starts_with("http://127.0.0.1")
                || base_url.starts_with("http://localhost");
            if !is_localhost {
                tracing::error!(base_url = %base_url, "Rejecting non-HTTPS datastore base URL");
                return Err(StoreError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %base_url, "Using non-HTTPS datastore base URL (localhost only)");
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Append one policy row and return the representation the datastore
    /// echoes back.
    ///
    /// This is a single unconditional POST: no retry, no duplicate detection.
    /// Calling it twice with the same record appends two indistinguishable
    /// rows.
    pub async fn insert_policy(&self, policy: &NewPolicy) -> Result<Policy, StoreError> {
        let url = format!("{}{}", self.base_url, POLICIES_PATH);
        let key = self.api_key.expose_secret();

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("apikey", key)
            .header("Authorization", format!("Bearer {}", key))
            .header("Prefer", "return=representation")
            .json(policy)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = read_error_payload(response).await;
            tracing::warn!(status = status.as_u16(), "Datastore rejected policy insert");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                details,
            });
        }

        // With `Prefer: return=representation` the datastore answers with an
        // array containing the inserted row.
        let mut rows: Vec<Policy> = response.json().await?;
        match rows.pop() {
            Some(row) => {
                tracing::debug!(id = row.id, "Inserted policy row");
                Ok(row)
            }
            None => Err(StoreError::InvalidBody(
                "insert returned an empty representation".to_string(),
            )),
        }
    }

    /// Fetch every policy row, ordered by date descending.
    ///
    /// Equivalent to `SELECT * FROM policies ORDER BY date DESC`; the ordering
    /// is done datastore-side via the `order` query parameter.
    pub async fn list_policies(&self) -> Result<Vec<Policy>, StoreError> {
        let url = format!("{}{}", self.base_url, POLICIES_PATH);
        let key = self.api_key.expose_secret();

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*"), ("order", "date.desc")])
            .header("apikey", key)
            .header("Authorization", format!("Bearer {}", key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = read_error_payload(response).await;
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                details,
            });
        }

        let rows: Vec<Policy> = response.json().await?;
        tracing::debug!(count = rows.len(), "Fetched policy rows");
        Ok(rows)
    }
}

/// Read a failed response's body as JSON, falling back to the raw text so the
/// downstream payload is always surfaced verbatim.
async fn read_error_payload(response: reqwest::Response) -> serde_json::Value {
    match response.text().await {
        Ok(body) => serde_json::from_str(&body)
            .unwrap_or_else(|_| serde_json::Value::String(body)),
        Err(e) => serde_json::Value::String(e.to_string()),
    }
}

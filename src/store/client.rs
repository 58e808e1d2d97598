//! Remote record store client (Airtable REST API)

use crate::config::StoreConfig;
use crate::{Error, Result};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// A raw record as the store returns it: store-assigned id plus a field map
/// with user-defined (possibly inconsistently-cased) column names.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ListPage {
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    offset: Option<String>,
}

/// Client for per-table select/create/update/destroy operations.
///
/// Built from explicit configuration at call time; construction fails fast
/// with the name of the missing credential before any network I/O.
#[derive(Debug)]
pub struct StoreClient {
    http: HttpClient,
    api_base: String,
    api_key: String,
    base_id: String,
}

impl StoreClient {
    /// Create a client from explicit configuration and a shared HTTP client
    pub fn new(http: HttpClient, config: &StoreConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        let base_id = config.require_base_id()?.to_string();
        Ok(StoreClient {
            http,
            api_base: config.api_base.clone(),
            api_key,
            base_id,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.base_id,
            table
        )
    }

    /// Fetch every record in a table, following offset pagination to the end.
    /// Order is store-defined and not guaranteed stable.
    pub async fn list(&self, table: &str) -> Result<Vec<Record>> {
        let url = self.table_url(table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.http.get(&url).bearer_auth(&self.api_key);
            if let Some(ref o) = offset {
                request = request.query(&[("offset", o)]);
            }

            let page: ListPage = self.read_response(request.send().await?).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => return Ok(records),
            }
        }
    }

    /// Create a record, returning it with its store-assigned identifier
    pub async fn create(&self, table: &str, fields: Map<String, Value>) -> Result<Record> {
        let response = self
            .http
            .post(self.table_url(table))
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        self.read_response(response).await
    }

    /// Update a record by identifier; only the supplied fields change
    pub async fn update(&self, table: &str, id: &str, fields: Map<String, Value>) -> Result<Record> {
        let response = self
            .http
            .patch(format!("{}/{}", self.table_url(table), id))
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        self.read_response(response).await
    }

    /// Delete a record by identifier
    pub async fn destroy(&self, table: &str, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(format!("{}/{}", self.table_url(table), id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "(unreadable)".to_string());
            return Err(Error::StoreStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Check the status and deserialize the body, capturing the raw body as
    /// diagnostic text on failure
    async fn read_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "(unreadable)".to_string());

        if !status.is_success() {
            return Err(Error::StoreStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_page() {
        let json = r#"{"records":[{"id":"rec1","fields":{"name":"Hugo Award"}}],"offset":"itr2"}"#;
        let page: ListPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, "rec1");
        assert_eq!(page.offset.as_deref(), Some("itr2"));
    }

    #[test]
    fn test_parse_record_without_fields() {
        let record: Record = serde_json::from_str(r#"{"id":"rec1"}"#).unwrap();
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_new_fails_with_named_variable() {
        let config = StoreConfig {
            api_key: Some("key".to_string()),
            base_id: None,
            ..StoreConfig::default()
        };
        let err = StoreClient::new(HttpClient::new(), &config).unwrap_err();
        assert!(err.to_string().contains("PRIZEDESK_AIRTABLE_BASE_ID"));
    }

    #[test]
    fn test_table_url() {
        let config = StoreConfig {
            api_base: "https://api.airtable.com/v0/".to_string(),
            api_key: Some("key".to_string()),
            base_id: Some("appXYZ".to_string()),
            ..StoreConfig::default()
        };
        let client = StoreClient::new(HttpClient::new(), &config).unwrap();
        assert_eq!(
            client.table_url("Awards"),
            "https://api.airtable.com/v0/appXYZ/Awards"
        );
    }
}

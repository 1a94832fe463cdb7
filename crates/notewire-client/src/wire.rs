//! GraphQL HTTP envelope types.

use serde::{Deserialize, Serialize};

use notewire_core::{Error, Result};

/// Request body for a GraphQL-over-HTTP POST.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a> {
    pub query: &'a str,
    pub operation_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

/// Response body of a GraphQL-over-HTTP POST.
///
/// Per the GraphQL spec both fields may be present at once; any `errors`
/// entry makes the operation a failure for this client.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

/// A single entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
}

impl<T> GraphqlResponse<T> {
    /// Fold the response into its data, surfacing GraphQL errors.
    pub fn into_data(self) -> Result<T> {
        if let Some(errors) = self.errors {
            if !errors.is_empty() {
                return Err(Error::Backend(join_errors(&errors)));
            }
        }
        self.data
            .ok_or_else(|| Error::Backend("response contained no data".to_string()))
    }
}

/// Join GraphQL error messages into one line for the error variant.
pub fn join_errors(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

//! MCP tools for Outlook contacts.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::graph::{ContactQuery, EmailAddress, GraphApi, NewContact};
use crate::mcp::format;
use crate::mcp::server::GraphMcp;
use crate::mcp::tools::{apply_limit, graph_failure};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListContactsParams {
    #[schemars(
        description = "Name prefix to search for (matches the start of the display name). Omit to list all contacts."
    )]
    pub search: Option<String>,
    #[schemars(description = "Maximum number of contacts to return (default: 25, max: 50)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateContactParams {
    #[schemars(description = "Given (first) name")]
    pub given_name: String,
    #[schemars(description = "Surname (last name). Optional.")]
    pub surname: Option<String>,
    #[schemars(description = "Primary email address. Optional.")]
    pub email: Option<String>,
    #[schemars(description = "Business phone numbers. Optional.")]
    pub business_phones: Option<Vec<String>>,
    #[schemars(description = "Mobile phone number. Optional.")]
    pub mobile_phone: Option<String>,
    #[schemars(description = "Company name. Optional.")]
    pub company_name: Option<String>,
}

// =============================================================================
// Tools
// =============================================================================

#[tool_router(router = contacts_router, vis = "pub")]
impl<G: GraphApi + 'static> GraphMcp<G> {
    #[tool(
        description = "List the signed-in user's Outlook contacts, optionally filtered by a display-name prefix."
    )]
    pub async fn list_contacts(
        &self,
        params: Parameters<ListContactsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = ContactQuery {
            search: params.0.search.clone(),
            limit: Some(apply_limit(params.0.limit)),
        };

        match self.graph().list_contacts(self.token(), &query).await {
            Ok(contacts) => Ok(CallToolResult::success(vec![Content::text(
                format::contacts_markdown(&contacts),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }

    #[tool(
        description = "Create an Outlook contact. Only given_name is required; add email and phone numbers when known."
    )]
    pub async fn create_contact(
        &self,
        params: Parameters<CreateContactParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.0.given_name.trim().is_empty() {
            return Err(McpError::invalid_params("given_name must not be empty", None));
        }

        let email_addresses = match &params.0.email {
            Some(address) => vec![EmailAddress {
                name: None,
                address: address.clone(),
            }],
            None => Vec::new(),
        };

        let input = NewContact {
            given_name: params.0.given_name.clone(),
            surname: params.0.surname.clone(),
            email_addresses,
            business_phones: params.0.business_phones.clone().unwrap_or_default(),
            mobile_phone: params.0.mobile_phone.clone(),
            company_name: params.0.company_name.clone(),
        };

        match self.graph().create_contact(self.token(), &input).await {
            Ok(contact) => Ok(CallToolResult::success(vec![Content::text(
                format::contact_created_markdown(&contact),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }
}

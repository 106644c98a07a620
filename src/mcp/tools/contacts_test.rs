//! Tests for contact MCP tools over the stub Graph.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::RawContent;

use crate::graph::testing::MockGraph;
use crate::graph::{Contact, EmailAddress};
use crate::mcp::server::GraphMcp;
use crate::mcp::tools::{CreateContactParams, ListContactsParams};

fn text(result: &rmcp::model::CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

fn contact(id: &str, display_name: &str, email: &str) -> Contact {
    Contact {
        id: id.to_string(),
        display_name: Some(display_name.to_string()),
        email_addresses: vec![EmailAddress {
            name: None,
            address: email.to_string(),
        }],
        ..Default::default()
    }
}

#[tokio::test]
async fn list_contacts_shows_names_and_emails() {
    let mock = MockGraph::new().with_contacts(vec![
        contact("c1", "Ada Lovelace", "ada@example.com"),
        contact("c2", "Grace Hopper", "grace@example.com"),
    ]);
    let server = GraphMcp::new(mock, "test-token");

    let result = server
        .list_contacts(Parameters(ListContactsParams {
            search: None,
            limit: None,
        }))
        .await
        .unwrap();

    let markdown = text(&result);
    assert!(markdown.contains("Contacts (2)"));
    assert!(markdown.contains("Ada Lovelace"));
    assert!(markdown.contains("<grace@example.com>"));
}

#[tokio::test]
async fn list_contacts_search_filters_by_prefix() {
    let mock = MockGraph::new().with_contacts(vec![
        contact("c1", "Ada Lovelace", "ada@example.com"),
        contact("c2", "Grace Hopper", "grace@example.com"),
    ]);
    let server = GraphMcp::new(mock, "test-token");

    let result = server
        .list_contacts(Parameters(ListContactsParams {
            search: Some("Ada".to_string()),
            limit: None,
        }))
        .await
        .unwrap();

    let markdown = text(&result);
    assert!(markdown.contains("Ada Lovelace"));
    assert!(!markdown.contains("Grace Hopper"));
}

#[tokio::test]
async fn list_contacts_empty_has_friendly_message() {
    let server = GraphMcp::new(MockGraph::new(), "test-token");

    let result = server
        .list_contacts(Parameters(ListContactsParams {
            search: None,
            limit: None,
        }))
        .await
        .unwrap();

    assert_eq!(text(&result), "No contacts found.");
}

#[tokio::test]
async fn create_contact_builds_display_name() {
    let server = GraphMcp::new(MockGraph::new(), "test-token");

    let result = server
        .create_contact(Parameters(CreateContactParams {
            given_name: "Ada".to_string(),
            surname: Some("Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            business_phones: None,
            mobile_phone: None,
            company_name: None,
        }))
        .await
        .unwrap();

    let markdown = text(&result);
    assert!(markdown.contains("Ada Lovelace"));
    assert!(markdown.contains("id: `contact-0`"));
}

#[tokio::test]
async fn create_contact_rejects_blank_name() {
    let server = GraphMcp::new(MockGraph::new(), "test-token");

    let result = server
        .create_contact(Parameters(CreateContactParams {
            given_name: "   ".to_string(),
            surname: None,
            email: None,
            business_phones: None,
            mobile_phone: None,
            company_name: None,
        }))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn create_contact_surfaces_upstream_failure() {
    let server = GraphMcp::new(MockGraph::failing(401, "token expired"), "test-token");

    let result = server
        .create_contact(Parameters(CreateContactParams {
            given_name: "Ada".to_string(),
            surname: None,
            email: None,
            business_phones: None,
            mobile_phone: None,
            company_name: None,
        }))
        .await
        .unwrap();

    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).contains("Unauthorized"));
}

//! REST implementation of [`PromptService`].
//!
//! Every request carries `Content-Type: application/json`. A non-success
//! status is reported with the body's `error` field when present, otherwise
//! as `HTTP <status>`.

use crate::dto::{
    ErrorBody, GenerateContentRequest, GenerateContentResponse, GenerateRequest,
    GenerateResponse, RefineContentRequest, RefineContentResponse, RefinePromptRequest,
    RefinePromptResponse, RefineTypesResponse, SaveVaultResponse, SearchRequest,
};
use async_trait::async_trait;
use eprompt_core::config::Settings;
use eprompt_core::refine::{RefinementKind, RefinementTool};
use eprompt_core::search::SearchResultSet;
use eprompt_core::service::GeneratedPrompt;
use eprompt_core::template::Template;
use eprompt_core::vault::VaultItem;
use eprompt_core::{EpromptError, PromptService, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to the ePrompt REST API.
#[derive(Clone)]
pub struct HttpPromptService {
    client: Client,
    base_url: String,
}

impl HttpPromptService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EpromptError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header("Content-Type", "application/json")
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "Request failed");
            if e.is_connect() || e.is_timeout() {
                EpromptError::remote(
                    operation,
                    format!("Unable to connect to the API: {}", e),
                )
            } else {
                EpromptError::remote(operation, e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        warn!(operation, status = status.as_u16(), %message, "Service returned an error");
        Err(EpromptError::remote(operation, message))
    }

    async fn get_json<R>(&self, operation: &'static str, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.send(operation, self.request(Method::GET, path)).await?;
        decode(operation, response).await
    }

    async fn post_json<B, R>(&self, operation: &'static str, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(operation, path, "POST");
        let response = self
            .send(operation, self.request(Method::POST, path).json(body))
            .await?;
        decode(operation, response).await
    }
}

async fn decode<R>(operation: &'static str, response: Response) -> Result<R>
where
    R: DeserializeOwned,
{
    response.json::<R>().await.map_err(|e| {
        EpromptError::remote(operation, format!("Failed to parse response: {}", e))
    })
}

#[async_trait]
impl PromptService for HttpPromptService {
    async fn generate(
        &self,
        template: &Template,
        input: &HashMap<String, String>,
        vault_hint: Option<&VaultItem>,
    ) -> Result<GeneratedPrompt> {
        let body = GenerateRequest {
            template,
            context: input,
            vault_item: vault_hint,
        };
        let response: GenerateResponse = self.post_json("generate", "/generate", &body).await?;
        Ok(GeneratedPrompt {
            prompt: response.prompt,
            vault_item: response.vault_item,
        })
    }

    async fn refine(
        &self,
        kind: RefinementKind,
        text: &str,
        refinement_type: &str,
        vault_id: Option<&str>,
    ) -> Result<String> {
        match kind {
            RefinementKind::Prompt => {
                let body = RefinePromptRequest {
                    prompt: text,
                    refinement_type,
                    vault_id,
                };
                let response: RefinePromptResponse = self
                    .post_json("refine_prompt", "/refine/prompt", &body)
                    .await?;
                Ok(response.refined_prompt)
            }
            RefinementKind::Content => {
                let body = RefineContentRequest {
                    content: text,
                    refinement_type,
                    vault_id,
                };
                let response: RefineContentResponse = self
                    .post_json("refine_content", "/refine/content", &body)
                    .await?;
                Ok(response.refined_content)
            }
        }
    }

    async fn generate_content(
        &self,
        prompt: &str,
        is_refined: bool,
        vault_id: Option<&str>,
    ) -> Result<String> {
        let body = GenerateContentRequest {
            text: prompt,
            is_refined_prompt: is_refined,
            vault_id,
        };
        let response: GenerateContentResponse = self
            .post_json("generate_content", "/ai-generate", &body)
            .await?;
        Ok(response.result)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<SearchResultSet> {
        let body = SearchRequest { query, limit };
        let value: serde_json::Value = self.post_json("search", "/search", &body).await?;
        if !value.is_object() {
            // The service answers `[]` or `null` when nothing matched.
            return Ok(SearchResultSet::default());
        }
        serde_json::from_value(value)
            .map_err(|e| EpromptError::remote("search", format!("Failed to parse response: {}", e)))
    }

    async fn list_vault_items(&self, user_id: &str) -> Result<Vec<VaultItem>> {
        self.get_json("list_vault_items", &format!("/vault/user/{}", user_id))
            .await
    }

    async fn save_vault_item(&self, item: &VaultItem) -> Result<VaultItem> {
        let response: SaveVaultResponse = self
            .post_json("save_vault_item", "/vault/update", item)
            .await?;
        // Keep the local snapshot when the service does not echo the item back.
        Ok(response.vault_item.unwrap_or_else(|| item.clone()))
    }

    async fn delete_vault_item(&self, vault_id: &str) -> Result<()> {
        self.send(
            "delete_vault_item",
            self.request(Method::DELETE, &format!("/vault/delete/{}", vault_id)),
        )
        .await?;
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        self.get_json("list_templates", "/template/all").await
    }

    async fn list_refinement_tools(&self, kind: RefinementKind) -> Result<Vec<RefinementTool>> {
        let response: RefineTypesResponse =
            self.get_json("list_refinement_tools", "/refine/types").await?;
        Ok(match kind {
            RefinementKind::Prompt => response.prompt.tools,
            RefinementKind::Content => response.content.tools,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn service(server: &ServerGuard) -> HttpPromptService {
        HttpPromptService::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    fn template() -> Template {
        Template {
            id: "t1".to_string(),
            name: "Writer".to_string(),
            description: String::new(),
            role: String::new(),
            tags: vec![],
            required_fields: vec!["topic".to_string()],
            optional_fields: vec![],
            template: None,
        }
    }

    #[tokio::test]
    async fn test_generate_posts_context_and_returns_vault_item() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "context": {"topic": "cats"},
                "vaultItem": {"name": "Cats"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"prompt": "Write about cats", "vaultItem": {"vaultId": "v1", "name": "Cats"}}"#)
            .create_async()
            .await;

        let input = HashMap::from([("topic".to_string(), "cats".to_string())]);
        let hint = VaultItem::named("t1", "Cats", "");
        let generated = service(&server)
            .generate(&template(), &input, Some(&hint))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(generated.prompt, "Write about cats");
        assert_eq!(
            generated.vault_item.and_then(|v| v.vault_id).as_deref(),
            Some("v1")
        );
    }

    #[tokio::test]
    async fn test_refine_routes_by_kind() {
        let mut server = Server::new_async().await;
        let prompt_mock = server
            .mock("POST", "/refine/prompt")
            .match_body(Matcher::PartialJson(json!({
                "prompt": "p",
                "refinementType": "shorter",
                "vaultId": "v1"
            })))
            .with_status(200)
            .with_body(r#"{"refinedPrompt": "p2"}"#)
            .create_async()
            .await;
        let content_mock = server
            .mock("POST", "/refine/content")
            .match_body(Matcher::PartialJson(json!({"content": "c"})))
            .with_status(200)
            .with_body(r#"{"refinedContent": "c2"}"#)
            .create_async()
            .await;

        let service = service(&server);
        let refined = service
            .refine(RefinementKind::Prompt, "p", "shorter", Some("v1"))
            .await
            .unwrap();
        let content = service
            .refine(RefinementKind::Content, "c", "formal", None)
            .await
            .unwrap();

        prompt_mock.assert_async().await;
        content_mock.assert_async().await;
        assert_eq!(refined, "p2");
        assert_eq!(content, "c2");
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/ai-generate")
            .with_status(500)
            .with_body(r#"{"error": "model overloaded"}"#)
            .create_async()
            .await;

        let err = service(&server)
            .generate_content("p", false, None)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            EpromptError::remote("generate_content", "model overloaded")
        );
    }

    #[tokio::test]
    async fn test_plain_text_error_body_is_surfaced() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/template/all")
            .with_status(503)
            .with_body("  upstream down\n")
            .create_async()
            .await;

        let err = service(&server).list_templates().await.unwrap_err();
        assert_eq!(err, EpromptError::remote("list_templates", "upstream down"));
    }

    #[tokio::test]
    async fn test_error_without_body_reports_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/template/all")
            .with_status(503)
            .create_async()
            .await;

        let err = service(&server).list_templates().await.unwrap_err();
        assert_eq!(err, EpromptError::remote("list_templates", "HTTP 503"));
    }

    #[tokio::test]
    async fn test_search_sends_limit_and_parses_categories() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/search")
            .match_body(Matcher::Json(json!({"query": "template: review", "limit": 5})))
            .with_status(200)
            .with_body(r#"{"template": [{"id": "t1", "name": "Review Code"}], "vault": []}"#)
            .create_async()
            .await;

        let results = service(&server).search("template: review", 5).await.unwrap();

        mock.assert_async().await;
        assert_eq!(results.template[0].id, "t1");
        assert_eq!(results.total(), 1);
    }

    #[tokio::test]
    async fn test_search_treats_array_as_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/search")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        assert!(service(&server).search("x", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_vault_endpoints() {
        let mut server = Server::new_async().await;
        let list = server
            .mock("GET", "/vault/user/u1")
            .with_status(200)
            .with_body(r#"[{"vaultId": "v1", "name": "Cats", "initialPrompt": "p"}]"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/vault/delete/v1")
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;
        let save = server
            .mock("POST", "/vault/update")
            .match_body(Matcher::PartialJson(json!({"vaultId": "v1", "name": "Dogs"})))
            .with_status(200)
            .with_body(r#"{"vaultItem": {"vaultId": "v1", "name": "Dogs", "updatedAt": "2024-01-01"}}"#)
            .create_async()
            .await;

        let service = service(&server);
        let items = service.list_vault_items("u1").await.unwrap();
        assert_eq!(items[0].initial_prompt.as_deref(), Some("p"));

        let mut item = items[0].clone();
        item.name = "Dogs".to_string();
        let saved = service.save_vault_item(&item).await.unwrap();
        assert_eq!(saved.updated_at.as_deref(), Some("2024-01-01"));

        service.delete_vault_item("v1").await.unwrap();

        list.assert_async().await;
        save.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_refinement_tools_by_mode() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/refine/types")
            .with_status(200)
            .with_body(
                r#"{"content": {"types": ["formal"], "tools": [{"id": "formal", "name": "Formal", "icon": "briefcase"}]}}"#,
            )
            .expect(2)
            .create_async()
            .await;

        let service = service(&server);
        assert!(
            service
                .list_refinement_tools(RefinementKind::Prompt)
                .await
                .unwrap()
                .is_empty()
        );
        let tools = service
            .list_refinement_tools(RefinementKind::Content)
            .await
            .unwrap();
        assert_eq!(tools[0].icon, "briefcase");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_remote_error() {
        let service =
            HttpPromptService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = service.list_templates().await.unwrap_err();
        assert!(err.is_remote());
    }
}

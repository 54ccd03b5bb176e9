//! Team assistant chat contract
//!
//! Provider routing only: the hosted LLM clients live behind `ChatProvider`.
//! A request names a provider; the secondary provider can be asked directly,
//! anything else goes to the primary's model list first and falls back to the
//! secondary once that list is exhausted.

use crate::error::Result;
use crate::models::{ResultsBook, RosterData};
use serde::{Deserialize, Serialize};

pub const PRIMARY_DEFAULT_MODELS: [&str; 3] = ["gemini-1.5-flash", "gemini-1.5-pro", "gemini-2.0-flash"];
pub const FALLBACK_NOTE: &str = "Reply generated by the fallback provider after the primary provider failed";
pub const FAILURE_STATUS: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    #[serde(rename = "modelUsed")]
    pub model_used: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFailure {
    pub error: String,
}

/// Text plus the concrete model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

pub trait ChatProvider {
    /// Routing key, e.g. "gemini" or "groq".
    fn name(&self) -> &str;

    /// Human label used in `modelUsed`.
    fn label(&self) -> &str;

    /// `model` is `None` when the provider should use its own default.
    fn complete(&self, model: Option<&str>, system: &str, messages: &[ChatMessage]) -> Result<Completion>;
}

pub struct ChatRouter {
    primary: Box<dyn ChatProvider>,
    secondary: Box<dyn ChatProvider>,
    primary_models: Vec<String>,
}

impl ChatRouter {
    pub fn new(primary: Box<dyn ChatProvider>, secondary: Box<dyn ChatProvider>) -> Self {
        Self {
            primary,
            secondary,
            primary_models: PRIMARY_DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn with_primary_models(mut self, models: Vec<String>) -> Self {
        self.primary_models = models;
        self
    }

    /// Models tried on the primary, in order. A requested model naming the
    /// primary goes first.
    pub fn primary_candidates(&self, requested: Option<&str>) -> Vec<String> {
        let mut models = Vec::new();
        if let Some(model) = requested.filter(|m| m.contains(self.primary.name())) {
            models.push(model.to_string());
        }
        models.extend(self.primary_models.iter().cloned());
        models
    }

    /// Route one request. Exactly one provider call succeeds or the request fails.
    pub fn route(&self, request: &ChatRequest, system: &str) -> std::result::Result<ChatReply, ChatFailure> {
        let messages: Vec<ChatMessage> =
            request.messages.iter().filter(|m| m.role != ChatRole::System).cloned().collect();
        let provider = request
            .provider
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.secondary.name().to_string());

        if provider == self.secondary.name() {
            return match self.secondary.complete(None, system, &messages) {
                Ok(done) => Ok(ChatReply {
                    content: done.text,
                    model_used: format!("{} ({})", self.secondary.label(), done.model),
                }),
                Err(e) => Err(ChatFailure { error: e.to_string() }),
            };
        }

        let mut last_error = None;
        for model in self.primary_candidates(request.model.as_deref()) {
            match self.primary.complete(Some(&model), system, &messages) {
                Ok(done) => {
                    return Ok(ChatReply {
                        content: done.text,
                        model_used: format!("{} ({})", self.primary.label(), done.model),
                    })
                }
                Err(e) => {
                    log::warn!("{} model {} failed: {}", self.primary.label(), model, e);
                    last_error = Some(e.to_string());
                }
            }
        }
        let primary_error = format!(
            "{} models exhausted: {}",
            self.primary.label(),
            last_error.unwrap_or_else(|| "no models configured".to_string())
        );
        log::warn!("{}; trying {}", primary_error, self.secondary.label());

        match self.secondary.complete(None, system, &messages) {
            Ok(done) => Ok(ChatReply {
                content: format!("{}\n{}", done.text, FALLBACK_NOTE),
                model_used: format!("{} Fallback ({})", self.secondary.label(), done.model),
            }),
            Err(e) => Err(ChatFailure {
                error: format!(
                    "All providers failed. {}: {}. {}: {}",
                    self.primary.label(),
                    primary_error,
                    self.secondary.label(),
                    e
                ),
            }),
        }
    }

    /// HTTP-shaped entry point: `(status, body)`.
    pub fn handle_json(&self, body: &str, roster: &RosterData, results: &ResultsBook) -> (u16, String) {
        let outcome = serde_json::from_str::<ChatRequest>(body)
            .map_err(|e| ChatFailure { error: format!("Invalid chat request: {e}") })
            .and_then(|request| self.route(&request, &build_system_context(roster, results)));
        let (status, json) = match outcome {
            Ok(reply) => (200, serde_json::to_string(&reply)),
            Err(failure) => (FAILURE_STATUS, serde_json::to_string(&failure)),
        };
        match json {
            Ok(json) => (status, json),
            Err(e) => (FAILURE_STATUS, format!(r#"{{"error":"{}"}}"#, e)),
        }
    }
}

/// System prompt grounding the assistant in the club's own data.
pub fn build_system_context(roster: &RosterData, results: &ResultsBook) -> String {
    let roster_json = serde_json::to_string_pretty(roster).unwrap_or_else(|_| "{}".to_string());
    let results_json = serde_json::to_string_pretty(results).unwrap_or_else(|_| "{}".to_string());
    format!(
        "ROLE: You are the technical assistant of the team's head coach.\n\
         GOAL: Help the coach decide using ONLY the team data below.\n\
         \n\
         TEAM DATA (do not invent players):\n{roster_json}\n\
         \n\
         RECENT RESULTS:\n{results_json}\n\
         \n\
         KEY INSTRUCTIONS:\n\
         1. Be technical but encouraging. Answer in Spanish.\n\
         2. Use the exact player names from the data.\n\
         3. When suggesting a lineup, list only `Position: Name` lines, nothing else per player.\n\
         4. Bring up past match strengths and improvements only when asked for analysis.\n\
         5. The team plays 6-a-side: a complete lineup has 6 players including the goalkeeper.\n\
         6. Keep answers short. Do not propose a lineup unless asked.\n\
         7. Do not discuss other teams or general football unless as a tactical example.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{default_results, default_roster_data};
    use crate::error::LineupError;
    use std::cell::RefCell;

    /// Provider that fails for listed models and records every call.
    struct Scripted {
        name: &'static str,
        label: &'static str,
        default_model: &'static str,
        failing: Vec<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(name: &'static str, label: &'static str, default_model: &'static str) -> Self {
            Self { name, label, default_model, failing: Vec::new(), calls: RefCell::new(Vec::new()) }
        }

        fn failing(mut self, models: &[&'static str]) -> Self {
            self.failing.extend_from_slice(models);
            self
        }
    }

    impl ChatProvider for std::rc::Rc<Scripted> {
        fn name(&self) -> &str {
            self.name
        }

        fn label(&self) -> &str {
            self.label
        }

        fn complete(&self, model: Option<&str>, _system: &str, messages: &[ChatMessage]) -> Result<Completion> {
            let model = model.unwrap_or(self.default_model).to_string();
            self.calls.borrow_mut().push(model.clone());
            if self.failing.contains(&model.as_str()) || self.failing.contains(&"*") {
                return Err(LineupError::provider(self.name, format!("{model} unavailable")));
            }
            let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
            Ok(Completion { text: format!("re: {last}"), model })
        }
    }

    fn router(gemini: Scripted, groq: Scripted) -> (ChatRouter, std::rc::Rc<Scripted>, std::rc::Rc<Scripted>) {
        let gemini = std::rc::Rc::new(gemini);
        let groq = std::rc::Rc::new(groq);
        let router = ChatRouter::new(Box::new(gemini.clone()), Box::new(groq.clone()));
        (router, gemini, groq)
    }

    fn gemini() -> Scripted {
        Scripted::new("gemini", "Gemini", "gemini-1.5-flash")
    }

    fn groq() -> Scripted {
        Scripted::new("groq", "Groq", "llama-3.3-70b-versatile")
    }

    fn request(provider: Option<&str>, model: Option<&str>) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage { role: ChatRole::System, content: "ignored".into() },
                ChatMessage::user("who plays in goal?"),
            ],
            provider: provider.map(str::to_string),
            model: model.map(str::to_string),
        }
    }

    #[test]
    fn test_groq_is_called_directly() {
        let (router, gemini, groq) = router(gemini(), groq());
        let reply = router.route(&request(Some("Groq"), None), "ctx").unwrap();
        assert_eq!(reply.model_used, "Groq (llama-3.3-70b-versatile)");
        assert!(gemini.calls.borrow().is_empty());
        assert_eq!(groq.calls.borrow().len(), 1);
    }

    #[test]
    fn test_missing_provider_defaults_to_groq() {
        let (router, gemini, _) = router(gemini(), groq());
        router.route(&request(None, None), "ctx").unwrap();
        assert!(gemini.calls.borrow().is_empty());
    }

    #[test]
    fn test_requested_primary_model_goes_first() {
        let (router, gemini, _) = router(gemini().failing(&["gemini-exp"]), groq());
        let reply = router.route(&request(Some("gemini"), Some("gemini-exp")), "ctx").unwrap();
        assert_eq!(reply.model_used, "Gemini (gemini-1.5-flash)");
        assert_eq!(reply.content, "re: who plays in goal?");
        assert_eq!(*gemini.calls.borrow(), vec!["gemini-exp", "gemini-1.5-flash"]);
    }

    #[test]
    fn test_non_primary_model_is_ignored() {
        let (router, _, _) = router(gemini(), groq());
        assert_eq!(router.primary_candidates(Some("llama-3")), PRIMARY_DEFAULT_MODELS.to_vec());
    }

    #[test]
    fn test_exhausted_primary_falls_back_with_note() {
        let (router, gemini, groq) = router(gemini().failing(&["*"]), groq());
        let reply = router.route(&request(Some("gemini"), None), "ctx").unwrap();
        assert_eq!(gemini.calls.borrow().len(), 3);
        assert_eq!(groq.calls.borrow().len(), 1);
        assert_eq!(reply.model_used, "Groq Fallback (llama-3.3-70b-versatile)");
        assert!(reply.content.ends_with(FALLBACK_NOTE));
    }

    #[test]
    fn test_total_failure_is_status_500() {
        let (router, _, _) = router(gemini().failing(&["*"]), groq().failing(&["*"]));
        let body = r#"{ "messages": [{ "role": "user", "content": "hola" }], "provider": "gemini" }"#;
        let (status, json) = router.handle_json(body, default_roster_data(), default_results());
        assert_eq!(status, FAILURE_STATUS);
        let failure: ChatFailure = serde_json::from_str(&json).unwrap();
        assert!(failure.error.starts_with("All providers failed."));
    }

    #[test]
    fn test_handle_json_success_wire_shape() {
        let (router, _, _) = router(gemini(), groq());
        let body = r#"{ "messages": [{ "role": "user", "content": "hola" }], "provider": "gemini" }"#;
        let (status, json) = router.handle_json(body, default_roster_data(), default_results());
        assert_eq!(status, 200);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["modelUsed"], "Gemini (gemini-1.5-flash)");

        let (status, _) = router.handle_json("{", default_roster_data(), default_results());
        assert_eq!(status, FAILURE_STATUS);
    }

    #[test]
    fn test_system_context_embeds_data() {
        let context = build_system_context(default_roster_data(), default_results());
        assert!(context.contains("Fernando Senior"));
        assert!(context.contains("Auto Aprender"));
        assert!(context.contains("6-a-side"));
    }
}

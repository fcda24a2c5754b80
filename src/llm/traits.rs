use super::types::{ChatMessage, CompletionRequest, ProviderResponse};
use crate::error::LlmError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LlmError>> + Send + 'a>>;

pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "anthropic", "minimax").
    fn name(&self) -> &str;

    /// Issue exactly one outbound call for `request`.
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> ProviderFuture<'a, ProviderResponse>;

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
    ) -> ProviderFuture<'a, String> {
        Box::pin(async move {
            let mut request = CompletionRequest::new(model, vec![ChatMessage::user(message)]);
            request.system = system_prompt.map(ToString::to_string);
            let response = self.complete(&request).await?;
            Ok(response.visible_text())
        })
    }
}

impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> ProviderFuture<'a, ProviderResponse> {
        (**self).complete(request)
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> ProviderFuture<'a, ProviderResponse> {
        (**self).complete(request)
    }
}

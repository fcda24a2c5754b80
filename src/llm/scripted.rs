//! In-process provider that replays canned responses and records requests.

use super::traits::{Provider, ProviderFuture};
use super::types::{CompletionRequest, ProviderResponse};
use crate::error::LlmError;
use std::collections::VecDeque;
use std::sync::Mutex;

pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<ProviderResponse, LlmError>>>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new(replies: impl IntoIterator<Item = Result<ProviderResponse, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::new([Ok(ProviderResponse::text_only(text))])
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> ProviderFuture<'a, ProviderResponse> {
        Box::pin(async move {
            self.seen.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ProviderResponse::text_only("")))
        })
    }
}

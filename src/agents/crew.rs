//! Crew - runs one task on one agent.
//!
//! # Execution Flow
//! 1. Render the agent persona as the system prompt
//! 2. Render the task description and expected output as the user prompt
//! 3. Await a single chat completion (optionally bounded by a timeout)
//! 4. Return the assistant text unchanged

use std::time::{Duration, Instant};

use crate::agents::Agent;
use crate::llm::{ChatMessage, LlmError};
use crate::task::Task;

/// One agent, one task.
pub struct Crew<'a> {
    agent: &'a Agent,
    task: Task,
}

impl<'a> Crew<'a> {
    pub fn new(agent: &'a Agent, task: Task) -> Self {
        Self { agent, task }
    }

    /// Build the chat messages for the task.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.agent.persona().system_prompt()),
            ChatMessage::user(self.task.prompt()),
        ]
    }

    /// Run the task and return the model's text.
    ///
    /// With `timeout == None` the call waits as long as the provider does.
    ///
    /// # Errors
    /// Any provider failure, a response without text, or an elapsed timeout.
    pub async fn kickoff(&self, timeout: Option<Duration>) -> Result<String, LlmError> {
        let messages = self.messages();
        let model = self.agent.model().name();
        let started = Instant::now();

        tracing::info!(
            task_id = %self.task.id(),
            agent_id = %self.agent.id(),
            model = %self.agent.model(),
            "Crew kickoff"
        );

        let call = self
            .agent
            .llm()
            .chat_completion(model, &messages, self.agent.options());

        let response = match timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| LlmError::timeout(limit))??,
            None => call.await?,
        };

        if let Some(usage) = &response.usage {
            tracing::debug!(
                task_id = %self.task.id(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Token usage"
            );
        }

        let content = response
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                LlmError::empty_response(format!(
                    "model returned no text (finish_reason: {})",
                    response.finish_reason.as_deref().unwrap_or("unknown")
                ))
            })?;

        tracing::info!(
            task_id = %self.task.id(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = content.len(),
            "Crew finished"
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Persona;
    use crate::llm::{ChatOptions, ChatResponse, LlmClient, LlmErrorKind};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Records the request and answers with a canned reply.
    struct RecordingClient {
        reply: Option<String>,
        delay: Duration,
        seen: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    }

    impl RecordingClient {
        fn replying(reply: Option<&str>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmClient for RecordingClient {
        async fn chat_completion(
            &self,
            model: &str,
            messages: &[ChatMessage],
            _options: &ChatOptions,
        ) -> Result<ChatResponse, LlmError> {
            self.seen
                .lock()
                .unwrap()
                .push((model.to_string(), messages.to_vec()));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(ChatResponse {
                content: self.reply.clone(),
                finish_reason: Some("stop".to_string()),
                usage: None,
                model: Some(model.to_string()),
            })
        }
    }

    fn agent(client: Arc<RecordingClient>) -> Agent {
        Agent::new(
            Persona::architect(),
            "huggingface/meta-llama/Meta-Llama-3-8B-Instruct".parse().unwrap(),
            client,
        )
    }

    #[tokio::test]
    async fn test_kickoff_sends_persona_and_task() {
        let client = Arc::new(RecordingClient::replying(Some("### Step 1: Scope")));
        let agent = agent(Arc::clone(&client));
        let crew = Crew::new(&agent, Task::roadmap("a chess engine"));

        let output = crew.kickoff(None).await.unwrap();
        assert_eq!(output, "### Step 1: Scope");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (model, messages) = &seen[0];
        assert_eq!(model, "meta-llama/Meta-Llama-3-8B-Instruct");
        assert_eq!(messages.len(), 2);
        assert!(messages[0].content.starts_with("You are Senior AI Architect"));
        assert!(messages[1].content.contains("roadmap for: a chess engine."));
    }

    #[tokio::test]
    async fn test_kickoff_rejects_blank_output() {
        for reply in [None, Some("  \n")] {
            let client = Arc::new(RecordingClient::replying(reply));
            let agent = agent(client);
            let err = Crew::new(&agent, Task::roadmap("x"))
                .kickoff(None)
                .await
                .unwrap_err();
            assert_eq!(err.kind, LlmErrorKind::EmptyResponse);
        }
    }

    #[tokio::test]
    async fn test_kickoff_honors_timeout() {
        let client = Arc::new(RecordingClient {
            delay: Duration::from_secs(5),
            ..RecordingClient::replying(Some("late"))
        });
        let agent = agent(client);
        let err = Crew::new(&agent, Task::roadmap("x"))
            .kickoff(Some(Duration::from_millis(20)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, LlmErrorKind::Timeout);
    }
}

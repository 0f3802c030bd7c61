// src/controller.rs

use crate::constants::REPLY_DELAY;
use crate::input::InputSource;
use crate::message::Sender;
use crate::responder::select_response;
use crate::transcript::TranscriptSink;
use crossterm::event::KeyCode;
use log::debug;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Events coming from the trigger source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The send control was activated.
    Send,
    /// A key was pressed while the input field had focus.
    Key(KeyCode),
}

/// Turns send triggers into a user entry followed, after [`REPLY_DELAY`], by a
/// bot entry.
pub struct SubmissionController<I, L> {
    input: Arc<Mutex<I>>,
    log: Arc<Mutex<L>>,
}

impl<I, L> SubmissionController<I, L>
where
    I: InputSource + 'static,
    L: TranscriptSink + 'static,
{
    pub fn new(input: Arc<Mutex<I>>, log: Arc<Mutex<L>>) -> Self {
        Self { input, log }
    }

    /// Consumes triggers until the sending side is dropped.
    pub async fn run(self, mut triggers: mpsc::Receiver<Trigger>) {
        while let Some(trigger) = triggers.recv().await {
            self.handle(trigger).await;
        }
        debug!("Trigger source closed, controller stopping");
    }

    pub async fn handle(&self, trigger: Trigger) -> Option<JoinHandle<()>> {
        match trigger {
            Trigger::Send | Trigger::Key(KeyCode::Enter) => self.submit().await,
            Trigger::Key(_) => None,
        }
    }

    /// Renders the pending input and schedules the reply. Blank input is a
    /// no-op and leaves the field untouched.
    pub async fn submit(&self) -> Option<JoinHandle<()>> {
        let message = {
            let mut input = self.input.lock().await;
            let message = input.value().trim().to_string();
            if message.is_empty() {
                return None;
            }
            input.clear();
            message
        };

        self.log.lock().await.render(&message, Sender::User);
        debug!("Accepted submission ({} chars)", message.len());

        let log = Arc::clone(&self.log);
        Some(tokio::spawn(async move {
            sleep(REPLY_DELAY).await;
            let response = select_response(&message);
            log.lock().await.render(&response, Sender::Bot);
            debug!("Delivered reply for {:?}", message);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FAREWELL_REPLY, GREETING_REPLY};
    use crate::input::InputField;
    use crate::transcript::ChatLog;
    use std::time::Duration;
    use tokio::time;

    fn setup(text: &str) -> (
        SubmissionController<InputField, ChatLog>,
        Arc<Mutex<InputField>>,
        Arc<Mutex<ChatLog>>,
    ) {
        let mut field = InputField::new();
        field.set(text);
        let input = Arc::new(Mutex::new(field));
        let log = Arc::new(Mutex::new(ChatLog::new()));
        let controller = SubmissionController::new(input.clone(), log.clone());
        (controller, input, log)
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_submission_is_ignored() {
        let (controller, input, log) = setup("   ");

        assert!(controller.submit().await.is_none());
        time::advance(Duration::from_secs(1)).await;

        assert!(log.lock().await.is_empty());
        assert_eq!(input.lock().await.value(), "   ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hi_produces_user_then_bot_entry() {
        let (controller, input, log) = setup("  hi ");

        let pending = controller.submit().await.expect("reply scheduled");
        assert!(input.lock().await.is_empty());
        {
            let log = log.lock().await;
            assert_eq!(log.len(), 1);
            assert_eq!(log.entries()[0].text, "hi");
            assert_eq!(log.entries()[0].sender, Sender::User);
        }

        pending.await.unwrap();

        let log = log.lock().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].text, GREETING_REPLY);
        assert_eq!(log.entries()[1].sender, Sender::Bot);
        assert_eq!(log.scroll_anchor(), 1);
        assert!(log.is_at_latest());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let (controller, _input, log) = setup("bye");

        let pending = controller.submit().await.unwrap();
        tokio::task::yield_now().await;
        time::advance(Duration::from_millis(499)).await;
        tokio::task::yield_now().await;
        assert_eq!(log.lock().await.len(), 1);

        time::advance(Duration::from_millis(1)).await;
        pending.await.unwrap();
        let log = log.lock().await;
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[1].text, FAREWELL_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_key_is_send_alias() {
        let (controller, _input, log) = setup("hello");
        let pending = controller.handle(Trigger::Key(KeyCode::Enter)).await;
        pending.expect("enter submits").await.unwrap();
        assert_eq!(log.lock().await.len(), 2);

        let (controller, input, log) = setup("hello");
        assert!(controller.handle(Trigger::Key(KeyCode::Tab)).await.is_none());
        assert!(log.lock().await.is_empty());
        assert_eq!(input.lock().await.value(), "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_submissions_are_not_coalesced() {
        let (controller, input, log) = setup("hi");

        let first = controller.handle(Trigger::Send).await.unwrap();
        tokio::task::yield_now().await;
        time::advance(Duration::from_millis(10)).await;
        input.lock().await.set("bye");
        let second = controller.handle(Trigger::Send).await.unwrap();

        first.await.unwrap();
        second.await.unwrap();

        let log = log.lock().await;
        let senders: Vec<Sender> = log.entries().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::User, Sender::Bot, Sender::Bot]
        );
        assert_eq!(log.entries()[2].text, GREETING_REPLY);
        assert_eq!(log.entries()[3].text, FAREWELL_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_drains_trigger_source() {
        let (controller, _input, log) = setup("hi");
        let (tx, rx) = mpsc::channel(8);
        let runner = tokio::spawn(controller.run(rx));

        tx.send(Trigger::Send).await.unwrap();
        drop(tx);
        runner.await.unwrap();

        time::sleep(Duration::from_millis(600)).await;
        assert_eq!(log.lock().await.len(), 2);
    }
}

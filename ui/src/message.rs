//! Transient feedback banner.
//!
//! Every operation outcome, success or error, lands in one shared message
//! area that dismisses itself after five seconds. There is no queue: a
//! newer message simply overwrites the current one, and the stale
//! dismiss timer is ignored via a sequence check.

use dioxus::prelude::*;
use std::time::Duration;

const DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    text: String,
    kind: MessageKind,
    seq: u64,
}

/// Handle to the shared message area. Cheap to copy into event handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Messages {
    current: Signal<Option<Entry>>,
    seq: Signal<u64>,
}

impl Messages {
    pub fn success(&mut self, text: impl Into<String>) {
        self.show(text.into(), MessageKind::Success);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(text.into(), MessageKind::Error);
    }

    fn show(&mut self, text: String, kind: MessageKind) {
        let seq = self.seq.peek().wrapping_add(1);
        self.seq.set(seq);
        self.current.set(Some(Entry { text, kind, seq }));

        let mut current = self.current;
        let seq_signal = self.seq;
        spawn(async move {
            sleep(DISMISS_AFTER).await;
            // Only dismiss if no newer message replaced this one.
            if *seq_signal.peek() == seq {
                current.set(None);
            }
        });
    }
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Get the shared message handle.
pub fn use_messages() -> Messages {
    use_context::<Messages>()
}

/// Provider component for the message area. Wrap the app with it and put
/// a [`MessageBanner`] wherever the feedback should appear.
#[component]
pub fn MessageProvider(children: Element) -> Element {
    let current = use_signal(|| Option::<Entry>::None);
    let seq = use_signal(|| 0u64);
    use_context_provider(|| Messages { current, seq });

    rsx! {
        {children}
    }
}

/// The message area itself.
#[component]
pub fn MessageBanner() -> Element {
    let messages = use_messages();
    let entry = messages.current.read().clone();

    match entry {
        Some(entry) => {
            let class = format!("message {} show", entry.kind.class());
            rsx! {
                div { class: "{class}", "{entry.text}" }
            }
        }
        None => rsx! {},
    }
}

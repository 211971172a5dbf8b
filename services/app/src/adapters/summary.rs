//! services/app/src/adapters/summary.rs
//!
//! Thread summarisation as a pure string template. Unlike refinement and idea
//! generation there is no simulated latency here; summaries render inline.

use openhealth_core::domain::Thread;
use openhealth_core::ports::ThreadSummaryService;

/// An adapter that renders the canned per-thread "AI" summary.
#[derive(Clone, Default)]
pub struct TemplateSummaryAdapter;

impl ThreadSummaryService for TemplateSummaryAdapter {
    fn summarize(&self, thread: &Thread) -> String {
        if thread.messages.is_empty() {
            return "No messages yet. Start the conversation to get an AI-generated summary."
                .to_string();
        }
        let count = thread.messages.len();
        let plural = if count == 1 { "" } else { "s" };
        format!(
            "AI Summary: This thread explores \"{}\" with {} contribution{}. Key themes \
             include leveraging machine learning and clinical data integration. Contributors \
             have proposed technology-forward approaches with potential for high clinical \
             impact. Recommended next steps: prototype development and clinical validation \
             study.",
            thread.title, count, plural
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openhealth_core::domain::Message;
    use openhealth_core::ports::ThreadSummaryService;

    fn thread_with(messages: usize) -> Thread {
        Thread {
            id: "1".into(),
            title: "Drug Interaction Safety".into(),
            problem_id: "1".into(),
            messages: (0..messages)
                .map(|i| Message {
                    id: format!("m{}", i),
                    content: "text".into(),
                    author: "A".into(),
                    timestamp: 0,
                    thread_id: "1".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_thread_invites_conversation() {
        let summary = TemplateSummaryAdapter.summarize(&thread_with(0));
        assert!(summary.starts_with("No messages yet."));
    }

    #[test]
    fn summary_counts_contributions_with_plural() {
        let one = TemplateSummaryAdapter.summarize(&thread_with(1));
        assert!(one.contains("with 1 contribution."));
        let two = TemplateSummaryAdapter.summarize(&thread_with(2));
        assert!(two.contains("with 2 contributions."));
        assert!(two.contains("\"Drug Interaction Safety\""));
    }
}

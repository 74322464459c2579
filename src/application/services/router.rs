//! Keyword routing for inbound customer messages.

use crate::domain::models::InboundMessage;

struct ReplyRule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Ordered list of (keywords, canned reply) rules. Evaluation is linear
/// substring containment over the lower-cased body; the first rule with any
/// matching keyword wins. No match means no reply.
pub struct AutoReplyRouter {
    rules: Vec<ReplyRule>,
}

impl Default for AutoReplyRouter {
    fn default() -> Self {
        Self {
            rules: vec![
                ReplyRule {
                    keywords: &["hello", "hi"],
                    reply: "👋 Hello! Thanks for reaching out to FarmLink. \
                            How can we help you today?",
                },
                ReplyRule {
                    keywords: &["order", "track"],
                    reply: "📦 To check on your order, open the FarmLink app and go to \
                            My Orders. We also message you here whenever the status changes.",
                },
                ReplyRule {
                    keywords: &["help", "support"],
                    reply: "🛟 Our support team is happy to help! Email \
                            support@farmlink.example or call 0800-327-654 during \
                            business hours.",
                },
            ],
        }
    }
}

impl AutoReplyRouter {
    pub fn route(&self, message: &InboundMessage) -> Option<String> {
        let body = message.body.trim().to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| body.contains(kw)))
            .map(|rule| rule.reply.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(body: &str) -> InboundMessage {
        InboundMessage {
            sender: "254700000001".to_string(),
            body: body.to_string(),
            contact_name: None,
        }
    }

    #[test]
    fn greeting_matches() {
        let router = AutoReplyRouter::default();
        let reply = router.route(&inbound("Hi there")).unwrap();
        assert!(reply.contains("Hello"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let router = AutoReplyRouter::default();
        assert!(router.route(&inbound("WHERE IS MY ORDER?")).is_some());
    }

    #[test]
    fn first_match_wins_on_overlap() {
        let router = AutoReplyRouter::default();
        // Contains both a greeting and a help keyword; the greeting rule is
        // listed first and must win.
        let reply = router.route(&inbound("hi, I need help")).unwrap();
        assert!(reply.contains("Hello"));
        assert!(!reply.contains("support team"));
    }

    #[test]
    fn unmatched_body_is_silent() {
        let router = AutoReplyRouter::default();
        assert!(router.route(&inbound("xyz unrelated")).is_none());
    }
}

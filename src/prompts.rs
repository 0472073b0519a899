use serde::Serialize;

pub const SUMMARIZE_WHALE_ACTIVITY: &str = "summarize_whale_activity";

/// Prompt definition as advertised by `prompts/list`.
#[derive(Debug, Clone, Serialize)]
pub struct PromptDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

/// Argument entry in a prompt descriptor; `summarize_whale_activity` takes none.
#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromptContent {
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: PromptContent,
}

impl PromptMessage {
    fn text(role: Role, text: &str) -> Self {
        Self {
            role,
            content: PromptContent::Text {
                text: text.to_string(),
            },
        }
    }
}

/// Result of `prompts/get`.
#[derive(Debug, Clone, Serialize)]
pub struct PromptResult {
    pub description: &'static str,
    pub messages: Vec<PromptMessage>,
}

const SUMMARIZE_DESCRIPTION: &str = "Summarize recent whale activity";

pub fn list_prompts() -> Vec<PromptDescriptor> {
    vec![PromptDescriptor {
        name: SUMMARIZE_WHALE_ACTIVITY,
        description: SUMMARIZE_DESCRIPTION,
        arguments: Vec::new(),
    }]
}

/// Look up a prompt by name.
pub fn get_prompt(name: &str) -> Option<PromptResult> {
    match name {
        SUMMARIZE_WHALE_ACTIVITY => Some(PromptResult {
            description: SUMMARIZE_DESCRIPTION,
            messages: summarize_whale_activity(),
        }),
        _ => None,
    }
}

pub fn summarize_whale_activity() -> Vec<PromptMessage> {
    vec![
        PromptMessage::text(
            Role::User,
            "Summarize recent whale transactions on Hyperliquid. \
             Include key metrics like total position value, number of transactions, \
             and notable symbols.",
        ),
        PromptMessage::text(
            Role::Assistant,
            "I'll analyze the whale transaction data and provide a summary.",
        ),
    ]
}

//! Offline replies keyed on words in the user's message.

use super::{AssistantContext, AssistantError, TextCompletion};

const START_REPLY: &str = "Great! Let's start building your business process flow. First, drag some entities from the left panel onto the canvas. These will be your data sources (like customers, orders, or inventory).";

const CONNECT_REPLY: &str = "Perfect! Now you need to connect your entities. Try dragging from one node's output handle to another node's input handle. You can also add Join nodes to specify how entities should be related.";

const HELP_REPLY: &str = "I'm here to help you build business process flows! Here's what you can do:\n\n\
• **Drag Entities**: Start by dragging entities from the left panel\n\
• **Add Conditions**: Use condition nodes to specify business rules\n\
• **Connect Nodes**: Link nodes to create flow logic\n\
• **Configure Actions**: Define what happens when conditions are met\n\n\
What specific aspect would you like help with?";

const ENTITY_REPLY: &str = "Entities are your data sources. Each entity represents a table or dataset:\n\n\
• **Customer Entity**: Contains customer information\n\
• **Sales Entity**: Contains order and transaction data\n\
• **Inventory Entity**: Contains product and stock information\n\
• **System Entity**: Contains system metrics and logs\n\n\
Drag these onto the canvas to start building your flow!";

const CONDITION_REPLY: &str = "Conditions define when actions should be triggered. You can create conditions like:\n\n\
• `customer.status = 'active'`\n\
• `order.amount > 1000`\n\
• `inventory.quantity < threshold`\n\
• `system.error_rate > 5%`\n\n\
These conditions determine when your business process should execute.";

const ACTION_REPLY: &str = "Actions are what happen when conditions are met. Common actions include:\n\n\
• **Send Notifications**: Alert managers or users\n\
• **Trigger Calculations**: Perform business logic\n\
• **Create Alerts**: Generate system alerts\n\
• **Update Data**: Modify records or status\n\
• **Start Workflows**: Initiate other processes\n\n\
What type of action do you want to configure?";

const EXAMPLE_REPLY: &str = "Here's a common business process example:\n\n\
**High-Value Order Alert Process:**\n\
1. Customer places order (Customer Entity)\n\
2. Order amount > $1000 (Condition)\n\
3. Send notification to manager (Action)\n\n\
Try clicking the 'Test Flow' button to see this example in action!";

const SAVE_REPLY: &str = "You can save your flow in several ways:\n\n\
• **Save Process**: Stores the flow in the system\n\
• **Export JSON**: Download the configuration\n\
• **Copy Configuration**: Copy to clipboard\n\n\
The JSON panel on the right shows your current flow configuration.";

pub const DEFAULT_REPLY: &str = "I understand you're working on a business process flow. I can help you with:\n\n\
• Adding and configuring entities\n\
• Creating business rules and conditions\n\
• Setting up actions and triggers\n\
• Connecting nodes to build flow logic\n\
• Best practices for process automation\n\n\
What specific aspect would you like help with?";

/// Topic replies, checked in order after the canvas-state replies.
const TOPICS: &[(&[&str], &str)] = &[
    (&["help", "how"], HELP_REPLY),
    (&["entity", "data"], ENTITY_REPLY),
    (&["condition", "rule"], CONDITION_REPLY),
    (&["action", "trigger"], ACTION_REPLY),
    (&["example", "sample"], EXAMPLE_REPLY),
    (&["save", "export"], SAVE_REPLY),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAssistant;

impl LocalAssistant {
    pub fn reply(&self, message: &str, context: &AssistantContext) -> &'static str {
        let lower = message.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if context.node_count == 0 && mentions(&["start", "begin"]) {
            return START_REPLY;
        }
        if context.node_count > 0 && context.edge_count == 0 && mentions(&["connect", "link"]) {
            return CONNECT_REPLY;
        }

        TOPICS
            .iter()
            .find(|(words, _)| mentions(words))
            .map(|&(_, reply)| reply)
            .unwrap_or(DEFAULT_REPLY)
    }
}

impl TextCompletion for LocalAssistant {
    fn complete(&self, message: &str, context: &AssistantContext) -> Result<String, AssistantError> {
        Ok(self.reply(message, context).to_string())
    }
}

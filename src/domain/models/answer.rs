use super::Property;

/// What a question answering client hands back for a single question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Answer {
    pub response_text: Option<String>,
    pub engine_label: Option<String>,
    pub properties: Vec<Property>,
}

impl Answer {
    pub fn new(response_text: &str, engine_label: Option<&str>) -> Answer {
        return Answer {
            response_text: Some(response_text.to_string()),
            engine_label: engine_label.map(|e| return e.to_string()),
            properties: vec![],
        };
    }
}

/// Ticket for an ask that has been accepted by a chat session but not yet
/// resolved. The generation pins it to the session state it was issued
/// against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAsk {
    pub question: String,
    pub generation: u64,
}

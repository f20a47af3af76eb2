/// Canned questions offered alongside free text input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickAction {
    Properties,
    VirtualTours,
    Locations,
    Assist,
}

impl QuickAction {
    pub fn question(&self) -> &'static str {
        match self {
            QuickAction::Properties => return "What properties do you have?",
            QuickAction::VirtualTours => return "Do you have any virtual tours available?",
            QuickAction::Locations => return "What locations do you have properties in?",
            QuickAction::Assist => return "What can you help me with regarding real estate?",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Properties => return "View Properties",
            QuickAction::VirtualTours => return "Virtual Tours",
            QuickAction::Locations => return "Locations",
            QuickAction::Assist => return "Get Help",
        }
    }
}

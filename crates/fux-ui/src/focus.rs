use crate::tree::NodeId;

/// The single node that receives key and text input.
#[derive(Debug, Default)]
pub struct FocusOwner {
    owner: Option<NodeId>,
    text_input: bool,
}

impl FocusOwner {
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Whether the platform should be delivering text input.
    pub fn text_input_active(&self) -> bool {
        self.text_input
    }

    /// Releases the current owner, returning it so the caller can run its
    /// focus-lost hook.
    pub fn release(&mut self) -> Option<NodeId> {
        self.text_input = false;
        self.owner.take()
    }

    pub fn assign(&mut self, id: NodeId, wants_text: bool) {
        self.owner = Some(id);
        self.text_input = wants_text;
    }
}

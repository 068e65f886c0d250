use crate::app::Action;

pub const ENTER_KEY: u32 = 13;
pub const ESCAPE_KEY: u32 = 27;

/// Raw interactions reported by the display layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    NewTodoKeyUp { key: u32, value: String },
    ToggleAllChanged { checked: bool },
    ClearCompletedClicked,
    ItemToggled { id: String },
    LabelDoubleClicked { id: String },
    EditKeyUp { id: String, key: u32, value: String },
    EditFocusLost { id: String, value: String },
    DestroyClicked { id: String },
    HashChanged { fragment: String },
}

/// Translates an interaction into the action it triggers, if any.
pub fn translate(event: UiEvent) -> Option<Action> {
    match event {
        UiEvent::NewTodoKeyUp { key, value } => {
            (key == ENTER_KEY).then_some(Action::Create { title: value })
        }
        UiEvent::ToggleAllChanged { checked } => Some(Action::ToggleAll { completed: checked }),
        UiEvent::ClearCompletedClicked => Some(Action::ClearCompleted),
        UiEvent::ItemToggled { id } => Some(Action::Toggle { id }),
        UiEvent::LabelDoubleClicked { id } => Some(Action::StartEdit { id }),
        UiEvent::EditKeyUp { id, key, value } => match key {
            ENTER_KEY => Some(Action::CommitEdit { id, title: value }),
            ESCAPE_KEY => Some(Action::CancelEdit { id }),
            _ => None,
        },
        UiEvent::EditFocusLost { id, value } => Some(Action::CommitEdit { id, title: value }),
        UiEvent::DestroyClicked { id } => Some(Action::Delete { id }),
        UiEvent::HashChanged { fragment } => Some(Action::Route { fragment }),
    }
}

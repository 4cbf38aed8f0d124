//! Named editor commands
//!
//! Commands are what key bindings and menus invoke. Execution lives in
//! [`crate::session::EditorSession::execute`].

use rift_core::Tag;

use crate::mode::SelectionMode;

/// An invokable selection command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Flip the mark on the active element
    ToggleMark,
    /// Empty every marked set
    ClearMarked,
    /// Empty the marked set of the current mode
    ClearCurrentMode,
    MarkAll,
    InvertMarked,
    /// Mark every visible face sharing the active side's textures
    SelectTexture { primary: bool, secondary: bool },
    /// Mark the coplanar region around a side. A tag without a segment means
    /// the active side.
    MarkCoplanar(Tag),
    NextSide,
    PreviousSide,
    NextPoint,
    PreviousPoint,
    NextItem,
    PreviousItem,
    /// Step to the next candidate of the last click
    CycleForward,
    CycleBack,
    SetMode(SelectionMode),
}

impl EditorCommand {
    /// Every command name accepted by [`EditorCommand::from_name`]
    pub const NAMES: [&'static str; 21] = [
        "toggle-mark",
        "clear-marked",
        "clear-current-mode",
        "mark-all",
        "invert-marked",
        "select-texture",
        "mark-coplanar",
        "next-side",
        "previous-side",
        "next-point",
        "previous-point",
        "next-item",
        "previous-item",
        "cycle-forward",
        "cycle-back",
        "mode-segment",
        "mode-face",
        "mode-edge",
        "mode-point",
        "mode-object",
        "select-texture-secondary",
    ];

    /// Stable name used by key bindings
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::ToggleMark => "toggle-mark",
            EditorCommand::ClearMarked => "clear-marked",
            EditorCommand::ClearCurrentMode => "clear-current-mode",
            EditorCommand::MarkAll => "mark-all",
            EditorCommand::InvertMarked => "invert-marked",
            EditorCommand::SelectTexture {
                primary: false,
                secondary: true,
            } => "select-texture-secondary",
            EditorCommand::SelectTexture { .. } => "select-texture",
            EditorCommand::MarkCoplanar(_) => "mark-coplanar",
            EditorCommand::NextSide => "next-side",
            EditorCommand::PreviousSide => "previous-side",
            EditorCommand::NextPoint => "next-point",
            EditorCommand::PreviousPoint => "previous-point",
            EditorCommand::NextItem => "next-item",
            EditorCommand::PreviousItem => "previous-item",
            EditorCommand::CycleForward => "cycle-forward",
            EditorCommand::CycleBack => "cycle-back",
            EditorCommand::SetMode(SelectionMode::Segment) => "mode-segment",
            EditorCommand::SetMode(SelectionMode::Face) => "mode-face",
            EditorCommand::SetMode(SelectionMode::Edge) => "mode-edge",
            EditorCommand::SetMode(SelectionMode::Point) => "mode-point",
            EditorCommand::SetMode(SelectionMode::Object) => "mode-object",
        }
    }

    /// Menu text
    pub fn description(&self) -> &'static str {
        match self {
            EditorCommand::ToggleMark => "Toggle Mark",
            EditorCommand::ClearMarked => "Clear Marked",
            EditorCommand::ClearCurrentMode => "Clear Marked in Mode",
            EditorCommand::MarkAll => "Mark All",
            EditorCommand::InvertMarked => "Invert Marked",
            EditorCommand::SelectTexture { .. } => "Select Faces by Texture",
            EditorCommand::MarkCoplanar(_) => "Mark Coplanar",
            EditorCommand::NextSide => "Next Side",
            EditorCommand::PreviousSide => "Previous Side",
            EditorCommand::NextPoint => "Next Point",
            EditorCommand::PreviousPoint => "Previous Point",
            EditorCommand::NextItem => "Next Item",
            EditorCommand::PreviousItem => "Previous Item",
            EditorCommand::CycleForward => "Select Next Behind",
            EditorCommand::CycleBack => "Select Previous Behind",
            EditorCommand::SetMode(_) => "Set Selection Mode",
        }
    }

    /// Look up a command by its binding name. Parameterised commands get
    /// their common defaults: `select-texture` matches the primary texture
    /// and `mark-coplanar` works on the active side.
    pub fn from_name(name: &str) -> Option<Self> {
        let command = match name {
            "toggle-mark" => EditorCommand::ToggleMark,
            "clear-marked" => EditorCommand::ClearMarked,
            "clear-current-mode" => EditorCommand::ClearCurrentMode,
            "mark-all" => EditorCommand::MarkAll,
            "invert-marked" => EditorCommand::InvertMarked,
            "select-texture" => EditorCommand::SelectTexture {
                primary: true,
                secondary: false,
            },
            "select-texture-secondary" => EditorCommand::SelectTexture {
                primary: false,
                secondary: true,
            },
            "mark-coplanar" => EditorCommand::MarkCoplanar(Tag::default()),
            "next-side" => EditorCommand::NextSide,
            "previous-side" => EditorCommand::PreviousSide,
            "next-point" => EditorCommand::NextPoint,
            "previous-point" => EditorCommand::PreviousPoint,
            "next-item" => EditorCommand::NextItem,
            "previous-item" => EditorCommand::PreviousItem,
            "cycle-forward" => EditorCommand::CycleForward,
            "cycle-back" => EditorCommand::CycleBack,
            "mode-segment" => EditorCommand::SetMode(SelectionMode::Segment),
            "mode-face" => EditorCommand::SetMode(SelectionMode::Face),
            "mode-edge" => EditorCommand::SetMode(SelectionMode::Edge),
            "mode-point" => EditorCommand::SetMode(SelectionMode::Point),
            "mode-object" => EditorCommand::SetMode(SelectionMode::Object),
            _ => return None,
        };
        Some(command)
    }

    /// Whether the command changes the marked sets
    pub fn modifies_marks(&self) -> bool {
        matches!(
            self,
            EditorCommand::ToggleMark
                | EditorCommand::ClearMarked
                | EditorCommand::ClearCurrentMode
                | EditorCommand::MarkAll
                | EditorCommand::InvertMarked
                | EditorCommand::SelectTexture { .. }
                | EditorCommand::MarkCoplanar(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_resolve_to_themselves() {
        for name in EditorCommand::NAMES {
            let command = EditorCommand::from_name(name).unwrap();
            assert_eq!(command.name(), name);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert!(EditorCommand::from_name("delete-everything").is_none());
    }

    #[test]
    fn test_default_parameters() {
        assert_eq!(
            EditorCommand::from_name("mark-coplanar"),
            Some(EditorCommand::MarkCoplanar(Tag::default()))
        );
        assert!(Tag::default().is_none());
        assert_eq!(
            EditorCommand::SelectTexture {
                primary: true,
                secondary: true
            }
            .name(),
            "select-texture"
        );
    }

    #[test]
    fn test_modifies_marks() {
        assert!(EditorCommand::MarkAll.modifies_marks());
        assert!(!EditorCommand::NextSide.modifies_marks());
    }
}
